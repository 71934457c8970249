//! Curation run configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Default target playlist duration: 45 minutes.
pub const DEFAULT_TARGET_SECONDS: u32 = 2700;
/// Default balancing tolerance: 7 minutes either side of target.
pub const DEFAULT_FLEXIBILITY_SECONDS: u32 = 420;
/// Default Greatest Hits split ceiling: 60 minutes.
pub const DEFAULT_GREATEST_HITS_MAX: u32 = 3600;
/// Default Deep Cuts hard ceiling: 48 minutes.
pub const DEFAULT_DEEP_CUTS_MAX: u32 = 2880;
/// Default minimum playlist duration: 30 minutes.
pub const DEFAULT_MINIMUM_DURATION: u32 = 1800;
/// Default Top-N per-album track count.
pub const DEFAULT_TRACK_COUNT: usize = 5;

fn default_target_seconds() -> u32 {
    DEFAULT_TARGET_SECONDS
}
fn default_flexibility_seconds() -> u32 {
    DEFAULT_FLEXIBILITY_SECONDS
}
fn default_greatest_hits_max() -> u32 {
    DEFAULT_GREATEST_HITS_MAX
}
fn default_deep_cuts_max() -> u32 {
    DEFAULT_DEEP_CUTS_MAX
}
fn default_minimum_duration() -> u32 {
    DEFAULT_MINIMUM_DURATION
}
fn default_track_count() -> usize {
    DEFAULT_TRACK_COUNT
}

/// How Top-N emits its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One playlist regardless of duration.
    Single,
    /// Split sequentially into target-duration playlists.
    #[default]
    Split,
}

/// How Top-N orders the combined selection before emitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// Album by album in input order, rank order within each album.
    #[default]
    AlbumOrder,
    /// Flattened by rank across all albums.
    ByRank,
    /// Clustered by artist, rank order within each cluster.
    ByArtist,
    /// Round-robin by rank level, then artist.
    Interleave,
    /// Random shuffle. Non-deterministic unless `shuffle_seed` is set.
    Shuffle,
}

/// Configuration for one `generate()` run.
///
/// Unknown JSON fields are ignored; omitted fields take the documented
/// defaults, so a caller can send `{"algorithm": "balanced_cascade",
/// "ranking": "balanced"}` and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateConfig {
    /// Distribution algorithm id (see the engine registry).
    pub algorithm: String,
    /// Ranking strategy id.
    pub ranking: String,
    #[serde(default = "default_target_seconds")]
    pub target_seconds: u32,
    #[serde(default = "default_flexibility_seconds")]
    pub flexibility_seconds: u32,
    #[serde(default = "default_greatest_hits_max")]
    pub greatest_hits_max: u32,
    #[serde(default = "default_deep_cuts_max")]
    pub deep_cuts_max: u32,
    #[serde(default = "default_minimum_duration")]
    pub minimum_duration: u32,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default)]
    pub grouping: GroupingStrategy,
    /// Top-N per-album selection size.
    #[serde(default = "default_track_count")]
    pub track_count: usize,
    /// Seed for the shuffle grouping. Unseeded shuffles use entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_seed: Option<u32>,
    /// User ranking input: normalized track title -> 1-based rank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_ranks: Option<HashMap<String, u32>>,
}

impl GenerateConfig {
    /// Creates a config with defaults for everything but the ids.
    pub fn new(algorithm: impl Into<String>, ranking: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            ranking: ranking.into(),
            target_seconds: DEFAULT_TARGET_SECONDS,
            flexibility_seconds: DEFAULT_FLEXIBILITY_SECONDS,
            greatest_hits_max: DEFAULT_GREATEST_HITS_MAX,
            deep_cuts_max: DEFAULT_DEEP_CUTS_MAX,
            minimum_duration: DEFAULT_MINIMUM_DURATION,
            output_mode: OutputMode::default(),
            grouping: GroupingStrategy::default(),
            track_count: DEFAULT_TRACK_COUNT,
            shuffle_seed: None,
            user_ranks: None,
        }
    }

    /// Rejects configurations no algorithm can act on.
    ///
    /// Malformed track data is tolerated everywhere (fallback chains); this
    /// only catches caller mistakes in the numeric knobs.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.target_seconds == 0 {
            return Err(EngineError::InvalidConfig {
                message: "targetSeconds must be > 0".to_string(),
            });
        }
        if self.flexibility_seconds >= self.target_seconds {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "flexibilitySeconds {} must be smaller than targetSeconds {}",
                    self.flexibility_seconds, self.target_seconds
                ),
            });
        }
        if self.track_count == 0 {
            return Err(EngineError::InvalidConfig {
                message: "trackCount must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn minimal_json_takes_defaults() {
        let config: GenerateConfig =
            serde_json::from_str(r#"{"algorithm": "balanced_cascade", "ranking": "balanced"}"#)
                .unwrap();

        assert_eq!(config.target_seconds, 2700);
        assert_eq!(config.flexibility_seconds, 420);
        assert_eq!(config.greatest_hits_max, 3600);
        assert_eq!(config.deep_cuts_max, 2880);
        assert_eq!(config.minimum_duration, 1800);
        assert_eq!(config.output_mode, OutputMode::Split);
        assert_eq!(config.grouping, GroupingStrategy::AlbumOrder);
        assert_eq!(config.track_count, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let config: GenerateConfig = serde_json::from_str(
            r#"{"algorithm": "top_n", "ranking": "balanced", "somethingNew": true}"#,
        )
        .unwrap();
        assert_eq!(config.algorithm, "top_n");
    }

    #[test]
    fn validate_rejects_bad_knobs() {
        let mut config = GenerateConfig::new("top_n", "balanced");
        config.target_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = GenerateConfig::new("top_n", "balanced");
        config.flexibility_seconds = config.target_seconds;
        assert!(config.validate().is_err());

        let mut config = GenerateConfig::new("top_n", "balanced");
        config.track_count = 0;
        assert!(config.validate().is_err());
    }
}
