//! Boxset Curation Engine
//!
//! Turns a collection of enriched albums into a curated set of playlists:
//! each album's tracks are ranked by a pluggable strategy, distributed
//! across Greatest Hits and Deep Cuts playlists by a pluggable algorithm,
//! duration-balanced by greedy swapping, and reported back with full
//! per-track provenance.
//!
//! The whole engine is deterministic for a given input and configuration
//! (the shuffle grouping is the one opt-in exception, and even that is
//! reproducible under a seed). Nothing here performs I/O.
//!
//! # Modules
//!
//! - [`rank`]: ranking strategies and the evidence enrichment they share
//! - [`distribute`]: the five distribution algorithms
//! - [`registry`]: algorithm ids, metadata, and construction
//! - [`balance`]: greedy swap duration balancing
//! - [`trim`]: ceiling enforcement into the overflow playlist
//! - [`draft`]: rank-carrying working playlists
//! - [`provenance`]: run-scoped source and summary tracking
//! - [`shuffle`]: deterministic RNG derivation
//!
//! # Example
//!
//! ```
//! use boxset_engine::generate;
//! use boxset_model::{Album, GenerateConfig, RawTrack};
//!
//! let mut album = Album::new("alb-1", "OK Computer", "Radiohead");
//! album.tracks.push(RawTrack {
//!     title: Some("Airbag".to_string()),
//!     duration: Some(284),
//!     acclaim_rank: Some(1),
//!     ..Default::default()
//! });
//!
//! let config = GenerateConfig::new("balanced_cascade", "balanced");
//! let output = generate(&[album], &config).unwrap();
//! assert_eq!(output.playlists.len(), 1);
//! ```

pub mod balance;
pub mod distribute;
pub mod draft;
pub mod provenance;
pub mod rank;
pub mod registry;
pub mod shuffle;
pub mod trim;

use boxset_model::{Album, EngineError, GenerateConfig, GenerateOutput};

use crate::distribute::RunContext;
use crate::draft::into_playlists;
use crate::provenance::ProvenanceTracker;
use crate::rank::strategy_for;

pub use crate::balance::{BalanceOutcome, MAX_BALANCE_ITERATIONS};
pub use crate::distribute::Distributor;
pub use crate::rank::{RankStrategy, RankedTrack, RankingId};
pub use crate::registry::{AlgorithmId, AlgorithmInfo};

/// Runs one full curation: rank, distribute, balance, summarize.
///
/// Fails only on caller mistakes (bad knobs, unknown ids). Partial or
/// malformed track data never fails; it degrades down the documented
/// fallback chains.
pub fn generate(albums: &[Album], config: &GenerateConfig) -> Result<GenerateOutput, EngineError> {
    config.validate()?;
    let strategy = strategy_for(&config.ranking, config).ok_or_else(|| EngineError::UnknownRanking {
        id: config.ranking.clone(),
    })?;
    let algorithm = registry::create(&config.algorithm).ok_or_else(|| EngineError::UnknownAlgorithm {
        id: config.algorithm.clone(),
    })?;

    let mut ctx = RunContext {
        config,
        strategy,
        tracker: ProvenanceTracker::new(),
    };
    let drafts = algorithm.distribute(albums, &mut ctx);

    // Summarize before conversion: ranks live on the draft entries.
    let ranking_summary = ctx.tracker.build_summary(&drafts);
    let ranking_sources = ctx.tracker.sources();

    Ok(GenerateOutput {
        playlists: into_playlists(drafts),
        ranking_summary,
        ranking_sources,
    })
}

#[cfg(test)]
mod tests {
    use boxset_model::{Album, EvidenceEntry, GenerateConfig, RawTrack};
    use pretty_assertions::assert_eq;

    use super::*;

    fn album(id: &str, artist: &str, track_count: usize, duration: u32) -> Album {
        let mut album = Album::new(id, format!("Album {}", id), artist);
        for position in 0..track_count {
            album.tracks.push(RawTrack {
                title: Some(format!("{} Track {}", id, position + 1)),
                duration: Some(duration),
                acclaim_rank: Some(position as u32 + 1),
                ..Default::default()
            });
        }
        album
    }

    #[test]
    fn generate_produces_playlists_and_summary() {
        let albums = vec![album("alb-1", "Artist A", 5, 240), album("alb-2", "Artist B", 5, 240)];
        let config = GenerateConfig::new("balanced_cascade", "balanced");

        let output = generate(&albums, &config).unwrap();

        // Count and duration are both conserved.
        assert_eq!(output.track_count(), 10);
        assert_eq!(output.total_duration_secs(), 10 * 240);
        for (index, playlist) in output.playlists.iter().enumerate() {
            assert_eq!(playlist.id, format!("playlist-{}", index + 1));
            assert!(!playlist.is_empty());
        }

        assert_eq!(output.ranking_summary.len(), 2);
        let alb1 = output.ranking_summary.get("alb-1").unwrap();
        assert_eq!(alb1.tracks.len(), 5);
        assert_eq!(alb1.artist, "Artist A");
        // Tracks arrive in rank order with their placement recorded.
        assert_eq!(alb1.tracks[0].rank, 1);
        assert!(!alb1.tracks[0].playlist.is_empty());
    }

    #[test]
    fn evidence_sources_surface_in_the_output() {
        let mut enriched = album("alb-1", "Artist A", 4, 240);
        // No explicit ranks: force the consolidated evidence path.
        for track in enriched.tracks.iter_mut() {
            track.acclaim_rank = None;
        }
        enriched.ranking_consolidated = Some(
            (1..=4)
                .map(|rank| EvidenceEntry {
                    title: format!("alb-1 Track {}", rank),
                    rank: Some(rank),
                    ..Default::default()
                })
                .collect(),
        );

        let config = GenerateConfig::new("balanced_cascade", "balanced");
        let output = generate(&[enriched], &config).unwrap();

        let names: Vec<&str> = output.ranking_sources.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Consolidated Ranking"));
        let alb1 = output.ranking_summary.get("alb-1").unwrap();
        assert!(alb1.sources.contains(&"Consolidated Ranking".to_string()));
    }

    #[test]
    fn unknown_ids_and_bad_knobs_are_typed_errors() {
        let albums = vec![album("alb-1", "Artist A", 3, 240)];

        let err = generate(&albums, &GenerateConfig::new("bogus", "balanced")).unwrap_err();
        assert_eq!(err.code(), "CURATE_001");

        let err = generate(&albums, &GenerateConfig::new("top_n", "bogus")).unwrap_err();
        assert_eq!(err.code(), "CURATE_002");

        let mut config = GenerateConfig::new("top_n", "balanced");
        config.target_seconds = 0;
        assert_eq!(generate(&albums, &config).unwrap_err().code(), "CURATE_003");
    }

    #[test]
    fn no_albums_means_no_playlists() {
        let config = GenerateConfig::new("balanced_cascade", "balanced");
        let output = generate(&[], &config).unwrap();
        assert!(output.playlists.is_empty());
        assert!(output.ranking_summary.is_empty());
    }

    #[test]
    fn identical_runs_are_identical() {
        let albums = vec![album("alb-1", "Artist A", 6, 210), album("alb-2", "Artist B", 6, 250)];
        let config = GenerateConfig::new("s_draft", "balanced");

        let a = generate(&albums, &config).unwrap();
        let b = generate(&albums, &config).unwrap();
        assert_eq!(a.playlists, b.playlists);
        assert_eq!(a.ranking_summary, b.ranking_summary);
    }
}
