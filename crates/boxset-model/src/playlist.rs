//! Playlist output contract.

use serde::{Deserialize, Serialize};

use crate::track::Track;

/// The role a playlist plays in the curated set.
///
/// Swap protection and trimming are keyed off this enum rather than off
/// title string matching, so retitling a playlist can never change its
/// protection semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlaylistKind {
    /// Rank-1/rank-2 extraction playlist. `volume` is 1 or 2; a merged
    /// Greatest Hits playlist carries volume 1 and protects both ranks.
    GreatestHits { volume: u8 },
    /// Built from remainder (rank >= 3) tracks.
    DeepCuts,
    /// Overflow playlist for trimmed or unplaceable tracks.
    Orphan,
    /// Top-N selection output.
    Selection,
}

impl PlaylistKind {
    /// Returns true for either Greatest Hits volume.
    pub fn is_greatest_hits(&self) -> bool {
        matches!(self, PlaylistKind::GreatestHits { .. })
    }
}

/// An ordered list of tracks with display metadata.
///
/// `id` is reassigned sequentially after structural changes and is not
/// stable across mutation. Track order is display order; it carries no
/// meaning beyond the protected hit positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(flatten)]
    pub kind: PlaylistKind,
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Total duration in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.tracks.iter().map(|t| t.duration_secs).sum()
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns true if the playlist holds no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::track::RawTrack;

    fn track(duration: u32) -> Track {
        Track::normalize(
            &RawTrack {
                duration: Some(duration),
                ..Default::default()
            },
            "alb-1",
            "Album",
            "Artist",
            0,
        )
    }

    #[test]
    fn duration_sums_tracks() {
        let playlist = Playlist {
            id: "playlist-1".to_string(),
            title: "Deep Cuts Vol. 1".to_string(),
            subtitle: String::new(),
            kind: PlaylistKind::DeepCuts,
            tracks: vec![track(180), track(240)],
        };
        assert_eq!(playlist.duration_secs(), 420);
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn kind_serializes_tagged() {
        let kind = PlaylistKind::GreatestHits { volume: 2 };
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#"{"kind":"greatest_hits","volume":2}"#);
        assert!(kind.is_greatest_hits());
        assert!(!PlaylistKind::Orphan.is_greatest_hits());
    }
}
