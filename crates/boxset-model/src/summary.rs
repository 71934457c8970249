//! End-of-run provenance summary types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::playlist::Playlist;
use crate::source::RankingSource;
use crate::track::RankingNote;

/// A track's final placement, with its full annotation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedTrack {
    pub track_id: String,
    pub title: String,
    /// Rank assigned by the strategy that ran for this generation.
    pub rank: u32,
    /// Title of the playlist the track ended up in.
    pub playlist: String,
    pub duration_secs: u32,
    pub notes: Vec<RankingNote>,
}

/// Per-album view of where its tracks landed and which sources touched them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSummary {
    pub album_id: String,
    pub title: String,
    pub artist: String,
    /// Tracks placed from this album across all playlists, in rank order.
    pub tracks: Vec<PlacedTrack>,
    /// Deduplicated names of the sources that touched any of its tracks.
    pub sources: Vec<String>,
}

/// Everything a `generate()` run hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutput {
    pub playlists: Vec<Playlist>,
    /// Keyed by origin album id. BTreeMap keeps serialization order stable.
    pub ranking_summary: BTreeMap<String, AlbumSummary>,
    /// Sources in first-registration order.
    pub ranking_sources: Vec<RankingSource>,
}

impl GenerateOutput {
    /// Total number of tracks across all playlists.
    pub fn track_count(&self) -> usize {
        self.playlists.iter().map(|p| p.len()).sum()
    }

    /// Total duration in seconds across all playlists.
    pub fn total_duration_secs(&self) -> u64 {
        self.playlists
            .iter()
            .map(|p| p.duration_secs() as u64)
            .sum()
    }
}
