//! Canonical track model and raw provider records.

use serde::{Deserialize, Serialize};

/// A track record as delivered by a metadata provider.
///
/// Providers disagree on field names and omit fields freely, so everything
/// here is optional and aliased. Normalization into a [`Track`] fills the
/// gaps with fallbacks; it never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrack {
    /// Stable identifier, if the provider assigned one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Track title. Providers variously call this `title`, `name`, or
    /// `trackTitle`.
    #[serde(alias = "name", alias = "trackTitle")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    /// Duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    /// Critic rating (display alias for acclaim).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Critic-derived per-album rank, 1-based, smaller = better.
    #[serde(alias = "rank")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acclaim_rank: Option<u32>,

    /// Critic-derived normalized score.
    #[serde(alias = "normalizedScore")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acclaim_score: Option<f64>,

    /// Streaming catalog rank within the album.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_rank: Option<u32>,

    /// Streaming popularity (0-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_popularity: Option<u32>,
}

/// A single provenance note attached to a track.
///
/// Notes are append-only: phases add them as the track is ranked, placed,
/// swapped, or trimmed. `seq` is a per-run monotonic counter, which keeps
/// runs deterministic where a wall-clock timestamp would not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingNote {
    /// Why the note was written (e.g. "ranked #3", "swapped to balance").
    pub reason: String,
    /// The named source or phase that wrote the note.
    pub source: String,
    /// Score contributed by the source, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Per-run sequence number, monotonically increasing.
    pub seq: u64,
}

/// The canonical in-engine track shape.
///
/// Every ranking strategy and distribution algorithm operates on this type.
/// Tracks are owned copies of the caller's data; the engine never mutates
/// the input album graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique within a run.
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Album title this track belongs to.
    pub album: String,
    /// Duration in seconds.
    pub duration_secs: u32,
    /// Critic-derived per-album rank, 1-based, smaller = better.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acclaim_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acclaim_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spotify_popularity: Option<u32>,
    /// Album this track was normalized from. Set once, never reassigned.
    pub origin_album_id: String,
    /// Original disc order, 0-based.
    pub position: usize,
    /// Append-only provenance history.
    #[serde(default)]
    pub ranking_info: Vec<RankingNote>,
}

impl Track {
    /// Normalizes a raw provider record into the canonical shape.
    ///
    /// `position` is the 0-based disc order within the album. Missing ids
    /// become `"<albumId>-t<position+1>"`; missing titles become
    /// `"Track <position+1>"`; a missing duration is treated as zero.
    pub fn normalize(raw: &RawTrack, album_id: &str, album_title: &str, artist: &str, position: usize) -> Self {
        Self {
            id: raw
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-t{}", album_id, position + 1)),
            title: raw
                .title
                .clone()
                .unwrap_or_else(|| format!("Track {}", position + 1)),
            artist: raw.artist.clone().unwrap_or_else(|| artist.to_string()),
            album: album_title.to_string(),
            duration_secs: raw.duration.unwrap_or(0),
            acclaim_rank: raw.acclaim_rank,
            acclaim_score: raw.acclaim_score,
            rating: raw.rating,
            spotify_rank: raw.spotify_rank,
            spotify_popularity: raw.spotify_popularity,
            origin_album_id: album_id.to_string(),
            position,
            ranking_info: Vec::new(),
        }
    }

    /// Appends a provenance note. Notes are never removed or edited.
    pub fn annotate(&mut self, reason: impl Into<String>, source: impl Into<String>, score: Option<f64>, seq: u64) {
        self.ranking_info.push(RankingNote {
            reason: reason.into(),
            source: source.into(),
            score,
            seq,
        });
    }
}

/// Lowercases a title and strips everything but alphanumerics, so that
/// "Paranoid Android" and "paranoid-android (remastered)" collide only
/// when they should. Used for evidence and user-rank matching.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    // Everything after a parenthesized qualifier is provider noise.
    let base = lowered.split('(').next().unwrap_or(&lowered);
    base.chars().filter(|c| c.is_alphanumeric()).collect()
}
