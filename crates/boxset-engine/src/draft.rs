//! Rank-carrying working playlists.
//!
//! Distribution, balancing, and trimming all need each track's current
//! rank. Rather than smuggling a transient rank field onto the shared
//! track objects, the engine threads [`RankedTrack`] records through a
//! draft playlist type and converts to the contract [`Playlist`] as the
//! final structural step, assigning sequential ids at that point.

use std::collections::HashSet;

use boxset_model::{Playlist, PlaylistKind};

use crate::rank::RankedTrack;

/// A playlist under construction.
#[derive(Debug, Clone)]
pub struct DraftPlaylist {
    pub title: String,
    pub subtitle: String,
    pub kind: PlaylistKind,
    pub entries: Vec<RankedTrack>,
}

impl DraftPlaylist {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>, kind: PlaylistKind) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            kind,
            entries: Vec::new(),
        }
    }

    /// Total duration in seconds.
    pub fn duration_secs(&self) -> u32 {
        self.entries.iter().map(|e| e.track.duration_secs).sum()
    }

    /// Album ids present in this playlist.
    pub fn albums_present(&self) -> HashSet<&str> {
        self.entries
            .iter()
            .map(|e| e.track.origin_album_id.as_str())
            .collect()
    }

    /// Number of tracks from the given album.
    pub fn count_from_album(&self, album_id: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.track.origin_album_id == album_id)
            .count()
    }

    /// Re-sorts entries ascending by rank, ties broken by original disc
    /// order. Used for display stability after trimming.
    pub fn sort_by_rank(&mut self) {
        self.entries.sort_by(|a, b| {
            a.rank
                .cmp(&b.rank)
                .then(a.track.position.cmp(&b.track.position))
        });
    }
}

/// Converts drafts into contract playlists, assigning sequential ids.
///
/// Empty drafts are dropped; ids restart at `playlist-1` on every call, so
/// this must run exactly once per generation, after all structural changes.
pub fn into_playlists(drafts: Vec<DraftPlaylist>) -> Vec<Playlist> {
    drafts
        .into_iter()
        .filter(|d| !d.entries.is_empty())
        .enumerate()
        .map(|(index, draft)| Playlist {
            id: format!("playlist-{}", index + 1),
            title: draft.title,
            subtitle: draft.subtitle,
            kind: draft.kind,
            tracks: draft.entries.into_iter().map(|e| e.track).collect(),
        })
        .collect()
}
