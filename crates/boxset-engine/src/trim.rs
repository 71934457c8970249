//! Duration trimming.
//!
//! Deep-cut playlists above the hard ceiling shed their lowest-ranked
//! tracks into an overflow "Orphan Tracks" playlist, created lazily the
//! first time a trim happens.

use boxset_model::PlaylistKind;

use crate::draft::DraftPlaylist;
use crate::provenance::ProvenanceTracker;

/// Title of the overflow playlist.
pub const ORPHAN_TITLE: &str = "Orphan Tracks";

/// Creates the overflow draft.
pub fn orphan_playlist() -> DraftPlaylist {
    DraftPlaylist::new(ORPHAN_TITLE, "Tracks that exceeded playlist limits", PlaylistKind::Orphan)
}

/// Index of the entry to trim next: highest rank number, latest position on
/// ties.
fn lowest_ranked_entry(playlist: &DraftPlaylist) -> Option<usize> {
    playlist
        .entries
        .iter()
        .enumerate()
        .max_by_key(|(index, e)| (e.rank, e.track.position, *index))
        .map(|(index, _)| index)
}

/// Trims every deep-cut playlist to `ceiling`, appending removed tracks to
/// the overflow playlist (appended to `playlists` when first needed).
/// Trimmed playlists are re-sorted ascending by rank for display stability.
pub fn trim_to_ceiling(
    playlists: &mut Vec<DraftPlaylist>,
    ceiling: u32,
    tracker: &mut ProvenanceTracker,
) {
    let mut overflow = Vec::new();

    for playlist in playlists.iter_mut() {
        if playlist.kind != PlaylistKind::DeepCuts {
            continue;
        }
        let mut trimmed = false;
        while playlist.duration_secs() > ceiling && !playlist.entries.is_empty() {
            let Some(index) = lowest_ranked_entry(playlist) else {
                break;
            };
            let mut entry = playlist.entries.remove(index);
            let seq = tracker.next_seq();
            entry.track.annotate(
                format!("trimmed from '{}': playlist exceeded duration ceiling", playlist.title),
                "trimming",
                None,
                seq,
            );
            overflow.push(entry);
            trimmed = true;
        }
        if trimmed {
            playlist.sort_by_rank();
        }
    }

    if overflow.is_empty() {
        return;
    }

    match playlists.iter_mut().find(|p| p.kind == PlaylistKind::Orphan) {
        Some(orphans) => orphans.entries.extend(overflow),
        None => {
            let mut orphans = orphan_playlist();
            orphans.entries = overflow;
            playlists.push(orphans);
        }
    }
}
