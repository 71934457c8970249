//! Hit extraction: the shared first phase.
//!
//! After ranking, each album's rank-1 track goes to the Greatest Hits
//! vol.1 bucket and its rank-2 track to vol.2. The rest (rank >= 3) form a
//! per-album remainder that keeps the album's input index, whose parity
//! later decides placement direction. Zero-track albums contribute nothing.

use boxset_model::{Album, PlaylistKind};

use super::RunContext;
use crate::draft::DraftPlaylist;
use crate::rank::RankedTrack;

/// An album's rank >= 3 tracks, in rank order.
#[derive(Debug, Clone)]
pub struct AlbumRemainder {
    /// Index of the album in the input list (parity matters downstream).
    pub album_index: usize,
    pub album_id: String,
    pub entries: Vec<RankedTrack>,
}

/// Result of the extraction phase.
#[derive(Debug, Clone, Default)]
pub struct HitExtraction {
    pub vol1: Vec<RankedTrack>,
    pub vol2: Vec<RankedTrack>,
    pub remainders: Vec<AlbumRemainder>,
    /// Track count of the smallest contributing album. Zero when no album
    /// contributed anything.
    pub min_tracks_per_album: usize,
}

impl HitExtraction {
    /// Combined duration of both hit buckets.
    pub fn hits_duration_secs(&self) -> u32 {
        self.vol1
            .iter()
            .chain(self.vol2.iter())
            .map(|e| e.track.duration_secs)
            .sum()
    }

    /// Total duration of all remainder tracks.
    pub fn remainder_duration_secs(&self) -> u64 {
        self.remainders
            .iter()
            .flat_map(|r| &r.entries)
            .map(|e| e.track.duration_secs as u64)
            .sum()
    }
}

/// Ranks every album and splits hits from remainders.
pub fn extract_hits(albums: &[Album], ctx: &mut RunContext<'_>) -> HitExtraction {
    let mut extraction = HitExtraction::default();
    let mut min_tracks: Option<usize> = None;

    for (album_index, album) in albums.iter().enumerate() {
        if album.tracks.is_empty() {
            continue;
        }
        let ranked = ctx.strategy.rank(album, &mut ctx.tracker);
        min_tracks = Some(min_tracks.map_or(ranked.len(), |m| m.min(ranked.len())));

        let mut remainder = AlbumRemainder {
            album_index,
            album_id: album.id.clone(),
            entries: Vec::new(),
        };
        for mut entry in ranked {
            match entry.rank {
                1 => {
                    let seq = ctx.tracker.next_seq();
                    entry
                        .track
                        .annotate("selected as album hit #1", "hit extraction", None, seq);
                    extraction.vol1.push(entry);
                }
                2 => {
                    let seq = ctx.tracker.next_seq();
                    entry
                        .track
                        .annotate("selected as album hit #2", "hit extraction", None, seq);
                    extraction.vol2.push(entry);
                }
                _ => remainder.entries.push(entry),
            }
        }
        if !remainder.entries.is_empty() {
            extraction.remainders.push(remainder);
        }
    }

    extraction.min_tracks_per_album = min_tracks.unwrap_or(0);
    extraction
}

/// Builds the two Greatest Hits volumes, unconditionally separate. Empty
/// buckets produce no playlists.
pub fn hit_volumes(vol1: Vec<RankedTrack>, vol2: Vec<RankedTrack>) -> Vec<DraftPlaylist> {
    let mut playlists = Vec::new();
    if !vol1.is_empty() {
        let mut first = DraftPlaylist::new(
            "Greatest Hits vol.1",
            "Every album's top track",
            PlaylistKind::GreatestHits { volume: 1 },
        );
        first.entries = vol1;
        playlists.push(first);
    }
    if !vol2.is_empty() {
        let mut second = DraftPlaylist::new(
            "Greatest Hits vol.2",
            "Every album's second track",
            PlaylistKind::GreatestHits { volume: 2 },
        );
        second.entries = vol2;
        playlists.push(second);
    }
    playlists
}

/// Builds the Greatest Hits playlists from the extraction buckets.
///
/// One merged playlist when the combined duration fits under `ceiling`,
/// two volumes otherwise. Empty buckets produce no playlists.
pub fn hit_playlists(vol1: Vec<RankedTrack>, vol2: Vec<RankedTrack>, ceiling: u32) -> Vec<DraftPlaylist> {
    let combined: u32 = vol1
        .iter()
        .chain(vol2.iter())
        .map(|e| e.track.duration_secs)
        .sum();

    if vol1.is_empty() && vol2.is_empty() {
        return Vec::new();
    }

    if combined > ceiling && !vol2.is_empty() {
        hit_volumes(vol1, vol2)
    } else {
        let mut merged = DraftPlaylist::new(
            "Greatest Hits",
            "The best of every album",
            PlaylistKind::GreatestHits { volume: 1 },
        );
        merged.entries = vol1;
        merged.entries.extend(vol2);
        vec![merged]
    }
}
