//! Full serpentine distribution.
//!
//! Remainder tracks are placed album by album in a zigzag across the deep
//! cut playlists: even-indexed albums walk forward from the first
//! playlist, odd-indexed albums walk backward from the last, reversing
//! direction at each boundary. This maximizes album variety per playlist
//! before swap balancing runs.

use boxset_model::Album;

use super::hits::{extract_hits, hit_playlists, AlbumRemainder};
use super::{deep_cut_playlists, playlist_count_for, Distributor, RunContext};
use crate::balance::balance;
use crate::draft::DraftPlaylist;
use crate::registry::{algorithm_info, AlgorithmId, AlgorithmInfo};

/// Zigzag index walker with reflection at both ends.
pub(crate) struct SerpentineCursor {
    len: usize,
    index: usize,
    forward: bool,
}

impl SerpentineCursor {
    /// `start_at_end` walks backward from the last index first.
    pub(crate) fn new(len: usize, start_at_end: bool) -> Self {
        Self {
            len: len.max(1),
            index: if start_at_end { len.saturating_sub(1) } else { 0 },
            forward: !start_at_end,
        }
    }

    /// Returns the current index and steps, reflecting at the ends.
    pub(crate) fn next(&mut self) -> usize {
        let current = self.index;
        if self.len > 1 {
            if self.forward {
                if self.index + 1 == self.len {
                    self.forward = false;
                    self.index -= 1;
                } else {
                    self.index += 1;
                }
            } else if self.index == 0 {
                self.forward = true;
                self.index = 1;
            } else {
                self.index -= 1;
            }
        }
        current
    }
}

/// Places one album's remainder into the playlists along its own zigzag.
pub(crate) fn place_album_serpentine(playlists: &mut [DraftPlaylist], remainder: AlbumRemainder) {
    let mut cursor = SerpentineCursor::new(playlists.len(), remainder.album_index % 2 == 1);
    for entry in remainder.entries {
        let slot = cursor.next();
        playlists[slot].entries.push(entry);
    }
}

/// The S-Draft Original algorithm.
pub struct FullSerpentine;

impl Distributor for FullSerpentine {
    fn info(&self) -> &'static AlgorithmInfo {
        algorithm_info(AlgorithmId::Serpentine)
    }

    fn distribute(&self, albums: &[Album], ctx: &mut RunContext<'_>) -> Vec<DraftPlaylist> {
        let extraction = extract_hits(albums, ctx);
        let remainder_duration = extraction.remainder_duration_secs();
        let remainders = extraction.remainders.clone();

        let mut playlists = hit_playlists(
            extraction.vol1,
            extraction.vol2,
            ctx.config.greatest_hits_max,
        );

        if remainder_duration > 0 {
            let count = playlist_count_for(remainder_duration, ctx.config.target_seconds);
            let mut deep_cuts = deep_cut_playlists(count);
            for remainder in remainders {
                place_album_serpentine(&mut deep_cuts, remainder);
            }
            playlists.extend(deep_cuts);
        }

        balance(
            &mut playlists,
            ctx.config.target_seconds,
            ctx.config.flexibility_seconds,
            &mut ctx.tracker,
        );
        playlists
    }
}
