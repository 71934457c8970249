//! Legacy round-robin distribution.
//!
//! The hit volumes always stay separate here, regardless of their
//! combined duration; merging below the ceiling is a refinement the later
//! algorithms added.

use std::collections::HashSet;

use boxset_model::Album;

use super::hits::{extract_hits, hit_volumes, AlbumRemainder};
use super::{deep_cut_playlists, playlist_count_for, Distributor, RunContext};
use crate::balance::balance;
use crate::draft::DraftPlaylist;
use crate::provenance::ProvenanceTracker;
use crate::registry::{algorithm_info, AlgorithmId, AlgorithmInfo};

/// Fills a hit playlist up to the target from the remainder pool,
/// preferring albums not yet represented in it, then best rank. Only
/// tracks that fit under the target are taken.
fn backfill_to_target(
    playlist: &mut DraftPlaylist,
    remainders: &mut [AlbumRemainder],
    target: u32,
    tracker: &mut ProvenanceTracker,
) {
    loop {
        let current = playlist.duration_secs();
        if current >= target {
            break;
        }
        let present: HashSet<String> = playlist
            .albums_present()
            .into_iter()
            .map(str::to_string)
            .collect();

        // (prefer fresh album, then lowest rank); first found wins ties.
        let mut best: Option<(bool, u32, usize, usize)> = None;
        for (index, remainder) in remainders.iter().enumerate() {
            // Entries are rank-ordered: the first that fits is the album's
            // best offer.
            let Some(entry_index) = remainder
                .entries
                .iter()
                .position(|e| current + e.track.duration_secs <= target)
            else {
                continue;
            };
            let rank = remainder.entries[entry_index].rank;
            let fresh = !present.contains(&remainder.album_id);
            let better = match best {
                Some((best_fresh, best_rank, _, _)) => {
                    (fresh, std::cmp::Reverse(rank)) > (best_fresh, std::cmp::Reverse(best_rank))
                }
                None => true,
            };
            if better {
                best = Some((fresh, rank, index, entry_index));
            }
        }

        let Some((_, _, index, entry_index)) = best else { break };
        let mut entry = remainders[index].entries.remove(entry_index);
        let seq = tracker.next_seq();
        entry.track.annotate(
            format!("back-filled into '{}'", playlist.title),
            "round robin",
            None,
            seq,
        );
        playlist.entries.push(entry);
    }
}

/// The legacy algorithm: hit extraction, hit back-fill, then a plain
/// round-robin draw across the deep cut playlists.
pub struct RoundRobin;

impl Distributor for RoundRobin {
    fn info(&self) -> &'static AlgorithmInfo {
        algorithm_info(AlgorithmId::RoundRobin)
    }

    fn distribute(&self, albums: &[Album], ctx: &mut RunContext<'_>) -> Vec<DraftPlaylist> {
        let extraction = extract_hits(albums, ctx);
        let mut remainders = extraction.remainders.clone();

        let mut playlists = hit_volumes(extraction.vol1, extraction.vol2);

        for playlist in playlists.iter_mut() {
            backfill_to_target(
                playlist,
                &mut remainders,
                ctx.config.target_seconds,
                &mut ctx.tracker,
            );
        }
        remainders.retain(|r| !r.entries.is_empty());

        let remaining: u64 = remainders
            .iter()
            .flat_map(|r| &r.entries)
            .map(|e| e.track.duration_secs as u64)
            .sum();

        if remaining > 0 {
            let count = playlist_count_for(remaining, ctx.config.target_seconds);
            let mut deep_cuts = deep_cut_playlists(count);

            // One track per album per pass; playlists cycled per draw.
            let mut draw = 0usize;
            loop {
                let mut drew_any = false;
                for remainder in remainders.iter_mut() {
                    if remainder.entries.is_empty() {
                        continue;
                    }
                    let entry = remainder.entries.remove(0);
                    deep_cuts[draw % count].entries.push(entry);
                    draw += 1;
                    drew_any = true;
                }
                if !drew_any {
                    break;
                }
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
