//! Balanced cascade distribution (recommended).
//!
//! Two-pass placement: serpentine up to a rank ceiling derived from the
//! smallest album, then a single ping-pong "cascade" sweep for everything
//! beyond it, grouped by absolute rank value. Adjacent deep cuts that fit
//! together under the hard ceiling are merged afterwards, and anything
//! still over the ceiling is trimmed into the overflow playlist.

use std::collections::BTreeMap;

use boxset_model::{Album, PlaylistKind};

use super::hits::{extract_hits, hit_playlists, AlbumRemainder};
use super::serpentine::{place_album_serpentine, SerpentineCursor};
use super::{deep_cut_playlists, Distributor, RunContext};
use crate::balance::balance;
use crate::draft::DraftPlaylist;
use crate::rank::RankedTrack;
use crate::registry::{algorithm_info, AlgorithmId, AlgorithmInfo};
use crate::trim::trim_to_ceiling;

/// Merges adjacent deep cuts whose combined duration stays below
/// `ceiling`, front to back, allowing chained merges. Titles carry the
/// volume range of their constituents ("Deep Cuts Vol. 2-4").
fn merge_adjacent_deep_cuts(playlists: &mut Vec<DraftPlaylist>, ceiling: u32) {
    let Some(start) = playlists.iter().position(|p| p.kind == PlaylistKind::DeepCuts) else {
        return;
    };
    let dc_count = playlists[start..]
        .iter()
        .take_while(|p| p.kind == PlaylistKind::DeepCuts)
        .count();
    let mut ranges: Vec<(usize, usize)> = (1..=dc_count).map(|v| (v, v)).collect();

    let mut index = start;
    while index + 1 < playlists.len()
        && playlists[index].kind == PlaylistKind::DeepCuts
        && playlists[index + 1].kind == PlaylistKind::DeepCuts
    {
        let combined = playlists[index].duration_secs() + playlists[index + 1].duration_secs();
        if combined < ceiling {
            let mut absorbed = playlists.remove(index + 1);
            playlists[index].entries.append(&mut absorbed.entries);
            let absorbed_range = ranges.remove(index - start + 1);
            ranges[index - start].1 = absorbed_range.1;
            // Stay put: the merged playlist may absorb its next neighbor too.
        } else {
            index += 1;
        }
    }

    for (offset, range) in ranges.iter().enumerate() {
        let title = if range.0 == range.1 {
            format!("Deep Cuts Vol. {}", range.0)
        } else {
            format!("Deep Cuts Vol. {}-{}", range.0, range.1)
        };
        playlists[start + offset].title = title;
    }
}

/// The recommended algorithm.
pub struct BalancedCascade;

impl Distributor for BalancedCascade {
    fn info(&self) -> &'static AlgorithmInfo {
        algorithm_info(AlgorithmId::BalancedCascade)
    }

    fn distribute(&self, albums: &[Album], ctx: &mut RunContext<'_>) -> Vec<DraftPlaylist> {
        let extraction = extract_hits(albums, ctx);
        let mut playlists = hit_playlists(
            extraction.vol1.clone(),
            extraction.vol2.clone(),
            ctx.config.greatest_hits_max,
        );

        if !extraction.remainders.is_empty() {
            let num_dc = extraction.min_tracks_per_album.saturating_sub(2).max(1);
            let rank_ceiling = (2 + num_dc) as u32;
            let mut deep_cuts = deep_cut_playlists(num_dc);

            // Pass 1: serpentine up to the rank ceiling.
            let mut beyond: BTreeMap<u32, Vec<RankedTrack>> = BTreeMap::new();
            for remainder in extraction.remainders {
                let (serp, rest): (Vec<_>, Vec<_>) = remainder
                    .entries
                    .into_iter()
                    .partition(|e| e.rank <= rank_ceiling);
                place_album_serpentine(
                    &mut deep_cuts,
                    AlbumRemainder {
                        album_index: remainder.album_index,
                        album_id: remainder.album_id,
                        entries: serp,
                    },
                );
                for entry in rest {
                    beyond.entry(entry.rank).or_default().push(entry);
                }
            }

            // Pass 2: cascade the rest by rank group in one ping-pong
            // sweep, starting from the last playlist.
            let mut cursor = SerpentineCursor::new(num_dc, true);
            for (_, group) in beyond {
                for entry in group {
                    deep_cuts[cursor.next()].entries.push(entry);
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
        merge_adjacent_deep_cuts(&mut playlists, ctx.config.deep_cuts_max);
        trim_to_ceiling(&mut playlists, ctx.config.deep_cuts_max, &mut ctx.tracker);
        playlists
    }
}
