//! S-Draft Balanced distribution.
//!
//! Serpentine placement followed by two repair passes the plain
//! serpentine lacks: playlists under the minimum duration are dissolved
//! into their siblings, and deep cuts missing an album borrow a spare
//! track from a playlist that holds two or more of it.

use std::collections::BTreeSet;

use boxset_model::{Album, PlaylistKind};

use super::hits::{extract_hits, hit_playlists};
use super::serpentine::place_album_serpentine;
use super::{deep_cut_playlists, playlist_count_for, Distributor, RunContext};
use crate::balance::balance;
use crate::draft::DraftPlaylist;
use crate::provenance::ProvenanceTracker;
use crate::registry::{algorithm_info, AlgorithmId, AlgorithmInfo};
use crate::trim::orphan_playlist;

/// Dissolves deep cuts shorter than `minimum` into siblings that still
/// have headroom under `ceiling`. Tracks no sibling can absorb land in the
/// overflow playlist.
fn dissolve_short_playlists(
    playlists: &mut Vec<DraftPlaylist>,
    minimum: u32,
    ceiling: u32,
    tracker: &mut ProvenanceTracker,
) {
    let dissolving: Vec<usize> = playlists
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == PlaylistKind::DeepCuts && p.duration_secs() < minimum)
        .map(|(i, _)| i)
        .collect();
    if dissolving.is_empty() {
        return;
    }
    // Don't dissolve the only deep cut playlist into nothing.
    let survivors = playlists
        .iter()
        .enumerate()
        .filter(|(i, p)| p.kind == PlaylistKind::DeepCuts && !dissolving.contains(i))
        .count();
    if survivors == 0 {
        return;
    }

    let mut leftovers = Vec::new();
    for &source in &dissolving {
        let source_title = playlists[source].title.clone();
        let entries = std::mem::take(&mut playlists[source].entries);
        for mut entry in entries {
            let dest = playlists.iter().enumerate().position(|(i, p)| {
                p.kind == PlaylistKind::DeepCuts
                    && !dissolving.contains(&i)
                    && p.duration_secs() + entry.track.duration_secs <= ceiling
            });
            match dest {
                Some(dest) => {
                    let dest_title = playlists[dest].title.clone();
                    let seq = tracker.next_seq();
                    entry.track.annotate(
                        format!("relocated from '{}' to '{}'", source_title, dest_title),
                        "minimum duration",
                        None,
                        seq,
                    );
                    playlists[dest].entries.push(entry);
                }
                None => {
                    let seq = tracker.next_seq();
                    entry.track.annotate(
                        format!("no playlist could absorb this track from '{}'", source_title),
                        "minimum duration",
                        None,
                        seq,
                    );
                    leftovers.push(entry);
                }
            }
        }
    }
    playlists.retain(|p| p.kind != PlaylistKind::DeepCuts || !p.entries.is_empty());

    if !leftovers.is_empty() {
        let mut orphans = orphan_playlist();
        orphans.entries = leftovers;
        playlists.push(orphans);
    }
}

/// Gives every deep cut playlist at least one track from every album,
/// where possible, by swapping a donor's spare for one of the deficient
/// playlist's duplicates. Skipped entirely when there are more deep cuts
/// than the smallest album has tracks, since full coverage is impossible
/// then.
fn improve_album_coverage(
    playlists: &mut [DraftPlaylist],
    min_tracks_per_album: usize,
    tracker: &mut ProvenanceTracker,
) {
    let dc_indices: Vec<usize> = playlists
        .iter()
        .enumerate()
        .filter(|(_, p)| p.kind == PlaylistKind::DeepCuts)
        .map(|(i, _)| i)
        .collect();
    if dc_indices.len() < 2 || dc_indices.len() > min_tracks_per_album {
        return;
    }

    let all_albums: BTreeSet<String> = dc_indices
        .iter()
        .flat_map(|&i| playlists[i].entries.iter())
        .map(|e| e.track.origin_album_id.clone())
        .collect();

    for &deficient in &dc_indices {
        for album_id in &all_albums {
            if playlists[deficient].count_from_album(album_id) > 0 {
                continue;
            }
            // Donor: first deep cut holding a spare of this album.
            let Some(&donor) = dc_indices
                .iter()
                .find(|&&i| i != deficient && playlists[i].count_from_album(album_id) >= 2)
            else {
                continue;
            };
            // The donor gives up its lowest-ranked track from the album.
            let Some(spare) = playlists[donor]
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.track.origin_album_id == *album_id)
                .max_by_key(|(index, e)| (e.rank, e.track.position, *index))
                .map(|(index, _)| index)
            else {
                continue;
            };
            // The deficient playlist pays with a duplicate of its own.
            let Some(payment) = playlists[deficient]
                .entries
                .iter()
                .position(|e| playlists[deficient].count_from_album(&e.track.origin_album_id) >= 2)
            else {
                continue;
            };

            let mut incoming = playlists[donor].entries.remove(spare);
            let mut outgoing = playlists[deficient].entries.remove(payment);

            let donor_title = playlists[donor].title.clone();
            let deficient_title = playlists[deficient].title.clone();
            let seq = tracker.next_seq();
            incoming.track.annotate(
                format!("moved from '{}' to '{}' for album coverage", donor_title, deficient_title),
                "coverage",
                None,
                seq,
            );
            let seq = tracker.next_seq();
            outgoing.track.annotate(
                format!("moved from '{}' to '{}' for album coverage", deficient_title, donor_title),
                "coverage",
                None,
                seq,
            );

            playlists[deficient].entries.push(incoming);
            playlists[donor].entries.push(outgoing);
        }
    }
}

/// Serpentine with minimum-duration and album-coverage repairs.
pub struct SDraftBalanced;

impl Distributor for SDraftBalanced {
    fn info(&self) -> &'static AlgorithmInfo {
        algorithm_info(AlgorithmId::SDraft)
    }

    fn distribute(&self, albums: &[Album], ctx: &mut RunContext<'_>) -> Vec<DraftPlaylist> {
        let extraction = extract_hits(albums, ctx);
        let remainder_duration = extraction.remainder_duration_secs();
        let min_tracks = extraction.min_tracks_per_album;
        let remainders = extraction.remainders.clone();

        let mut playlists = hit_playlists(
            extraction.vol1,
            extraction.vol2,
            ctx.config.greatest_hits_max,
        );

        if remainder_duration > 0 {
            // Sized by the hard ceiling, not the target: this algorithm
            // prefers fewer, fuller playlists and repairs afterwards.
            let count = playlist_count_for(remainder_duration, ctx.config.deep_cuts_max);
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
        dissolve_short_playlists(
            &mut playlists,
            ctx.config.minimum_duration,
            ctx.config.deep_cuts_max,
            &mut ctx.tracker,
        );
        improve_album_coverage(&mut playlists, min_tracks, &mut ctx.tracker);
        playlists
    }
}

#[cfg(test)]
mod pass_tests {
    use boxset_model::{RawTrack, Track};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rank::RankedTrack;

    fn entry(album_id: &str, rank: u32, duration: u32) -> RankedTrack {
        let raw = RawTrack {
            duration: Some(duration),
            ..Default::default()
        };
        RankedTrack {
            track: Track::normalize(&raw, album_id, "Album", "Artist", rank as usize),
            rank,
        }
    }

    fn deep_cuts(name: &str, entries: Vec<RankedTrack>) -> DraftPlaylist {
        let mut p = DraftPlaylist::new(name, "", PlaylistKind::DeepCuts);
        p.entries = entries;
        p
    }

    #[test]
    fn short_playlist_is_dissolved_into_siblings() {
        let mut playlists = vec![
            deep_cuts("Deep Cuts Vol. 1", vec![entry("alb-1", 3, 1000), entry("alb-2", 3, 1000)]),
            deep_cuts("Deep Cuts Vol. 2", vec![entry("alb-1", 4, 300)]),
        ];
        let mut tracker = ProvenanceTracker::new();
        dissolve_short_playlists(&mut playlists, 600, 3000, &mut tracker);

        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].entries.len(), 3);
        let relocated = &playlists[0].entries[2];
        assert!(relocated
            .track
            .ranking_info
            .iter()
            .any(|n| n.source == "minimum duration"));
    }

    #[test]
    fn unabsorbable_tracks_become_orphans() {
        let mut playlists = vec![
            deep_cuts("Deep Cuts Vol. 1", vec![entry("alb-1", 3, 2900)]),
            deep_cuts("Deep Cuts Vol. 2", vec![entry("alb-1", 4, 200)]),
        ];
        let mut tracker = ProvenanceTracker::new();
        dissolve_short_playlists(&mut playlists, 600, 2880, &mut tracker);

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[1].kind, PlaylistKind::Orphan);
        assert_eq!(playlists[1].entries.len(), 1);
    }

    #[test]
    fn sole_deep_cut_playlist_is_never_dissolved() {
        let mut playlists = vec![deep_cuts("Deep Cuts Vol. 1", vec![entry("alb-1", 3, 200)])];
        let mut tracker = ProvenanceTracker::new();
        dissolve_short_playlists(&mut playlists, 600, 2880, &mut tracker);
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].entries.len(), 1);
    }

    #[test]
    fn coverage_swap_fills_a_missing_album() {
        // Vol. 2 has nothing from alb-1; Vol. 1 has a spare and Vol. 2 has
        // two tracks from alb-2 to pay with.
        let mut playlists = vec![
            deep_cuts("Deep Cuts Vol. 1", vec![entry("alb-1", 3, 180), entry("alb-1", 5, 180), entry("alb-2", 4, 180)]),
            deep_cuts("Deep Cuts Vol. 2", vec![entry("alb-2", 3, 180), entry("alb-2", 5, 180)]),
        ];
        let mut tracker = ProvenanceTracker::new();
        improve_album_coverage(&mut playlists, 5, &mut tracker);

        assert_eq!(playlists[1].count_from_album("alb-1"), 1);
        assert_eq!(playlists[0].count_from_album("alb-1"), 1);
        // Conservation and the donor got paid.
        assert_eq!(playlists[0].entries.len(), 3);
        assert_eq!(playlists[1].entries.len(), 2);
        // The spare given up was the donor's lowest-ranked alb-1 track.
        assert!(playlists[1].entries.iter().any(|e| e.track.origin_album_id == "alb-1" && e.rank == 5));
    }

    #[test]
    fn coverage_pass_skips_when_impossible() {
        // Three deep cuts but the smallest album only has 2 tracks left.
        let mut playlists = vec![
            deep_cuts("Deep Cuts Vol. 1", vec![entry("alb-1", 3, 180), entry("alb-1", 4, 180)]),
            deep_cuts("Deep Cuts Vol. 2", vec![entry("alb-2", 3, 180)]),
            deep_cuts("Deep Cuts Vol. 3", vec![entry("alb-2", 4, 180)]),
        ];
        let before: Vec<usize> = playlists.iter().map(|p| p.entries.len()).collect();
        let mut tracker = ProvenanceTracker::new();
        improve_album_coverage(&mut playlists, 2, &mut tracker);
        let after: Vec<usize> = playlists.iter().map(|p| p.entries.len()).collect();
        assert_eq!(before, after);
    }
}
