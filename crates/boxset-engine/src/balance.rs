//! Greedy swap balancing.
//!
//! Pulls playlist durations toward a target within a tolerance band by
//! swapping one track between the currently longest and currently shortest
//! playlist per iteration. The loop makes monotonic local progress and is
//! hard-capped; reaching the band is not guaranteed and partial balance is
//! a reportable outcome, not an error.

use boxset_model::PlaylistKind;

use crate::draft::DraftPlaylist;
use crate::provenance::ProvenanceTracker;
use crate::rank::RankedTrack;

/// Iteration cap guaranteeing termination on pathological inputs.
pub const MAX_BALANCE_ITERATIONS: usize = 100;

/// What the balancing loop achieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceOutcome {
    pub iterations: usize,
    /// True when every playlist ended inside the tolerance band.
    pub converged: bool,
}

/// A hit playlist never gives up the track it was built around: rank 1 in
/// vol.1, rank 2 in vol.2. A merged Greatest Hits carries volume 1 and
/// protects both.
fn is_protected(kind: PlaylistKind, entry: &RankedTrack) -> bool {
    match kind {
        PlaylistKind::GreatestHits { volume: 1 } => entry.rank <= 2,
        PlaylistKind::GreatestHits { volume: 2 } => entry.rank == 2,
        _ => false,
    }
}

/// True if removing `entry` would leave `playlist` with no track from the
/// entry's album. Swapping in a track from the same album is fine.
fn would_orphan_album(playlist: &DraftPlaylist, entry: &RankedTrack, incoming: &RankedTrack) -> bool {
    entry.track.origin_album_id != incoming.track.origin_album_id
        && playlist.count_from_album(&entry.track.origin_album_id) == 1
}

struct SwapCandidate {
    over_entry: usize,
    under_entry: usize,
    gap: i64,
}

fn find_swap(over: &DraftPlaylist, under: &DraftPlaylist, current_gap: i64) -> Option<SwapCandidate> {
    let over_dur = over.duration_secs() as i64;
    let under_dur = under.duration_secs() as i64;

    let mut best: Option<SwapCandidate> = None;
    for (i, over_entry) in over.entries.iter().enumerate() {
        if is_protected(over.kind, over_entry) {
            continue;
        }
        for (j, under_entry) in under.entries.iter().enumerate() {
            if is_protected(under.kind, under_entry) {
                continue;
            }
            if would_orphan_album(over, over_entry, under_entry)
                || would_orphan_album(under, under_entry, over_entry)
            {
                continue;
            }

            let delta = over_entry.track.duration_secs as i64 - under_entry.track.duration_secs as i64;
            let gap = ((over_dur - delta) - (under_dur + delta)).abs();
            if gap >= current_gap {
                continue;
            }
            // First-found wins ties: only strictly better candidates replace.
            let better = match &best {
                Some(candidate) => gap < candidate.gap,
                None => true,
            };
            if better {
                best = Some(SwapCandidate {
                    over_entry: i,
                    under_entry: j,
                    gap,
                });
            }
        }
    }
    best
}

fn in_band(duration: u32, target: u32, tolerance: u32) -> bool {
    duration >= target.saturating_sub(tolerance) && duration <= target + tolerance
}

/// Runs the swap loop over `playlists` until every duration sits inside
/// `[target - tolerance, target + tolerance]`, no improving swap exists, or
/// the iteration cap is hit.
pub fn balance(
    playlists: &mut [DraftPlaylist],
    target: u32,
    tolerance: u32,
    tracker: &mut ProvenanceTracker,
) -> BalanceOutcome {
    let mut iterations = 0;

    loop {
        if playlists.len() < 2 {
            break;
        }

        let durations: Vec<u32> = playlists.iter().map(|p| p.duration_secs()).collect();
        let over_idx = durations
            .iter()
            .enumerate()
            .max_by_key(|(_, d)| **d)
            .map(|(i, _)| i)
            .unwrap_or(0);
        let under_idx = durations
            .iter()
            .enumerate()
            .min_by_key(|(_, d)| **d)
            .map(|(i, _)| i)
            .unwrap_or(0);

        if over_idx == under_idx
            || (in_band(durations[over_idx], target, tolerance)
                && in_band(durations[under_idx], target, tolerance))
        {
            break;
        }
        if iterations >= MAX_BALANCE_ITERATIONS {
            break;
        }

        let current_gap = durations[over_idx] as i64 - durations[under_idx] as i64;
        let Some(swap) = find_swap(&playlists[over_idx], &playlists[under_idx], current_gap) else {
            break;
        };

        let mut from_over = playlists[over_idx].entries.remove(swap.over_entry);
        let mut from_under = playlists[under_idx].entries.remove(swap.under_entry);

        let over_title = playlists[over_idx].title.clone();
        let under_title = playlists[under_idx].title.clone();
        let seq = tracker.next_seq();
        from_over.track.annotate(
            format!("moved from '{}' to '{}'", over_title, under_title),
            "balancing",
            None,
            seq,
        );
        let seq = tracker.next_seq();
        from_under.track.annotate(
            format!("moved from '{}' to '{}'", under_title, over_title),
            "balancing",
            None,
            seq,
        );

        playlists[over_idx].entries.push(from_under);
        playlists[under_idx].entries.push(from_over);
        iterations += 1;
    }

    let converged = playlists
        .iter()
        .all(|p| in_band(p.duration_secs(), target, tolerance));
    BalanceOutcome {
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use boxset_model::{RawTrack, Track};
    use pretty_assertions::assert_eq;

    use super::*;

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
    fn swaps_until_within_band() {
        // 1200s vs 600s; swapping a 500 for a 200 lands both at 900.
        let mut playlists = vec![
            deep_cuts(
                "A",
                vec![entry("alb-1", 3, 500), entry("alb-1", 4, 400), entry("alb-2", 5, 300)],
            ),
            deep_cuts(
                "B",
                vec![entry("alb-1", 6, 200), entry("alb-2", 3, 200), entry("alb-2", 4, 200)],
            ),
        ];

        let mut tracker = ProvenanceTracker::new();
        let outcome = balance(&mut playlists, 900, 100, &mut tracker);

        assert!(outcome.converged);
        assert!(outcome.iterations >= 1);
        for p in &playlists {
            let d = p.duration_secs();
            assert!((800..=1000).contains(&d), "duration {} out of band", d);
        }
        // Conservation.
        let total: usize = playlists.iter().map(|p| p.entries.len()).sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn already_balanced_is_a_no_op() {
        let mut playlists = vec![
            deep_cuts("A", vec![entry("alb-1", 3, 900)]),
            deep_cuts("B", vec![entry("alb-2", 3, 900)]),
        ];
        let mut tracker = ProvenanceTracker::new();
        let outcome = balance(&mut playlists, 900, 60, &mut tracker);
        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn protected_hits_never_leave_their_playlist() {
        let mut gh1 = DraftPlaylist::new("Greatest Hits vol.1", "", PlaylistKind::GreatestHits { volume: 1 });
        gh1.entries = vec![entry("alb-1", 1, 2000), entry("alb-2", 1, 2000)];
        let short = deep_cuts("B", vec![entry("alb-1", 5, 100), entry("alb-2", 6, 100)]);

        let hit_ids: Vec<String> = gh1.entries.iter().map(|e| e.track.id.clone()).collect();
        let mut playlists = vec![gh1, short];
        let mut tracker = ProvenanceTracker::new();
        balance(&mut playlists, 2000, 100, &mut tracker);

        // Both rank-1 tracks are still in the Greatest Hits playlist.
        for id in hit_ids {
            assert!(playlists[0].entries.iter().any(|e| e.track.id == id));
        }
    }

    #[test]
    fn never_orphans_an_album() {
        // Playlist A holds alb-1's only track here; a cross-album swap out
        // of A would orphan alb-1 from it.
        let mut playlists = vec![
            deep_cuts("A", vec![entry("alb-1", 3, 1000)]),
            deep_cuts("B", vec![entry("alb-2", 3, 100), entry("alb-2", 4, 100)]),
        ];
        let mut tracker = ProvenanceTracker::new();
        let outcome = balance(&mut playlists, 600, 50, &mut tracker);

        assert!(!outcome.converged);
        assert_eq!(playlists[0].count_from_album("alb-1"), 1);
    }

    #[test]
    fn terminates_within_iteration_cap() {
        // Identical durations everywhere but outside the band: min == max
        // never satisfies the band, and no swap can improve the zero gap.
        let mut playlists = vec![
            deep_cuts("A", vec![entry("alb-1", 3, 100), entry("alb-2", 3, 100)]),
            deep_cuts("B", vec![entry("alb-1", 4, 100), entry("alb-2", 4, 100)]),
        ];
        let mut tracker = ProvenanceTracker::new();
        let outcome = balance(&mut playlists, 2700, 420, &mut tracker);

        assert!(outcome.iterations <= MAX_BALANCE_ITERATIONS);
        assert!(!outcome.converged);
    }

    #[test]
    fn swapped_tracks_are_annotated() {
        let mut playlists = vec![
            deep_cuts(
                "Long",
                vec![entry("alb-1", 3, 500), entry("alb-1", 4, 400), entry("alb-2", 5, 300)],
            ),
            deep_cuts(
                "Short",
                vec![entry("alb-1", 6, 200), entry("alb-2", 3, 200), entry("alb-2", 4, 200)],
            ),
        ];
        let mut tracker = ProvenanceTracker::new();
        let outcome = balance(&mut playlists, 900, 100, &mut tracker);
        assert!(outcome.iterations >= 1);

        let annotated = playlists
            .iter()
            .flat_map(|p| &p.entries)
            .filter(|e| e.track.ranking_info.iter().any(|n| n.source == "balancing"))
            .count();
        assert_eq!(annotated, 2 * outcome.iterations);
    }
}
