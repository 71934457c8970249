//! Top-N selection.
//!
//! Takes the best `track_count` tracks from every album, orders the
//! combined pool per the configured grouping, and emits either one
//! playlist or a sequential split at target-duration boundaries. No
//! balancing, trimming, or hit extraction happens here.

use boxset_model::{Album, GroupingStrategy, OutputMode, PlaylistKind};

use super::{Distributor, RunContext};
use crate::draft::DraftPlaylist;
use crate::rank::RankedTrack;
use crate::registry::{algorithm_info, AlgorithmId, AlgorithmInfo};
use crate::shuffle::{rng_for, rng_from_entropy};

/// A selected track plus the ordering context the groupings key on.
struct Selected {
    entry: RankedTrack,
    album_index: usize,
    /// Order of the artist's first appearance in the input.
    artist_index: usize,
}

fn order_selection(selection: &mut [Selected], grouping: GroupingStrategy, seed: Option<u32>) {
    match grouping {
        // Already album-by-album in input order, rank order within.
        GroupingStrategy::AlbumOrder => {}
        GroupingStrategy::ByRank => {
            selection.sort_by_key(|s| (s.entry.rank, s.album_index));
        }
        GroupingStrategy::ByArtist => {
            selection.sort_by_key(|s| (s.artist_index, s.entry.rank, s.album_index));
        }
        GroupingStrategy::Interleave => {
            selection.sort_by_key(|s| (s.entry.rank, s.artist_index, s.album_index));
        }
        GroupingStrategy::Shuffle => {
            use rand::seq::SliceRandom;
            let mut rng = match seed {
                Some(seed) => rng_for(seed, "top-n shuffle"),
                None => rng_from_entropy(),
            };
            selection.shuffle(&mut rng);
        }
    }
}

/// Splits an ordered pool at target boundaries without reordering. A track
/// that would push the current playlist past the target starts the next
/// one; the first track of a playlist is always taken.
fn split_at_target(pool: Vec<RankedTrack>, base_title: &str, target: u32) -> Vec<DraftPlaylist> {
    let mut playlists: Vec<DraftPlaylist> = Vec::new();
    for entry in pool {
        let fits = playlists.last().is_some_and(|p: &DraftPlaylist| {
            p.entries.is_empty() || p.duration_secs() + entry.track.duration_secs <= target
        });
        if !fits {
            let volume = playlists.len() + 1;
            playlists.push(DraftPlaylist::new(
                format!("{} Vol. {}", base_title, volume),
                "",
                PlaylistKind::Selection,
            ));
        }
        if let Some(playlist) = playlists.last_mut() {
            playlist.entries.push(entry);
        }
    }
    if playlists.len() == 1 {
        playlists[0].title = base_title.to_string();
    }
    playlists
}

/// The sampler: best N tracks per album, no distribution phases.
pub struct TopN;

impl Distributor for TopN {
    fn info(&self) -> &'static AlgorithmInfo {
        algorithm_info(AlgorithmId::TopN)
    }

    fn distribute(&self, albums: &[Album], ctx: &mut RunContext<'_>) -> Vec<DraftPlaylist> {
        let take = ctx.config.track_count;
        let mut artists: Vec<String> = Vec::new();
        let mut selection: Vec<Selected> = Vec::new();

        for (album_index, album) in albums.iter().enumerate() {
            if album.tracks.is_empty() {
                continue;
            }
            let artist_index = match artists.iter().position(|a| *a == album.artist) {
                Some(index) => index,
                None => {
                    artists.push(album.artist.clone());
                    artists.len() - 1
                }
            };
            for mut entry in ctx.strategy.rank(album, &mut ctx.tracker).into_iter().take(take) {
                let seq = ctx.tracker.next_seq();
                entry.track.annotate(
                    format!("selected as a top {} track of '{}'", take, album.title),
                    "top-n selection",
                    None,
                    seq,
                );
                selection.push(Selected {
                    entry,
                    album_index,
                    artist_index,
                });
            }
        }

        order_selection(&mut selection, ctx.config.grouping, ctx.config.shuffle_seed);
        let pool: Vec<RankedTrack> = selection.into_iter().map(|s| s.entry).collect();

        let total: u64 = pool.iter().map(|e| e.track.duration_secs as u64).sum();
        let base_title = format!("Top {}: {}", take, ctx.strategy.label());

        if ctx.config.output_mode == OutputMode::Single || total <= ctx.config.target_seconds as u64 {
            let mut playlist = DraftPlaylist::new(base_title, "", PlaylistKind::Selection);
            playlist.entries = pool;
            vec![playlist]
        } else {
            split_at_target(pool, &base_title, ctx.config.target_seconds)
        }
    }
}
