//! Popularity ranking: streaming signals first.

use boxset_model::Album;

use super::{balanced_order, cmp_rank_asc, enrich, finalize, RankStrategy, RankedTrack, RankingId};
use crate::provenance::ProvenanceTracker;

/// Sorts by streaming popularity descending, then catalog rank ascending,
/// then the balanced chain.
pub struct PopularityRanking;

impl RankStrategy for PopularityRanking {
    fn id(&self) -> RankingId {
        RankingId::Popularity
    }

    fn label(&self) -> &'static str {
        "Popularity"
    }

    fn rank(&self, album: &Album, tracker: &mut ProvenanceTracker) -> Vec<RankedTrack> {
        let mut tracks = enrich::enrich_album(album, tracker);
        tracks.sort_by(|a, b| {
            let popularity = match (a.spotify_popularity, b.spotify_popularity) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            };
            popularity
                .then_with(|| cmp_rank_asc(a.spotify_rank, b.spotify_rank))
                .then_with(|| balanced_order(a, b))
        });
        finalize(tracks, self.label(), tracker)
    }
}
