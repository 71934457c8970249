//! Acclaim ranking: critic rating first.

use boxset_model::Album;

use super::{cmp_rank_asc, cmp_score_desc, enrich, finalize, RankStrategy, RankedTrack, RankingId};
use crate::provenance::ProvenanceTracker;

/// Reuses balanced enrichment, then re-sorts by rating alone, falling back
/// to the remaining evidence fields and then original disc order.
pub struct AcclaimRanking;

impl RankStrategy for AcclaimRanking {
    fn id(&self) -> RankingId {
        RankingId::Acclaim
    }

    fn label(&self) -> &'static str {
        "Acclaim"
    }

    fn rank(&self, album: &Album, tracker: &mut ProvenanceTracker) -> Vec<RankedTrack> {
        let mut tracks = enrich::enrich_album(album, tracker);
        tracks.sort_by(|a, b| {
            cmp_score_desc(a.rating, b.rating)
                .then_with(|| cmp_rank_asc(a.acclaim_rank, b.acclaim_rank))
                .then_with(|| cmp_score_desc(a.acclaim_score, b.acclaim_score))
                .then_with(|| a.position.cmp(&b.position))
        });
        finalize(tracks, self.label(), tracker)
    }
}
