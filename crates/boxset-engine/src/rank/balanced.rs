//! Balanced ranking: merged multi-source evidence.

use boxset_model::Album;

use super::{balanced_order, enrich, finalize, RankStrategy, RankedTrack, RankingId};
use crate::provenance::ProvenanceTracker;

/// The default strategy. Primary key: explicit acclaim rank ascending
/// (missing sorts last); then rating descending, score descending, and
/// finally original disc order for stability.
pub struct BalancedRanking;

impl RankStrategy for BalancedRanking {
    fn id(&self) -> RankingId {
        RankingId::Balanced
    }

    fn label(&self) -> &'static str {
        "Balanced"
    }

    fn rank(&self, album: &Album, tracker: &mut ProvenanceTracker) -> Vec<RankedTrack> {
        let mut tracks = enrich::enrich_album(album, tracker);
        tracks.sort_by(balanced_order);
        finalize(tracks, self.label(), tracker)
    }
}
