//! User-defined ranking.

use boxset_model::{normalize_title, Album, RankingSource};

use super::{enrich, finalize, RankStrategy, RankedTrack, RankingId, UserRankMap};
use crate::provenance::ProvenanceTracker;

/// Rank value standing in for "the user did not rank this track".
/// Unranked tracks sort after every ranked one, in original disc order.
pub const UNRANKED_SENTINEL: u32 = 999;

/// Sorts by a caller-supplied per-track rank, matched by normalized title.
pub struct UserRanking {
    ranks: UserRankMap,
}

impl UserRanking {
    pub fn new(ranks: UserRankMap) -> Self {
        Self { ranks }
    }

    fn rank_for(&self, title: &str) -> u32 {
        self.ranks
            .get(&normalize_title(title))
            .copied()
            .unwrap_or(UNRANKED_SENTINEL)
    }
}

impl RankStrategy for UserRanking {
    fn id(&self) -> RankingId {
        RankingId::User
    }

    fn label(&self) -> &'static str {
        "User Ranking"
    }

    fn rank(&self, album: &Album, tracker: &mut ProvenanceTracker) -> Vec<RankedTrack> {
        tracker.register_source(RankingSource {
            name: "User Ranking".to_string(),
            kind: "user".to_string(),
            reference: String::new(),
            secure: false,
            description: "Caller-supplied per-track ranks".to_string(),
        });

        let mut tracks = enrich::enrich_album(album, tracker);
        tracks.sort_by(|a, b| {
            self.rank_for(&a.title)
                .cmp(&self.rank_for(&b.title))
                .then_with(|| a.position.cmp(&b.position))
        });
        finalize(tracks, self.label(), tracker)
    }
}
