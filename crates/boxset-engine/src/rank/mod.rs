//! Ranking strategies.
//!
//! A strategy takes an album and returns its tracks in descending-quality
//! order, each tagged with a 1-based rank. Ranks travel alongside the
//! track in [`RankedTrack`] records instead of being mutated onto shared
//! track objects, so running strategies in sequence can never leak state.

use std::cmp::Ordering;
use std::collections::HashMap;

use boxset_model::{Album, GenerateConfig, Track};

use crate::provenance::ProvenanceTracker;

mod acclaim;
mod balanced;
pub mod enrich;
mod popularity;
mod user;


pub use acclaim::AcclaimRanking;
pub use balanced::BalancedRanking;
pub use popularity::PopularityRanking;
pub use user::{UserRanking, UNRANKED_SENTINEL};

/// A track paired with the rank a strategy assigned it.
#[derive(Debug, Clone)]
pub struct RankedTrack {
    pub track: Track,
    /// 1-based; 1 is the album's best track under the chosen criterion.
    pub rank: u32,
}

/// Ranking strategy identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankingId {
    /// Merged multi-source evidence (default).
    Balanced,
    /// Critic rating first.
    Acclaim,
    /// Streaming popularity first.
    Popularity,
    /// Caller-supplied per-track ranks.
    User,
}

impl RankingId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingId::Balanced => "balanced",
            RankingId::Acclaim => "acclaim",
            RankingId::Popularity => "popularity",
            RankingId::User => "user",
        }
    }

    /// Returns all ranking ids.
    pub fn all() -> &'static [RankingId] {
        &[
            RankingId::Balanced,
            RankingId::Acclaim,
            RankingId::Popularity,
            RankingId::User,
        ]
    }
}

impl std::fmt::Display for RankingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RankingId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(RankingId::Balanced),
            "acclaim" => Ok(RankingId::Acclaim),
            "popularity" => Ok(RankingId::Popularity),
            "user" => Ok(RankingId::User),
            _ => Err(format!("unknown ranking strategy: {}", s)),
        }
    }
}

/// Polymorphic ranking capability.
///
/// `rank` must return every track of the album exactly once, ranks 1..N,
/// and must never fail: absence of any ranking signal falls back down the
/// strategy's chain and ends at original disc order.
pub trait RankStrategy {
    fn id(&self) -> RankingId;

    /// Human-readable label used for playlist titles and note sources.
    fn label(&self) -> &'static str;

    fn rank(&self, album: &Album, tracker: &mut ProvenanceTracker) -> Vec<RankedTrack>;
}

/// Resolves a ranking id to a strategy instance.
///
/// Returns `None` on an unknown id; the caller decides how to surface it.
pub fn strategy_for(id: &str, config: &GenerateConfig) -> Option<Box<dyn RankStrategy>> {
    match id.parse::<RankingId>().ok()? {
        RankingId::Balanced => Some(Box::new(BalancedRanking)),
        RankingId::Acclaim => Some(Box::new(AcclaimRanking)),
        RankingId::Popularity => Some(Box::new(PopularityRanking)),
        RankingId::User => Some(Box::new(UserRanking::new(
            config.user_ranks.clone().unwrap_or_default(),
        ))),
    }
}

/// Ascending comparison where a missing rank sorts last (missing = +inf).
pub(crate) fn cmp_rank_asc(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descending comparison where a missing value sorts last.
pub(crate) fn cmp_score_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The balanced priority chain: explicit acclaim rank, then rating, then
/// score, then original disc order. Shared by several strategies as their
/// final fallback.
pub(crate) fn balanced_order(a: &Track, b: &Track) -> Ordering {
    cmp_rank_asc(a.acclaim_rank, b.acclaim_rank)
        .then_with(|| cmp_score_desc(a.rating, b.rating))
        .then_with(|| cmp_score_desc(a.acclaim_score, b.acclaim_score))
        .then_with(|| a.position.cmp(&b.position))
}

/// Tags sorted tracks with 1-based ranks and a per-track ranking note.
pub(crate) fn finalize(
    mut tracks: Vec<Track>,
    label: &str,
    tracker: &mut ProvenanceTracker,
) -> Vec<RankedTrack> {
    let total = tracks.len();
    for (index, track) in tracks.iter_mut().enumerate() {
        let seq = tracker.next_seq();
        track.annotate(
            format!("ranked #{} of {}", index + 1, total),
            label.to_string(),
            None,
            seq,
        );
    }
    tracks
        .into_iter()
        .enumerate()
        .map(|(index, track)| RankedTrack {
            track,
            rank: (index + 1) as u32,
        })
        .collect()
}

/// User-rank lookup shared with the user strategy.
pub(crate) type UserRankMap = HashMap<String, u32>;
