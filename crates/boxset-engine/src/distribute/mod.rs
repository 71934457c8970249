//! Distribution algorithms.
//!
//! An algorithm consumes ranked albums and produces draft playlists. Each
//! `distribute` call is a pure function of its inputs; no state persists
//! between runs.

use boxset_model::{Album, GenerateConfig};

use crate::draft::DraftPlaylist;
use crate::provenance::ProvenanceTracker;
use crate::rank::RankStrategy;
use crate::registry::AlgorithmInfo;

pub mod hits;

mod cascade;
mod round_robin;
mod sdraft;
mod serpentine;
mod top_n;


pub use cascade::BalancedCascade;
pub use round_robin::RoundRobin;
pub use sdraft::SDraftBalanced;
pub use serpentine::FullSerpentine;
pub use top_n::TopN;

/// Everything one generation run threads through its phases.
pub struct RunContext<'a> {
    pub config: &'a GenerateConfig,
    pub strategy: Box<dyn RankStrategy>,
    pub tracker: ProvenanceTracker,
}

/// Polymorphic distribution capability.
pub trait Distributor {
    /// Static metadata for selection UIs.
    fn info(&self) -> &'static AlgorithmInfo;

    /// Places every track of every album into draft playlists.
    fn distribute(&self, albums: &[Album], ctx: &mut RunContext<'_>) -> Vec<DraftPlaylist>;
}

/// Number of playlists needed to hold `total_secs` at `per_playlist`
/// seconds each. At least 1 whenever there is anything to place.
pub(crate) fn playlist_count_for(total_secs: u64, per_playlist: u32) -> usize {
    if total_secs == 0 || per_playlist == 0 {
        return 1;
    }
    total_secs.div_ceil(per_playlist as u64) as usize
}

/// Standard deep-cut playlist set with "Deep Cuts Vol. N" titles.
pub(crate) fn deep_cut_playlists(count: usize) -> Vec<DraftPlaylist> {
    (1..=count.max(1))
        .map(|volume| {
            DraftPlaylist::new(
                format!("Deep Cuts Vol. {}", volume),
                "",
                boxset_model::PlaylistKind::DeepCuts,
            )
        })
        .collect()
}
