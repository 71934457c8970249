//! Distribution algorithm registry.
//!
//! Maps stable string ids to algorithm instances and carries the static
//! metadata a selection UI needs. Ids are part of the configuration
//! contract and never change meaning.

use crate::distribute::{
    BalancedCascade, Distributor, FullSerpentine, RoundRobin, SDraftBalanced, TopN,
};

/// Distribution algorithm identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// Legacy hit back-fill plus round-robin draw.
    RoundRobin,
    /// Full serpentine placement, no repair passes.
    Serpentine,
    /// Serpentine plus rank cascade, merging and trimming (recommended).
    BalancedCascade,
    /// Serpentine plus minimum-duration and album-coverage repairs.
    SDraft,
    /// Best-N-per-album sampler.
    TopN,
}

impl AlgorithmId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::RoundRobin => "round_robin",
            AlgorithmId::Serpentine => "serpentine",
            AlgorithmId::BalancedCascade => "balanced_cascade",
            AlgorithmId::SDraft => "s_draft",
            AlgorithmId::TopN => "top_n",
        }
    }

    /// Returns all algorithm ids, in presentation order.
    pub fn all() -> &'static [AlgorithmId] {
        &[
            AlgorithmId::BalancedCascade,
            AlgorithmId::SDraft,
            AlgorithmId::Serpentine,
            AlgorithmId::RoundRobin,
            AlgorithmId::TopN,
        ]
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AlgorithmId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round_robin" => Ok(AlgorithmId::RoundRobin),
            "serpentine" => Ok(AlgorithmId::Serpentine),
            "balanced_cascade" => Ok(AlgorithmId::BalancedCascade),
            "s_draft" => Ok(AlgorithmId::SDraft),
            "top_n" => Ok(AlgorithmId::TopN),
            _ => Err(format!("unknown distribution algorithm: {}", s)),
        }
    }
}

/// Static algorithm metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    /// Display name.
    pub name: &'static str,
    /// Short selection-UI tag.
    pub badge: &'static str,
    pub description: &'static str,
    pub recommended: bool,
}

static ALGORITHMS: [AlgorithmInfo; 5] = [
    AlgorithmInfo {
        id: AlgorithmId::BalancedCascade,
        name: "Balanced Cascade",
        badge: "recommended",
        description: "Serpentine up to a rank ceiling, cascades the rest by rank, \
                      then merges and trims deep cuts to the hard ceiling.",
        recommended: true,
    },
    AlgorithmInfo {
        id: AlgorithmId::SDraft,
        name: "S-Draft Balanced",
        badge: "balanced",
        description: "Serpentine placement with minimum-duration dissolution and \
                      an album coverage pass.",
        recommended: false,
    },
    AlgorithmInfo {
        id: AlgorithmId::Serpentine,
        name: "Full Serpentine",
        badge: "original",
        description: "Pure zigzag placement across target-sized deep cut playlists.",
        recommended: false,
    },
    AlgorithmInfo {
        id: AlgorithmId::RoundRobin,
        name: "Round-Robin",
        badge: "legacy",
        description: "Back-fills the hit playlists to the target, then deals the \
                      remainder one track per album per pass.",
        recommended: false,
    },
    AlgorithmInfo {
        id: AlgorithmId::TopN,
        name: "Top-N Selection",
        badge: "sampler",
        description: "The best N tracks of every album, grouped and optionally \
                      split at the target duration.",
        recommended: false,
    },
];

/// Metadata for one algorithm.
pub fn algorithm_info(id: AlgorithmId) -> &'static AlgorithmInfo {
    match id {
        AlgorithmId::BalancedCascade => &ALGORITHMS[0],
        AlgorithmId::SDraft => &ALGORITHMS[1],
        AlgorithmId::Serpentine => &ALGORITHMS[2],
        AlgorithmId::RoundRobin => &ALGORITHMS[3],
        AlgorithmId::TopN => &ALGORITHMS[4],
    }
}

/// All algorithms, in presentation order.
pub fn list() -> &'static [AlgorithmInfo] {
    &ALGORITHMS
}

/// The default choice for callers that don't care.
pub fn recommended() -> AlgorithmId {
    AlgorithmId::BalancedCascade
}

/// Resolves an algorithm id to an instance.
///
/// Returns `None` on an unknown id; the caller decides how to surface it.
pub fn create(id: &str) -> Option<Box<dyn Distributor>> {
    match id.parse::<AlgorithmId>().ok()? {
        AlgorithmId::RoundRobin => Some(Box::new(RoundRobin)),
        AlgorithmId::Serpentine => Some(Box::new(FullSerpentine)),
        AlgorithmId::BalancedCascade => Some(Box::new(BalancedCascade)),
        AlgorithmId::SDraft => Some(Box::new(SDraftBalanced)),
        AlgorithmId::TopN => Some(Box::new(TopN)),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ids_round_trip() {
        for id in AlgorithmId::all() {
            let parsed: AlgorithmId = id.as_str().parse().unwrap();
            assert_eq!(parsed, *id);
        }
        assert!("bogus".parse::<AlgorithmId>().is_err());
    }

    #[test]
    fn every_id_resolves_to_an_instance() {
        for id in AlgorithmId::all() {
            let algorithm = create(id.as_str()).unwrap();
            assert_eq!(algorithm.info().id, *id);
        }
        assert!(create("bogus").is_none());
    }

    #[test]
    fn exactly_one_recommendation() {
        let flagged: Vec<_> = list().iter().filter(|a| a.recommended).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].id, recommended());
    }
}
