//! Album input contract.

use serde::{Deserialize, Serialize};

use crate::source::RankingSource;
use crate::track::RawTrack;

/// A piece of per-track ranking evidence attached to an album.
///
/// Evidence entries come from the enrichment pipeline (consolidated
/// rankings, best-ever lists, acclaim scrapes) and are matched to tracks by
/// normalized title. They are fallback/tie-break inputs and are never
/// mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceEntry {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// An already-enriched album as consumed from the metadata collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Raw provider tracks in disc order.
    #[serde(default)]
    pub tracks: Vec<RawTrack>,
    /// Consolidated multi-source ranking, when the enrichment pipeline
    /// produced one. Highest-priority evidence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_consolidated: Option<Vec<EvidenceEntry>>,
    /// Best-ever-albums critic evidence (ratings).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_ever_evidence: Option<Vec<EvidenceEntry>>,
    /// Acclaim scrape evidence (normalized scores).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_acclaim: Option<Vec<EvidenceEntry>>,
    /// Named sources that produced the evidence above.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_sources: Option<Vec<RankingSource>>,
}

impl Album {
    /// Creates an album with just identity fields. Mostly for tests.
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            ..Default::default()
        }
    }

    /// Number of tracks in the album.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}
