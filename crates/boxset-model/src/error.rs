//! Error types for curation runs.
//!
//! Malformed or partial track data is never an error: every lookup in the
//! engine falls back down a defaulting chain, worst case original disc
//! order. The errors here cover caller mistakes only.

use thiserror::Error;

/// Errors surfaced by the `generate()` entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown distribution algorithm '{id}'")]
    UnknownAlgorithm { id: String },
    #[error("unknown ranking strategy '{id}'")]
    UnknownRanking { id: String },
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl EngineError {
    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::UnknownAlgorithm { .. } => "CURATE_001",
            EngineError::UnknownRanking { .. } => "CURATE_002",
            EngineError::InvalidConfig { .. } => "CURATE_003",
        }
    }
}
