//! Ranking source descriptors.

use serde::{Deserialize, Serialize};

/// A named provenance source (a critic list, a streaming catalog, a user).
///
/// Sources are deduplicated by [`source_key`]; once a key is registered the
/// first registration wins and is never overwritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSource {
    pub name: String,
    /// Source category, e.g. "critic", "streaming", "user".
    #[serde(default)]
    pub kind: String,
    /// Where the data came from (URL or provider id).
    #[serde(default)]
    pub reference: String,
    /// Whether the reference uses a secure transport.
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub description: String,
}

impl RankingSource {
    /// Creates a source with just a name and kind.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }
}

/// Normalizes a source name into its dedup key: lowercase, alphanumerics
/// only. "Best Ever Albums" and "best-ever albums!" share a key.
pub fn source_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn key_is_case_and_punctuation_insensitive() {
        assert_eq!(source_key("Best Ever Albums"), "besteveralbums");
        assert_eq!(source_key("best-ever albums!"), "besteveralbums");
        assert_ne!(source_key("Spotify"), source_key("Acclaimed Music"));
    }
}
