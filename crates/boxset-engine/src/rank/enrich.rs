//! Evidence enrichment.
//!
//! Normalizes an album's raw provider tracks and folds the album's ranking
//! evidence arrays into the canonical fields. Each field defaults
//! independently to the next source in its chain; enrichment never fails,
//! and the album's own evidence arrays are never mutated.

use std::collections::HashMap;

use boxset_model::{normalize_title, Album, EvidenceEntry, RankingSource, Track};

use crate::provenance::ProvenanceTracker;

/// Source descriptor for the consolidated multi-source ranking.
pub fn consolidated_source() -> RankingSource {
    RankingSource {
        name: "Consolidated Ranking".to_string(),
        kind: "aggregate".to_string(),
        reference: String::new(),
        secure: false,
        description: "Multi-source consolidated album track ranking".to_string(),
    }
}

/// Source descriptor for best-ever-albums critic ratings.
pub fn best_ever_source() -> RankingSource {
    RankingSource {
        name: "Best Ever Albums".to_string(),
        kind: "critic".to_string(),
        reference: "besteveralbums.com".to_string(),
        secure: true,
        description: "Critic-aggregated track ratings".to_string(),
    }
}

/// Source descriptor for acclaim score scrapes.
pub fn acclaim_source() -> RankingSource {
    RankingSource {
        name: "Acclaimed Music".to_string(),
        kind: "critic".to_string(),
        reference: "acclaimedmusic.net".to_string(),
        secure: true,
        description: "Normalized critical acclaim scores".to_string(),
    }
}

fn index_by_title(entries: &Option<Vec<EvidenceEntry>>) -> HashMap<String, &EvidenceEntry> {
    let mut map = HashMap::new();
    if let Some(entries) = entries {
        for entry in entries {
            // First entry per normalized title wins.
            map.entry(normalize_title(&entry.title)).or_insert(entry);
        }
    }
    map
}

/// Normalizes and enriches one album's tracks.
///
/// Registers the album identity, the album's declared ranking sources, and
/// whichever built-in evidence sources actually contributed a field.
pub fn enrich_album(album: &Album, tracker: &mut ProvenanceTracker) -> Vec<Track> {
    tracker.register_album(album);
    if let Some(sources) = &album.ranking_sources {
        for source in sources {
            tracker.register_source(source.clone());
        }
    }

    let consolidated = index_by_title(&album.ranking_consolidated);
    let best_ever = index_by_title(&album.best_ever_evidence);
    let acclaim = index_by_title(&album.ranking_acclaim);

    let mut tracks = Vec::with_capacity(album.tracks.len());
    for (position, raw) in album.tracks.iter().enumerate() {
        let mut track = Track::normalize(raw, &album.id, &album.title, &album.artist, position);
        let key = normalize_title(&track.title);

        // Explicit acclaim rank: track field, else consolidated evidence.
        if track.acclaim_rank.is_none() {
            if let Some(entry) = consolidated.get(&key) {
                if let Some(rank) = entry.rank {
                    track.acclaim_rank = Some(rank);
                    tracker.register_source(consolidated_source());
                    let seq = tracker.next_seq();
                    track.annotate(
                        format!("consolidated rank #{}", rank),
                        consolidated_source().name,
                        entry.score,
                        seq,
                    );
                }
            }
        }

        // Rating: track field, else best-ever, else consolidated.
        if track.rating.is_none() {
            let from_best_ever = best_ever.get(&key).and_then(|e| e.rating);
            let from_consolidated = consolidated.get(&key).and_then(|e| e.rating);
            if let Some(rating) = from_best_ever {
                track.rating = Some(rating);
                tracker.register_source(best_ever_source());
                let seq = tracker.next_seq();
                track.annotate("critic rating applied", best_ever_source().name, Some(rating), seq);
            } else if let Some(rating) = from_consolidated {
                track.rating = Some(rating);
                tracker.register_source(consolidated_source());
                let seq = tracker.next_seq();
                track.annotate("consolidated rating applied", consolidated_source().name, Some(rating), seq);
            }
        }

        // Score: track field, else acclaim scrape, else consolidated.
        if track.acclaim_score.is_none() {
            let from_acclaim = acclaim.get(&key).and_then(|e| e.score);
            let from_consolidated = consolidated.get(&key).and_then(|e| e.score);
            if let Some(score) = from_acclaim {
                track.acclaim_score = Some(score);
                tracker.register_source(acclaim_source());
                let seq = tracker.next_seq();
                track.annotate("acclaim score applied", acclaim_source().name, Some(score), seq);
            } else if let Some(score) = from_consolidated {
                track.acclaim_score = Some(score);
                tracker.register_source(consolidated_source());
                let seq = tracker.next_seq();
                track.annotate("consolidated score applied", consolidated_source().name, Some(score), seq);
            }
        }

        tracks.push(track);
    }

    tracks
}
