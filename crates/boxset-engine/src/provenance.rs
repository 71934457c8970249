//! Provenance tracking across a generation run.
//!
//! The tracker accumulates named ranking sources (deduplicated, first
//! registration wins) and an album identity lookup populated as strategies
//! rank albums. After distribution it folds the final playlists into a
//! per-album summary.

use std::collections::{BTreeMap, HashMap};

use boxset_model::{source_key, Album, AlbumSummary, PlacedTrack, RankingSource};

use crate::draft::DraftPlaylist;

#[derive(Debug, Clone)]
struct AlbumIdentity {
    title: String,
    artist: String,
}

/// Run-scoped accumulator for sources, album identities, and note sequence
/// numbers. One tracker per `generate()` call; nothing survives the run.
#[derive(Debug, Default)]
pub struct ProvenanceTracker {
    sources: HashMap<String, RankingSource>,
    source_order: Vec<String>,
    albums: HashMap<String, AlbumIdentity>,
    seq: u64,
}

impl ProvenanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a source under its normalized name key.
    ///
    /// Returns true if the source was new. Re-registration under the same
    /// key is a no-op: the first registration wins.
    pub fn register_source(&mut self, source: RankingSource) -> bool {
        let key = source_key(&source.name);
        if key.is_empty() || self.sources.contains_key(&key) {
            return false;
        }
        self.source_order.push(key.clone());
        self.sources.insert(key, source);
        true
    }

    /// Records an album's identity for the end-of-run summary.
    pub fn register_album(&mut self, album: &Album) {
        self.albums
            .entry(album.id.clone())
            .or_insert_with(|| AlbumIdentity {
                title: album.title.clone(),
                artist: album.artist.clone(),
            });
    }

    /// Next note sequence number. Monotonic within the run.
    pub fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Returns true if a source with this name has been registered.
    pub fn has_source(&self, name: &str) -> bool {
        self.sources.contains_key(&source_key(name))
    }

    /// All registered sources in first-registration order.
    pub fn sources(&self) -> Vec<RankingSource> {
        self.source_order
            .iter()
            .filter_map(|key| self.sources.get(key))
            .cloned()
            .collect()
    }

    /// Builds the per-album summary from the final drafts.
    ///
    /// Keyed by origin album id; albums that contributed no tracks never
    /// appear. Each album lists its placed tracks in rank order together
    /// with the deduplicated registered-source names that touched them.
    pub fn build_summary(&self, drafts: &[DraftPlaylist]) -> BTreeMap<String, AlbumSummary> {
        let mut summary: BTreeMap<String, AlbumSummary> = BTreeMap::new();

        for draft in drafts {
            for entry in &draft.entries {
                let album_id = entry.track.origin_album_id.clone();
                let identity = self.albums.get(&album_id);
                let album_summary =
                    summary
                        .entry(album_id.clone())
                        .or_insert_with(|| AlbumSummary {
                            album_id: album_id.clone(),
                            title: identity.map(|a| a.title.clone()).unwrap_or_default(),
                            artist: identity.map(|a| a.artist.clone()).unwrap_or_default(),
                            tracks: Vec::new(),
                            sources: Vec::new(),
                        });

                album_summary.tracks.push(PlacedTrack {
                    track_id: entry.track.id.clone(),
                    title: entry.track.title.clone(),
                    rank: entry.rank,
                    playlist: draft.title.clone(),
                    duration_secs: entry.track.duration_secs,
                    notes: entry.track.ranking_info.clone(),
                });

                for note in &entry.track.ranking_info {
                    // Only named, registered sources count; phase labels
                    // ("balancing", "hit extraction") are not sources.
                    if let Some(source) = self.sources.get(&source_key(&note.source)) {
                        if !album_summary.sources.contains(&source.name) {
                            album_summary.sources.push(source.name.clone());
                        }
                    }
                }
            }
        }

        for album_summary in summary.values_mut() {
            album_summary
                .tracks
                .sort_by(|a, b| a.rank.cmp(&b.rank).then(a.track_id.cmp(&b.track_id)));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use boxset_model::{PlaylistKind, RawTrack, Track};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rank::RankedTrack;

    #[test]
    fn first_registration_wins() {
        let mut tracker = ProvenanceTracker::new();
        let mut first = RankingSource::new("Best Ever Albums", "critic");
        first.description = "original".to_string();
        let mut second = RankingSource::new("best-ever albums!", "critic");
        second.description = "imposter".to_string();

        assert!(tracker.register_source(first));
        assert!(!tracker.register_source(second));

        let sources = tracker.sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].description, "original");
    }

    #[test]
    fn source_order_is_first_registration_order() {
        let mut tracker = ProvenanceTracker::new();
        tracker.register_source(RankingSource::new("Zeta", "critic"));
        tracker.register_source(RankingSource::new("Alpha", "critic"));
        let names: Vec<String> = tracker.sources().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Zeta".to_string(), "Alpha".to_string()]);
    }

    #[test]
    fn summary_groups_by_album_and_filters_sources() {
        let mut tracker = ProvenanceTracker::new();
        tracker.register_source(RankingSource::new("Acclaimed Music", "critic"));

        let album = Album::new("alb-1", "OK Computer", "Radiohead");
        tracker.register_album(&album);

        let raw = RawTrack {
            duration: Some(240),
            ..Default::default()
        };
        let mut track = Track::normalize(&raw, "alb-1", "OK Computer", "Radiohead", 0);
        let seq = tracker.next_seq();
        track.annotate("ranked #1", "Acclaimed Music", Some(1.0), seq);
        let seq = tracker.next_seq();
        track.annotate("placed", "hit extraction", None, seq);

        let mut draft = DraftPlaylist::new("Greatest Hits", "", PlaylistKind::GreatestHits { volume: 1 });
        draft.entries.push(RankedTrack { track, rank: 1 });

        let summary = tracker.build_summary(&[draft]);
        let album_summary = summary.get("alb-1").unwrap();
        assert_eq!(album_summary.title, "OK Computer");
        assert_eq!(album_summary.tracks.len(), 1);
        assert_eq!(album_summary.tracks[0].playlist, "Greatest Hits");
        assert_eq!(album_summary.tracks[0].notes.len(), 2);
        // "hit extraction" is a phase label, not a registered source.
        assert_eq!(album_summary.sources, vec!["Acclaimed Music".to_string()]);
    }

    #[test]
    fn seq_is_monotonic() {
        let mut tracker = ProvenanceTracker::new();
        let a = tracker.next_seq();
        let b = tracker.next_seq();
        assert!(b > a);
    }
}
