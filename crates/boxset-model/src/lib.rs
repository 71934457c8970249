//! Boxset Data Model
//!
//! This crate provides the contract types shared between the curation
//! engine and its callers: canonical tracks, albums, playlists, run
//! configuration, and the provenance summary handed back after generation.
//!
//! The engine consumes already-enriched [`Album`] documents (tracks
//! carrying rating/acclaim/popularity fields in whatever subset a provider
//! managed to deliver) and produces [`Playlist`]s plus a
//! [`GenerateOutput`] provenance summary. All types are plain serde data;
//! no I/O happens anywhere in this workspace.
//!
//! # Modules
//!
//! - [`track`]: raw provider records, the canonical track, provenance notes
//! - [`album`]: album input contract with ranking evidence arrays
//! - [`playlist`]: playlist output contract and playlist roles
//! - [`config`]: per-run configuration with documented defaults
//! - [`source`]: ranking source descriptors and dedup keying
//! - [`summary`]: end-of-run summary types
//! - [`error`]: typed errors for caller mistakes

pub mod album;
pub mod config;
pub mod error;
pub mod playlist;
pub mod source;
pub mod summary;
pub mod track;

pub use album::{Album, EvidenceEntry};
pub use config::{
    GenerateConfig, GroupingStrategy, OutputMode, DEFAULT_DEEP_CUTS_MAX,
    DEFAULT_FLEXIBILITY_SECONDS, DEFAULT_GREATEST_HITS_MAX, DEFAULT_MINIMUM_DURATION,
    DEFAULT_TARGET_SECONDS, DEFAULT_TRACK_COUNT,
};
pub use error::EngineError;
pub use playlist::{Playlist, PlaylistKind};
pub use source::{source_key, RankingSource};
pub use summary::{AlbumSummary, GenerateOutput, PlacedTrack};
pub use track::{normalize_title, RankingNote, RawTrack, Track};
