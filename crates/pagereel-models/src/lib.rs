//! Shared data models for PageReel backend.
//!
//! This crate provides Serde-serializable types for:
//! - Scenes and asset references
//! - Generation settings and option catalogs
//! - Liked (library) assets
//! - Submitted jobs and the works listing

pub mod asset;
pub mod fingerprint;
pub mod job;
pub mod library;
pub mod options;
pub mod scene;
pub mod settings;

// Re-export common types
pub use asset::{file_suffix, location_suffix, url_filename, AssetKind, AssetRef, KindParseError};
pub use fingerprint::fingerprint;
pub use job::{Job, JobStatus, TaskRecord};
pub use library::LikedAsset;
pub use options::{OptionCategory, OptionItem};
pub use scene::Scene;
pub use settings::{GenerationSettings, RATIO_CHOICES};
