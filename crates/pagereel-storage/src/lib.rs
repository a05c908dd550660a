//! Tencent COS storage client.
//!
//! This crate provides:
//! - File and byte uploads over the S3-compatible COS endpoint
//! - Object key layout for the images/videos/gifs prefixes
//! - Public URL construction
//! - Object deletion and existence checks

pub mod client;
pub mod error;
pub mod keys;

pub use client::{CosClient, CosConfig};
pub use error::{StorageError, StorageResult};
pub use keys::{object_key, object_key_at, public_url};
