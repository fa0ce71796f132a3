//! Artifact storage for generated suggestion images.
//!
//! # Key format
//!
//! `outfit-suggestions/{unix-timestamp-ms}-{category-lowercase}.png`
//!
//! The millisecond timestamp is the only uniqueness source: two requests for
//! the same category within the same millisecond derive the same key and the
//! later upload overwrites the earlier one.

mod memory;
#[cfg(feature = "s3")]
mod s3;

pub use memory::MemoryArtifactStore;
#[cfg(feature = "s3")]
pub use s3::{S3ArtifactStore, S3Config};

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::outfit::OutfitCategory;

/// Prefix shared by every suggestion key.
pub const SUGGESTION_PREFIX: &str = "outfit-suggestions";

/// Lifetime of signed retrieval URLs.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(60 * 60);

/// Derive the storage key for a suggestion image.
pub fn suggestion_key(timestamp_ms: i64, category: OutfitCategory) -> String {
    format!("{SUGGESTION_PREFIX}/{timestamp_ms}-{}.png", category.slug())
}

/// Location of a stored artifact and a time-limited URL to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageReference {
    pub key: String,
    pub url: String,
}

/// Object store consumed by the pipeline.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Write `bytes` under `key`, replacing any existing object.
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    /// Time-limited retrieval URL for `key`.
    async fn signed_url(&self, key: &str) -> Result<String>;

    /// Upload then sign.
    async fn store(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StorageReference> {
        let size = bytes.len();
        self.upload(key, bytes, content_type).await?;
        let url = self.signed_url(key).await?;
        debug!(key, size_bytes = size, "Artifact stored");
        Ok(StorageReference {
            key: key.to_string(),
            url,
        })
    }

    /// Backend identifier for logs.
    fn backend_name(&self) -> &'static str;
}
