//! Process-local artifact store.
//!
//! Keeps uploads in memory and hands out pseudo-signed URLs under a
//! configurable base URL. Nothing survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ArtifactStore, SIGNED_URL_TTL};
use crate::error::{OutfitError, Result};

/// Default base URL for memory-backed artifacts.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/artifacts";

#[derive(Debug, Clone)]
struct StoredArtifact {
    bytes: Vec<u8>,
    content_type: String,
}

pub struct MemoryArtifactStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredArtifact>>,
}

impl MemoryArtifactStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Stored bytes and content type for `key`.
    pub async fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|a| (a.bytes.clone(), a.content_type.clone()))
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl Default for MemoryArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        if key.is_empty() || key.starts_with('/') || key.contains("..") {
            return Err(OutfitError::Storage(format!("Invalid storage key: {key}")));
        }
        self.objects.write().await.insert(
            key.to_string(),
            StoredArtifact {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn signed_url(&self, key: &str) -> Result<String> {
        if !self.objects.read().await.contains_key(key) {
            return Err(OutfitError::Storage(format!("Artifact not found: {key}")));
        }
        let expires = Utc::now().timestamp() + SIGNED_URL_TTL.as_secs() as i64;
        Ok(format!("{}/{}?expires={}", self.base_url, key, expires))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_sign() {
        let store = MemoryArtifactStore::new("https://cdn.example.test/");
        let reference = store
            .store("outfit-suggestions/1-sport.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();

        assert_eq!(reference.key, "outfit-suggestions/1-sport.png");
        assert!(reference
            .url
            .starts_with("https://cdn.example.test/outfit-suggestions/1-sport.png?expires="));

        let (bytes, content_type) = store.get(&reference.key).await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
        assert_eq!(content_type, "image/png");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_same_key_overwrites() {
        let store = MemoryArtifactStore::default();
        store.upload("a/1-chill.png", vec![1], "image/png").await.unwrap();
        store.upload("a/1-chill.png", vec![2], "image/png").await.unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("a/1-chill.png").await.unwrap().0, vec![2]);
    }

    #[tokio::test]
    async fn test_missing_key_and_invalid_key() {
        let store = MemoryArtifactStore::default();
        assert!(store.is_empty().await);
        assert!(matches!(
            store.signed_url("nope.png").await,
            Err(OutfitError::Storage(_))
        ));
        assert!(store.upload("../etc/passwd", vec![], "image/png").await.is_err());
    }
}
