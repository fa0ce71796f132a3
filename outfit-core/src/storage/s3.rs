//! S3-compatible artifact store backed by `object_store`.

use std::time::Instant;

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use tracing::{debug, error};

use super::{ArtifactStore, SIGNED_URL_TTL};
use crate::error::{OutfitError, Result};

/// Bucket coordinates. Credentials come from the standard `AWS_*` variables.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, R2, Spaces).
    pub endpoint: Option<String>,
}

#[derive(Clone)]
pub struct S3ArtifactStore {
    store: AmazonS3,
    bucket: String,
}

impl S3ArtifactStore {
    pub fn new(config: S3Config) -> Result<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone());

        if let Some(ref endpoint) = config.endpoint {
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(endpoint.starts_with("http://"));
        }

        let store = builder
            .build()
            .map_err(|e| OutfitError::Config(format!("Invalid S3 configuration: {e}")))?;

        Ok(Self {
            store,
            bucket: config.bucket,
        })
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn upload(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let size = bytes.len();
        let location = Path::from(key);
        let start = Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&location, PutPayload::from(Bytes::from(bytes)), options)
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    bucket = %self.bucket,
                    key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "S3 upload failed"
                );
                OutfitError::Storage(format!("Upload failed: {e}"))
            })?;

        debug!(
            bucket = %self.bucket,
            key,
            content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_millis() as u64,
            "S3 upload successful"
        );
        Ok(())
    }

    async fn signed_url(&self, key: &str) -> Result<String> {
        let location = Path::from(key);
        let url = self
            .store
            .signed_url(Method::GET, &location, SIGNED_URL_TTL)
            .await
            .map_err(|e| OutfitError::Storage(format!("Failed to sign URL: {e}")))?;
        Ok(url.to_string())
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}
