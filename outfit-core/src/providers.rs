//! Provider selection.
//!
//! Turns environment-driven settings into a ready [`OutfitPipeline`]:
//!
//! - Classifier: Gemini when an API key is present, otherwise the mock
//!   classifier if mocks are allowed
//! - Synthesizer: Gemini image model, or the mock PNG synthesizer
//! - Artifact store: S3 when a bucket is configured, otherwise the
//!   in-memory store if mocks are allowed

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::classifier::{GeminiClassifier, MockClassifier, VisionClassifier};
use crate::error::{OutfitError, Result};
use crate::gemini::{GeminiClient, GeminiConfig};
use crate::pipeline::OutfitPipeline;
use crate::storage::{ArtifactStore, MemoryArtifactStore};
#[cfg(feature = "s3")]
use crate::storage::{S3ArtifactStore, S3Config};
use crate::synthesizer::{GeminiSynthesizer, MockSynthesizer, SuggestionSynthesizer};

/// Default vision model identifier.
pub const DEFAULT_CLASSIFIER_MODEL: &str = "gemini-2.5-flash";

/// Default image model identifier.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Where suggestion images go.
#[derive(Debug, Clone, Default)]
pub enum StorageSettings {
    /// S3-compatible bucket.
    S3 {
        bucket: String,
        region: String,
        endpoint: Option<String>,
    },
    /// In-memory store (tests, local development).
    Memory { base_url: String },
    /// Nothing configured.
    #[default]
    Unset,
}

/// Provider settings, usually loaded with [`ProviderConfig::from_env`].
#[derive(Clone)]
pub struct ProviderConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: Option<String>,
    pub gemini_timeout: Duration,
    pub classifier_model: String,
    pub image_model: String,
    /// Extended variant: generate and store a suggestion image.
    pub suggestions_enabled: bool,
    pub storage: StorageSettings,
    /// Permit mock providers where real ones are not configured.
    pub allow_mock: bool,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("gemini_api_url", &self.gemini_api_url)
            .field("gemini_timeout", &self.gemini_timeout)
            .field("classifier_model", &self.classifier_model)
            .field("image_model", &self.image_model)
            .field("suggestions_enabled", &self.suggestions_enabled)
            .field("storage", &self.storage)
            .field("allow_mock", &self.allow_mock)
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_url: None,
            gemini_timeout: Duration::from_secs(60),
            classifier_model: DEFAULT_CLASSIFIER_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            suggestions_enabled: true,
            storage: StorageSettings::Unset,
            allow_mock: false,
        }
    }
}

impl ProviderConfig {
    /// Load provider settings from environment variables.
    ///
    /// Gemini: `GEMINI_API_KEY`, `GEMINI_API_URL`, `GEMINI_TIMEOUT_SECS`,
    /// `OUTFIT_CLASSIFIER_MODEL`, `OUTFIT_IMAGE_MODEL`.
    /// Suggestions: `SUGGESTIONS_ENABLED` (default true).
    /// Storage: `S3_BUCKET`, `S3_REGION` (default us-east-1), `S3_ENDPOINT`,
    /// or `ARTIFACT_BASE_URL` for the in-memory store.
    /// Mocks: `ALLOW_MOCK_PROVIDERS` (default false).
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let gemini_timeout = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(60));

        let suggestions_enabled = std::env::var("SUGGESTIONS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let storage = match non_empty("S3_BUCKET") {
            Some(bucket) => StorageSettings::S3 {
                bucket,
                region: non_empty("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                endpoint: non_empty("S3_ENDPOINT"),
            },
            None => match non_empty("ARTIFACT_BASE_URL") {
                Some(base_url) => StorageSettings::Memory { base_url },
                None => StorageSettings::Unset,
            },
        };

        let allow_mock = std::env::var("ALLOW_MOCK_PROVIDERS")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_api_url: non_empty("GEMINI_API_URL"),
            gemini_timeout,
            classifier_model: non_empty("OUTFIT_CLASSIFIER_MODEL")
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_MODEL.to_string()),
            image_model: non_empty("OUTFIT_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            suggestions_enabled,
            storage,
            allow_mock,
        }
    }

    /// Mock-only configuration with suggestions on.
    pub fn mock() -> Self {
        Self {
            allow_mock: true,
            ..Default::default()
        }
    }
}

/// Factory for building the pipeline from configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn build(config: &ProviderConfig) -> Result<OutfitPipeline> {
        let client = Self::gemini_client(config)?;

        let classifier: Arc<dyn VisionClassifier> = match &client {
            Some(client) => Arc::new(GeminiClassifier::new(
                client.clone(),
                config.classifier_model.clone(),
            )),
            None if config.allow_mock => {
                warn!("GEMINI_API_KEY not set, using mock classifier");
                Arc::new(MockClassifier::default())
            }
            None => {
                return Err(OutfitError::Config(
                    "GEMINI_API_KEY is required (or set ALLOW_MOCK_PROVIDERS=true)".into(),
                ))
            }
        };

        info!(model = classifier.model_name(), "Classifier ready");
        let pipeline = OutfitPipeline::new(classifier);

        if !config.suggestions_enabled {
            info!("Suggestion images disabled");
            return Ok(pipeline);
        }

        let synthesizer: Arc<dyn SuggestionSynthesizer> = match &client {
            Some(client) => Arc::new(GeminiSynthesizer::new(
                client.clone(),
                config.image_model.clone(),
            )),
            None => {
                warn!("GEMINI_API_KEY not set, using mock synthesizer");
                Arc::new(MockSynthesizer::Png)
            }
        };

        let store = Self::artifact_store(config)?;
        info!(
            synthesizer = synthesizer.model_name(),
            backend = store.backend_name(),
            "Suggestion images enabled"
        );

        Ok(pipeline.with_suggestions(synthesizer, store))
    }

    fn gemini_client(config: &ProviderConfig) -> Result<Option<Arc<GeminiClient>>> {
        let Some(api_key) = config.gemini_api_key.clone() else {
            return Ok(None);
        };
        let mut gemini = GeminiConfig::new(api_key);
        if let Some(url) = &config.gemini_api_url {
            gemini.api_url = url.clone();
        }
        gemini.timeout = config.gemini_timeout;
        Ok(Some(Arc::new(GeminiClient::new(gemini)?)))
    }

    fn artifact_store(config: &ProviderConfig) -> Result<Arc<dyn ArtifactStore>> {
        match &config.storage {
            #[cfg(feature = "s3")]
            StorageSettings::S3 {
                bucket,
                region,
                endpoint,
            } => Ok(Arc::new(S3ArtifactStore::new(S3Config {
                bucket: bucket.clone(),
                region: region.clone(),
                endpoint: endpoint.clone(),
            })?)),
            #[cfg(not(feature = "s3"))]
            StorageSettings::S3 { .. } => Err(OutfitError::Config(
                "S3 storage requested but the `s3` feature is disabled".into(),
            )),
            StorageSettings::Memory { base_url } if config.allow_mock => {
                Ok(Arc::new(MemoryArtifactStore::new(base_url.clone())))
            }
            StorageSettings::Unset if config.allow_mock => {
                warn!("No artifact store configured, keeping suggestions in memory");
                Ok(Arc::new(MemoryArtifactStore::default()))
            }
            _ => Err(OutfitError::Config(
                "S3_BUCKET is required when suggestions are enabled \
                 (or set SUGGESTIONS_ENABLED=false)"
                    .into(),
            )),
        }
    }
}
