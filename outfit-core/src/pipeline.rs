//! Outfit analysis pipeline.
//!
//! One call to [`OutfitPipeline::analyze`] drives the whole chain for a
//! single photo: classify, then (when configured) synthesize a suggestion
//! image and store it. Stages run strictly in sequence; the suggestion
//! prompt depends on the category, so nothing can overlap.
//!
//! ## Failure policy
//!
//! - Classifier failures abort the analysis.
//! - Synthesizer and storage failures degrade: they are logged and the
//!   outcome carries an empty suggestion URL.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::classifier::VisionClassifier;
use crate::error::Result;
use crate::outfit::{OutfitAnalysis, OutfitCategory, UploadedImage};
use crate::storage::{suggestion_key, ArtifactStore, StorageReference};
use crate::synthesizer::SuggestionSynthesizer;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub analysis: OutfitAnalysis,
    /// `None` when suggestions are disabled; `Some("")` when synthesis was
    /// attempted but yielded nothing usable.
    pub suggestion_image_url: Option<String>,
}

struct SuggestionStage {
    synthesizer: Arc<dyn SuggestionSynthesizer>,
    store: Arc<dyn ArtifactStore>,
}

pub struct OutfitPipeline {
    classifier: Arc<dyn VisionClassifier>,
    suggestions: Option<SuggestionStage>,
    clock: fn() -> i64,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

impl OutfitPipeline {
    /// Classification only.
    pub fn new(classifier: Arc<dyn VisionClassifier>) -> Self {
        Self {
            classifier,
            suggestions: None,
            clock: now_millis,
        }
    }

    /// Enable suggestion images.
    pub fn with_suggestions(
        mut self,
        synthesizer: Arc<dyn SuggestionSynthesizer>,
        store: Arc<dyn ArtifactStore>,
    ) -> Self {
        self.suggestions = Some(SuggestionStage { synthesizer, store });
        self
    }

    /// Replace the millisecond clock used for storage keys.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn classifier_model(&self) -> &str {
        self.classifier.model_name()
    }

    pub fn suggestions_enabled(&self) -> bool {
        self.suggestions.is_some()
    }

    #[instrument(level = "info", skip_all, fields(
        mime_type = %image.mime_type,
        bytes = image.len()
    ))]
    pub async fn analyze(&self, image: &UploadedImage) -> Result<PipelineOutcome> {
        let analysis = self.classifier.classify(image).await?;

        let suggestion_image_url = match &self.suggestions {
            None => None,
            Some(stage) => Some(match self.suggest(stage, analysis.category).await {
                Ok(Some(reference)) => reference.url,
                Ok(None) => String::new(),
                Err(e) => {
                    warn!(
                        category = %analysis.category,
                        kind = e.kind(),
                        error = %e,
                        "Suggestion image unavailable, continuing without it"
                    );
                    String::new()
                }
            }),
        };

        Ok(PipelineOutcome {
            analysis,
            suggestion_image_url,
        })
    }

    async fn suggest(
        &self,
        stage: &SuggestionStage,
        category: OutfitCategory,
    ) -> Result<Option<StorageReference>> {
        let Some(image) = stage.synthesizer.synthesize(category).await? else {
            return Ok(None);
        };

        let key = suggestion_key((self.clock)(), category);
        let reference = stage
            .store
            .store(&key, image.bytes, &image.media_type)
            .await?;

        info!(
            key = %reference.key,
            backend = stage.store.backend_name(),
            synthesizer = stage.synthesizer.model_name(),
            "Suggestion image stored"
        );
        Ok(Some(reference))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::classifier::MockClassifier;
    use crate::error::OutfitError;
    use crate::storage::MemoryArtifactStore;
    use crate::synthesizer::MockSynthesizer;

    struct BrokenStore;

    #[async_trait]
    impl ArtifactStore for BrokenStore {
        async fn upload(&self, _key: &str, _bytes: Vec<u8>, _ct: &str) -> Result<()> {
            Err(OutfitError::Storage("bucket unreachable".into()))
        }

        async fn signed_url(&self, _key: &str) -> Result<String> {
            Err(OutfitError::Storage("bucket unreachable".into()))
        }

        fn backend_name(&self) -> &'static str {
            "broken"
        }
    }

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    fn image() -> UploadedImage {
        UploadedImage::new(vec![0xFF, 0xD8, 0xFF], Some("gym.jpg".into()))
    }

    #[tokio::test]
    async fn test_classification_only() {
        let pipeline =
            OutfitPipeline::new(Arc::new(MockClassifier::with_category(OutfitCategory::Casual)));
        let outcome = pipeline.analyze(&image()).await.unwrap();

        assert_eq!(outcome.analysis.category, OutfitCategory::Casual);
        assert_eq!(outcome.suggestion_image_url, None);
        assert!(!pipeline.suggestions_enabled());
    }

    #[tokio::test]
    async fn test_full_chain_stores_under_derived_key() {
        let store = Arc::new(MemoryArtifactStore::new("https://cdn.test"));
        let pipeline =
            OutfitPipeline::new(Arc::new(MockClassifier::with_category(OutfitCategory::Sport)))
                .with_suggestions(Arc::new(MockSynthesizer::Png), store.clone())
                .with_clock(fixed_clock);

        let outcome = pipeline.analyze(&image()).await.unwrap();
        let url = outcome.suggestion_image_url.unwrap();

        assert!(url.starts_with("https://cdn.test/outfit-suggestions/1700000000000-sport.png"));
        let (_, content_type) = store
            .get("outfit-suggestions/1700000000000-sport.png")
            .await
            .unwrap();
        assert_eq!(content_type, "image/png");
    }

    #[tokio::test]
    async fn test_no_image_yields_empty_url() {
        let store = Arc::new(MemoryArtifactStore::default());
        let pipeline = OutfitPipeline::new(Arc::new(MockClassifier::default()))
            .with_suggestions(Arc::new(MockSynthesizer::NoImage), store.clone());

        let outcome = pipeline.analyze(&image()).await.unwrap();
        assert_eq!(outcome.suggestion_image_url.as_deref(), Some(""));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_synthesizer_failure_degrades() {
        let pipeline = OutfitPipeline::new(Arc::new(MockClassifier::default())).with_suggestions(
            Arc::new(MockSynthesizer::Failing("quota exceeded".into())),
            Arc::new(MemoryArtifactStore::default()),
        );

        let outcome = pipeline.analyze(&image()).await.unwrap();
        assert_eq!(outcome.analysis.category, OutfitCategory::Casual);
        assert_eq!(outcome.suggestion_image_url.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_storage_failure_degrades() {
        let pipeline = OutfitPipeline::new(Arc::new(MockClassifier::default()))
            .with_suggestions(Arc::new(MockSynthesizer::Png), Arc::new(BrokenStore));

        let outcome = pipeline.analyze(&image()).await.unwrap();
        assert_eq!(outcome.suggestion_image_url.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_classifier_failure_aborts_before_synthesis() {
        let store = Arc::new(MemoryArtifactStore::default());
        let pipeline = OutfitPipeline::new(Arc::new(MockClassifier::invalid_output(
            "category 'Formal' not allowed",
        )))
        .with_suggestions(Arc::new(MockSynthesizer::Png), store.clone());

        let err = pipeline.analyze(&image()).await.unwrap_err();
        assert!(matches!(err, OutfitError::SchemaValidation(_)));
        assert!(store.is_empty().await);
    }
}
