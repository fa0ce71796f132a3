//! Mock classifier for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::VisionClassifier;
use crate::error::{OutfitError, Result};
use crate::outfit::{OutfitAnalysis, OutfitCategory, UploadedImage};

enum Behavior {
    Answer(OutfitAnalysis),
    FailModelCall(String),
    FailSchema(String),
}

/// Deterministic classifier.
/// WARNING: Does not look at the image - for tests and local development only!
pub struct MockClassifier {
    behavior: Behavior,
    calls: AtomicUsize,
}

impl MockClassifier {
    /// Always answer with `analysis`.
    pub fn new(analysis: OutfitAnalysis) -> Self {
        Self::with_behavior(Behavior::Answer(analysis))
    }

    /// Always answer with `category` at high confidence.
    pub fn with_category(category: OutfitCategory) -> Self {
        Self::new(OutfitAnalysis {
            category,
            explanation: format!(
                "The outfit combines pieces typical of the {category} style. \
                 Colors and cuts are consistent with that look."
            ),
            confidence: "High".to_string(),
        })
    }

    /// Always fail as if the model could not be reached.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::FailModelCall(message.into()))
    }

    /// Always fail as if the model output could not be coerced.
    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::FailSchema(message.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `classify` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::with_category(OutfitCategory::Casual)
    }
}

#[async_trait]
impl VisionClassifier for MockClassifier {
    async fn classify(&self, _image: &UploadedImage) -> Result<OutfitAnalysis> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            Behavior::Answer(analysis) => Ok(analysis.clone()),
            Behavior::FailModelCall(msg) => Err(OutfitError::ModelCall(msg.clone())),
            Behavior::FailSchema(msg) => Err(OutfitError::SchemaValidation(msg.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-classifier"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image() -> UploadedImage {
        UploadedImage::new(vec![1, 2, 3], None)
    }

    #[tokio::test]
    async fn test_mock_answers_fixed_category() {
        let classifier = MockClassifier::with_category(OutfitCategory::Sport);
        let analysis = classifier.classify(&image()).await.unwrap();
        assert_eq!(analysis.category, OutfitCategory::Sport);
        assert_eq!(analysis.confidence, "High");
        assert_eq!(classifier.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_failure_kinds() {
        let err = MockClassifier::failing("quota").classify(&image()).await;
        assert_eq!(err.unwrap_err().kind(), "model_call");

        let err = MockClassifier::invalid_output("bad enum")
            .classify(&image())
            .await;
        assert_eq!(err.unwrap_err().kind(), "schema_validation");
    }
}
