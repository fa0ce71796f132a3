//! Vision classification of outfit photos.
//!
//! - **Gemini** - structured generation against a vision-capable model
//! - **Mock** - deterministic fixed answer for tests and local development

mod gemini;
mod mock;

pub use gemini::GeminiClassifier;
pub use mock::MockClassifier;

use async_trait::async_trait;

use crate::error::Result;
use crate::outfit::{OutfitAnalysis, UploadedImage};

/// Classifies an outfit photo into an [`OutfitAnalysis`].
///
/// Implementations must be thread-safe (`Send + Sync`); one instance is
/// shared by every request. A call either yields a fully validated
/// analysis or an error, never a partial result.
#[async_trait]
pub trait VisionClassifier: Send + Sync {
    async fn classify(&self, image: &UploadedImage) -> Result<OutfitAnalysis>;

    /// Model identifier, reported by health checks and logs.
    fn model_name(&self) -> &str;
}
