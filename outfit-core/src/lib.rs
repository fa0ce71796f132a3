//! Outfit Core - photo-to-style analysis pipeline
//!
//! This crate classifies an outfit photo into one of four styles and can
//! illustrate a suggested outfit for that style.
//!
//! # Features
//!
//! - Vision classification with schema-validated structured output
//! - Category-specific suggestion image synthesis
//! - Artifact storage with time-limited signed URLs (S3 or in-memory)
//! - Capability traits with deterministic mocks for tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use outfit_core::{
//!     MemoryArtifactStore, MockClassifier, MockSynthesizer, OutfitCategory, OutfitPipeline,
//!     UploadedImage,
//! };
//!
//! # async fn example() -> outfit_core::Result<()> {
//! let pipeline = OutfitPipeline::new(Arc::new(MockClassifier::with_category(OutfitCategory::Sport)))
//!     .with_suggestions(Arc::new(MockSynthesizer::Png), Arc::new(MemoryArtifactStore::default()));
//!
//! let photo = UploadedImage::new(std::fs::read("gym.jpg").unwrap(), Some("gym.jpg".into()));
//! let outcome = pipeline.analyze(&photo).await?;
//! println!("{} ({})", outcome.analysis.category, outcome.analysis.confidence);
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod error;
pub mod gemini;
pub mod outfit;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod schema;
pub mod storage;
pub mod synthesizer;

// Re-export main types for convenience
pub use classifier::{GeminiClassifier, MockClassifier, VisionClassifier};
pub use error::{OutfitError, Result};
pub use outfit::{
    mime_from_file_name, OutfitAnalysis, OutfitCategory, SuggestionImage, UploadedImage,
    DEFAULT_IMAGE_MIME, MAX_UPLOAD_BYTES,
};
pub use pipeline::{OutfitPipeline, PipelineOutcome};
pub use providers::{ProviderConfig, ProviderFactory, StorageSettings};
pub use storage::{suggestion_key, ArtifactStore, MemoryArtifactStore, StorageReference};
#[cfg(feature = "s3")]
pub use storage::{S3ArtifactStore, S3Config};
pub use synthesizer::{GeminiSynthesizer, MockSynthesizer, SuggestionSynthesizer};
