//! Suggestion image synthesis.
//!
//! Given a classified category, produce one illustration of a complete
//! outfit in that style. Returning `Ok(None)` means the model answered but
//! produced no image asset; that is not an error on its own.

mod gemini;
mod mock;

pub use gemini::GeminiSynthesizer;
pub use mock::MockSynthesizer;

use async_trait::async_trait;

use crate::error::Result;
use crate::outfit::{OutfitCategory, SuggestionImage};

#[async_trait]
pub trait SuggestionSynthesizer: Send + Sync {
    async fn synthesize(&self, category: OutfitCategory) -> Result<Option<SuggestionImage>>;

    /// Model identifier, reported by logs.
    fn model_name(&self) -> &str;
}

/// First asset whose media type is an image, if any.
pub fn first_image<I>(files: I) -> Option<SuggestionImage>
where
    I: IntoIterator<Item = (String, Vec<u8>)>,
{
    files
        .into_iter()
        .find(|(media_type, _)| media_type.starts_with("image/"))
        .map(|(media_type, bytes)| SuggestionImage { bytes, media_type })
}
