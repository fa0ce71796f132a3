//! Mock synthesizer for testing.

use async_trait::async_trait;

use super::SuggestionSynthesizer;
use crate::error::{OutfitError, Result};
use crate::outfit::{OutfitCategory, SuggestionImage};

/// 8-byte PNG signature, enough for clients sniffing the format.
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Deterministic synthesizer.
/// WARNING: Returns a placeholder image - for tests and local development only!
pub enum MockSynthesizer {
    /// Return a fixed PNG placeholder.
    Png,
    /// Answer without any image asset.
    NoImage,
    /// Fail as if the model call errored.
    Failing(String),
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::Png
    }
}

#[async_trait]
impl SuggestionSynthesizer for MockSynthesizer {
    async fn synthesize(&self, _category: OutfitCategory) -> Result<Option<SuggestionImage>> {
        match self {
            Self::Png => Ok(Some(SuggestionImage {
                bytes: PNG_SIGNATURE.to_vec(),
                media_type: "image/png".to_string(),
            })),
            Self::NoImage => Ok(None),
            Self::Failing(msg) => Err(OutfitError::ModelCall(msg.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-synthesizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_png() {
        let image = MockSynthesizer::Png
            .synthesize(OutfitCategory::Chill)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(image.media_type, "image/png");
        assert_eq!(&image.bytes[..4], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_mock_no_image_and_failure() {
        assert!(MockSynthesizer::NoImage
            .synthesize(OutfitCategory::Chill)
            .await
            .unwrap()
            .is_none());
        assert!(MockSynthesizer::Failing("down".into())
            .synthesize(OutfitCategory::Chill)
            .await
            .is_err());
    }
}
