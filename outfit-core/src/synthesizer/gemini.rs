//! Gemini-backed suggestion synthesizer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::{first_image, SuggestionSynthesizer};
use crate::error::Result;
use crate::gemini::{GeminiClient, GenerateContentRequest, GenerationConfig, Part};
use crate::outfit::{OutfitCategory, SuggestionImage};
use crate::prompt::suggestion_prompt;

pub struct GeminiSynthesizer {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiSynthesizer {
    pub fn new(client: Arc<GeminiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    fn build_request(category: OutfitCategory) -> GenerateContentRequest {
        GenerateContentRequest::user(vec![Part::text(suggestion_prompt(category))]).with_config(
            GenerationConfig {
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
                ..Default::default()
            },
        )
    }
}

#[async_trait]
impl SuggestionSynthesizer for GeminiSynthesizer {
    #[instrument(level = "debug", skip(self), fields(model = %self.model))]
    async fn synthesize(&self, category: OutfitCategory) -> Result<Option<SuggestionImage>> {
        let request = Self::build_request(category);
        let response = self.client.generate_content(&self.model, &request).await?;

        let files = response.image_files()?;
        debug!(images = files.len(), "Generated images received");

        let image = first_image(files.into_iter().map(|f| (f.media_type, f.bytes)));
        match &image {
            Some(img) => info!(
                media_type = %img.media_type,
                bytes = img.bytes.len(),
                "Suggestion image generated"
            ),
            None => info!("Model returned no image asset"),
        }
        Ok(image)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
