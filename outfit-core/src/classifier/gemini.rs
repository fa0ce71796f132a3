//! Gemini-backed vision classifier.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use super::VisionClassifier;
use crate::error::{OutfitError, Result};
use crate::gemini::{GeminiClient, GenerateContentRequest, GenerationConfig, Part};
use crate::outfit::{OutfitAnalysis, UploadedImage};
use crate::prompt::CLASSIFIER_INSTRUCTION;
use crate::schema::{parse_analysis, response_schema};

/// Classifier using Gemini structured output (`responseSchema`).
pub struct GeminiClassifier {
    client: Arc<GeminiClient>,
    model: String,
}

impl GeminiClassifier {
    pub fn new(client: Arc<GeminiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Request body: one user message with the fixed instruction and the photo.
    fn build_request(image: &UploadedImage) -> GenerateContentRequest {
        GenerateContentRequest::user(vec![
            Part::text(CLASSIFIER_INSTRUCTION),
            Part::inline(image.mime_type.clone(), &image.bytes),
        ])
        .with_config(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
            response_modalities: None,
        })
    }
}

#[async_trait]
impl VisionClassifier for GeminiClassifier {
    #[instrument(level = "debug", skip_all, fields(
        model = %self.model,
        mime_type = %image.mime_type,
        bytes = image.len()
    ))]
    async fn classify(&self, image: &UploadedImage) -> Result<OutfitAnalysis> {
        let request = Self::build_request(image);
        let response = self.client.generate_content(&self.model, &request).await?;

        if let Some(reason) = response.block_reason() {
            warn!(reason, "Classification prompt was blocked");
            return Err(OutfitError::ModelCall(format!(
                "Classification blocked by model: {reason}"
            )));
        }

        let analysis = parse_analysis(&response.text()).map_err(|e| {
            warn!(error = %e, "Model output did not match the analysis schema");
            e
        })?;

        info!(
            category = %analysis.category,
            confidence = %analysis.confidence,
            "Outfit classified"
        );
        Ok(analysis)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
