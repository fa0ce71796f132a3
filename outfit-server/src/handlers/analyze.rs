//! Outfit analysis handler
//!
//! Handles POST /api/analyze-outfit: multipart intake, one pipeline run,
//! and the JSON contract the client renders.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use outfit_core::PipelineOutcome;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::multipart::read_image;
use crate::state::AppState;

/// Successful analysis
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    /// One of Sport, Casual, Professional, Chill
    #[schema(example = "Sport")]
    pub category: String,
    /// Short justification for the category
    #[schema(example = "Athletic leggings and running shoes suggest a workout outfit.")]
    pub explanation: String,
    /// Model's self-reported confidence
    #[schema(example = "High")]
    pub confidence: String,
    /// Signed URL of the generated suggestion image. Present only when
    /// suggestions are enabled; empty when no image could be produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion_image_url: Option<String>,
}

impl From<PipelineOutcome> for AnalysisResponse {
    fn from(outcome: PipelineOutcome) -> Self {
        Self {
            category: outcome.analysis.category.to_string(),
            explanation: outcome.analysis.explanation,
            confidence: outcome.analysis.confidence,
            suggestion_image_url: outcome.suggestion_image_url,
        }
    }
}

/// Classify the outfit in an uploaded photo
///
/// Accepts multipart/form-data with:
/// - **image** (required): the photo to analyze (max 10MB)
///
/// When suggestions are enabled the response also carries
/// `suggestionImageUrl`, a time-limited link to a generated reference
/// image for the detected category.
#[utoipa::path(
    post,
    path = "/api/analyze-outfit",
    tag = "Analysis",
    request_body(
        content_type = "multipart/form-data",
        description = "Outfit photo in the `image` field"
    ),
    responses(
        (status = 200, description = "Outfit classified", body = AnalysisResponse),
        (status = 400, description = "No file provided"),
        (status = 413, description = "File size limit exceeded (max 10MB)"),
        (status = 500, description = "Failed to analyze outfit image")
    )
)]
pub async fn analyze_outfit_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    // Not a multipart body at all: there is no file to read.
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Multipart extraction rejected");
        ApiError::MissingFile
    })?;
    let image = read_image(&mut multipart, state.max_file_size).await?;

    let outcome = state.pipeline.analyze(&image).await?;

    tracing::info!(
        category = %outcome.analysis.category,
        confidence = %outcome.analysis.confidence,
        has_suggestion = outcome
            .suggestion_image_url
            .as_deref()
            .is_some_and(|url| !url.is_empty()),
        "Outfit analyzed"
    );

    Ok(Json(outcome.into()))
}
