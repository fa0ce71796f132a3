//! Health check handlers
//!
//! Provides health and readiness endpoints for monitoring and orchestration.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "healthy")]
    pub status: String,
    /// Server version from Cargo.toml
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Service name
    #[schema(example = "outfit-server")]
    pub service: String,
    /// Model (or mock) used for classification
    #[schema(example = "gemini-2.5-flash")]
    pub classifier_model: String,
    /// Whether responses carry a suggestion image URL
    pub suggestions_enabled: bool,
}

/// Service health and provider summary
///
/// No upstream calls are made; this only reports how the server was wired.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "outfit-server".to_string(),
        classifier_model: state.pipeline.classifier_model().to_string(),
        suggestions_enabled: state.pipeline.suggestions_enabled(),
    })
}

/// Readiness response for Kubernetes
#[derive(Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Whether the service is ready to accept traffic
    pub ready: bool,
    /// Optional message explaining status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Kubernetes readiness probe
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses((status = 200, description = "Ready to accept traffic", body = ReadyResponse))
)]
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        ready: true,
        message: None,
    })
}
