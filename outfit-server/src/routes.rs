//! Router configuration module
//!
//! Configures all routes, middleware layers, and creates the application router.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use outfit_core::{MemoryArtifactStore, MockClassifier, MockSynthesizer, OutfitPipeline};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::handlers::{analyze_outfit_handler, health, ready};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the application router with default config and mock providers (for testing)
pub fn create_router() -> Router {
    let config = Config::default();
    let pipeline = OutfitPipeline::new(Arc::new(MockClassifier::default())).with_suggestions(
        Arc::new(MockSynthesizer::Png),
        Arc::new(MemoryArtifactStore::default()),
    );
    create_router_with_state(&config, AppState::new(pipeline, config.max_file_size))
}

/// Create the application router with custom configuration and providers
pub fn create_router_with_state(config: &Config, state: AppState) -> Router {
    // Configure CORS based on allowed_origins
    let cors = match &config.allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            tracing::info!("CORS: Restricting to {} origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        }
        _ => {
            tracing::warn!("CORS: Allowing all origins (dev mode)");
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    // Whole-body ceiling enforced by the multipart reader as a stream error,
    // so overruns still reach the handler and get the JSON 413 body.
    let body_limit = DefaultBodyLimit::max(config.body_limit_bytes());

    // Request timeout
    let timeout = TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        Duration::from_secs(config.timeout_secs),
    );

    let router = Router::new()
        .route("/api/analyze-outfit", post(analyze_outfit_handler))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(body_limit)
        .layer(cors)
        .layer(timeout);

    // Conditionally apply rate limiting (disabled in tests, enabled in production)
    let governor_conf = if config.rate_limit_enabled {
        GovernorConfigBuilder::default()
            .per_second(config.rate_limit_per_sec)
            .burst_size(config.rate_limit_burst)
            .finish()
    } else {
        None
    };

    match governor_conf {
        Some(governor_conf) => {
            tracing::info!(
                "Rate limiting: {} req/s (burst: {})",
                config.rate_limit_per_sec,
                config.rate_limit_burst
            );
            router
                .layer(GovernorLayer::new(Arc::new(governor_conf)))
                .layer(TraceLayer::new_for_http())
        }
        None => {
            if config.rate_limit_enabled {
                tracing::error!(
                    per_sec = config.rate_limit_per_sec,
                    burst = config.rate_limit_burst,
                    "Invalid rate limit settings, rate limiting DISABLED"
                );
            } else {
                tracing::warn!("Rate limiting: DISABLED");
            }
            router.layer(TraceLayer::new_for_http())
        }
    }
}
