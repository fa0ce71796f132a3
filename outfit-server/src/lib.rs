//! Outfit Server Library - REST API components for outfit photo analysis
//!
//! This library exposes the server components for use in integration tests.
//! The main binary uses these same components.

pub mod config;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod openapi;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::ApiError;
pub use handlers::AnalysisResponse;
pub use openapi::ApiDoc;
pub use routes::{create_router, create_router_with_state};
pub use state::AppState;
