//! HTTP request handlers

pub mod analyze;
pub mod health;

pub use crate::state::AppState;
pub use analyze::{analyze_outfit_handler, AnalysisResponse};
pub use health::{health, ready, HealthResponse, ReadyResponse};
