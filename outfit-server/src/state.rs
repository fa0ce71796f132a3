//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use outfit_core::{OutfitPipeline, ProviderConfig, ProviderFactory, Result};

/// Application state containing shared resources.
///
/// Only immutable providers live here; each request's buffers and results
/// stay local to its handler.
#[derive(Clone)]
pub struct AppState {
    /// Analysis pipeline shared by all requests
    pub pipeline: Arc<OutfitPipeline>,
    /// Maximum accepted image size in bytes
    pub max_file_size: usize,
}

impl AppState {
    pub fn new(pipeline: OutfitPipeline, max_file_size: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            max_file_size,
        }
    }

    /// Build providers from configuration.
    pub fn from_providers(providers: &ProviderConfig, max_file_size: usize) -> Result<Self> {
        let pipeline = ProviderFactory::build(providers)?;
        Ok(Self::new(pipeline, max_file_size))
    }
}
