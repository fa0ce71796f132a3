//! Google Gemini `generateContent` client.
//!
//! Shared by the vision classifier and the suggestion synthesizer. The
//! client performs exactly one HTTP call per invocation; there is no retry
//! loop, so transport failures surface immediately as
//! [`OutfitError::ModelCall`].

mod types;

pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GeneratedFile,
    GenerationConfig, InlineData, Part, PromptFeedback,
};

use std::time::{Duration, Instant};

use reqwest::Client;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{OutfitError, Result};

/// Default Gemini API base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default timeout for a single model call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for the Gemini API.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API base URL (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    pub api_url: String,
    /// API key sent as `x-goog-api-key`.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Thin HTTP client over `models/{model}:generateContent`.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    #[instrument(level = "debug", skip_all, fields(
        api_url = %config.api_url,
        timeout_ms = config.timeout.as_millis() as u64
    ))]
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(OutfitError::Config("Gemini API key is empty".into()));
        }
        Url::parse(&config.api_url)
            .map_err(|e| OutfitError::Config(format!("Invalid Gemini API URL: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                warn!(error = %e, "Failed to create HTTP client");
                OutfitError::Config(format!("Failed to create HTTP client: {e}"))
            })?;

        debug!("Gemini client created");
        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &str) -> Result<Url> {
        let raw = format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            model
        );
        Url::parse(&raw).map_err(|e| OutfitError::Config(format!("Invalid model endpoint: {e}")))
    }

    /// Run one `generateContent` call against `model`.
    #[instrument(level = "debug", skip(self, request), fields(model = %model))]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model)?;
        let start = Instant::now();

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(
                    error = %e,
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Gemini request failed"
                );
                OutfitError::ModelCall(format!("Gemini request failed: {e}"))
            })?;

        let status = response.status();
        debug!(status = %status, "Received HTTP response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            warn!(
                status = %status,
                latency_ms = start.elapsed().as_millis() as u64,
                "Gemini API returned an error status"
            );
            return Err(OutfitError::ModelCall(format!(
                "Gemini API returned status {status}: {body}"
            )));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse Gemini response");
            OutfitError::ModelCall(format!("Failed to parse Gemini response: {e}"))
        })?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            candidates = parsed.candidates.len(),
            "Gemini call completed"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_key() {
        let config = GeminiConfig::new("secret-key");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let result = GeminiClient::new(GeminiConfig::new("  "));
        assert!(matches!(result, Err(OutfitError::Config(_))));
    }

    #[test]
    fn test_endpoint_format() {
        let mut config = GeminiConfig::new("key");
        config.api_url = "https://example.test/v1beta/".into();
        let client = GeminiClient::new(config).unwrap();
        let url = client.endpoint("gemini-2.5-flash").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
