//! API error handling module
//!
//! Every failure leaving the server goes through [`ApiError`]. Intake errors
//! keep their specific status and message; anything that happens during
//! analysis collapses into one generic 500 so clients never learn which
//! stage failed. Internal details are logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use outfit_core::OutfitError;
use thiserror::Error;

/// Client-facing message for missing uploads.
pub const MISSING_FILE_MESSAGE: &str = "No file provided";

/// Client-facing message for oversize uploads.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "File size limit exceeded (max 10MB)";

/// Client-facing message for every analysis failure.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze outfit image";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No `image` field in the multipart body
    #[error("No image field in multipart body")]
    MissingFile,

    /// Uploaded image exceeds the size ceiling
    #[error("Uploaded image is {size} bytes, limit is {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// Request body overran the transport limit before the image was read
    #[error("Request body exceeded the configured body limit")]
    BodyLimitExceeded,

    /// Malformed request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Failure inside the analysis pipeline
    #[error("Analysis failed: {0}")]
    Analysis(#[from] OutfitError),

    /// Unexpected server-side failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } | Self::BodyLimitExceeded => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            Self::Analysis(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Sanitized message for the response body.
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingFile => MISSING_FILE_MESSAGE.to_string(),
            Self::PayloadTooLarge { .. } | Self::BodyLimitExceeded => {
                PAYLOAD_TOO_LARGE_MESSAGE.to_string()
            }
            Self::BadRequest(_) => "Invalid multipart form data".to_string(),
            Self::Analysis(_) | Self::Internal(_) => ANALYSIS_FAILED_MESSAGE.to_string(),
        }
    }

    /// Error category for logging
    fn error_category(&self) -> &'static str {
        match self {
            Self::MissingFile => "missing_file",
            Self::PayloadTooLarge { .. } | Self::BodyLimitExceeded => "payload_too_large",
            Self::BadRequest(_) => "bad_request",
            Self::Analysis(e) => e.kind(),
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let category = self.error_category();
        let internal_message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                category = category,
                error = %internal_message,
                "Outfit analysis failed"
            );
        } else {
            tracing::warn!(
                status = %status,
                category = category,
                error = %internal_message,
                "Client error"
            );
        }

        let body = serde_json::json!({ "error": self.client_message() });
        (status, Json(body)).into_response()
    }
}
