//! Upload intake
//!
//! Extracts the single `image` file field from a multipart/form-data body,
//! enforces the size ceiling, and buffers the whole file in memory. Other
//! fields are skipped; a second `image` field is ignored.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use outfit_core::UploadedImage;

use crate::error::ApiError;

/// Multipart field carrying the photo.
pub const IMAGE_FIELD: &str = "image";

/// Validates the size of an uploaded file
pub fn validate_file_size(size: usize, max_size: usize) -> Result<(), ApiError> {
    if size > max_size {
        Err(ApiError::PayloadTooLarge {
            size,
            max: max_size,
        })
    } else {
        Ok(())
    }
}

/// Map a stream error, keeping body-limit overruns as 413.
fn stream_error(context: &str, err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::BodyLimitExceeded
    } else {
        ApiError::bad_request(format!("{}: {}", context, err))
    }
}

/// Read the `image` field from `multipart`.
///
/// Reading stops as soon as the file grows past `max_file_size`, so an
/// oversize upload is never fully buffered. A body that overruns the
/// request-level limit before that point is reported the same way.
pub async fn read_image(
    multipart: &mut Multipart,
    max_file_size: usize,
) -> Result<UploadedImage, ApiError> {
    let mut image: Option<UploadedImage> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| stream_error("Failed to parse multipart", e))?
    {
        if field.name() != Some(IMAGE_FIELD) || image.is_some() {
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let mut data = Vec::new();

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| stream_error("Failed to read file", e))?
        {
            validate_file_size(data.len() + chunk.len(), max_file_size)?;
            data.extend_from_slice(&chunk);
        }

        tracing::debug!(
            bytes = data.len(),
            file_name = file_name.as_deref().unwrap_or(""),
            "Image field received"
        );
        image = Some(UploadedImage::new(data, file_name));
    }

    image.ok_or(ApiError::MissingFile)
}
