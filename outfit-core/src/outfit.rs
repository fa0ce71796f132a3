//! Outfit domain types.
//!
//! Everything here lives for a single analysis request: the uploaded photo,
//! the classification produced from it, and the optional suggestion image.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OutfitError;

/// Maximum accepted size of an uploaded outfit photo (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// MIME type assumed when the filename carries no recognized extension.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Closed set of outfit styles.
///
/// Serialized as the exact literals `Sport`, `Casual`, `Professional` and
/// `Chill`. Any other string is rejected on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutfitCategory {
    Sport,
    Casual,
    Professional,
    Chill,
}

impl OutfitCategory {
    /// All categories, in prompt order.
    pub const ALL: [OutfitCategory; 4] = [
        OutfitCategory::Sport,
        OutfitCategory::Casual,
        OutfitCategory::Professional,
        OutfitCategory::Chill,
    ];

    /// Wire literal for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sport => "Sport",
            Self::Casual => "Casual",
            Self::Professional => "Professional",
            Self::Chill => "Chill",
        }
    }

    /// Lowercase form used in storage keys.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Sport => "sport",
            Self::Casual => "casual",
            Self::Professional => "professional",
            Self::Chill => "chill",
        }
    }
}

impl fmt::Display for OutfitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutfitCategory {
    type Err = OutfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                OutfitError::SchemaValidation(format!(
                    "category must be one of Sport, Casual, Professional, Chill (got {s:?})"
                ))
            })
    }
}

/// Structured classification of one outfit photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitAnalysis {
    pub category: OutfitCategory,
    /// Two or three sentences explaining the choice.
    pub explanation: String,
    /// Qualitative label such as "High", "Medium" or "Low".
    pub confidence: String,
}

/// Photo received from the client, held in memory for one request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: Option<String>,
}

impl UploadedImage {
    /// Wrap raw bytes, deriving the MIME type from the filename extension.
    pub fn new(bytes: Vec<u8>, file_name: Option<String>) -> Self {
        let mime_type = mime_from_file_name(file_name.as_deref()).to_string();
        Self {
            bytes,
            mime_type,
            file_name,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Best-effort MIME type from a filename extension, defaulting to JPEG.
pub fn mime_from_file_name(file_name: Option<&str>) -> &'static str {
    let ext = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => DEFAULT_IMAGE_MIME,
    }
}

/// Generated suggestion illustration, discarded once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}
