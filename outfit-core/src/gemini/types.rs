//! Wire types for the Gemini `generateContent` endpoint.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OutfitError, Result};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user-role message made of the given parts.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: None,
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// Binary part, base64-encoded for transport.
    pub fn inline(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: BASE64.encode(bytes),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Binary asset returned by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|content| content.parts.iter())
    }

    /// Concatenated text of the first candidate.
    pub fn text(&self) -> String {
        self.parts()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Decoded inline files of the first candidate, in response order.
    pub fn files(&self) -> Result<Vec<GeneratedFile>> {
        self.inline_parts().map(decode_inline).collect()
    }

    /// Like [`files`](Self::files), limited to `image/*` parts. Other parts
    /// are never decoded, so a malformed non-image payload cannot fail the call.
    pub fn image_files(&self) -> Result<Vec<GeneratedFile>> {
        self.inline_parts()
            .filter(|inline| inline.mime_type.starts_with("image/"))
            .map(decode_inline)
            .collect()
    }

    fn inline_parts(&self) -> impl Iterator<Item = &InlineData> {
        self.parts().filter_map(|p| p.inline_data.as_ref())
    }

    /// Reason the prompt was blocked, if any.
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

fn decode_inline(inline: &InlineData) -> Result<GeneratedFile> {
    let bytes = BASE64
        .decode(&inline.data)
        .map_err(|e| OutfitError::ModelCall(format!("Invalid base64 in generated file: {e}")))?;
    Ok(GeneratedFile {
        media_type: inline.mime_type.clone(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = GenerateContentRequest::user(vec![
            Part::text("describe"),
            Part::inline("image/jpeg", &[0xFF, 0xD8]),
        ])
        .with_config(GenerationConfig {
            response_mime_type: Some("application/json".into()),
            ..Default::default()
        });

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "describe");
        assert_eq!(
            value["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(value["contents"][0]["parts"][1]["inlineData"]["data"], "/9g=");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(value["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_response_text_and_files() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "Here you go"},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw=="}}
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.text(), "Here you go");
        let files = response.files().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].media_type, "image/png");
        assert_eq!(files[0].bytes, vec![0x89, 0x50, 0x4E, 0x47]);
    }

    #[test]
    fn test_empty_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert_eq!(response.text(), "");
        assert!(response.files().unwrap().is_empty());
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_image_files_skips_undecodable_non_image_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"inlineData": {"mimeType": "application/octet-stream", "data": "%%%"}},
                        {"inlineData": {"mimeType": "image/png", "data": "iVBORw=="}}
                    ]
                }
            }]
        }))
        .unwrap();

        assert!(matches!(response.files(), Err(OutfitError::ModelCall(_))));
        let images = response.image_files().unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].media_type, "image/png");
    }
}
