//! Response schema for the classifier and coercion of raw model output.
//!
//! The model is asked for JSON matching [`response_schema`]; whatever comes
//! back goes through [`parse_analysis`] before it is trusted. Coercion
//! failures are reported as [`OutfitError::SchemaValidation`], never as a
//! model-call failure.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{OutfitError, Result};
use crate::outfit::{OutfitAnalysis, OutfitCategory};

/// Schema in the OpenAPI subset accepted by Gemini's `responseSchema`.
pub fn response_schema() -> Value {
    let categories: Vec<&str> = OutfitCategory::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "category": {
                "type": "STRING",
                "enum": categories,
                "description": "The outfit category"
            },
            "explanation": {
                "type": "STRING",
                "description": "2-3 sentences explaining why this category was chosen"
            },
            "confidence": {
                "type": "STRING",
                "description": "Confidence label: High, Medium or Low"
            }
        },
        "required": ["category", "explanation", "confidence"],
        "propertyOrdering": ["category", "explanation", "confidence"]
    })
}

#[derive(Deserialize)]
struct RawAnalysis {
    category: Option<String>,
    explanation: Option<String>,
    confidence: Option<String>,
}

/// Parse model text into an [`OutfitAnalysis`].
///
/// Accepts bare JSON or JSON wrapped in a Markdown code fence.
pub fn parse_analysis(text: &str) -> Result<OutfitAnalysis> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(OutfitError::SchemaValidation(
            "model returned an empty response".into(),
        ));
    }

    let raw: RawAnalysis = serde_json::from_str(body)
        .map_err(|e| OutfitError::SchemaValidation(format!("response is not valid JSON: {e}")))?;

    let category = required(raw.category, "category")?.parse::<OutfitCategory>()?;
    let explanation = required(raw.explanation, "explanation")?;
    let confidence = required(raw.confidence, "confidence")?;

    Ok(OutfitAnalysis {
        category,
        explanation,
        confidence,
    })
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(OutfitError::SchemaValidation(format!(
            "field '{field}' is empty"
        ))),
        None => Err(OutfitError::SchemaValidation(format!(
            "missing required field '{field}'"
        ))),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
