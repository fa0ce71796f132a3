//! Analyze command implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use outfit_core::{
    OutfitCategory, PipelineOutcome, ProviderConfig, ProviderFactory, StorageSettings,
    UploadedImage, MAX_UPLOAD_BYTES,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::exit_codes::InputError;

pub struct AnalyzeOptions {
    pub suggest: bool,
    pub mock: bool,
    pub json: bool,
}

/// Same shape as the HTTP response body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisOutput<'a> {
    category: OutfitCategory,
    explanation: &'a str,
    confidence: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion_image_url: Option<&'a str>,
}

fn provider_config(options: &AnalyzeOptions) -> ProviderConfig {
    let mut config = ProviderConfig::from_env();
    config.suggestions_enabled = options.suggest;

    if options.mock {
        warn!("Using MOCK providers (the image is not inspected)");
        config.gemini_api_key = None;
        config.allow_mock = true;
        if matches!(config.storage, StorageSettings::S3 { .. }) {
            config.storage = StorageSettings::Unset;
        }
    }
    config
}

fn read_image(file: &Path) -> Result<UploadedImage, InputError> {
    let bytes = std::fs::read(file)
        .map_err(|e| InputError::Unreadable(format!("{}: {}", file.display(), e)))?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(InputError::TooLarge {
            size: bytes.len(),
            max: MAX_UPLOAD_BYTES,
        });
    }

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_string());
    Ok(UploadedImage::new(bytes, file_name))
}

/// Execute the analyze command.
pub async fn execute(file: PathBuf, options: AnalyzeOptions) -> Result<()> {
    let image = read_image(&file)?;
    info!(
        path = %file.display(),
        bytes = image.len(),
        mime_type = %image.mime_type,
        "Read image"
    );

    let config = provider_config(&options);
    debug!(?config, "Provider configuration");

    let pipeline = ProviderFactory::build(&config)?;
    let outcome = pipeline
        .analyze(&image)
        .await
        .context("Outfit analysis failed")?;

    if options.json {
        print_json(&outcome)
    } else {
        print_human(&outcome);
        Ok(())
    }
}

fn print_json(outcome: &PipelineOutcome) -> Result<()> {
    let output = AnalysisOutput {
        category: outcome.analysis.category,
        explanation: &outcome.analysis.explanation,
        confidence: &outcome.analysis.confidence,
        suggestion_image_url: outcome.suggestion_image_url.as_deref(),
    };
    let json = serde_json::to_string_pretty(&output).context("Failed to serialize analysis")?;
    println!("{json}");
    Ok(())
}

fn print_human(outcome: &PipelineOutcome) {
    let analysis = &outcome.analysis;
    println!(
        "{} {}",
        "Category:".bold(),
        analysis.category.to_string().green().bold()
    );
    println!("{} {}", "Confidence:".bold(), analysis.confidence);
    println!("{} {}", "Explanation:".bold(), analysis.explanation);

    match outcome.suggestion_image_url.as_deref() {
        Some("") => println!("{} {}", "Suggestion:".bold(), "unavailable".yellow()),
        Some(url) => println!("{} {}", "Suggestion:".bold(), url.cyan()),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_image_derives_mime_from_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("look.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0x89, b'P', b'N', b'G'])
            .unwrap();

        let image = read_image(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.len(), 4);
    }

    #[test]
    fn test_read_image_missing_file() {
        let err = read_image(Path::new("/nonexistent/outfit.jpg")).unwrap_err();
        assert!(matches!(err, InputError::Unreadable(_)));
    }

    #[test]
    fn test_mock_options_drop_remote_providers() {
        let options = AnalyzeOptions {
            suggest: false,
            mock: true,
            json: false,
        };
        let config = provider_config(&options);
        assert!(config.allow_mock);
        assert!(config.gemini_api_key.is_none());
        assert!(!config.suggestions_enabled);
    }
}
