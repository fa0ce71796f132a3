//! CLI integration tests for outfit-cli.
//!
//! These tests run the actual binary with mock providers and check
//! outputs and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the outfit binary with a clean provider environment.
fn outfit() -> Command {
    let mut cmd = Command::cargo_bin("outfit").unwrap();
    cmd.env_remove("GEMINI_API_KEY")
        .env_remove("S3_BUCKET")
        .env_remove("SUGGESTIONS_ENABLED")
        .env_remove("RUST_LOG");
    cmd
}

fn write_image(dir: &TempDir, name: &str, len: usize) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
    bytes.resize(len.max(4), 0);
    fs::write(&path, bytes).unwrap();
    path
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    outfit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Outfit photo analysis"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_help_shows_exit_codes() {
    outfit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("66"))
        .stdout(predicate::str::contains("69"));
}

#[test]
fn test_analyze_help_shows_options() {
    outfit()
        .args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--no-suggest"))
        .stdout(predicate::str::contains("--mock"))
        .stdout(predicate::str::contains("--json"));
}

// ============================================================================
// Analyze Tests
// ============================================================================

#[test]
fn test_analyze_mock_json_extended() {
    let dir = TempDir::new().unwrap();
    let image = write_image(&dir, "look.jpg", 64);

    let output = outfit()
        .args(["analyze", "--mock", "--json", image.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["category"], "Casual");
    assert_eq!(json["confidence"], "High");
    let url = json["suggestionImageUrl"].as_str().unwrap();
    assert!(url.contains("outfit-suggestions/"));
    assert!(url.contains("-casual.png"));
}

#[test]
fn test_analyze_mock_json_basic_variant() {
    let dir = TempDir::new().unwrap();
    let image = write_image(&dir, "look.jpg", 64);

    let output = outfit()
        .args([
            "analyze",
            "--mock",
            "--no-suggest",
            "--json",
            image.to_str().unwrap(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["category"], "Casual");
    assert!(json.get("suggestionImageUrl").is_none());
}

#[test]
fn test_analyze_mock_human_output() {
    let dir = TempDir::new().unwrap();
    let image = write_image(&dir, "look.png", 64);

    outfit()
        .args(["analyze", "--mock", "--no-suggest", image.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category:"))
        .stdout(predicate::str::contains("Casual"))
        .stdout(predicate::str::contains("Confidence:"));
}

#[test]
fn test_analyze_missing_file_exit_66() {
    outfit()
        .args(["analyze", "--mock", "/nonexistent/look.jpg"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_analyze_oversize_file_exit_65() {
    let dir = TempDir::new().unwrap();
    let image = write_image(&dir, "big.jpg", 10 * 1024 * 1024 + 1);

    outfit()
        .args(["analyze", "--mock", image.to_str().unwrap()])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("File size limit exceeded"));
}

#[test]
fn test_analyze_without_providers_fails() {
    let dir = TempDir::new().unwrap();
    let image = write_image(&dir, "look.jpg", 64);

    outfit()
        .env_remove("ALLOW_MOCK_PROVIDERS")
        .args(["analyze", image.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}
