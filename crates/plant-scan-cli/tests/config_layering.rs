//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use plant_scan_test_support::SyntheticImageBuilder;
use predicates::prelude::*;

/// Creates a project dir holding a config file and a 256x256 photo that only
/// fails the default resolution check.
fn project_with_config(config: &str) -> (tempfile::TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join(".plant-scan.toml"), config).unwrap();
    let photo = temp_dir.path().join("small.png");
    SyntheticImageBuilder::too_small().save(&photo).unwrap();
    (temp_dir, photo)
}

#[test]
fn test_project_config_applies_format() {
    let (temp_dir, photo) = project_with_config(
        r"
[output]
format = 'json'
",
    );

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path()).arg(&photo);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_cli_overrides_project_config() {
    let (temp_dir, photo) = project_with_config(
        r"
[output]
format = 'json'
",
    );

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--format")
        .arg("jsonl")
        .arg(&photo);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_project_config_threshold() {
    let (temp_dir, photo) = project_with_config(
        r"
[resolution]
min_size = 256
",
    );

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path()).arg(&photo);

    cmd.assert()
        .code(0)
        .stdout(predicate::str::contains("\"is_acceptable\":true"));
}

#[test]
fn test_cli_threshold_overrides_config() {
    let (temp_dir, photo) = project_with_config(
        r"
[resolution]
min_size = 256
",
    );

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path())
        .arg("--min-resolution")
        .arg("300")
        .arg(&photo);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("low_resolution"));
}

#[test]
fn test_config_disables_check() {
    let (temp_dir, photo) = project_with_config(
        r"
[resolution]
enabled = false
",
    );

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path()).arg(&photo);

    cmd.assert().code(0);
}

#[test]
fn test_config_disables_everything() {
    let (temp_dir, photo) = project_with_config(
        r"
[resolution]
enabled = false

[exposure]
enabled = false

[sharpness]
enabled = false
",
    );

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path()).arg("-v").arg(&photo);

    cmd.assert()
        .code(0)
        .stderr(predicate::str::contains("All quality checks disabled"));
}

#[test]
fn test_invalid_config_warns() {
    let (temp_dir, photo) = project_with_config(
        r"
[exposure]
min_brightness = 180.0
max_brightness = 90.0
",
    );

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path()).arg(&photo);

    cmd.assert()
        .code(2)
        .stderr(
            predicate::str::contains("warning: exposure.min_brightness")
                .and(predicate::str::contains("exceeds maximum brightness")),
        );
}

#[test]
fn test_unparseable_config_is_ignored() {
    let (temp_dir, photo) = project_with_config("[output\nformat = 'json'\n");

    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.current_dir(temp_dir.path()).arg(&photo);

    cmd.assert()
        .code(1)
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("Failed to parse config file"));
}
