//! Output format validation tests.
//!
//! Tests JSON/JSONL output format correctness and required field presence.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use plant_scan_test_support::SyntheticImageBuilder;
use serde_json::Value;

fn write_photos(dir: &Path) -> Vec<PathBuf> {
    let photos = [
        ("good.png", SyntheticImageBuilder::acceptable()),
        ("small.png", SyntheticImageBuilder::too_small()),
    ];
    photos
        .into_iter()
        .map(|(name, img)| {
            let path = dir.join(name);
            img.save(&path).unwrap();
            path
        })
        .collect()
}

fn stdout_of(args: &[&str], paths: &[PathBuf]) -> String {
    let mut cmd = Command::cargo_bin("plant-scan").unwrap();
    cmd.args(args).args(paths);
    let output = cmd.output().unwrap();
    String::from_utf8(output.stdout).unwrap()
}

fn assert_report_fields(report: &Value) {
    for field in [
        "path",
        "timestamp",
        "resolution",
        "brightness",
        "sharpness",
        "is_acceptable",
        "issues",
    ] {
        assert!(report.get(field).is_some(), "missing field {field}: {report}");
    }
    assert!(report.get("exif").is_none(), "exif omitted unless requested");
}

// === JSONL Format Tests ===

#[test]
fn test_jsonl_one_object_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "jsonl"], &paths);
    let lines: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines.len(), 2);

    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        assert!(value.is_object(), "JSONL line should be an object");
        assert_report_fields(&value);
    }
}

#[test]
fn test_jsonl_preserves_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "jsonl"], &paths);
    let reported: Vec<String> = stdout
        .lines()
        .map(|l| serde_json::from_str::<Value>(l).unwrap()["path"].as_str().unwrap().to_string())
        .collect();

    assert!(reported[0].ends_with("good.png"));
    assert!(reported[1].ends_with("small.png"));
}

// === JSON Format Tests ===

#[test]
fn test_json_single_array() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "json"], &paths);
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    let array = value.as_array().unwrap();
    assert_eq!(array.len(), 2);
    array.iter().for_each(assert_report_fields);
}

#[test]
fn test_json_pretty() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "json", "--pretty"], &paths);
    assert!(stdout.lines().count() > 2, "pretty output spans lines");
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn test_pretty_ignored_for_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "jsonl", "--pretty"], &paths);
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn test_timestamp_is_rfc3339() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "jsonl"], &paths[..1]);
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    let ts = value["timestamp"].as_str().unwrap();
    assert!(ts.contains('T'), "timestamp {ts} should be RFC 3339");
    assert!(ts.ends_with('Z'), "timestamp {ts} should be UTC");
}

#[test]
fn test_issue_shape() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "jsonl"], &paths[1..]);
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    let issue = &value["issues"][0];
    assert_eq!(issue["type"], "low_resolution");
    assert_eq!(issue["message"], "resolution too low");
    assert_eq!(value["is_acceptable"], false);
}

#[test]
fn test_exif_flag_on_png_without_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let paths = write_photos(dir.path());

    let stdout = stdout_of(&["--format", "jsonl", "--exif"], &paths[..1]);
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();
    assert!(value.get("exif").is_none(), "no EXIF block in a plain PNG");
}
