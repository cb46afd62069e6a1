//! Configuration file support for plant-scan.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/plant-scan/config.toml` (lowest priority)
//! - Project-local: `.plant-scan.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Resolution check settings.
    pub resolution: ResolutionConfig,
    /// Brightness window settings.
    pub exposure: ExposureConfig,
    /// Focus check settings.
    pub sharpness: SharpnessConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Resolution check configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Enable/disable the resolution check.
    pub enabled: Option<bool>,
    /// Minimum width and height in pixels.
    pub min_size: Option<u32>,
}

/// Brightness window configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ExposureConfig {
    /// Enable/disable the brightness checks.
    pub enabled: Option<bool>,
    /// Minimum mean brightness (0-255).
    pub min_brightness: Option<f64>,
    /// Maximum mean brightness (0-255).
    pub max_brightness: Option<f64>,
}

/// Focus check configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SharpnessConfig {
    /// Enable/disable the sharpness check.
    pub enabled: Option<bool>,
    /// Minimum grayscale standard deviation.
    pub min_sharpness: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Include EXIF metadata.
    pub exif: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/plant-scan/config.toml`
    /// 2. Project-local: `.plant-scan.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("exposure.min_brightness", self.exposure.min_brightness),
            ("exposure.max_brightness", self.exposure.max_brightness),
        ] {
            if let Some(v) = value {
                if !(0.0..=255.0).contains(&v) {
                    return Err(format!("{key} must be 0-255, got {v}"));
                }
            }
        }

        if let (Some(min), Some(max)) = (self.exposure.min_brightness, self.exposure.max_brightness)
        {
            if min > max {
                return Err(format!(
                    "exposure.min_brightness ({min}) must not exceed exposure.max_brightness ({max})"
                ));
            }
        }

        if let Some(s) = self.sharpness.min_sharpness {
            if !s.is_finite() || s < 0.0 {
                return Err(format!("sharpness.min_sharpness must be >= 0, got {s}"));
            }
        }

        if self.resolution.min_size == Some(0) {
            return Err("resolution.min_size must be at least 1".to_string());
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.resolution.enabled = other.resolution.enabled.or(self.resolution.enabled);
        self.resolution.min_size = other.resolution.min_size.or(self.resolution.min_size);

        self.exposure.enabled = other.exposure.enabled.or(self.exposure.enabled);
        self.exposure.min_brightness = other
            .exposure
            .min_brightness
            .or(self.exposure.min_brightness);
        self.exposure.max_brightness = other
            .exposure
            .max_brightness
            .or(self.exposure.max_brightness);

        self.sharpness.enabled = other.sharpness.enabled.or(self.sharpness.enabled);
        self.sharpness.min_sharpness = other
            .sharpness
            .min_sharpness
            .or(self.sharpness.min_sharpness);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.exif = other.output.exif.or(self.output.exif);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plant-scan").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.plant-scan.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".plant-scan.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
