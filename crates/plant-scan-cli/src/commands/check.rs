//! Check command - run photos through the quality gate.

use std::collections::HashMap;
use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use plant_scan_adapters::FsImageSource;
use plant_scan_core::{
    ExposureCheck, ImageSource, IssueType, ProgressEvent, ProgressSink, QualityAssessor,
    QualityCheck, QualityPolicy, QualityReport, ResolutionCheck, ResultOutput, SharpnessCheck,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, OutputFormat, ProgressBar};

/// Parse and validate a brightness value (0-255).
fn parse_brightness(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=255.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0..=255"))
    }
}

/// Parse and validate a sharpness value (finite, non-negative).
fn parse_sharpness(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must be a non-negative number"))
    }
}

/// Shared arguments for photo checking.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct CheckArgs {
    /// Files or directories to check
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Disable the resolution check
    #[arg(long)]
    pub no_resolution: bool,

    /// Disable the brightness checks
    #[arg(long)]
    pub no_exposure: bool,

    /// Disable the sharpness check
    #[arg(long)]
    pub no_sharpness: bool,

    /// Minimum width and height in pixels
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub min_resolution: Option<u32>,

    /// Minimum mean brightness (0-255)
    #[arg(long, value_parser = parse_brightness)]
    pub min_brightness: Option<f64>,

    /// Maximum mean brightness (0-255)
    #[arg(long, value_parser = parse_brightness)]
    pub max_brightness: Option<f64>,

    /// Minimum grayscale standard deviation
    #[arg(long, value_parser = parse_sharpness)]
    pub min_sharpness: Option<f64>,

    /// Include EXIF metadata in output
    #[arg(long)]
    pub exif: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl CheckArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    ///
    /// For boolean flags: CLI `--no-*` always wins. Config can enable/disable
    /// only when CLI flag wasn't explicitly set.
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        if !args.no_resolution {
            if let Some(enabled) = config.resolution.enabled {
                args.no_resolution = !enabled;
            }
        }
        if !args.no_exposure {
            if let Some(enabled) = config.exposure.enabled {
                args.no_exposure = !enabled;
            }
        }
        if !args.no_sharpness {
            if let Some(enabled) = config.sharpness.enabled {
                args.no_sharpness = !enabled;
            }
        }

        args.min_resolution = args.min_resolution.or(config.resolution.min_size);
        args.min_brightness = args.min_brightness.or(config.exposure.min_brightness);
        args.max_brightness = args.max_brightness.or(config.exposure.max_brightness);
        args.min_sharpness = args.min_sharpness.or(config.sharpness.min_sharpness);

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.exif {
            args.exif = config.output.exif.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Thresholds after layering, with hardcoded fallbacks.
    fn policy(&self) -> QualityPolicy {
        QualityPolicy {
            min_resolution: self
                .min_resolution
                .unwrap_or(QualityPolicy::MIN_RESOLUTION),
            min_brightness: self
                .min_brightness
                .unwrap_or(QualityPolicy::MIN_BRIGHTNESS),
            max_brightness: self
                .max_brightness
                .unwrap_or(QualityPolicy::MAX_BRIGHTNESS),
            min_sharpness: self.min_sharpness.unwrap_or(QualityPolicy::MIN_SHARPNESS),
        }
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the check command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// Number of photos checked.
    pub processed: usize,
    /// Number of photos skipped.
    pub skipped: usize,
    /// Number of photos rejected.
    pub rejected: usize,
    /// Rejected photos that did not decode.
    pub load_failed: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the check command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &CheckArgs) -> Result<CheckResult> {
    info!("Running check command on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    let assessor = build_assessor(args)?;

    if assessor.is_empty() {
        warn!("All quality checks disabled, nothing to check");
        return Ok(CheckResult {
            processed: 0,
            skipped: 0,
            rejected: 0,
            load_failed: 0,
            exit_code: ExitCode::Success,
        });
    }

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout(args.format(), args.pretty);

    process_images(&source, &assessor, &output, &progress_bar, args.exif)
}

/// Build the assessor from merged args (CLI + config), keeping check order.
fn build_assessor(args: &CheckArgs) -> Result<QualityAssessor> {
    let policy = args.policy();
    let mut checks: Vec<Box<dyn QualityCheck>> = Vec::new();

    if !args.no_resolution {
        checks.push(Box::new(ResolutionCheck::from(&policy)));
        debug!("Enabled resolution check (min {} px)", policy.min_resolution);
    }

    if !args.no_exposure {
        if policy.min_brightness > policy.max_brightness {
            anyhow::bail!(
                "minimum brightness {} exceeds maximum brightness {}",
                policy.min_brightness,
                policy.max_brightness
            );
        }
        checks.push(Box::new(ExposureCheck::from(&policy)));
        debug!(
            "Enabled exposure check ({}..={})",
            policy.min_brightness, policy.max_brightness
        );
    }

    if !args.no_sharpness {
        checks.push(Box::new(SharpnessCheck::from(&policy)));
        debug!("Enabled sharpness check (min {})", policy.min_sharpness);
    }

    Ok(QualityAssessor::with_checks(checks))
}

/// Run every photo from the source through the assessor.
///
/// Reports reach `output` in source order; `output` is flushed once at the end.
fn process_images(
    source: &dyn ImageSource,
    assessor: &QualityAssessor,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
    with_exif: bool,
) -> Result<CheckResult> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut rejected = 0usize;
    let mut load_failed = 0usize;

    for (index, input_result) in source.images().enumerate() {
        let input = match input_result {
            Ok(input) => input,
            Err(e) => {
                progress.on_event(ProgressEvent::Skipped {
                    path: e.path,
                    reason: format!("{:#}", e.reason),
                });
                skipped += 1;
                continue;
            }
        };

        progress.on_event(ProgressEvent::Started {
            path: input.path.clone(),
            index,
            total,
        });

        let quality = assessor.assess(&input.data);
        if !quality.is_acceptable() {
            debug!("{} rejected: {}", input.path, quality.reasons().join(", "));
            rejected += 1;
            if quality.has_issue(IssueType::LoadFailed) {
                load_failed += 1;
            }
        }

        let exif = if with_exif {
            extract_exif(&input.data)
        } else {
            None
        };

        let report = QualityReport {
            path: input.path,
            timestamp: iso_timestamp(),
            quality,
            exif,
        };

        output.write(&report)?;
        progress.on_event(ProgressEvent::Completed { report });
        processed += 1;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        processed,
        rejected,
        load_failed,
        skipped,
    });

    let exit_code = if rejected > 0 {
        ExitCode::IssuesFound
    } else {
        ExitCode::Success
    };

    Ok(CheckResult {
        processed,
        skipped,
        rejected,
        load_failed,
        exit_code,
    })
}

/// Extract EXIF metadata from encoded image bytes.
fn extract_exif(data: &[u8]) -> Option<HashMap<String, String>> {
    let mut reader = std::io::Cursor::new(data);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    let map: HashMap<String, String> = exif
        .fields()
        .map(|field| {
            (
                field.tag.to_string(),
                field.display_value().with_unit(&exif).to_string(),
            )
        })
        .collect();

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
