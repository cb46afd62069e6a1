//! The quality gate: decode, measure, run checks, produce a verdict.

use image::DynamicImage;
use tracing::debug;

use crate::decode::decode_image;
use crate::domain::{ImageQuality, QualityCheck, QualityPolicy, Resolution};
use crate::metrics::ImageMetrics;
use crate::modules::{ExposureCheck, ResolutionCheck, SharpnessCheck};

/// Runs a fixed, ordered list of quality checks against submitted photos.
///
/// Assessment never fails: undecodable input becomes a rejection with a
/// single `load_failed` issue and a `0x0` resolution.
pub struct QualityAssessor {
    checks: Vec<Box<dyn QualityCheck>>,
}

impl QualityAssessor {
    /// Creates an assessor running resolution, exposure and sharpness checks,
    /// in that order, with the given thresholds.
    #[must_use]
    pub fn new(policy: &QualityPolicy) -> Self {
        Self::with_checks(vec![
            Box::new(ResolutionCheck::from(policy)),
            Box::new(ExposureCheck::from(policy)),
            Box::new(SharpnessCheck::from(policy)),
        ])
    }

    /// Creates an assessor running exactly `checks`, in order.
    #[must_use]
    pub fn with_checks(checks: Vec<Box<dyn QualityCheck>>) -> Self {
        Self { checks }
    }

    /// Names of the configured checks, in evaluation order.
    #[must_use]
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Returns true if no checks are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Assesses encoded image bytes or a base64 data URL.
    #[must_use]
    pub fn assess(&self, data: &[u8]) -> ImageQuality {
        match decode_image(data) {
            Ok(image) => self.assess_image(&image),
            Err(e) => {
                debug!("Image rejected, decode failed: {e}");
                ImageQuality::load_failed()
            }
        }
    }

    /// Assesses an already decoded image.
    #[must_use]
    pub fn assess_image(&self, image: &DynamicImage) -> ImageQuality {
        self.assess_metrics(&ImageMetrics::from_image(image))
    }

    /// Runs the checks against precomputed metrics.
    #[must_use]
    pub fn assess_metrics(&self, metrics: &ImageMetrics) -> ImageQuality {
        if metrics.is_empty() {
            return ImageQuality::load_failed();
        }

        let issues = self
            .checks
            .iter()
            .flat_map(|check| check.evaluate(metrics))
            .collect::<Vec<_>>();

        debug!(
            width = metrics.width,
            height = metrics.height,
            brightness = metrics.brightness,
            sharpness = metrics.sharpness,
            issues = issues.len(),
            "Assessed image"
        );

        ImageQuality::new(
            Resolution::new(metrics.width, metrics.height),
            metrics.brightness,
            metrics.sharpness,
            issues,
        )
    }
}

impl Default for QualityAssessor {
    fn default() -> Self {
        Self::new(&QualityPolicy::default())
    }
}
