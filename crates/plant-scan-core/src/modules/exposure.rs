//! Brightness window check.
//!
//! Dark and bright are mutually exclusive: the upper bound is only looked at
//! once the lower bound has been met.

use crate::domain::{Issue, IssueType, QualityCheck, QualityPolicy};
use crate::metrics::ImageMetrics;

/// Rejects images whose mean brightness falls outside `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct ExposureCheck {
    min_brightness: f64,
    max_brightness: f64,
}

impl ExposureCheck {
    /// Creates a check with the given brightness window (0-255).
    #[must_use]
    pub const fn new(min_brightness: f64, max_brightness: f64) -> Self {
        Self {
            min_brightness,
            max_brightness,
        }
    }
}

impl Default for ExposureCheck {
    fn default() -> Self {
        Self::new(QualityPolicy::MIN_BRIGHTNESS, QualityPolicy::MAX_BRIGHTNESS)
    }
}

impl From<&QualityPolicy> for ExposureCheck {
    fn from(policy: &QualityPolicy) -> Self {
        Self::new(policy.min_brightness, policy.max_brightness)
    }
}

impl QualityCheck for ExposureCheck {
    fn name(&self) -> &'static str {
        "exposure"
    }

    fn evaluate(&self, metrics: &ImageMetrics) -> Vec<Issue> {
        if metrics.brightness < self.min_brightness {
            vec![Issue::new(IssueType::TooDark)]
        } else if metrics.brightness > self.max_brightness {
            vec![Issue::new(IssueType::TooBright)]
        } else {
            vec![]
        }
    }
}
