//! Minimum resolution check.

use crate::domain::{Issue, IssueType, QualityCheck, QualityPolicy};
use crate::metrics::ImageMetrics;

/// Rejects images narrower or shorter than a minimum side length.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionCheck {
    min_size: u32,
}

impl ResolutionCheck {
    /// Creates a check requiring at least `min_size` pixels on both sides.
    #[must_use]
    pub const fn new(min_size: u32) -> Self {
        Self { min_size }
    }

    /// Returns the minimum side length.
    #[must_use]
    pub const fn min_size(&self) -> u32 {
        self.min_size
    }
}

impl Default for ResolutionCheck {
    fn default() -> Self {
        Self::new(QualityPolicy::MIN_RESOLUTION)
    }
}

impl From<&QualityPolicy> for ResolutionCheck {
    fn from(policy: &QualityPolicy) -> Self {
        Self::new(policy.min_resolution)
    }
}

impl QualityCheck for ResolutionCheck {
    fn name(&self) -> &'static str {
        "resolution"
    }

    fn evaluate(&self, metrics: &ImageMetrics) -> Vec<Issue> {
        if metrics.width < self.min_size || metrics.height < self.min_size {
            vec![Issue::new(IssueType::LowResolution)]
        } else {
            vec![]
        }
    }
}
