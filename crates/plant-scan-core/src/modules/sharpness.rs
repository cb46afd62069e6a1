//! Focus check based on grayscale spread.
//!
//! A photo with almost no tonal variation carries no edges worth
//! identifying; the standard deviation of gray values is used as a cheap
//! stand-in for a real focus measure.

use crate::domain::{Issue, IssueType, QualityCheck, QualityPolicy};
use crate::metrics::ImageMetrics;

/// Rejects images whose grayscale standard deviation is below a minimum.
#[derive(Debug, Clone, Copy)]
pub struct SharpnessCheck {
    min_sharpness: f64,
}

impl SharpnessCheck {
    /// Creates a check with the given minimum standard deviation.
    #[must_use]
    pub const fn new(min_sharpness: f64) -> Self {
        Self { min_sharpness }
    }
}

impl Default for SharpnessCheck {
    fn default() -> Self {
        Self::new(QualityPolicy::MIN_SHARPNESS)
    }
}

impl From<&QualityPolicy> for SharpnessCheck {
    fn from(policy: &QualityPolicy) -> Self {
        Self::new(policy.min_sharpness)
    }
}

impl QualityCheck for SharpnessCheck {
    fn name(&self) -> &'static str {
        "sharpness"
    }

    fn evaluate(&self, metrics: &ImageMetrics) -> Vec<Issue> {
        if metrics.sharpness < self.min_sharpness {
            vec![Issue::new(IssueType::Blurry)]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(sharpness: f64) -> ImageMetrics {
        ImageMetrics {
            width: 1024,
            height: 1024,
            brightness: 128.0,
            sharpness,
        }
    }

    #[test]
    fn test_check_name() {
        assert_eq!(SharpnessCheck::default().name(), "sharpness");
    }

    #[test]
    fn test_uniform_image_is_blurry() {
        let issues = SharpnessCheck::default().evaluate(&metrics(0.0));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue_type, IssueType::Blurry);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let check = SharpnessCheck::default();
        assert!(check.evaluate(&metrics(15.0)).is_empty());
        assert!(!check.evaluate(&metrics(14.99)).is_empty());
    }

    #[test]
    fn test_zero_threshold_never_flags() {
        assert!(SharpnessCheck::new(0.0).evaluate(&metrics(0.0)).is_empty());
    }
}
