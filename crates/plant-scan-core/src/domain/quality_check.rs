//! Quality check trait for the individual gate rules.

use super::Issue;
use crate::metrics::ImageMetrics;

/// A single rule of the quality gate.
///
/// Checks see only the measured metrics, never the pixels, so each rule is a
/// pure function of numbers and the order the assessor runs them in fully
/// determines the order of the resulting issues.
pub trait QualityCheck: Send + Sync {
    /// Returns the name of this check.
    fn name(&self) -> &'static str;

    /// Evaluates the metrics and returns the issues raised, empty if the
    /// image passes.
    fn evaluate(&self, metrics: &ImageMetrics) -> Vec<Issue>;
}
