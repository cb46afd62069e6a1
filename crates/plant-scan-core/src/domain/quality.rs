//! Quality verdict types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Issue, IssueType};

/// Image dimensions in pixels. `0x0` marks an image that failed to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Creates new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Outcome of assessing one candidate photo.
///
/// `is_acceptable` is true exactly when `issues` is empty; the only way to
/// build a value is through the constructors below, which keep that in sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageQuality {
    resolution: Resolution,
    brightness: f64,
    sharpness: f64,
    is_acceptable: bool,
    issues: Vec<Issue>,
}

impl ImageQuality {
    /// Builds a verdict from measured values and the issues raised against them.
    #[must_use]
    pub fn new(resolution: Resolution, brightness: f64, sharpness: f64, issues: Vec<Issue>) -> Self {
        Self {
            resolution,
            brightness,
            sharpness,
            is_acceptable: issues.is_empty(),
            issues,
        }
    }

    /// The verdict for input that could not be decoded.
    #[must_use]
    pub fn load_failed() -> Self {
        Self::new(
            Resolution::default(),
            0.0,
            0.0,
            vec![Issue::new(IssueType::LoadFailed)],
        )
    }

    /// Decoded dimensions.
    #[must_use]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Mean of the per-pixel RGB average.
    #[must_use]
    pub const fn brightness(&self) -> f64 {
        self.brightness
    }

    /// Population standard deviation of the per-pixel RGB average.
    #[must_use]
    pub const fn sharpness(&self) -> f64 {
        self.sharpness
    }

    /// Whether the photo may proceed to identification.
    #[must_use]
    pub const fn is_acceptable(&self) -> bool {
        self.is_acceptable
    }

    /// Issues in check order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Returns true if an issue of the given type was raised.
    #[must_use]
    pub fn has_issue(&self, issue_type: IssueType) -> bool {
        self.issues.iter().any(|i| i.issue_type == issue_type)
    }

    /// The human-readable reasons, in check order.
    #[must_use]
    pub fn reasons(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }
}

/// Raw, still-encoded image handed to the assessor.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Where the bytes came from (file path or synthetic label).
    pub path: String,
    /// Encoded image bytes or a `data:` URL.
    pub data: Vec<u8>,
}

impl ImageInput {
    /// Creates a new input.
    #[must_use]
    pub fn new(path: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
        }
    }
}

/// Quality verdict for a single file, as written by the output adapters.
#[derive(Debug, Clone, Serialize)]
pub struct QualityReport {
    /// Path to the assessed image.
    pub path: String,
    /// Timestamp of assessment (RFC 3339).
    pub timestamp: String,
    /// The verdict.
    #[serde(flatten)]
    pub quality: ImageQuality,
    /// Optional EXIF metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif: Option<HashMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptable_iff_no_issues() {
        let ok = ImageQuality::new(Resolution::new(600, 600), 120.0, 30.0, vec![]);
        assert!(ok.is_acceptable());
        assert!(ok.issues().is_empty());

        let bad = ImageQuality::new(
            Resolution::new(600, 600),
            120.0,
            3.0,
            vec![Issue::new(IssueType::Blurry)],
        );
        assert!(!bad.is_acceptable());
        assert!(bad.has_issue(IssueType::Blurry));
    }

    #[test]
    fn test_load_failed_shape() {
        let q = ImageQuality::load_failed();
        assert_eq!(q.resolution(), Resolution::new(0, 0));
        assert!(q.resolution().is_empty());
        assert!(q.brightness().abs() < f64::EPSILON);
        assert!(q.sharpness().abs() < f64::EPSILON);
        assert!(!q.is_acceptable());
        assert_eq!(q.reasons(), vec!["image failed to load"]);
    }
}
