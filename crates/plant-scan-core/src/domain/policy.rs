//! Acceptance thresholds for the quality gate.

/// Thresholds applied by the quality checks.
///
/// The defaults reject anything smaller than 512 px on either side, darker
/// than 60 or brighter than 200 mean brightness, or with a grayscale standard
/// deviation under 15.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityPolicy {
    /// Minimum width and height in pixels.
    pub min_resolution: u32,
    /// Minimum mean brightness (0-255).
    pub min_brightness: f64,
    /// Maximum mean brightness (0-255).
    pub max_brightness: f64,
    /// Minimum grayscale standard deviation.
    pub min_sharpness: f64,
}

impl QualityPolicy {
    /// Default minimum side length in pixels.
    pub const MIN_RESOLUTION: u32 = 512;
    /// Default minimum mean brightness.
    pub const MIN_BRIGHTNESS: f64 = 60.0;
    /// Default maximum mean brightness.
    pub const MAX_BRIGHTNESS: f64 = 200.0;
    /// Default minimum sharpness.
    pub const MIN_SHARPNESS: f64 = 15.0;
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            min_resolution: Self::MIN_RESOLUTION,
            min_brightness: Self::MIN_BRIGHTNESS,
            max_brightness: Self::MAX_BRIGHTNESS,
            min_sharpness: Self::MIN_SHARPNESS,
        }
    }
}
