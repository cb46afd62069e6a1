//! Pixel statistics used by the quality checks.
//!
//! The grayscale value of a pixel is the plain average of its red, green and
//! blue channels; alpha is ignored. Rather than averaging floats, the
//! channel sum `R+G+B` (0..=765) is binned and the mean and population
//! variance are derived exactly from integer totals, so identical pixels
//! always give bit-identical metrics.

use image::{DynamicImage, RgbaImage};

const CHANNEL_SUM_BINS: usize = 3 * 255 + 1;

/// Measurements taken from a decoded image.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImageMetrics {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Mean grayscale value (0-255).
    pub brightness: f64,
    /// Population standard deviation of grayscale values.
    pub sharpness: f64,
}

impl ImageMetrics {
    /// Measures a decoded image of any pixel layout.
    #[must_use]
    pub fn from_image(image: &DynamicImage) -> Self {
        Self::from_rgba(&image.to_rgba8())
    }

    /// Measures an RGBA buffer.
    #[must_use]
    pub fn from_rgba(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let histogram = ChannelSumHistogram::from_rgba(image);
        Self {
            width,
            height,
            brightness: histogram.mean(),
            sharpness: histogram.std_dev(),
        }
    }

    /// Returns true if the image has no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Histogram of per-pixel `R+G+B` sums.
#[derive(Debug, Clone)]
struct ChannelSumHistogram {
    bins: Vec<u64>,
    total: u64,
}

impl ChannelSumHistogram {
    fn from_rgba(image: &RgbaImage) -> Self {
        let mut bins = vec![0u64; CHANNEL_SUM_BINS];
        for pixel in image.pixels() {
            let [r, g, b, _] = pixel.0;
            bins[usize::from(r) + usize::from(g) + usize::from(b)] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Sum of `R+G+B` over all pixels and sum of its squares.
    fn moments(&self) -> (u128, u128) {
        self.bins
            .iter()
            .enumerate()
            .fold((0u128, 0u128), |(s1, s2), (value, &count)| {
                let value = value as u128;
                let count = u128::from(count);
                (s1 + value * count, s2 + value * value * count)
            })
    }

    /// Mean grayscale value.
    #[allow(clippy::cast_precision_loss)]
    fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let (s1, _) = self.moments();
        s1 as f64 / (3.0 * self.total as f64)
    }

    /// Population standard deviation of the grayscale value.
    ///
    /// `n * Σs² - (Σs)²` is exact in integers; dividing by `9 n²` converts
    /// the channel-sum variance to grayscale units.
    #[allow(clippy::cast_precision_loss)]
    fn std_dev(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let (s1, s2) = self.moments();
        let n = u128::from(self.total);
        let scaled = n * s2 - s1 * s1;
        let n = self.total as f64;
        (scaled as f64 / (9.0 * n * n)).sqrt()
    }
}
