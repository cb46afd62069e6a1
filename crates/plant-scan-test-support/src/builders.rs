//! Synthetic image builders for testing.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating images with specific
/// characteristics (sharp, blurry, dark, bright, too small).
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Sharp/High-Contrast Images ===

    /// Creates a black and white checkerboard with 8 px cells.
    ///
    /// Mean brightness is 127.5 and sharpness 127.5 when both sides are
    /// multiples of 16.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> DynamicImage {
        Self::two_tone_checkerboard(width, height, 0, 255, 8)
    }

    /// Creates a checkerboard alternating between two gray levels.
    ///
    /// With equal cell counts the brightness is the midpoint of the two
    /// levels and the sharpness is half their difference.
    #[must_use]
    pub fn two_tone_checkerboard(
        width: u32,
        height: u32,
        dark: u8,
        light: u8,
        cell_size: u32,
    ) -> DynamicImage {
        let cell_size = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                Luma([dark])
            } else {
                Luma([light])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    /// Creates deterministic RGB noise around a center gray level.
    ///
    /// Each channel is `center ± spread`, drawn from a fixed-seed LCG.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn noise(width: u32, height: u32, center: u8, spread: u8, seed: u64) -> DynamicImage {
        let mut state = seed | 1;
        let mut next = move || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 33) as u32
        };
        let span = u32::from(spread) * 2 + 1;
        let img = RgbImage::from_fn(width, height, |_, _| {
            let mut channel = || {
                let offset = i32::try_from(next() % span).unwrap_or(0) - i32::from(spread);
                (i32::from(center) + offset).clamp(0, 255) as u8
            };
            Rgb([channel(), channel(), channel()])
        });
        DynamicImage::ImageRgb8(img)
    }

    // === Blurry Images ===

    /// Creates a uniform gray image (no variation at all).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value])))
    }

    /// Creates a uniform RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b])))
    }

    /// Creates a smooth horizontal gradient from black to white.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> DynamicImage {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.saturating_sub(1).max(1)) as u8;
            Luma([val])
        });
        DynamicImage::ImageLuma8(img)
    }

    // === Exposure Images ===

    /// Creates a completely black image.
    #[must_use]
    pub fn black(width: u32, height: u32) -> DynamicImage {
        Self::uniform_gray(width, height, 0)
    }

    /// Creates a completely white image.
    #[must_use]
    pub fn white(width: u32, height: u32) -> DynamicImage {
        Self::uniform_gray(width, height, 255)
    }

    /// Creates a dark but detailed image (brightness 30, sharpness 20).
    #[must_use]
    pub fn dark_detailed(width: u32, height: u32) -> DynamicImage {
        Self::two_tone_checkerboard(width, height, 10, 50, 8)
    }

    /// Creates a bright but detailed image (brightness 225, sharpness 25).
    #[must_use]
    pub fn bright_detailed(width: u32, height: u32) -> DynamicImage {
        Self::two_tone_checkerboard(width, height, 200, 250, 8)
    }
}

/// Convenience functions for common test images.
impl SyntheticImageBuilder {
    /// Returns a 1024x1024 photo that passes every default check
    /// (brightness 130, sharpness 40).
    #[must_use]
    pub fn acceptable() -> DynamicImage {
        Self::two_tone_checkerboard(1024, 1024, 90, 170, 8)
    }

    /// Returns a 256x256 photo that only fails the resolution check.
    #[must_use]
    pub fn too_small() -> DynamicImage {
        Self::two_tone_checkerboard(256, 256, 90, 170, 8)
    }

    /// Returns a 512x512 photo that only fails the sharpness check.
    #[must_use]
    pub fn blurry() -> DynamicImage {
        Self::uniform_gray(512, 512, 128)
    }
}

/// Encodes an image in the given format.
///
/// # Errors
///
/// Returns an error if the encoder rejects the image.
pub fn encode(image: &DynamicImage, format: ImageFormat) -> anyhow::Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}

/// Encodes an image as PNG.
///
/// # Panics
///
/// Panics if PNG encoding fails, which only happens for unsupported pixel
/// layouts that the builders never produce.
#[must_use]
#[allow(clippy::expect_used)]
pub fn encode_png(image: &DynamicImage) -> Vec<u8> {
    encode(image, ImageFormat::Png).expect("PNG encoding of synthetic image")
}

/// Wraps an image in a `data:image/png;base64,...` URL.
#[must_use]
pub fn data_url(image: &DynamicImage) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(encode_png(image)))
}
