//! Decoding of submitted photos into pixel data.
//!
//! Accepts either encoded image bytes in any format the `image` crate can
//! sniff, or a `data:image/...;base64,...` URL as produced by browser file
//! pickers and camera capture.

use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use thiserror::Error;

const DATA_URL_PREFIX: &[u8] = b"data:";

/// Reasons a submitted photo could not be turned into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Zero-length input.
    #[error("image data is empty")]
    Empty,
    /// A `data:` URL that is not a base64 image payload.
    #[error("invalid data URL: {0}")]
    InvalidDataUrl(&'static str),
    /// The base64 payload of a data URL is malformed.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The bytes are not a decodable image.
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    /// The image decoded but contains no pixels.
    #[error("decoded image has no pixels")]
    ZeroSized,
}

/// Decodes raw image bytes or a base64 data URL.
///
/// # Errors
///
/// Returns a [`DecodeError`] describing why the input is not a usable image.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, DecodeError> {
    // Raw bytes are never trimmed: trailing 0x20 or 0x09..=0x0D can be pixels.
    let url = data.trim_ascii();
    if url.is_empty() {
        return Err(DecodeError::Empty);
    }

    let bytes: Cow<'_, [u8]> = if url.starts_with(DATA_URL_PREFIX) {
        Cow::Owned(decode_data_url(url)?)
    } else {
        Cow::Borrowed(data)
    };
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let image = image::load_from_memory(&bytes)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::ZeroSized);
    }
    Ok(image)
}

/// Extracts the binary payload of a `data:[<mime>][;base64],<payload>` URL.
fn decode_data_url(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let text = std::str::from_utf8(&data[DATA_URL_PREFIX.len()..])
        .map_err(|_| DecodeError::InvalidDataUrl("not valid UTF-8"))?;
    let (header, payload) = text
        .split_once(',')
        .ok_or(DecodeError::InvalidDataUrl("missing ',' separator"))?;

    let mut params = header.split(';');
    let mime = params.next().unwrap_or_default().trim();
    if !mime.is_empty() && !mime.to_ascii_lowercase().starts_with("image/") {
        return Err(DecodeError::InvalidDataUrl("media type is not an image"));
    }
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(DecodeError::InvalidDataUrl("payload is not base64 encoded"));
    }

    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode png");
        buf.into_inner()
    }

    #[test]
    fn test_decode_raw_png() {
        let image = decode_image(&png_bytes(4, 3)).expect("decode");
        assert_eq!((image.width(), image.height()), (4, 3));
    }

    #[test]
    fn test_decode_data_url() {
        let url = format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(5, 2)));
        let image = decode_image(url.as_bytes()).expect("decode data url");
        assert_eq!((image.width(), image.height()), (5, 2));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::Empty)));
        assert!(matches!(decode_image(b"  \n"), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_garbage_bytes() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, DecodeError::Image(_)));
    }

    #[test]
    fn test_truncated_png() {
        let mut bytes = png_bytes(8, 8);
        bytes.truncate(bytes.len() / 2);
        assert!(decode_image(&bytes).is_err());
    }

    #[test]
    fn test_data_url_without_separator() {
        let err = decode_image(b"data:image/png;base64").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDataUrl(_)));
    }

    #[test]
    fn test_data_url_non_image_mime() {
        let err = decode_image(b"data:text/plain;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDataUrl(_)));
    }

    #[test]
    fn test_data_url_not_base64() {
        let err = decode_image(b"data:image/png,rawpixels").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidDataUrl(_)));
    }

    #[test]
    fn test_data_url_bad_base64() {
        let err = decode_image(b"data:image/png;base64,!!!!").unwrap_err();
        assert!(matches!(err, DecodeError::Base64(_)));
    }

    #[test]
    fn test_raw_bytes_with_whitespace_tail_are_kept() {
        // Stripes ending in gray 32 make the BMP end in 0x20 bytes.
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_fn(64, 64, |x, _| {
            let v = if (x / 8) % 2 == 0 { 200 } else { 32 };
            image::Rgb([v, v, v])
        }));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Bmp)
            .expect("encode bmp");
        let bytes = buf.into_inner();
        assert_eq!(bytes.last(), Some(&b' '));

        let decoded = decode_image(&bytes).expect("decode bmp with whitespace tail");
        assert_eq!((decoded.width(), decoded.height()), (64, 64));
    }

    #[test]
    fn test_data_url_surrounding_whitespace() {
        let url = format!(
            "\n  data:image/png;base64,{}\r\n",
            STANDARD.encode(png_bytes(3, 3))
        );
        let image = decode_image(url.as_bytes()).expect("decode padded data url");
        assert_eq!((image.width(), image.height()), (3, 3));
    }

    #[test]
    fn test_data_url_empty_payload() {
        let err = decode_image(b"data:image/png;base64,").unwrap_err();
        assert!(matches!(err, DecodeError::Empty));
    }
}
