//! JPEG encoding for compressed uploads.
//!
//! Uses the `image` crate's baseline JPEG encoder. Quality is expressed on the
//! `(0, 1]` scale callers use for lossy encoders and mapped onto the encoder's
//! integer 1-100 scale.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::DecodedImage;

/// MIME type of everything this module produces.
pub const JPEG_MIME: &str = "image/jpeg";

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder rejected the image
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Map a `(0, 1]` quality onto the JPEG encoder's `1..=100` scale.
///
/// Values outside the range (including NaN) are clamped, so the encoder always
/// receives a usable setting.
pub fn jpeg_quality(quality: f32) -> u8 {
    if quality.is_nan() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode a decoded image to JPEG bytes at the given quality.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero-sized image,
/// `EncodeError::InvalidPixelData` if the buffer doesn't match the dimensions,
/// and `EncodeError::EncodingFailed` if the encoder itself fails.
pub fn encode_jpeg(image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg_raw(&image.pixels, image.width, image.height, jpeg_quality(quality))
}

/// Encode raw RGB pixel data to JPEG bytes with an integer quality (1-100).
pub fn encode_jpeg_raw(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    // Rough pre-size: JPEG output is rarely more than a tenth of raw RGB.
    let mut buffer = Vec::with_capacity(expected / 10);

    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer)
}
