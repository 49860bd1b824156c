//! Upload decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageFormat};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode an uploaded image from bytes, applying EXIF orientation correction.
///
/// Any raster format compiled into the `image` dependency is accepted (JPEG,
/// PNG, GIF, WebP, BMP). Animated inputs decode to their first frame.
///
/// # Errors
///
/// * `DecodeError::Empty` for a zero-length buffer
/// * `DecodeError::UnsupportedFormat` if the signature is not a supported raster format
/// * `DecodeError::CorruptedFile` if the format is recognised but decoding fails
/// * `DecodeError::InvalidDimensions` if the decoded image has no pixels
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    let oriented = apply_orientation(img, extract_orientation(bytes));
    into_decoded(oriented)
}

/// Decode an uploaded image without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    into_decoded(decode_dynamic(bytes)?)
}

/// Identify the raster format of `bytes` from its signature.
pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes).ok()
}

/// Extract EXIF orientation value from image bytes (for external use).
///
/// Returns `Orientation::Normal` when there is no EXIF block or no
/// orientation tag.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = detect_format(bytes).ok_or(DecodeError::UnsupportedFormat)?;

    image::load_from_memory_with_format(bytes, format).map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

fn into_decoded(img: DynamicImage) -> Result<DecodedImage, DecodeError> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    // Alpha is dropped: the output format has no transparency.
    Ok(DecodedImage::from_rgb_image(img.into_rgb8()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    /// Gradient RGB image used across decode and compress tests.
    pub fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
            ])
        })
    }

    /// Encode an image to the given container format.
    pub fn encode_as(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, format)
            .expect("fixture encoding should succeed");
        buffer.into_inner()
    }

    /// Splice a big-endian EXIF APP1 segment carrying `orientation` right after SOI.
    pub fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let [hi, lo] = orientation.to_be_bytes();
        let tiff: [u8; 26] = [
            b'M', b'M', 0x00, 0x2A, 0x00, 0x00, 0x00, 0x08, // header, IFD0 at 8
            0x00, 0x01, // one entry
            0x01, 0x12, 0x00, 0x03, 0x00, 0x00, 0x00, 0x01, hi, lo, 0x00, 0x00, // Orientation SHORT
            0x00, 0x00, 0x00, 0x00, // no next IFD
        ];
        let segment_len = (2 + 6 + tiff.len()) as u16;

        let mut out = Vec::with_capacity(jpeg.len() + segment_len as usize + 2);
        out.extend_from_slice(&jpeg[..2]);
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }
}
