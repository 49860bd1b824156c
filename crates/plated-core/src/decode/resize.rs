//! Resizing uploads down to a dimension budget.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero,
/// or `DecodeError::CorruptedFile` if the source pixel buffer doesn't match
/// its dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let view = image
        .as_rgb_view()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image so its longest edge is at most `max_edge`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged; nothing is ever upscaled.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidDimensions {
            width: max_edge,
            height: max_edge,
        });
    }

    if image.longest_edge() <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = fit_dimensions(image.width, image.height, max_edge);
    resize(image, new_width, new_height, filter)
}

/// Compute the dimensions an image of `width` x `height` takes after fitting
/// into a `max_edge` square.
///
/// When the longer edge exceeds `max_edge` it becomes exactly `max_edge` and
/// the shorter edge is `round(shorter * max_edge / longer)`, never below 1.
/// Dimensions that already fit are returned as-is.
pub fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    let longer = width.max(height);
    if longer <= max_edge || width == 0 || height == 0 {
        return (width, height);
    }

    let scale = |edge: u32| -> u32 {
        let scaled = (edge as f64 * max_edge as f64 / longer as f64).round() as u32;
        scaled.max(1)
    };

    if width >= height {
        (max_edge, scale(height))
    } else {
        (scale(width), max_edge)
    }
}
