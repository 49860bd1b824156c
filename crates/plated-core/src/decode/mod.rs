//! Upload decoding for Plated.
//!
//! This module provides functionality for:
//! - Decoding uploaded raster images (JPEG, PNG, GIF, WebP, BMP)
//! - Applying EXIF orientation so phone photos come out upright
//! - Resizing to fit a dimension budget
//!
//! All operations are synchronous and allocate only per-call buffers.
//!
//! # Examples
//!
//! ```ignore
//! use plated_core::decode::{decode_image, resize_to_fit, FilterType};
//!
//! let bytes = std::fs::read("pancakes.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let preview = resize_to_fit(&image, 1920, FilterType::Bilinear).unwrap();
//! println!("{}x{} -> {}x{}", image.width, image.height, preview.width, preview.height);
//! ```

mod raster;
mod resize;
mod types;

#[cfg(test)]
pub(crate) use raster::fixtures;
pub use raster::{decode_image, decode_image_no_orientation, detect_format, get_orientation};
pub use resize::{fit_dimensions, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
