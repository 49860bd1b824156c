//! Adaptive compression of uploaded images.
//!
//! Keeps user uploads under a byte budget while preserving as much resolution
//! and quality as possible:
//!
//! 1. Decode the upload (any supported raster format)
//! 2. Downscale once so the longest edge fits `max_dimension`
//! 3. Encode at `initial_quality`, stepping down by 0.1 until the output fits
//!    `max_size_bytes` or the quality floor (0.1) is reached
//!
//! The search is bounded: at most `ceil((initial_quality - 0.1) / 0.1) + 1`
//! encodes. A result that is still over budget at the floor is returned with
//! `floor_reached` set; callers that need a hard limit check it themselves.
//!
//! # Examples
//!
//! ```ignore
//! use plated_core::compress::{compress, CompressionOptions};
//!
//! let upload = std::fs::read("tiramisu.png").unwrap();
//! let result = compress(&upload, &CompressionOptions::new()).unwrap();
//! println!("{} bytes of {} at q={}", result.len(), result.mime_type, result.quality);
//! ```

mod codec;
mod compressor;
mod quality;
mod types;

#[cfg(test)]
pub(crate) use compressor::testing;
pub use codec::{ImageCodec, JpegCodec};
pub use compressor::{compress, Compressor};
pub use quality::{is_floor, max_attempts, quality_at, QUALITY_FLOOR, QUALITY_STEP};
pub use types::{
    CompressError, CompressionOptions, CompressionResult, OptionsError, DEFAULT_INITIAL_QUALITY,
    DEFAULT_MAX_DIMENSION, DEFAULT_MAX_SIZE_BYTES,
};
