//! Lossy encoding for compressed uploads.
//!
//! The compressor always emits JPEG, regardless of the uploaded format.
//! All operations are synchronous and allocate only the output buffer.
//!
//! # Examples
//!
//! ```ignore
//! use plated_core::decode::DecodedImage;
//! use plated_core::encode::encode_jpeg;
//!
//! let image = DecodedImage::new(100, 100, vec![128u8; 100 * 100 * 3]);
//! let jpeg_bytes = encode_jpeg(&image, 0.8).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, encode_jpeg_raw, jpeg_quality, EncodeError, JPEG_MIME};
