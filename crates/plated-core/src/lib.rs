//! Plated Core - upload media compression
//!
//! This crate keeps user-uploaded photos (recipe shots, avatars, highlight
//! covers) under the platform's size ceiling, including decoding, fitting to
//! a dimension budget, and a bounded quality search on the encoder.
//!
//! # Module Structure
//!
//! - `decode` - Raster decoding with EXIF orientation, resize-to-fit
//! - `encode` - JPEG encoding at a (0, 1] quality
//! - `compress` - The adaptive compressor and its options
//! - `guard` - Skip compression for small or non-image uploads
//! - `media` - MIME sniffing and data-URL helpers

pub mod compress;
pub mod decode;
pub mod encode;
pub mod guard;
pub mod media;

pub use compress::{
    compress, CompressError, CompressionOptions, CompressionResult, Compressor, ImageCodec,
    JpegCodec, OptionsError,
};
pub use decode::{DecodeError, DecodedImage, FilterType};
pub use encode::EncodeError;
pub use guard::{ensure_within_budget, ensure_within_budget_with, GuardedPayload};
pub use media::{is_raster_mime, sniff_mime, to_data_url};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::fixtures::{encode_as, gradient};
    use image::ImageFormat;

    #[test]
    fn test_upload_to_data_url() {
        let upload = encode_as(&gradient(48, 32), ImageFormat::Png);

        let result = compress(&upload, &CompressionOptions::new()).unwrap();
        let url = result.to_data_url();

        assert!(url.starts_with("data:image/jpeg;base64,/9j/"));
    }

    #[test]
    fn test_guard_then_compress_agree_on_dimensions() {
        let upload = encode_as(&gradient(300, 200), ImageFormat::Bmp);
        let options = CompressionOptions {
            max_size_bytes: 32 * 1024,
            max_dimension: 150,
            ..CompressionOptions::new()
        };

        let guarded = ensure_within_budget_with(&upload, Some("image/bmp"), &options).unwrap();
        let direct = compress(&upload, &options).unwrap();

        assert_eq!(guarded, GuardedPayload::Compressed(direct.clone()));
        assert_eq!((direct.width, direct.height), (150, 100));
    }
}
