//! The decode/encode capability the compressor is built on.

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::{encode_jpeg, EncodeError, JPEG_MIME};

/// A decode/encode pair the compressor drives.
///
/// Implementations must be stateless from the compressor's point of view:
/// the same `Compressor` is shared across concurrent uploads.
pub trait ImageCodec: Send + Sync {
    /// Decode uploaded bytes into RGB pixels.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;

    /// Encode pixels at `quality` in (0, 1].
    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError>;

    /// MIME type of everything `encode` produces.
    fn mime_type(&self) -> &'static str;
}

/// Default codec: any supported raster format in, baseline JPEG out.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl ImageCodec for JpegCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        decode_image(bytes)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        encode_jpeg(image, quality)
    }

    fn mime_type(&self) -> &'static str {
        JPEG_MIME
    }
}

impl<C: ImageCodec + ?Sized> ImageCodec for &C {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, quality)
    }

    fn mime_type(&self) -> &'static str {
        (**self).mime_type()
    }
}

impl<C: ImageCodec + ?Sized> ImageCodec for Box<C> {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        (**self).decode(bytes)
    }

    fn encode(&self, image: &DecodedImage, quality: f32) -> Result<Vec<u8>, EncodeError> {
        (**self).encode(image, quality)
    }

    fn mime_type(&self) -> &'static str {
        (**self).mime_type()
    }
}
