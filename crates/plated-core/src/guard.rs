//! Size guard in front of the compressor.
//!
//! Uploads already under budget, and anything that isn't a raster image
//! (video reels, documents), are handed back untouched. Only oversized
//! images go through [`Compressor::compress`]. Rejecting oversized
//! non-image payloads is left to the caller.

use tracing::debug;

use crate::compress::{
    CompressError, CompressionOptions, CompressionResult, Compressor, ImageCodec,
};
use crate::media::{is_raster_mime, resolve_mime};

/// What the guard hands back for an upload.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardedPayload<'a> {
    /// The input, unchanged: within budget or not a raster image.
    Unchanged(&'a [u8]),
    /// The input was an oversized image and has been recompressed.
    Compressed(CompressionResult),
}

impl GuardedPayload<'_> {
    /// Bytes to persist.
    pub fn bytes(&self) -> &[u8] {
        match self {
            GuardedPayload::Unchanged(bytes) => bytes,
            GuardedPayload::Compressed(result) => &result.bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }

    pub fn was_compressed(&self) -> bool {
        matches!(self, GuardedPayload::Compressed(_))
    }

    /// Take ownership of the bytes, copying only the unchanged case.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            GuardedPayload::Unchanged(bytes) => bytes.to_vec(),
            GuardedPayload::Compressed(result) => result.bytes,
        }
    }
}

impl<C: ImageCodec> Compressor<C> {
    /// Compress `input` only if it is an image over `options.max_size_bytes`.
    ///
    /// `mime_hint` is the type the client declared. When it is missing or
    /// generic the payload is sniffed instead.
    pub fn ensure_within_budget<'a>(
        &self,
        input: &'a [u8],
        mime_hint: Option<&str>,
        options: &CompressionOptions,
    ) -> Result<GuardedPayload<'a>, CompressError> {
        if input.len() <= options.max_size_bytes {
            return Ok(GuardedPayload::Unchanged(input));
        }

        match resolve_mime(input, mime_hint) {
            Some(mime) if is_raster_mime(mime) => {
                debug!(
                    size = input.len(),
                    budget = options.max_size_bytes,
                    mime,
                    "oversized image, compressing"
                );
                self.compress(input, options).map(GuardedPayload::Compressed)
            }
            other => {
                debug!(
                    size = input.len(),
                    budget = options.max_size_bytes,
                    mime = other.unwrap_or("unknown"),
                    "oversized non-image payload passed through"
                );
                Ok(GuardedPayload::Unchanged(input))
            }
        }
    }
}

/// Keep an upload within `max_size_bytes`, compressing it only when it is an
/// oversized raster image. Other options take their defaults.
pub fn ensure_within_budget<'a>(
    input: &'a [u8],
    mime_hint: Option<&str>,
    max_size_bytes: usize,
) -> Result<GuardedPayload<'a>, CompressError> {
    ensure_within_budget_with(
        input,
        mime_hint,
        &CompressionOptions::with_max_size_bytes(max_size_bytes),
    )
}

/// [`ensure_within_budget`] with full control over the compression options.
pub fn ensure_within_budget_with<'a>(
    input: &'a [u8],
    mime_hint: Option<&str>,
    options: &CompressionOptions,
) -> Result<GuardedPayload<'a>, CompressError> {
    Compressor::new().ensure_within_budget(input, mime_hint, options)
}
