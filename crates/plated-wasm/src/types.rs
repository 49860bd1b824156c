//! WASM-compatible wrapper types for compression output.
//!
//! These wrap the core result types and expose them to JavaScript through
//! getters, handling the conversion between Rust and JS representations.

use plated_core::compress::{CompressError, CompressionResult};
use plated_core::GuardedPayload;
use wasm_bindgen::prelude::*;

/// A compressed upload, ready to persist or send.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes` copies them out to a
/// `Uint8Array`; read it once and keep the JS copy.
#[wasm_bindgen]
pub struct JsCompressionResult {
    inner: CompressionResult,
}

#[wasm_bindgen]
impl JsCompressionResult {
    /// Encoded bytes as a Uint8Array (copied).
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// MIME type of the encoded bytes (always `image/jpeg`).
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.mime_type.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Quality the returned encoding was produced at, in (0, 1].
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> f32 {
        self.inner.quality
    }

    /// Number of encode attempts the search made.
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> u32 {
        self.inner.attempts
    }

    /// True when the lowest quality was still over budget.
    #[wasm_bindgen(getter)]
    pub fn floor_reached(&self) -> bool {
        self.inner.floor_reached
    }

    /// Encoded size in bytes, without copying.
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// Whether the encoding fits `max_size_bytes`.
    pub fn fits(&self, max_size_bytes: usize) -> bool {
        self.inner.fits(max_size_bytes)
    }

    /// Render as a `data:image/jpeg;base64,...` URL for inline storage.
    pub fn to_data_url(&self) -> String {
        self.inner.to_data_url()
    }
}

impl From<CompressionResult> for JsCompressionResult {
    fn from(inner: CompressionResult) -> Self {
        Self { inner }
    }
}

/// Result of the size guard: either the original upload or a compressed copy.
#[wasm_bindgen]
pub struct JsGuardedUpload {
    bytes: Vec<u8>,
    mime_type: Option<String>,
    compressed: bool,
}

#[wasm_bindgen]
impl JsGuardedUpload {
    /// Bytes to persist (copied).
    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// MIME type of `bytes`: the output format when compressed, otherwise the
    /// declared or sniffed type of the original, if known.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> Option<String> {
        self.mime_type.clone()
    }

    /// Whether the upload was recompressed.
    #[wasm_bindgen(getter)]
    pub fn compressed(&self) -> bool {
        self.compressed
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }
}

impl JsGuardedUpload {
    /// Build from the core payload; `original_mime` describes the input.
    pub(crate) fn from_payload(payload: GuardedPayload<'_>, original_mime: Option<&str>) -> Self {
        match payload {
            GuardedPayload::Unchanged(bytes) => Self {
                bytes: bytes.to_vec(),
                mime_type: original_mime.map(str::to_string),
                compressed: false,
            },
            GuardedPayload::Compressed(result) => Self {
                mime_type: Some(result.mime_type.to_string()),
                bytes: result.bytes,
                compressed: true,
            },
        }
    }
}

/// Convert a core error to a JS `Error` whose `name` is the error kind.
///
/// JS callers branch on `err.name` (`DecodeError`, `EncodeError`,
/// `InvalidOptions`) to decide what to tell the user.
pub(crate) fn to_js_error(err: &CompressError) -> JsValue {
    js_error(err.kind(), &err.to_string())
}

pub(crate) fn js_error(name: &str, message: &str) -> JsValue {
    let error = js_sys::Error::new(message);
    error.set_name(name);
    error.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(floor_reached: bool) -> CompressionResult {
        CompressionResult {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            mime_type: "image/jpeg",
            width: 1920,
            height: 1440,
            quality: 0.8,
            attempts: 1,
            floor_reached,
        }
    }

    #[test]
    fn test_compression_result_getters() {
        let result = JsCompressionResult::from(sample_result(false));

        assert_eq!(result.bytes(), vec![0xFF, 0xD8, 0xFF, 0xD9]);
        assert_eq!(result.mime_type(), "image/jpeg");
        assert_eq!((result.width(), result.height()), (1920, 1440));
        assert_eq!(result.attempts(), 1);
        assert_eq!(result.byte_length(), 4);
        assert!(!result.floor_reached());
        assert!(result.fits(4));
        assert!(!result.fits(3));
    }

    #[test]
    fn test_compression_result_data_url() {
        let result = JsCompressionResult::from(sample_result(true));
        assert_eq!(result.to_data_url(), "data:image/jpeg;base64,/9j/2Q==");
        assert!(result.floor_reached());
    }

    #[test]
    fn test_guarded_upload_unchanged() {
        let data = [1u8, 2, 3];
        let upload =
            JsGuardedUpload::from_payload(GuardedPayload::Unchanged(&data), Some("video/mp4"));

        assert_eq!(upload.bytes(), vec![1, 2, 3]);
        assert_eq!(upload.mime_type().as_deref(), Some("video/mp4"));
        assert!(!upload.compressed());
        assert_eq!(upload.byte_length(), 3);
    }

    #[test]
    fn test_guarded_upload_compressed() {
        let upload = JsGuardedUpload::from_payload(
            GuardedPayload::Compressed(sample_result(false)),
            Some("image/png"),
        );

        assert_eq!(upload.mime_type().as_deref(), Some("image/jpeg"));
        assert!(upload.compressed());
        assert_eq!(upload.byte_length(), 4);
    }
}
