//! Upload compression WASM bindings.
//!
//! Exposes the core compressor and size guard to the browser upload flow.
//!
//! # Functions
//!
//! - [`compress_image`] - Compress an image to fit size and dimension budgets
//! - [`ensure_within_budget`] - Compress only when an image upload is too large
//!
//! # Example
//!
//! ```typescript
//! import { compress_image, ensure_within_budget } from '@plated/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//!
//! // Full control over the budget
//! const result = compress_image(bytes, { maxSizeBytes: 1024 * 1024, maxDimension: 1080 });
//! if (result.floor_reached) {
//!   showError('Photo is too detailed to upload');
//! }
//!
//! // Or just make sure the upload is under the ceiling
//! const upload = ensure_within_budget(bytes, file.type, 4 * 1024 * 1024);
//! form.append('media', new Blob([upload.bytes], { type: upload.mime_type }));
//! ```

use plated_core::compress::{CompressionOptions, CompressionResult, Compressor};
use plated_core::media::resolve_mime;
use wasm_bindgen::prelude::*;

use crate::types::{js_error, to_js_error, JsCompressionResult, JsGuardedUpload};

/// Compress an uploaded image to fit a byte and dimension budget.
///
/// # Arguments
///
/// * `bytes` - The uploaded file bytes (JPEG, PNG, GIF, WebP or BMP)
/// * `options` - Optional plain object:
///   `{ maxSizeBytes?: number, maxDimension?: number, initialQuality?: number,
///   filter?: 'nearest' | 'bilinear' | 'lanczos3' }`. Omitted fields default to
///   4 MiB, 1920 px, 0.8 and bilinear.
///
/// # Errors
///
/// Throws an `Error` whose `name` is:
/// - `InvalidOptions` if the options object is malformed or out of range
/// - `DecodeError` if the bytes are not a supported image
/// - `EncodeError` if JPEG encoding fails
///
/// Not being able to reach the budget is not an error; check `floor_reached`.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], options: JsValue) -> Result<JsCompressionResult, JsValue> {
    let options = parse_options(options)?;

    Compressor::new()
        .compress(bytes, &options)
        .map(|result| {
            report_floor(&result, &options);
            JsCompressionResult::from(result)
        })
        .map_err(|e| to_js_error(&e))
}

/// Return the upload unchanged unless it is an image over `max_size_bytes`,
/// in which case it is compressed to fit.
///
/// # Arguments
///
/// * `bytes` - The uploaded file bytes
/// * `mime_hint` - The type the browser reported (`File.type`); sniffed from
///   the bytes when empty or missing
/// * `max_size_bytes` - The byte budget
///
/// Oversized videos and other non-image payloads pass through untouched;
/// rejecting them is up to the caller.
#[wasm_bindgen]
pub fn ensure_within_budget(
    bytes: &[u8],
    mime_hint: Option<String>,
    max_size_bytes: usize,
) -> Result<JsGuardedUpload, JsValue> {
    let options = CompressionOptions::with_max_size_bytes(max_size_bytes);
    let hint = mime_hint.as_deref();

    let payload = Compressor::new()
        .ensure_within_budget(bytes, hint, &options)
        .map_err(|e| to_js_error(&e))?;

    if let plated_core::GuardedPayload::Compressed(result) = &payload {
        report_floor(result, &options);
    }

    Ok(JsGuardedUpload::from_payload(payload, resolve_mime(bytes, hint)))
}

fn parse_options(options: JsValue) -> Result<CompressionOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CompressionOptions::default());
    }

    serde_wasm_bindgen::from_value(options)
        .map_err(|e| js_error("InvalidOptions", &format!("Invalid compression options: {}", e)))
}

/// Surface an over-budget result in the browser console.
fn report_floor(result: &CompressionResult, options: &CompressionOptions) {
    if !result.floor_reached {
        return;
    }

    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&floor_message(result, options)));

    #[cfg(not(target_arch = "wasm32"))]
    let _ = options;
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn floor_message(result: &CompressionResult, options: &CompressionOptions) -> String {
    format!(
        "plated: image still {} bytes at quality {:.1} after {} attempts (budget {} bytes)",
        result.len(),
        result.quality,
        result.attempts,
        options.max_size_bytes
    )
}


/// WASM-specific tests that require JsValue.
///
/// Run with `wasm-pack test`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn bmp_fixture(width: u32, height: u32) -> Vec<u8> {
        // 24-bit bottom-up BMP, rows padded to 4 bytes
        let row = ((width * 3 + 3) / 4 * 4) as usize;
        let data_len = row * height as usize;
        let file_len = 54 + data_len;

        let mut out = Vec::with_capacity(file_len);
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&(file_len as u32).to_le_bytes());
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&(width as i32).to_le_bytes());
        out.extend_from_slice(&(height as i32).to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&[0u8; 24]);
        for y in 0..height {
            for x in 0..width {
                out.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128]);
            }
            out.resize(out.len() + row - width as usize * 3, 0);
        }
        out
    }

    #[wasm_bindgen_test]
    fn test_compress_image_defaults() {
        let result = compress_image(&bmp_fixture(64, 48), JsValue::UNDEFINED).unwrap();

        assert_eq!(result.mime_type(), "image/jpeg");
        assert_eq!((result.width(), result.height()), (64, 48));
        assert_eq!(result.attempts(), 1);
    }

    #[wasm_bindgen_test]
    fn test_compress_image_with_options_object() {
        let options = serde_wasm_bindgen::to_value(&CompressionOptions {
            max_dimension: 32,
            ..CompressionOptions::new()
        })
        .unwrap();

        let result = compress_image(&bmp_fixture(64, 48), options).unwrap();
        assert_eq!((result.width(), result.height()), (32, 24));
    }

    #[wasm_bindgen_test]
    fn test_compress_image_rejects_bad_options() {
        let options = serde_wasm_bindgen::to_value(&CompressionOptions {
            initial_quality: 1.5,
            ..CompressionOptions::new()
        })
        .unwrap();

        assert!(compress_image(&bmp_fixture(8, 8), options).is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_image_decode_error() {
        let err = compress_image(b"not an image", JsValue::UNDEFINED).err().unwrap();
        let err: js_sys::Error = err.dyn_into().unwrap();
        assert_eq!(String::from(err.name()), "DecodeError");
    }

    #[wasm_bindgen_test]
    fn test_ensure_within_budget_passthrough() {
        let upload = ensure_within_budget(b"small", Some("image/png".into()), 1024).unwrap();
        assert!(!upload.compressed());
        assert_eq!(upload.bytes(), b"small".to_vec());
    }

    #[wasm_bindgen_test]
    fn test_ensure_within_budget_compresses_image() {
        let bmp = bmp_fixture(128, 128);
        let upload = ensure_within_budget(&bmp, None, 16 * 1024).unwrap();

        assert!(upload.compressed());
        assert_eq!(upload.mime_type().as_deref(), Some("image/jpeg"));
    }
}
