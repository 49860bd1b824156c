//! Media helper WASM bindings.
//!
//! Small utilities the upload form uses around compression: deciding whether
//! a file is a compressible image and producing the inline `data:` form the
//! backend stores.

use plated_core::media;
use wasm_bindgen::prelude::*;

/// Identify an upload's type from its leading bytes.
///
/// Returns `undefined` for unrecognised content.
#[wasm_bindgen]
pub fn sniff_mime(bytes: &[u8]) -> Option<String> {
    media::sniff_mime(bytes).map(str::to_string)
}

/// Whether a MIME type names a raster image the compressor can handle.
///
/// SVG is excluded.
#[wasm_bindgen]
pub fn is_raster_mime(mime: &str) -> bool {
    media::is_raster_mime(mime)
}

/// Encode bytes as a `data:<mime>;base64,...` URL.
#[wasm_bindgen]
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    media::to_data_url(bytes, mime)
}
