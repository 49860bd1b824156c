//! Plated WASM - WebAssembly bindings for Plated upload compression
//!
//! This crate exposes the plated-core compressor to the browser, where
//! uploads (recipe photos, avatars, highlight covers) are shrunk before they
//! are sent to the server.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrappers for compression results
//! - `compress` - Compressor and size-guard bindings
//! - `media` - MIME sniffing and data-URL helpers
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@plated/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, { maxSizeBytes: 4 * 1024 * 1024 });
//! console.log(`${result.width}x${result.height}, ${result.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod media;
mod types;

// Re-export public types
pub use compress::{compress_image, ensure_within_budget};
pub use media::{is_raster_mime, sniff_mime, to_data_url};
pub use types::{JsCompressionResult, JsGuardedUpload};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
