//! Options, results and errors for adaptive compression.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodeError, FilterType};
use crate::encode::EncodeError;
use crate::media;

/// Default byte budget: 4 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: usize = 4 * 1024 * 1024;
/// Default longest-edge budget in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1920;
/// Default starting quality for the search.
pub const DEFAULT_INITIAL_QUALITY: f32 = 0.8;

/// Parameters for one compression call.
///
/// Field names serialize in camelCase so a browser options object such as
/// `{ maxSizeBytes: 1048576 }` deserializes directly; omitted fields take
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressionOptions {
    /// Maximum encoded size in bytes (> 0).
    pub max_size_bytes: usize,
    /// Maximum width or height in pixels (> 0).
    pub max_dimension: u32,
    /// Quality of the first encode attempt, in (0, 1].
    pub initial_quality: f32,
    /// Interpolation used when downscaling.
    pub filter: FilterType,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_dimension: DEFAULT_MAX_DIMENSION,
            initial_quality: DEFAULT_INITIAL_QUALITY,
            filter: FilterType::default(),
        }
    }
}

impl CompressionOptions {
    /// Create options with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options with a different byte budget.
    pub fn with_max_size_bytes(max_size_bytes: usize) -> Self {
        Self {
            max_size_bytes,
            ..Self::default()
        }
    }

    /// Check the constraints every compression call relies on.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.max_size_bytes == 0 {
            return Err(OptionsError::ZeroMaxSize);
        }
        if self.max_dimension == 0 {
            return Err(OptionsError::ZeroMaxDimension);
        }
        // Written so NaN fails too.
        if !(self.initial_quality > 0.0 && self.initial_quality <= 1.0) {
            return Err(OptionsError::QualityOutOfRange(self.initial_quality));
        }
        Ok(())
    }
}

/// Rejected compression options.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("maxSizeBytes must be greater than zero")]
    ZeroMaxSize,

    #[error("maxDimension must be greater than zero")]
    ZeroMaxDimension,

    #[error("initialQuality must be in (0, 1], got {0}")]
    QualityOutOfRange(f32),
}

/// Any failure of a compression call.
///
/// Running out of quality steps is not an error; see
/// [`CompressionResult::floor_reached`].
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("Invalid compression options: {0}")]
    InvalidOptions(#[from] OptionsError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CompressError {
    /// Short, stable name of the error kind, suitable for JS `Error.name`.
    pub fn kind(&self) -> &'static str {
        match self {
            CompressError::InvalidOptions(_) => "InvalidOptions",
            CompressError::Decode(_) => "DecodeError",
            CompressError::Encode(_) => "EncodeError",
        }
    }
}

/// Output of a successful compression call. Owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionResult {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`; always the codec's lossy format.
    pub mime_type: &'static str,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Quality the returned encoding was produced at.
    pub quality: f32,
    /// Number of encode attempts the search performed.
    pub attempts: u32,
    /// True when the search stopped at the quality floor with `bytes` still
    /// over budget.
    pub floor_reached: bool,
}

impl CompressionResult {
    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the encoding fits `max_size_bytes`.
    pub fn fits(&self, max_size_bytes: usize) -> bool {
        self.bytes.len() <= max_size_bytes
    }

    /// Render as a `data:` URL for inline storage.
    pub fn to_data_url(&self) -> String {
        media::to_data_url(&self.bytes, self.mime_type)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
