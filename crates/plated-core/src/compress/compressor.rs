//! Decode, fit to the dimension budget, then walk quality down until the
//! encoding fits the byte budget.

use tracing::{debug, warn};

use super::codec::{ImageCodec, JpegCodec};
use super::quality::{is_floor, quality_at};
use super::types::{CompressError, CompressionOptions, CompressionResult};
use crate::decode::{resize_to_fit, DecodedImage};

/// Adaptive compressor over an [`ImageCodec`].
///
/// Holds no per-call state, so one instance can serve concurrent uploads.
#[derive(Debug, Clone, Default)]
pub struct Compressor<C = JpegCodec> {
    codec: C,
}

impl Compressor<JpegCodec> {
    /// Compressor producing JPEG through the `image` crate.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: ImageCodec> Compressor<C> {
    /// Compressor driving a custom codec.
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Compress uploaded bytes to fit `options`.
    ///
    /// The image is decoded, downscaled once if its longest edge exceeds
    /// `options.max_dimension`, then encoded at `options.initial_quality`,
    /// dropping by 0.1 per attempt until the output fits
    /// `options.max_size_bytes` or the quality floor is reached.
    ///
    /// Reaching the floor while still over budget is not an error: the last
    /// encoding is returned with `floor_reached` set.
    ///
    /// # Errors
    ///
    /// * `CompressError::InvalidOptions` before any work is done
    /// * `CompressError::Decode` if the bytes are not a supported image
    /// * `CompressError::Encode` on the first encoder failure; failed attempts are not retried
    pub fn compress(
        &self,
        input: &[u8],
        options: &CompressionOptions,
    ) -> Result<CompressionResult, CompressError> {
        options.validate()?;

        let decoded = self.codec.decode(input)?;
        debug!(
            input_bytes = input.len(),
            width = decoded.width,
            height = decoded.height,
            "decoded upload"
        );

        self.compress_decoded(&decoded, options)
    }

    /// Compress an already-decoded image to fit `options`.
    ///
    /// Same as [`Compressor::compress`] minus the decode step.
    pub fn compress_decoded(
        &self,
        image: &DecodedImage,
        options: &CompressionOptions,
    ) -> Result<CompressionResult, CompressError> {
        options.validate()?;

        let fitted = resize_to_fit(image, options.max_dimension, options.filter)?;
        if fitted.width != image.width || fitted.height != image.height {
            debug!(
                from_width = image.width,
                from_height = image.height,
                to_width = fitted.width,
                to_height = fitted.height,
                "downscaled to dimension budget"
            );
        }

        self.search(&fitted, options)
    }

    fn search(
        &self,
        image: &DecodedImage,
        options: &CompressionOptions,
    ) -> Result<CompressionResult, CompressError> {
        let budget = options.max_size_bytes;
        let mut attempt = 0;

        loop {
            let quality = quality_at(options.initial_quality, attempt);
            let bytes = self.codec.encode(image, quality)?;
            attempt += 1;

            let fits = bytes.len() <= budget;
            debug!(attempt, quality, size = bytes.len(), budget, fits, "encode attempt");

            if fits || is_floor(quality) {
                if !fits {
                    warn!(
                        size = bytes.len(),
                        budget,
                        attempts = attempt,
                        "quality floor reached, result still over budget"
                    );
                }

                return Ok(CompressionResult {
                    bytes,
                    mime_type: self.codec.mime_type(),
                    width: image.width,
                    height: image.height,
                    quality,
                    attempts: attempt,
                    floor_reached: !fits,
                });
            }
        }
    }
}

/// Compress uploaded bytes with the default JPEG codec.
///
/// See [`Compressor::compress`].
pub fn compress(
    input: &[u8],
    options: &CompressionOptions,
) -> Result<CompressionResult, CompressError> {
    Compressor::new().compress(input, options)
}



#[cfg(test)]
mod proptests {
    use super::testing::*;
    use super::*;
    use crate::compress::max_attempts;
    use proptest::prelude::*;

    proptest! {
        /// Property: attempts stay within ceil((q0 - 0.1) / 0.1) + 1 even when nothing fits.
        #[test]
        fn prop_attempts_bounded(initial in 0.001f32..=1.0) {
            let codec = ScriptedCodec::new(4, 4, |_| 10_000);
            let compressor = Compressor::with_codec(&codec);
            let options = CompressionOptions {
                max_size_bytes: 1,
                initial_quality: initial,
                ..CompressionOptions::new()
            };

            let result = compressor.compress(b"x", &options).unwrap();
            let bound = ((initial as f64 - 0.1) / 0.1).ceil().max(0.0) as u32 + 1;

            prop_assert!(result.attempts <= bound);
            prop_assert_eq!(result.attempts, max_attempts(initial));
            prop_assert!(result.floor_reached);
        }

        /// Property: the first fitting quality is returned, never a lower one.
        #[test]
        fn prop_first_fit_wins(budget in 1usize..=1200, initial in 0.2f32..=1.0) {
            let codec = ScriptedCodec::new(4, 4, per_mille);
            let compressor = Compressor::with_codec(&codec);
            let options = CompressionOptions {
                max_size_bytes: budget,
                initial_quality: initial,
                ..CompressionOptions::new()
            };

            let result = compressor.compress(b"x", &options).unwrap();
            let tried = codec.qualities.lock().unwrap().clone();

            prop_assert_eq!(tried.len() as u32, result.attempts);
            for earlier in &tried[..tried.len() - 1] {
                prop_assert!(per_mille(*earlier) > budget);
            }
            prop_assert!(result.fits(budget) || result.floor_reached);
            prop_assert_eq!(result.fits(budget), !result.floor_reached);
        }

        /// Property: images within the dimension budget keep their dimensions.
        #[test]
        fn prop_no_unnecessary_downscale(
            width in 1u32..=64,
            height in 1u32..=64,
            max_dimension in 64u32..=4096,
        ) {
            let codec = ScriptedCodec::new(width, height, |_| 1);
            let compressor = Compressor::with_codec(&codec);
            let options = CompressionOptions { max_dimension, ..CompressionOptions::new() };

            let result = compressor.compress(b"x", &options).unwrap();
            prop_assert_eq!((result.width, result.height), (width, height));
        }
    }
}
