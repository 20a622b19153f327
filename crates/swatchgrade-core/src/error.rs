//! Error taxonomy for invalid caller input.
//!
//! Internal numeric code never panics on caller-controlled input; malformed
//! hex strings and non-finite pixel values are rejected here, at the
//! boundary, and everything downstream can assume well-formed data.

use thiserror::Error;

/// Errors surfaced to callers of the scoring API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwatchError {
    /// A background hex string did not parse as `#RRGGBB`.
    #[error("invalid hex '{hex}': {reason}")]
    InvalidHex {
        /// The offending input string.
        hex: String,
        /// Human-readable reason (wrong length, non-hex digit, ...).
        reason: String,
    },

    /// A pixel channel or alpha value was NaN or infinite.
    #[error("non-finite value in field '{field}'")]
    NonFiniteInput {
        /// Name of the field that failed the finiteness check.
        field: &'static str,
    },

    /// A raw pixel buffer's length didn't match `width * height * 4`.
    #[error("pixel buffer length {actual} does not match width*height*4 ({expected})")]
    DimensionMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },
}
