//! Error types for the parameter codec.

use thiserror::Error;

/// Errors that can occur while encoding or decoding ABI parameters.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The stripped hex payload is not a whole number of 32-byte slots.
    #[error("encoded string length must be a multiple of 64 (got {len})")]
    InvalidLength { len: usize },

    #[error("Invalid hex payload: {reason}")]
    InvalidHex { reason: String },

    #[error("Unknown ABI type '{ty}': {reason}")]
    UnknownType { ty: String, reason: String },

    #[error("Invalid value for type '{ty}': {reason}")]
    InvalidValue { ty: String, reason: String },

    #[error("ABI decode failed: {reason}")]
    AbiDecodeFailed { reason: String },
}

impl CodecError {
    /// Returns `true` for errors caused by a malformed payload rather than
    /// a malformed type list or input value.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidLength { .. } | Self::InvalidHex { .. })
    }
}
