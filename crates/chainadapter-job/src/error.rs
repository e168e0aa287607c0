//! Error types for the job adapter.

use std::path::PathBuf;

use chainadapter_codec::CodecError;
use chainadapter_http::TransportError;
use thiserror::Error;

/// Errors that fail a job run. Every variant surfaces as status 500.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    #[error("Invalid user address: {reason}")]
    InvalidUser { reason: String },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The upstream result could not be decoded.
    #[error("Cannot decode result: {0}")]
    ResultDecode(#[source] CodecError),

    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("No result at '{path}' in upstream response")]
    MissingResult { path: String },
}

impl AdapterError {
    /// Error name reported in the errored job envelope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation { .. } | Self::InvalidUser { .. } => "ValidationError",
            Self::Codec(e) | Self::ResultDecode(e) if e.is_validation() => "ValidationError",
            Self::Codec(_) => "EncodingError",
            Self::Transport(_) => "RequestError",
            Self::ResultDecode(_) | Self::MissingResult { .. } => "ResultError",
        }
    }
}

/// Errors while loading [`AdapterConfig`](crate::AdapterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },
}
