//! Transport-level error types.

use thiserror::Error;

/// Errors that can occur while calling the contract-call endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response arrived (connection refused, DNS, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The endpoint answered 2xx but the body flags an error.
    #[error("Upstream reported an error: {body}")]
    Upstream { body: String },

    /// Response could not be deserialized.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if this error is retryable (transient).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Status { .. } | Self::Timeout { .. } | Self::Upstream { .. }
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
