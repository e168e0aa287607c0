//! Reliability policies applied around a [`CallTransport`](crate::CallTransport).
//!
//! ```text
//! Request → [Requester + RetryConfig] → [CallTransport]
//! ```

pub mod retry;

pub use retry::{Backoff, RetryConfig};
