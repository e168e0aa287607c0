//! chainadapter-http — HTTP plumbing for TRON constant contract calls.
//!
//! # Overview
//!
//! - [`CallTransport`] — the async trait every transport implements (one attempt)
//! - [`HttpCallTransport`] — `reqwest`-backed transport
//! - [`ConstantCallRequest`] / [`HttpResponse`] — wire types
//! - [`Requester`] — retry loop with a custom-error predicate
//! - [`policy`] module — wait schedule between retries
//! - [`TransportError`] — structured error type

pub mod client;
pub mod error;
pub mod policy;
pub mod request;
pub mod requester;
pub mod transport;

pub use client::{HttpCallTransport, HttpClientConfig};
pub use error::TransportError;
pub use policy::{Backoff, RetryConfig};
pub use request::{result_at, ConstantCallRequest, HttpResponse, PathSegment};
pub use requester::{response_error, CustomError, Requester};
pub use transport::CallTransport;
