//! # chainadapter-job
//!
//! Job-run adapter: turns an oracle job request into one constant contract
//! call and returns the decoded `uint256` in a job-result envelope.
//!
//! One invocation contract, [`Adapter::create_request`], is shared by every
//! front-end:
//! - [`entry::gcp_service`] / [`entry::router`] — cloud-function HTTP handler (axum)
//! - [`entry::handler`] — classic lambda-style handler
//! - [`entry::handler_v2`] — HTTP-API lambda handler with a JSON string body

pub mod adapter;
pub mod config;
pub mod entry;
pub mod error;
pub mod job;
pub mod tracing_setup;

pub use adapter::{Adapter, RESULT_TYPE, USER_TYPE};
pub use config::{AdapterConfig, RetrySettings};
pub use entry::{handler, handler_v2, router, HttpApiEvent, HttpApiResponse};
pub use error::{AdapterError, ConfigError};
pub use job::{validate, ErrorDetail, JobErrored, JobResult, JobRunId, JobSuccess, ValidatedJob};
pub use tracing_setup::{init_tracing, LogConfig};
