//! Retrying requester.
//!
//! Wraps a [`CallTransport`] with a [`RetryConfig`]. Besides transport
//! failures, a 2xx response can be declared failed by a custom-error
//! predicate over its body; such responses are retried like any other
//! transient error.

use std::sync::Arc;

use serde_json::Value;

use crate::error::TransportError;
use crate::policy::RetryConfig;
use crate::request::{ConstantCallRequest, HttpResponse};
use crate::transport::CallTransport;

/// Predicate over a response body: `true` means "treat as failed and retry".
pub type CustomError = fn(&Value) -> bool;

/// Default predicate: the body carries `"Response": "Error"`.
pub fn response_error(data: &Value) -> bool {
    data.get("Response").and_then(Value::as_str) == Some("Error")
}

/// Sends a request through a transport, retrying transient failures.
#[derive(Clone)]
pub struct Requester {
    transport: Arc<dyn CallTransport>,
    retry: RetryConfig,
    custom_error: CustomError,
}

impl Requester {
    pub fn new(transport: Arc<dyn CallTransport>, retry: RetryConfig) -> Self {
        Self {
            transport,
            retry,
            custom_error: response_error,
        }
    }

    /// Replace the custom-error predicate.
    pub fn with_custom_error(mut self, custom_error: CustomError) -> Self {
        self.custom_error = custom_error;
        self
    }

    async fn send_checked(&self, req: &ConstantCallRequest) -> Result<HttpResponse, TransportError> {
        let resp = self.transport.send(req).await?;
        if (self.custom_error)(&resp.data) {
            return Err(TransportError::Upstream {
                body: resp.data.to_string(),
            });
        }
        Ok(resp)
    }

    /// Send `req`, retrying retryable errors until the budget is spent.
    /// The error of the last attempt is returned.
    pub async fn request(&self, req: &ConstantCallRequest) -> Result<HttpResponse, TransportError> {
        let url = self.transport.url();
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.send_checked(req).await {
                Ok(resp) => return Ok(resp),
                Err(e) if e.is_retryable() => match self.retry.delay_before(attempt) {
                    Some(delay) => {
                        tracing::warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            url = %url,
                            "retrying request"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    None => {
                        tracing::error!(attempt, error = %e, url = %url, "max retries exceeded");
                        return Err(e);
                    }
                },
                Err(e) => return Err(e),
            }
        }
    }
}
