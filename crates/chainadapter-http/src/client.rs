//! HTTP transport backed by `reqwest`.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::TransportError;
use crate::request::{ConstantCallRequest, HttpResponse};
use crate::transport::CallTransport;

/// Configuration for `HttpCallTransport`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("chainadapter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// POSTs contract-call bodies to a fixed endpoint, one attempt per `send`.
pub struct HttpCallTransport {
    url: String,
    http: reqwest::Client,
    request_timeout: Duration,
}

impl HttpCallTransport {
    /// Create a transport for the given endpoint URL.
    pub fn new(url: impl Into<String>, config: HttpClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            http,
            request_timeout: config.request_timeout,
        })
    }

    /// Create with default configuration.
    pub fn default_for(url: impl Into<String>) -> Result<Self, TransportError> {
        Self::new(url, HttpClientConfig::default())
    }

    fn map_reqwest(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                ms: self.request_timeout.as_millis() as u64,
            }
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl CallTransport for HttpCallTransport {
    async fn send(&self, req: &ConstantCallRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(url = %self.url, parameter = %req.parameter, "POST contract call");

        let resp = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_reqwest(e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data = serde_json::from_str(&body)?;
        Ok(HttpResponse::new(status.as_u16(), data))
    }

    fn url(&self) -> &str {
        &self.url
    }
}
