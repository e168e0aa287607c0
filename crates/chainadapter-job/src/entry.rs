//! Serverless entry points.
//!
//! Each wrapper only translates a platform request/response shape to and
//! from [`Adapter::create_request`].

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapter::Adapter;
use crate::error::AdapterError;
use crate::job::{JobResult, JobRunId};

/// Cloud-function HTTP handler: the request body is the job request.
pub async fn gcp_service(State(adapter): State<Arc<Adapter>>, body: Bytes) -> Response {
    let (status, result) = match serde_json::from_slice::<Value>(&body) {
        Ok(input) => adapter.create_request(input).await,
        Err(e) => invalid_body(format!("request body is not valid JSON: {e}")),
    };
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(result)).into_response()
}

/// Router serving [`gcp_service`] at `/`.
pub fn router(adapter: Arc<Adapter>) -> Router {
    Router::new()
        .route("/", post(gcp_service))
        .with_state(adapter)
}

/// Classic lambda-style handler: the event is the job request and the
/// envelope is returned as-is.
pub async fn handler(adapter: &Adapter, event: Value) -> JobResult {
    let (_, result) = adapter.create_request(event).await;
    result
}

/// HTTP-API lambda event. Only the body is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpApiEvent {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
}

/// HTTP-API lambda response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpApiResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    /// JSON-encoded [`JobResult`].
    pub body: String,
    #[serde(rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
}

/// HTTP-API lambda handler: parses the string body into a job request and
/// wraps the envelope in `{statusCode, body, isBase64Encoded}`.
pub async fn handler_v2(adapter: &Adapter, event: HttpApiEvent) -> HttpApiResponse {
    let (status, result) = match parse_event_body(&event) {
        Ok(input) => adapter.create_request(input).await,
        Err(reason) => invalid_body(reason),
    };
    HttpApiResponse {
        status_code: status,
        body: serde_json::to_string(&result).unwrap_or_default(),
        is_base64_encoded: false,
    }
}

fn parse_event_body(event: &HttpApiEvent) -> Result<Value, String> {
    let raw = event.body.as_deref().ok_or("event has no body")?;
    if event.is_base64_encoded {
        let bytes = STANDARD
            .decode(raw)
            .map_err(|e| format!("event body is not base64: {e}"))?;
        serde_json::from_slice(&bytes).map_err(|e| format!("event body is not valid JSON: {e}"))
    } else {
        serde_json::from_str(raw).map_err(|e| format!("event body is not valid JSON: {e}"))
    }
}

fn invalid_body(reason: String) -> (u16, JobResult) {
    tracing::warn!(%reason, "rejecting request");
    let err = AdapterError::Validation { reason };
    (500, JobResult::errored(JobRunId::default(), &err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_body_parsing() {
        let plain = HttpApiEvent { body: Some(r#"{"id":"1"}"#.into()), is_base64_encoded: false };
        assert_eq!(parse_event_body(&plain).unwrap()["id"], "1");

        let encoded = HttpApiEvent {
            body: Some(STANDARD.encode(r#"{"id":"2"}"#)),
            is_base64_encoded: true,
        };
        assert_eq!(parse_event_body(&encoded).unwrap()["id"], "2");

        assert!(parse_event_body(&HttpApiEvent::default()).is_err());
        let broken = HttpApiEvent { body: Some("{".into()), is_base64_encoded: false };
        assert!(parse_event_body(&broken).unwrap_err().contains("not valid JSON"));
    }

    #[test]
    fn api_event_deserializes_from_lambda_shape() {
        let event: HttpApiEvent = serde_json::from_str(
            r#"{"version":"2.0","routeKey":"POST /","body":"{}","isBase64Encoded":false}"#,
        )
        .unwrap();
        assert_eq!(event.body.as_deref(), Some("{}"));
    }
}
