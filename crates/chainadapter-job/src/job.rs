//! Job request validation and job-result envelopes.
//!
//! A job request looks like `{"id": "<run id>", "data": {"user": "<base64>"}}`.
//! `id` is optional and defaults to `"1"`; `data.user` must decode to the
//! caller's TRON hex address.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use chainadapter_http::HttpResponse;

use crate::error::AdapterError;

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const DEFAULT_JOB_RUN_ID: &str = "1";

/// Job run identifier — string or number, echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobRunId {
    Number(u64),
    String(String),
}

impl Default for JobRunId {
    fn default() -> Self {
        Self::String(DEFAULT_JOB_RUN_ID.into())
    }
}

impl JobRunId {
    /// Read `id` from a raw request, falling back to the default id.
    pub fn from_input(input: &Value) -> Self {
        match input.get("id") {
            Some(Value::String(s)) => Self::String(s.clone()),
            Some(Value::Number(n)) => match n.as_u64() {
                Some(n) => Self::Number(n),
                None => Self::String(n.to_string()),
            },
            _ => Self::default(),
        }
    }
}

impl fmt::Display for JobRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedJob {
    pub id: JobRunId,
    /// `data.user` as sent (base64).
    pub user: String,
}

impl ValidatedJob {
    /// Base64-decode `data.user` into the address string it carries.
    pub fn decode_user(&self) -> Result<String, AdapterError> {
        let bytes = LENIENT_BASE64
            .decode(self.user.trim())
            .map_err(|e| AdapterError::InvalidUser {
                reason: format!("data.user is not base64: {e}"),
            })?;
        String::from_utf8(bytes).map_err(|e| AdapterError::InvalidUser {
            reason: format!("data.user is not UTF-8: {e}"),
        })
    }
}

/// Validate a raw job request.
pub fn validate(input: &Value) -> Result<ValidatedJob, AdapterError> {
    let obj = input.as_object().ok_or_else(|| AdapterError::Validation {
        reason: "job request must be a JSON object".into(),
    })?;

    match obj.get("id") {
        None | Some(Value::Null | Value::String(_) | Value::Number(_)) => {}
        Some(other) => {
            return Err(AdapterError::Validation {
                reason: format!("id must be a string or number, got {other}"),
            })
        }
    }

    let user = obj
        .get("data")
        .and_then(|d| d.get("user"))
        .ok_or_else(|| AdapterError::Validation {
            reason: "missing required field data.user".into(),
        })?
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AdapterError::Validation {
            reason: "data.user must be a non-empty string".into(),
        })?;

    Ok(ValidatedJob {
        id: JobRunId::from_input(input),
        user: user.to_string(),
    })
}

/// Error object of an errored envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub name: String,
    pub message: String,
}

/// Successful job run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSuccess {
    #[serde(rename = "jobRunID")]
    pub job_run_id: JobRunId,
    /// Upstream response body with `result` set.
    pub data: Value,
    pub result: Value,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Failed job run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobErrored {
    #[serde(rename = "jobRunID")]
    pub job_run_id: JobRunId,
    /// Always `"errored"`.
    pub status: String,
    pub error: ErrorDetail,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Job-result envelope returned to the invoking node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobResult {
    Success(JobSuccess),
    Errored(JobErrored),
}

impl JobResult {
    pub fn success(job_run_id: JobRunId, response: HttpResponse) -> Self {
        let result = response.data.get("result").cloned().unwrap_or(Value::Null);
        Self::Success(JobSuccess {
            job_run_id,
            data: response.data,
            result,
            status_code: response.status,
        })
    }

    pub fn errored(job_run_id: JobRunId, err: &AdapterError) -> Self {
        Self::Errored(JobErrored {
            job_run_id,
            status: "errored".into(),
            error: ErrorDetail {
                name: err.name().into(),
                message: err.to_string(),
            },
            status_code: 500,
        })
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success(s) => s.status_code,
            Self::Errored(e) => e.status_code,
        }
    }

    pub fn job_run_id(&self) -> &JobRunId {
        match self {
            Self::Success(s) => &s.job_run_id,
            Self::Errored(e) => &e.job_run_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The `result` value of a successful run.
    pub fn result(&self) -> Option<&Value> {
        match self {
            Self::Success(s) => Some(&s.result),
            Self::Errored(_) => None,
        }
    }
}
