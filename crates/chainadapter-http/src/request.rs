//! Wire types of the `triggerconstantcontract` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a constant (read-only) contract call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantCallRequest {
    pub owner_address: String,
    pub contract_address: String,
    /// Solidity signature, e.g. `confirmedTokensForUser(address)`.
    pub function_selector: String,
    /// ABI-encoded parameters, hex without `0x`.
    pub parameter: String,
    /// `true` when addresses are given in base58 form.
    pub visible: bool,
}

/// A decoded HTTP response: status code plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub data: Value,
}

impl HttpResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// `constant_result[0]` of a constant-call response.
    pub fn constant_result(&self) -> Option<&str> {
        result_at(
            &self.data,
            &[PathSegment::Key("constant_result"), PathSegment::Index(0)],
        )
        .and_then(Value::as_str)
    }
}

/// One step of a JSON path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

/// Walk `path` through `data`. Returns `None` as soon as a step is missing.
pub fn result_at<'v>(data: &'v Value, path: &[PathSegment<'_>]) -> Option<&'v Value> {
    path.iter().try_fold(data, |cur, seg| match seg {
        PathSegment::Key(k) => cur.get(*k),
        PathSegment::Index(i) => cur.get(*i),
    })
}
