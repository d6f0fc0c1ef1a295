//! Table API types and error definitions.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Problem records.
pub const PROBLEM_TABLE: &str = "problem";

/// Journal entries (work notes, comments) for every table.
pub const JOURNAL_TABLE: &str = "sys_journal_field";

/// Errors that can occur while talking to the upstream table API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Base URL missing or unparseable.
    #[error("invalid upstream base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Connection, TLS or protocol failure.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Response body was not a `{result: ...}` envelope.
    #[error("malformed upstream response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// The `{ "result": ... }` wrapper every table API response carries.
#[derive(Debug, Deserialize)]
pub struct TableEnvelope {
    #[serde(default)]
    pub result: Value,
}

impl TableEnvelope {
    /// The wrapped result, or `None` when it is empty in the loose sense a
    /// dynamically typed client would treat as "nothing came back".
    pub fn into_record(self) -> Option<Value> {
        if is_falsy(&self.result) {
            None
        } else {
            Some(self.result)
        }
    }
}

/// `null`, `false`, `0`, `""`. Empty objects and arrays are not falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
