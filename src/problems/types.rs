//! Payload and response shapes for problem operations.
//!
//! Upstream records are passed through as opaque JSON; only the pieces the
//! gateway composes or filters get their own types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::upstream::PROBLEM_TABLE;

/// Fields accepted when creating a problem. Everything else in the inbound
/// body is dropped.
///
/// A field missing from the body stays missing in the outbound payload; an
/// explicit `null` is forwarded as `null`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct NewProblem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
}

impl NewProblem {
    /// Pick the whitelisted fields out of a request body.
    pub fn from_body(body: &Value) -> Self {
        let field = |name: &str| body.as_object().and_then(|o| o.get(name)).cloned();
        Self {
            short_description: field("short_description"),
            description: field("description"),
            priority: field("priority"),
        }
    }
}

/// A problem together with its work notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemDetail {
    pub problem: Value,

    #[serde(rename = "workNotes")]
    pub work_notes: Value,
}

/// Journal query selecting the work notes of one problem.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WorkNoteFilter<'a> {
    /// Id of the record the journal entry belongs to.
    pub element_id: &'a str,
    /// Table of that record.
    pub name: &'static str,
    /// Journal field.
    pub element: &'static str,
}

impl<'a> WorkNoteFilter<'a> {
    pub fn for_problem(id: &'a str) -> Self {
        Self {
            element_id: id,
            name: PROBLEM_TABLE,
            element: "work_notes",
        }
    }
}

/// `{ "message": ... }` body used for confirmations and errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
