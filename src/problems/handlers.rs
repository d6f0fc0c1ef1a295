//! Problem record operations.
//!
//! Each handler makes one or two sequential upstream calls and maps the
//! outcome to a response. Every upstream failure is logged with the operation
//! and id, then collapsed into a generic 500.

use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::http::request::JsonBody;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::problems::error::ProblemError;
use crate::problems::types::{Message, NewProblem, ProblemDetail, WorkNoteFilter};
use crate::upstream::{UpstreamError, JOURNAL_TABLE, PROBLEM_TABLE};

/// `GET /problems`
pub async fn list_problems(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    finish("list", start, list(&state).await)
}

/// `GET /problem/{id}`
pub async fn get_problem(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let start = Instant::now();
    finish("get", start, get_one(&state, &id).await)
}

/// `POST /problem`
pub async fn create_problem(State(state): State<AppState>, JsonBody(body): JsonBody) -> Response {
    let start = Instant::now();
    finish("create", start, create(&state, &body).await)
}

/// `PUT /problem/{id}`
pub async fn update_problem(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Response {
    let start = Instant::now();
    finish("update", start, update(&state, &id, &body).await)
}

/// `DELETE /problem/{id}`
pub async fn delete_problem(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let start = Instant::now();
    finish("delete", start, delete(&state, &id).await)
}

async fn list(state: &AppState) -> Result<Json<Value>, ProblemError> {
    let problems = state.upstream.list(PROBLEM_TABLE).await.map_err(|e| {
        tracing::error!(operation = "list", error = %e, "Error fetching problems");
        ProblemError::Upstream("Error fetching problems".to_string())
    })?;
    Ok(Json(problems))
}

/// Problem lookup, then the dependent work-note lookup.
///
/// Both calls share one failure path: a failed work-note query discards the
/// already fetched problem.
async fn get_one(state: &AppState, id: &str) -> Result<Json<ProblemDetail>, ProblemError> {
    let fail = |e: UpstreamError| {
        tracing::error!(operation = "get", id = %id, error = %e, "Error fetching problem");
        ProblemError::Upstream(format!("Error fetching problem with ID {id}"))
    };

    let problem = state
        .upstream
        .get(PROBLEM_TABLE, id)
        .await
        .map_err(fail)?
        .ok_or_else(|| ProblemError::not_found(id))?;

    let work_notes = state
        .upstream
        .query(JOURNAL_TABLE, &WorkNoteFilter::for_problem(id))
        .await
        .map_err(fail)?;

    Ok(Json(ProblemDetail {
        problem,
        work_notes,
    }))
}

async fn create(state: &AppState, body: &Value) -> Result<(StatusCode, Json<Value>), ProblemError> {
    let payload = NewProblem::from_body(body);
    let created = state
        .upstream
        .create(PROBLEM_TABLE, &payload)
        .await
        .map_err(|e| {
            tracing::error!(operation = "create", error = %e, "Error creating problem");
            ProblemError::Upstream("Error creating problem".to_string())
        })?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// The body is forwarded as-is, unlike create.
async fn update(state: &AppState, id: &str, body: &Value) -> Result<Json<Value>, ProblemError> {
    let updated = state
        .upstream
        .update(PROBLEM_TABLE, id, body)
        .await
        .map_err(|e| {
            tracing::error!(operation = "update", id = %id, error = %e, "Error updating problem");
            ProblemError::Upstream(format!("Error updating problem with ID {id}"))
        })?
        .ok_or_else(|| ProblemError::not_found(id))?;
    Ok(Json(updated))
}

async fn delete(state: &AppState, id: &str) -> Result<Json<Message>, ProblemError> {
    state.upstream.delete(PROBLEM_TABLE, id).await.map_err(|e| {
        tracing::error!(operation = "delete", id = %id, error = %e, "Error deleting problem");
        ProblemError::Upstream(format!("Error deleting problem with ID {id}"))
    })?;
    Ok(Json(Message::new(format!(
        "Problem with ID {id} deleted successfully"
    ))))
}

fn finish<T: IntoResponse>(
    operation: &'static str,
    start: Instant,
    result: Result<T, ProblemError>,
) -> Response {
    let response = result.into_response();
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}
