//! Client-facing failures of problem operations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::problems::types::Message;

/// What a caller sees when an operation fails.
///
/// Upstream detail never reaches the caller; it is logged where the error is
/// created.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemError {
    /// The upstream returned an empty record.
    #[error("Problem with ID {id} not found")]
    NotFound { id: String },

    /// Any transport failure or non-2xx upstream status.
    #[error("{0}")]
    Upstream(String),
}

impl ProblemError {
    pub fn not_found(id: &str) -> Self {
        ProblemError::NotFound { id: id.to_string() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProblemError::NotFound { .. } => StatusCode::NOT_FOUND,
            ProblemError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProblemError {
    fn into_response(self) -> Response {
        (self.status(), Json(Message::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_not_found_response() {
        let response = ProblemError::not_found("42").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let message: Message = serde_json::from_slice(&body).unwrap();
        assert_eq!(message.message, "Problem with ID 42 not found");
    }

    #[test]
    fn test_upstream_status() {
        let err = ProblemError::Upstream("Error fetching problems".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error fetching problems");
    }
}
