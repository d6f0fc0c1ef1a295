//! Request handling.
//!
//! # Responsibilities
//! - Generate a UUID v4 request ID for requests that arrive without one
//! - Parse JSON bodies leniently, the way a typical JSON body parser does
//!
//! # Design Decisions
//! - A body is only parsed when its content type is `application/json`;
//!   anything else reads as an empty object
//! - Only objects and arrays are accepted at the top level
//! - Size limits are enforced by the limit layer before the body is buffered

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::problems::Message;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Assigns a fresh UUID v4 to each request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// A request body as loose JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

/// Why a body could not be read.
#[derive(Debug)]
pub enum BodyRejection {
    /// Buffering failed (too large, connection dropped).
    Read(axum::extract::rejection::BytesRejection),
    /// Not JSON, or a JSON scalar at the top level.
    Malformed(String),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            BodyRejection::Read(rejection) => rejection.into_response(),
            BodyRejection::Malformed(detail) => {
                tracing::debug!(error = %detail, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(Message::new("Malformed JSON body")),
                )
                    .into_response()
            }
        }
    }
}

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(BodyRejection::Read)?;

        if !is_json {
            return Ok(JsonBody(Value::Object(Map::new())));
        }
        parse_body(&bytes).map(JsonBody)
    }
}

/// Parse a buffered body. Empty bodies read as `{}`.
pub fn parse_body(bytes: &[u8]) -> Result<Value, BodyRejection> {
    let first = bytes.iter().find(|b| !b.is_ascii_whitespace());
    match first {
        None => Ok(Value::Object(Map::new())),
        Some(b'{') | Some(b'[') => serde_json::from_slice(bytes)
            .map_err(|e| BodyRejection::Malformed(e.to_string())),
        Some(_) => Err(BodyRejection::Malformed(
            "top-level value must be an object or array".to_string(),
        )),
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    async fn extract(content_type: Option<&str>, body: &'static str) -> Result<Value, BodyRejection> {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        JsonBody::from_request(req, &()).await.map(|JsonBody(v)| v)
    }

    #[tokio::test]
    async fn test_json_object() {
        let value = extract(Some("application/json"), r#"{"a": 1}"#).await.unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_charset_parameter() {
        let value = extract(Some("application/json; charset=utf-8"), "[1, 2]")
            .await
            .unwrap();
        assert_eq!(value, json!([1, 2]));
    }

    #[tokio::test]
    async fn test_other_content_type_is_empty_object() {
        let value = extract(Some("text/plain"), r#"{"a": 1}"#).await.unwrap();
        assert_eq!(value, json!({}));

        let value = extract(None, r#"{"a": 1}"#).await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_object() {
        let value = extract(Some("application/json"), "  ").await.unwrap();
        assert_eq!(value, json!({}));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let err = extract(Some("application/json"), "{not json").await.unwrap_err();
        assert!(matches!(err, BodyRejection::Malformed(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_scalar_rejected() {
        assert!(matches!(parse_body(b"\"text\""), Err(BodyRejection::Malformed(_))));
        assert!(matches!(parse_body(b"42"), Err(BodyRejection::Malformed(_))));
    }

    #[test]
    fn test_request_ids_are_unique() {
        let req = axum::http::Request::new(());
        let mut make = MakeRequestUuidV4;
        let a = make.make_request_id(&req).unwrap();
        let b = make.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
