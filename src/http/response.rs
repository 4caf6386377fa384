//! Engine response type and the failure taxonomy.
//!
//! # Responsibilities
//! - Carry status, JSON body and headers back to the serving glue
//! - Map every failure class onto a status plus `{"error": ...}` payload
//!
//! # Design Decisions
//! - Failures are never partial successes: each one renders an `error`
//!   field with the matching 4xx/5xx status
//! - `Internal` carries a generic message and leaks no detail

use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// A response as produced by the dispatch core.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    /// Serialized as the JSON body.
    pub body: Value,
    pub headers: HeaderMap,
}

impl Response {
    pub fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            body,
            headers: HeaderMap::new(),
        }
    }

    /// 200 with the given body.
    pub fn ok(body: Value) -> Self {
        Self::json(StatusCode::OK, body)
    }

    /// Serialize a payload struct. A serialization failure (which would be
    /// a programming error in a payload type) degrades to a generic 500.
    pub fn from_payload<T: Serialize>(status: StatusCode, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self::json(status, body),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize response payload");
                ApiError::Internal.into()
            }
        }
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status, axum::Json(self.body)).into_response();
        response.headers_mut().extend(self.headers);
        response
    }
}

/// Failure taxonomy for the dispatch core.
///
/// Handlers convert their own parse and lookup failures into one of these
/// locally; the dispatcher itself only ever produces `NotFound` (unmatched
/// route) or `Internal` (caught fault).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input body or unusable path parameter.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// No matching route or missing resource.
    #[error("{0}")]
    NotFound(String),

    /// Any otherwise-unhandled fault.
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        Response::json(err.status(), json!({ "error": err.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            ApiError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound("Not Found".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_renders_error_field() {
        let response: Response = ApiError::Unauthorized.into();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, json!({ "error": "Unauthorized" }));
    }

    #[test]
    fn test_internal_error_is_generic() {
        let response: Response = ApiError::Internal.into();
        assert_eq!(response.body, json!({ "error": "Internal Server Error" }));
    }
}
