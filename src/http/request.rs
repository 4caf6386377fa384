//! Engine request type and request-id tagging.
//!
//! # Responsibilities
//! - Carry the parts of a wire request the dispatch core consumes
//! - Generate a unique request ID as early as possible for tracing
//!
//! # Design Decisions
//! - Headers stay in a `HeaderMap`, so name lookups are case-insensitive
//! - The body is raw bytes; parsing is a handler concern

use std::task::{Context, Poll};

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{HeaderMap, Method};
use serde_json::Value;
use tower::{Layer, Service};
use uuid::Uuid;

use crate::http::response::ApiError;

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: &str = "x-request-id";

/// A request as seen by the dispatch core.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path component only, used for route matching.
    pub path: String,
    /// Full target as received, for introspection payloads.
    pub target: String,
    pub headers: HeaderMap,
    /// Raw body bytes; `None` when the request carried no body.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Look up a header value as a string. Name comparison is
    /// case-insensitive; values that are not valid UTF-8 read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Parse the body as JSON. An absent or malformed body is a
    /// `BadRequest`; callers convert it into a 400 at their own boundary.
    pub fn json_body(&self) -> Result<Value, ApiError> {
        let bytes = self
            .body
            .as_deref()
            .ok_or_else(|| ApiError::BadRequest("request body is required".to_string()))?;

        serde_json::from_slice(bytes).map_err(|err| {
            tracing::debug!(path = %self.path, error = %err, "request body failed to parse");
            ApiError::BadRequest("malformed JSON body".to_string())
        })
    }
}

/// Tower layer that tags incoming requests with a UUID v4 `x-request-id`
/// unless the client already sent one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<axum::http::Request<B>> for RequestIdService<S>
where
    S: Service<axum::http::Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        if !req.headers().contains_key(X_REQUEST_ID) {
            let id = Uuid::new_v4().to_string();
            if let Ok(value) = HeaderValue::from_str(&id) {
                req.headers_mut()
                    .insert(HeaderName::from_static(X_REQUEST_ID), value);
            }
        }
        self.inner.call(req)
    }
}
