//! Handlers reachable without a token.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::{json, Map, Value};

use crate::clock::{format_timestamp, Clock};
use crate::handlers::Handler;
use crate::http::request::Request;
use crate::http::response::{ApiError, Response};
use crate::middleware::RequestContext;

/// `GET /` — fixed service identity.
pub struct Identity;

impl Handler for Identity {
    fn handle(&self, _req: &Request, _ctx: &RequestContext) -> Response {
        Response::ok(json!({ "name": "TimmyAPI" }))
    }
}

/// `POST /echo` — returns the parsed body verbatim.
pub struct Echo;

impl Handler for Echo {
    fn handle(&self, req: &Request, _ctx: &RequestContext) -> Response {
        match req.json_body() {
            Ok(body) => Response::ok(body),
            Err(err) => err.into(),
        }
    }
}

/// `GET /status/:code` — answers with the requested status code.
///
/// Input that is not an integer in 100..=599 fails with 400 instead of
/// being forwarded.
pub struct StatusProbe;

impl Handler for StatusProbe {
    fn handle(&self, _req: &Request, ctx: &RequestContext) -> Response {
        let raw = ctx.params.get("code").map(String::as_str).unwrap_or_default();

        let status = raw
            .parse::<u16>()
            .ok()
            .filter(|code| (100..=599).contains(code))
            .and_then(|code| StatusCode::from_u16(code).ok());

        match status {
            Some(status) => Response::json(
                status,
                json!({
                    "status": status.as_u16(),
                    "message": format!("Returned status code {}", status.as_u16()),
                }),
            ),
            None => ApiError::BadRequest(format!("invalid status code: {raw}")).into(),
        }
    }
}

/// `GET /request-info` — reflects what the server received.
pub struct RequestInfo {
    clock: Arc<dyn Clock>,
}

impl RequestInfo {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Handler for RequestInfo {
    fn handle(&self, req: &Request, _ctx: &RequestContext) -> Response {
        let headers: Map<String, Value> = req
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
                )
            })
            .collect();

        Response::ok(json!({
            "method": req.method.as_str(),
            "url": req.target,
            "headers": headers,
            "timestamp": format_timestamp(self.clock.now()),
        }))
    }
}
