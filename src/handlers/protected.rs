//! Handlers behind the bearer token gate.

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Duration;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::clock::{format_timestamp, Clock};
use crate::handlers::Handler;
use crate::http::request::Request;
use crate::http::response::{ApiError, Response};
use crate::middleware::RequestContext;
use crate::users::{User, UserDirectory};

/// `GET /protected/token-info` — static metadata about the validated token.
pub struct TokenInfo {
    clock: Arc<dyn Clock>,
}

impl TokenInfo {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenInfoPayload {
    message: &'static str,
    is_valid: bool,
    permissions: [&'static str; 3],
    expires_at: String,
    token_type: &'static str,
}

impl Handler for TokenInfo {
    fn handle(&self, _req: &Request, _ctx: &RequestContext) -> Response {
        Response::from_payload(
            StatusCode::OK,
            &TokenInfoPayload {
                message: "Token information",
                is_valid: true,
                permissions: ["read", "write", "execute"],
                expires_at: format_timestamp(self.clock.now() + Duration::hours(24)),
                token_type: "Bearer",
            },
        )
    }
}

/// `GET /protected/users` — every record plus a count.
pub struct UserList {
    users: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
}

impl UserList {
    pub fn new(users: Arc<dyn UserDirectory>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[derive(Serialize)]
struct UserListPayload {
    users: Vec<User>,
    total: usize,
    timestamp: String,
}

impl Handler for UserList {
    fn handle(&self, _req: &Request, _ctx: &RequestContext) -> Response {
        let users = self.users.list();
        Response::from_payload(
            StatusCode::OK,
            &UserListPayload {
                total: users.len(),
                users,
                timestamp: format_timestamp(self.clock.now()),
            },
        )
    }
}

/// `GET /protected/users/:id` — single record lookup.
pub struct UserDetail {
    users: Arc<dyn UserDirectory>,
}

impl UserDetail {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }
}

impl Handler for UserDetail {
    fn handle(&self, _req: &Request, ctx: &RequestContext) -> Response {
        let id = ctx.params.get("id").map(String::as_str).unwrap_or_default();

        match self.users.get(id) {
            Some(user) => Response::from_payload(StatusCode::OK, &user),
            None => ApiError::NotFound("User not found".to_string()).into(),
        }
    }
}

/// `POST /protected/data/transform` — derives fields from a `text` field.
///
/// A missing or non-string `text` is not an error; the derived fields are
/// simply omitted. Only an unparseable body fails.
pub struct DataTransform {
    clock: Arc<dyn Clock>,
}

impl DataTransform {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Type label for the `text` field, in JavaScript `typeof` naming (that is
/// what API clients key on): a missing field reads as `undefined`, and
/// null, arrays and objects all read as `object`.
fn json_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::String(_)) => "string",
        Some(Value::Number(_)) => "number",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Null) | Some(Value::Array(_)) | Some(Value::Object(_)) => "object",
    }
}

impl Handler for DataTransform {
    fn handle(&self, req: &Request, _ctx: &RequestContext) -> Response {
        let body = match req.json_body() {
            Ok(body) => body,
            Err(err) => return err.into(),
        };

        let mut transformed = Map::new();
        transformed.insert(
            "timestamp".to_string(),
            Value::String(format_timestamp(self.clock.now())),
        );
        if let Some(Value::String(text)) = body.get("text") {
            transformed.insert("uppercase".to_string(), Value::from(text.to_uppercase()));
            transformed.insert(
                "reversed".to_string(),
                Value::from(text.chars().rev().collect::<String>()),
            );
            transformed.insert("length".to_string(), Value::from(text.chars().count()));
        }
        transformed.insert(
            "type".to_string(),
            Value::from(json_type_name(body.get("text"))),
        );

        Response::ok(json!({
            "original": body,
            "transformed": Value::Object(transformed),
        }))
    }
}

/// `GET /protected/analytics` — synthetic usage metrics.
pub struct Analytics {
    clock: Arc<dyn Clock>,
}

impl Analytics {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[derive(Serialize)]
struct ApiCallCounts {
    total: u64,
    successful: u64,
    failed: u64,
}

#[derive(Serialize)]
struct EndpointCalls {
    path: &'static str,
    calls: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsPayload {
    api_calls: ApiCallCounts,
    popular_endpoints: Vec<EndpointCalls>,
    average_response_time: &'static str,
    uptime: &'static str,
    last_updated: String,
}

impl Handler for Analytics {
    fn handle(&self, _req: &Request, _ctx: &RequestContext) -> Response {
        Response::from_payload(
            StatusCode::OK,
            &AnalyticsPayload {
                api_calls: ApiCallCounts {
                    total: 1234,
                    successful: 1200,
                    failed: 34,
                },
                popular_endpoints: vec![
                    EndpointCalls {
                        path: "/",
                        calls: 500,
                    },
                    EndpointCalls {
                        path: "/echo",
                        calls: 300,
                    },
                    EndpointCalls {
                        path: "/protected/data/transform",
                        calls: 200,
                    },
                ],
                average_response_time: "120ms",
                uptime: "99.99%",
                last_updated: format_timestamp(self.clock.now()),
            },
        )
    }
}

/// `GET /protected/system` — synthetic service health snapshot.
pub struct SystemStatus {
    clock: Arc<dyn Clock>,
}

impl SystemStatus {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[derive(Serialize)]
struct ServiceStates {
    database: &'static str,
    cache: &'static str,
    worker: &'static str,
}

#[derive(Serialize)]
struct ResourceUsage {
    cpu: &'static str,
    memory: &'static str,
    requests: &'static str,
}

#[derive(Serialize)]
struct SystemStatusPayload {
    status: &'static str,
    version: &'static str,
    environment: &'static str,
    services: ServiceStates,
    resources: ResourceUsage,
    timestamp: String,
}

impl Handler for SystemStatus {
    fn handle(&self, _req: &Request, _ctx: &RequestContext) -> Response {
        Response::from_payload(
            StatusCode::OK,
            &SystemStatusPayload {
                status: "healthy",
                version: env!("CARGO_PKG_VERSION"),
                environment: "production",
                services: ServiceStates {
                    database: "connected",
                    cache: "operational",
                    worker: "running",
                },
                resources: ResourceUsage {
                    cpu: "23%",
                    memory: "45%",
                    requests: "150/min",
                },
                timestamp: format_timestamp(self.clock.now()),
            },
        )
    }
}
