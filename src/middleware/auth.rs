//! Bearer token gate.
//!
//! Compares the token following the `Bearer ` prefix of the
//! `Authorization` header against the configured secret, verbatim. Any
//! failure (missing header, missing prefix, wrong token) short-circuits
//! with 401; nothing downstream runs.

use crate::http::request::Request;
use crate::http::response::{ApiError, Response};
use crate::middleware::{AuthContext, Middleware, Next, RequestContext};

/// Shared-secret bearer token check.
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Middleware for BearerAuth {
    fn handle(&self, req: &Request, ctx: &mut RequestContext, next: Next<'_>) -> Response {
        // The scheme prefix is case-sensitive on purpose; only the exact
        // `Bearer ` form is accepted.
        let token = req
            .header("Authorization")
            .and_then(|value| value.strip_prefix("Bearer "));

        match token {
            Some(token) if token == self.token => {
                ctx.auth = AuthContext { valid: true };
                next.run(req, ctx)
            }
            _ => {
                tracing::warn!(
                    method = %req.method,
                    path = %req.path,
                    "rejected request with missing or invalid bearer token"
                );
                ApiError::Unauthorized.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Handler;
    use axum::http::header::{HeaderValue, AUTHORIZATION};
    use axum::http::{HeaderMap, Method, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    struct Terminal;

    impl Handler for Terminal {
        fn handle(&self, _req: &Request, ctx: &RequestContext) -> Response {
            Response::ok(json!({ "authenticated": ctx.auth.valid }))
        }
    }

    fn request(authorization: Option<&str>) -> Request {
        let mut headers = HeaderMap::new();
        if let Some(value) = authorization {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        Request {
            method: Method::GET,
            path: "/protected/users".to_string(),
            target: "/protected/users".to_string(),
            headers,
            body: None,
        }
    }

    fn run_gate(authorization: Option<&str>) -> Response {
        let chain: Vec<Arc<dyn Middleware>> = vec![Arc::new(BearerAuth::new("secret-token"))];
        let mut ctx = RequestContext::default();
        Next::new(&chain, &Terminal).run(&request(authorization), &mut ctx)
    }

    #[test]
    fn test_missing_header_is_rejected() {
        let response = run_gate(None);
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body, json!({ "error": "Unauthorized" }));
    }

    #[test]
    fn test_missing_bearer_prefix_is_rejected() {
        assert_eq!(
            run_gate(Some("secret-token")).status,
            StatusCode::UNAUTHORIZED
        );
        // Scheme comparison is case-sensitive.
        assert_eq!(
            run_gate(Some("bearer secret-token")).status,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_wrong_token_is_rejected() {
        let response = run_gate(Some("Bearer wrong-token"));
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_exact_token_is_accepted_and_marks_context() {
        let response = run_gate(Some("Bearer secret-token"));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "authenticated": true }));
    }
}
