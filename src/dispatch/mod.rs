//! Request dispatch.
//!
//! # Data Flow
//! ```text
//! Request
//!     → RouteTable lookup        (miss → 404, done)
//!     → middleware chain          (short-circuit → response, done)
//!     → handler                   (response, done)
//! ```
//!
//! # Design Decisions
//! - Dispatch is synchronous; each request runs the chain sequentially and
//!   never spawns background work
//! - A panic escaping a handler is converted to a generic 500 here, the
//!   only place that produces one

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::http::request::Request;
use crate::http::response::{ApiError, Response};
use crate::middleware::{Next, RequestContext};
use crate::routing::RouteTable;

/// The single entry point into the dispatch core.
pub struct Dispatcher {
    table: RouteTable,
}

impl Dispatcher {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Resolve the request to a response.
    ///
    /// Produces 404 for an unmatched route and 500 for a caught fault;
    /// every other status comes out of the chain or the handler.
    pub fn dispatch(&self, req: &Request) -> Response {
        let Some(matched) = self.table.lookup(&req.method, &req.path) else {
            tracing::debug!(method = %req.method, path = %req.path, "no route matched");
            return ApiError::NotFound("Not Found".to_string()).into();
        };

        let route = matched.route;
        let mut ctx = RequestContext {
            params: matched.params,
            ..Default::default()
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            Next::new(&route.middleware, route.handler.as_ref()).run(req, &mut ctx)
        }));

        match outcome {
            Ok(response) => {
                tracing::debug!(
                    route = %route.name,
                    status = response.status.as_u16(),
                    "request dispatched"
                );
                response
            }
            Err(_) => {
                tracing::error!(route = %route.name, "handler panicked");
                ApiError::Internal.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Handler;
    use crate::routing::RouteTableBuilder;
    use axum::http::{HeaderMap, Method, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    struct Ok200;

    impl Handler for Ok200 {
        fn handle(&self, _req: &Request, _ctx: &RequestContext) -> Response {
            Response::ok(json!({ "ok": true }))
        }
    }

    struct Panicking;

    impl Handler for Panicking {
        fn handle(&self, _req: &Request, _ctx: &RequestContext) -> Response {
            panic!("boom");
        }
    }

    fn request(method: Method, path: &str) -> Request {
        Request {
            method,
            path: path.to_string(),
            target: path.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    fn dispatcher() -> Dispatcher {
        let table = RouteTableBuilder::new()
            .route("ok", Method::GET, "/ok", Vec::new(), Arc::new(Ok200))
            .route(
                "panicking",
                Method::GET,
                "/panic",
                Vec::new(),
                Arc::new(Panicking),
            )
            .build()
            .unwrap();
        Dispatcher::new(table)
    }

    #[test]
    fn test_matched_route_runs_handler() {
        let response = dispatcher().dispatch(&request(Method::GET, "/ok"));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({ "ok": true }));
    }

    #[test]
    fn test_unmatched_path_is_404() {
        let response = dispatcher().dispatch(&request(Method::GET, "/missing"));
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body, json!({ "error": "Not Found" }));
    }

    #[test]
    fn test_unmatched_method_is_404() {
        let response = dispatcher().dispatch(&request(Method::POST, "/ok"));
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_handler_panic_becomes_generic_500() {
        let response = dispatcher().dispatch(&request(Method::GET, "/panic"));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, json!({ "error": "Internal Server Error" }));
    }
}
