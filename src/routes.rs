//! Route registration.
//!
//! Every endpoint the service exposes is registered here, once, at
//! startup. Routes under `/protected` share a single [`BearerAuth`] gate;
//! public routes carry an empty middleware list.

use std::sync::Arc;

use axum::http::Method;

use crate::clock::Clock;
use crate::handlers::{
    Analytics, DataTransform, Echo, Identity, RequestInfo, StatusProbe, SystemStatus, TokenInfo,
    UserDetail, UserList,
};
use crate::middleware::{BearerAuth, Middleware};
use crate::routing::{RouteTable, RouteTableBuilder, RouteTableError};
use crate::users::UserDirectory;

/// Build the complete route table.
pub fn build_route_table(
    api_token: &str,
    users: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
) -> Result<RouteTable, RouteTableError> {
    let auth: Arc<dyn Middleware> = Arc::new(BearerAuth::new(api_token));
    let gated = || vec![auth.clone()];

    RouteTableBuilder::new()
        .route("identity", Method::GET, "/", Vec::new(), Arc::new(Identity))
        .route("echo", Method::POST, "/echo", Vec::new(), Arc::new(Echo))
        .route(
            "status_probe",
            Method::GET,
            "/status/:code",
            Vec::new(),
            Arc::new(StatusProbe),
        )
        .route(
            "request_info",
            Method::GET,
            "/request-info",
            Vec::new(),
            Arc::new(RequestInfo::new(clock.clone())),
        )
        .route(
            "token_info",
            Method::GET,
            "/protected/token-info",
            gated(),
            Arc::new(TokenInfo::new(clock.clone())),
        )
        .route(
            "user_list",
            Method::GET,
            "/protected/users",
            gated(),
            Arc::new(UserList::new(users.clone(), clock.clone())),
        )
        .route(
            "user_detail",
            Method::GET,
            "/protected/users/:id",
            gated(),
            Arc::new(UserDetail::new(users)),
        )
        .route(
            "data_transform",
            Method::POST,
            "/protected/data/transform",
            gated(),
            Arc::new(DataTransform::new(clock.clone())),
        )
        .route(
            "analytics",
            Method::GET,
            "/protected/analytics",
            gated(),
            Arc::new(Analytics::new(clock.clone())),
        )
        .route(
            "system_status",
            Method::GET,
            "/protected/system",
            gated(),
            Arc::new(SystemStatus::new(clock)),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::dispatch::Dispatcher;
    use crate::http::request::Request;
    use crate::users::InMemoryUserDirectory;
    use axum::http::header::{HeaderValue, AUTHORIZATION};
    use axum::http::{HeaderMap, StatusCode};

    fn dispatcher() -> Dispatcher {
        let table = build_route_table(
            "secret-token",
            Arc::new(InMemoryUserDirectory::demo()),
            Arc::new(SystemClock),
        )
        .unwrap();
        Dispatcher::new(table)
    }

    fn get(path: &str, token: Option<&str>) -> Request {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
            );
        }
        Request {
            method: Method::GET,
            path: path.to_string(),
            target: path.to_string(),
            headers,
            body: None,
        }
    }

    #[test]
    fn test_table_registers_every_endpoint() {
        let table = build_route_table(
            "secret-token",
            Arc::new(InMemoryUserDirectory::demo()),
            Arc::new(SystemClock),
        )
        .unwrap();
        assert_eq!(table.len(), 10);
    }

    #[test]
    fn test_every_protected_route_is_gated() {
        let dispatcher = dispatcher();
        for path in [
            "/protected/token-info",
            "/protected/users",
            "/protected/users/admin",
            "/protected/analytics",
            "/protected/system",
        ] {
            let response = dispatcher.dispatch(&get(path, None));
            assert_eq!(response.status, StatusCode::UNAUTHORIZED, "path {path}");
        }
    }

    #[test]
    fn test_public_routes_need_no_token() {
        let dispatcher = dispatcher();
        for path in ["/", "/status/204", "/request-info"] {
            let response = dispatcher.dispatch(&get(path, None));
            assert_ne!(response.status, StatusCode::UNAUTHORIZED, "path {path}");
        }
    }

    #[test]
    fn test_valid_token_reaches_protected_handlers() {
        let dispatcher = dispatcher();
        let response = dispatcher.dispatch(&get("/protected/users", Some("secret-token")));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["total"], 2);
    }
}
