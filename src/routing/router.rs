//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Store compiled routes with their middleware chains and handlers
//! - Reject ambiguous registrations at build time
//! - Look up the route for an incoming (method, path) pair
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Linear scan is fine for a table this size
//! - Explicit `None` on no match rather than a silent default

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::Method;
use thiserror::Error;

use crate::handlers::Handler;
use crate::middleware::Middleware;
use crate::routing::matcher::{PathParams, PathPattern};

/// A registered route: method, pattern, middleware chain, handler.
pub struct Route {
    /// Identifier used in logs.
    pub name: String,
    pub method: Method,
    pub pattern: PathPattern,
    /// Applied in registration order before the handler.
    pub middleware: Vec<Arc<dyn Middleware>>,
    pub handler: Arc<dyn Handler>,
}

/// A successful lookup: the route plus the captured path parameters.
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: PathParams,
}

/// Error raised when the table cannot be built.
#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("duplicate route registration: {method} {shape}")]
    Duplicate { method: Method, shape: String },
}

/// Immutable table of all registered routes.
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Find the route matching the request, capturing path parameters.
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            route
                .pattern
                .matches(path)
                .map(|params| RouteMatch { route, params })
        })
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Builder collecting registrations before the ambiguity check freezes them.
#[derive(Default)]
pub struct RouteTableBuilder {
    routes: Vec<Route>,
}

impl RouteTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. The pattern is compiled here, once.
    pub fn route(
        mut self,
        name: &str,
        method: Method,
        pattern: &str,
        middleware: Vec<Arc<dyn Middleware>>,
        handler: Arc<dyn Handler>,
    ) -> Self {
        self.routes.push(Route {
            name: name.to_string(),
            method,
            pattern: PathPattern::parse(pattern),
            middleware,
            handler,
        });
        self
    }

    /// Freeze the table, rejecting two routes with the same
    /// (method, pattern shape).
    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        let mut seen = HashSet::new();
        for route in &self.routes {
            let shape = route.pattern.shape();
            if !seen.insert((route.method.clone(), shape.clone())) {
                return Err(RouteTableError::Duplicate {
                    method: route.method.clone(),
                    shape,
                });
            }
        }

        Ok(RouteTable {
            routes: self.routes,
        })
    }
}
