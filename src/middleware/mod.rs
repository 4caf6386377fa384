//! Middleware chain.
//!
//! # Data Flow
//! ```text
//! Request + RequestContext
//!     → first middleware (may short-circuit with a Response)
//!     → next.run(...) forwards to the following link
//!     → ...
//!     → terminal handler
//! ```
//!
//! # Design Decisions
//! - The chain is an explicit ordered list per route, composed at dispatch
//!   time, so ordering and short-circuits are testable in isolation
//! - A middleware that never calls `next.run` ends the request with its
//!   own response; nothing after it executes

pub mod auth;

use std::sync::Arc;

use crate::handlers::Handler;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::matcher::PathParams;

pub use auth::BearerAuth;

/// Authorization outcome, derived per request by the auth gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthContext {
    pub valid: bool,
}

/// Per-request state threaded through the chain to the handler.
/// Never outlives the dispatch that created it.
#[derive(Debug, Default)]
pub struct RequestContext {
    pub params: PathParams,
    pub auth: AuthContext,
}

/// A single processing step in front of a handler.
pub trait Middleware: Send + Sync {
    /// Process the request. Call `next.run(req, ctx)` to forward control,
    /// or return a response directly to short-circuit.
    fn handle(&self, req: &Request, ctx: &mut RequestContext, next: Next<'_>) -> Response;
}

/// The remainder of the chain, ending at the route handler.
pub struct Next<'a> {
    chain: &'a [Arc<dyn Middleware>],
    handler: &'a dyn Handler,
}

impl<'a> Next<'a> {
    pub(crate) fn new(chain: &'a [Arc<dyn Middleware>], handler: &'a dyn Handler) -> Self {
        Self { chain, handler }
    }

    /// Invoke the next link, or the terminal handler when the chain is
    /// exhausted.
    pub fn run(self, req: &Request, ctx: &mut RequestContext) -> Response {
        match self.chain.split_first() {
            Some((link, rest)) => link.handle(req, ctx, Next::new(rest, self.handler)),
            None => self.handler.handle(req, ctx),
        }
    }
}
