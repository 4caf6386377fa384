//! Endpoint handlers.
//!
//! # Design Decisions
//! - Handlers are deterministic given the request, the captured path
//!   parameters, the injected user directory and the injected clock; none
//!   of them mutates shared state
//! - Body-parse failures become a 400 inside the handler; no failure
//!   crosses the handler boundary
//! - The analytics and system payloads are synthetic demo data, not real
//!   measurements

pub mod protected;
pub mod public;

use crate::http::request::Request;
use crate::http::response::Response;
use crate::middleware::RequestContext;

pub use protected::{Analytics, DataTransform, SystemStatus, TokenInfo, UserDetail, UserList};
pub use public::{Echo, Identity, RequestInfo, StatusProbe};

/// Terminal request processor for a route.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request, ctx: &RequestContext) -> Response;
}
