//! Token-gated demo HTTP API.
//!
//! The crate is split into a synchronous dispatch core and an async serving
//! shell. The core (routing, middleware, handlers, dispatch) is a pure
//! function of the request plus injected collaborators; the shell (http,
//! config, observability) adapts wire traffic into core requests.

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod http;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod routing;
pub mod users;

pub use config::AppConfig;
pub use dispatch::Dispatcher;
pub use http::HttpServer;
