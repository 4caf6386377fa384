//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, body collection)
//!     → request.rs (engine Request: method, path, headers, raw body)
//!     → [dispatch core runs synchronously]
//!     → response.rs (engine Response serialized as JSON)
//!     → Send to client
//! ```
//!
//! The engine types are plain data: the dispatch core never touches a
//! socket, and the serving glue in `server.rs` is the only async code.

pub mod request;
pub mod response;
pub mod server;

pub use request::{Request, RequestIdLayer, X_REQUEST_ID};
pub use response::{ApiError, Response};
pub use server::HttpServer;
