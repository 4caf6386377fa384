//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (segment comparison, parameter capture)
//!     → Return: RouteMatch { route, path params } or None
//!
//! Route Compilation (at startup):
//!     registrations
//!     → Parse path patterns into segments
//!     → Reject ambiguous (method, shape) pairs
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in the hot path (segment comparison only)
//! - Deterministic: same input always matches the same route
//! - Ambiguity is a registration error, not a first-match-wins tiebreak

pub mod matcher;
pub mod router;

pub use matcher::{PathParams, PathPattern};
pub use router::{Route, RouteMatch, RouteTable, RouteTableBuilder, RouteTableError};
