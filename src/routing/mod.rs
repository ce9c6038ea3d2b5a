//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! ProxyConfig.endpoint_path
//!     → RouteTable (path → RouteTarget)
//!     → axum Router (POST only)
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - Explicit table even for one entry, so it can be logged and inspected

pub mod router;

pub use router::{RouteTable, RouteTarget};
