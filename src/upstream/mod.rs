//! Upstream subsystem.
//!
//! # Data Flow
//! ```text
//! ForwardedRequest (raw body)
//!     → client.rs (POST application/json, buffered)
//!     → UpstreamResult (status, content type, body)
//!       or UpstreamError (unreachable / timeout)
//! ```

pub mod client;

pub use client::{ForwardedRequest, UpstreamClient, UpstreamError, UpstreamResult};
