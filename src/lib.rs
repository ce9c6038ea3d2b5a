//! Script-converting reverse proxy.
//!
//! Forwards a JSON request to one upstream and rewrites the upstream's
//! successful response between Chinese script variants (Simplified,
//! Traditional, Taiwan, Hong Kong) before returning it.

pub mod config;
pub mod convert;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use convert::{ConversionSelector, Script};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
