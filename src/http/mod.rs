//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → handler.rs (capture → forward → convert / pass through)
//!     → response.rs (status mapping, headers)
//!     → Send to client
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use handler::proxy_handler;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::ProxyError;
pub use server::{build_router, AppState, HttpServer, ServerError};
