//! Response construction and error mapping.
//!
//! # Responsibilities
//! - Map handler failures to HTTP status codes
//! - Build converted and passthrough responses
//! - Keep every body complete: converted, verbatim, or a synthetic JSON error
//!
//! # Design Decisions
//! - Transport failure → 502, upstream timeout → 504
//! - Unsupported conversion → 500 (configuration problem)
//! - Passthrough keeps the upstream status, content type and bytes

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::convert::UnsupportedSelector;
use crate::upstream::{UpstreamError, UpstreamResult};

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Failures handled at the request boundary.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("request body is not valid UTF-8")]
    InvalidBody,

    #[error("no available server")]
    Overloaded,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    UnsupportedSelector(#[from] UnsupportedSelector),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidBody => StatusCode::BAD_REQUEST,
            ProxyError::Overloaded => StatusCode::SERVICE_UNAVAILABLE,
            ProxyError::Upstream(UpstreamError::Unreachable(_)) => StatusCode::BAD_GATEWAY,
            ProxyError::Upstream(UpstreamError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UnsupportedSelector(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metric label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyError::InvalidBody => "invalid_body",
            ProxyError::Overloaded => "overloaded",
            ProxyError::Upstream(UpstreamError::Unreachable(_)) => "upstream_unreachable",
            ProxyError::Upstream(UpstreamError::Timeout(_)) => "upstream_timeout",
            ProxyError::UnsupportedSelector(_) => "unsupported_selector",
        }
    }

    /// Message sent to the caller. Upstream details stay in the logs.
    fn public_message(&self) -> &'static str {
        match self {
            ProxyError::InvalidBody => "Request body is not valid UTF-8",
            ProxyError::Overloaded => "No available server",
            ProxyError::Upstream(UpstreamError::Unreachable(_)) => "Upstream request failed",
            ProxyError::Upstream(UpstreamError::Timeout(_)) => "Upstream request timed out",
            ProxyError::UnsupportedSelector(_) => "Response conversion is not configured correctly",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// `200` with the converted body.
pub fn converted(text: String) -> Response {
    ([(header::CONTENT_TYPE, application_json())], text).into_response()
}

/// Upstream status and body, byte for byte.
pub fn passthrough(result: UpstreamResult) -> Response {
    let content_type = result.content_type.unwrap_or_else(application_json);
    (
        result.status,
        [(header::CONTENT_TYPE, content_type)],
        Body::from(result.body),
    )
        .into_response()
}
