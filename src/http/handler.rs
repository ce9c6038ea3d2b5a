//! The proxy request handler.
//!
//! # States
//! ```text
//! Idle → BodyCaptured → Forwarded → Transformed  → Responded
//!                                 ↘ PassedThrough ↗
//! ```
//!
//! - BodyCaptured: whole body buffered, must be UTF-8
//! - Forwarded: one POST to the upstream, no retries
//! - Transformed: 2xx body converted with the process-wide selector
//! - PassedThrough: non-2xx status and body copied verbatim
//!
//! Every failure ends here; nothing propagates past the handler.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::convert::convert_body;
use crate::http::request::request_id;
use crate::http::response::{converted, passthrough, ProxyError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::{ForwardedRequest, UpstreamError, UpstreamResult};

/// Result of a request that reached the upstream.
enum Outcome {
    Transformed(String),
    PassedThrough(UpstreamResult),
}

/// Forward the body upstream and convert a successful response.
pub async fn proxy_handler(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers);

    match handle(&state, &request_id, body).await {
        Ok(Outcome::Transformed(text)) => {
            metrics::record_request("converted", 200, start_time);
            converted(text)
        }
        Ok(Outcome::PassedThrough(result)) => {
            metrics::record_request("passthrough", result.status.as_u16(), start_time);
            passthrough(result)
        }
        Err(e) => {
            metrics::record_request(e.outcome(), e.status().as_u16(), start_time);
            e.into_response()
        }
    }
}

async fn handle(state: &AppState, request_id: &str, body: Bytes) -> Result<Outcome, ProxyError> {
    let _permit = match &state.concurrency {
        Some(limit) => match limit.clone().try_acquire_owned() {
            Ok(permit) => Some(permit),
            Err(_) => {
                tracing::warn!(request_id = %request_id, "Concurrency limit reached");
                return Err(ProxyError::Overloaded);
            }
        },
        None => None,
    };

    // BodyCaptured
    let text = std::str::from_utf8(&body).map_err(|e| {
        tracing::error!(request_id = %request_id, error = %e, "Request body is not UTF-8");
        ProxyError::InvalidBody
    })?;
    tracing::debug!(request_id = %request_id, body = %text, "Received request body");

    // Forwarded
    let result = state
        .upstream
        .forward(ForwardedRequest::new(body.clone()))
        .await
        .map_err(|e| {
            match &e {
                UpstreamError::Unreachable(source) => tracing::error!(
                    request_id = %request_id,
                    upstream_url = %state.upstream.url(),
                    error = %source,
                    "Upstream unreachable"
                ),
                UpstreamError::Timeout(after) => tracing::error!(
                    request_id = %request_id,
                    upstream_url = %state.upstream.url(),
                    timeout = ?after,
                    "Upstream timed out"
                ),
            }
            ProxyError::from(e)
        })?;

    let upstream_text = String::from_utf8_lossy(&result.body);

    // PassedThrough
    if !result.is_success() {
        tracing::error!(
            request_id = %request_id,
            status = %result.status,
            body = %upstream_text,
            "Error response from upstream"
        );
        return Ok(Outcome::PassedThrough(result));
    }

    // Transformed
    tracing::debug!(request_id = %request_id, body = %upstream_text, "Received upstream response");
    let text = convert_body(&upstream_text, &state.selector, state.scope).map_err(|e| {
        tracing::error!(
            request_id = %request_id,
            selector = %state.selector,
            error = %e,
            "Conversion not available"
        );
        ProxyError::from(e)
    })?;
    tracing::debug!(request_id = %request_id, body = %text, "Converted text");

    Ok(Outcome::Transformed(text))
}
