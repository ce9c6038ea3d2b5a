//! Outbound HTTP client for the upstream service.
//!
//! # Responsibilities
//! - POST the captured body verbatim with `Content-Type: application/json`
//! - Buffer the full response body (conversion needs the complete text)
//! - Keep transport failures distinct from non-2xx statuses
//!
//! # Design Decisions
//! - One shared `reqwest::Client` (connection pool) per process
//! - Single attempt per request; no retries
//! - Connect and total request deadlines come from `TimeoutConfig`

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::TimeoutConfig;

/// Transport-level failures talking to the upstream.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// DNS, connect, TLS or body read failure.
    #[error("upstream unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// No complete response within the configured deadline.
    #[error("upstream did not respond within {0:?}")]
    Timeout(Duration),
}

/// Request captured from the caller, ready to forward.
#[derive(Debug, Clone)]
pub struct ForwardedRequest {
    pub body: Bytes,
}

impl ForwardedRequest {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self { body: body.into() }
    }
}

/// Buffered upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResult {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl UpstreamResult {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Client bound to a single upstream URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: Url,
    request_timeout: Duration,
}

impl UpstreamClient {
    pub fn new(url: Url, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let request_timeout = Duration::from_secs(timeouts.upstream_secs);
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            http,
            url,
            request_timeout,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Forward `request` and buffer the response.
    ///
    /// Non-2xx statuses are returned as `Ok`; only transport failures are `Err`.
    pub async fn forward(&self, request: ForwardedRequest) -> Result<UpstreamResult, UpstreamError> {
        let response = self
            .http
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        tracing::debug!(
            upstream_url = %self.url,
            status = %status,
            body_len = body.len(),
            "Upstream responded"
        );

        Ok(UpstreamResult {
            status,
            content_type,
            body,
        })
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.request_timeout)
        } else {
            UpstreamError::Unreachable(error)
        }
    }
}
