//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the shared `AppState` from a validated `ProxyConfig`
//! - Create the Axum Router from the route table
//! - Wire up middleware (request ID, tracing, timeout, body limit)
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Semaphore};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::validation::parse_upstream_url;
use crate::config::{validate_config, ProxyConfig, ValidationError};
use crate::convert::{ConversionScope, ConversionSelector};
use crate::http::request::{make_request_span, MakeRequestUuid};
use crate::routing::RouteTable;
use crate::upstream::UpstreamClient;

/// Errors building the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0:?}")]
    Config(Vec<ValidationError>),

    #[error("invalid upstream url: {0}")]
    UpstreamUrl(String),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
    pub selector: ConversionSelector,
    pub scope: ConversionScope,
    pub concurrency: Option<Arc<Semaphore>>,
}

impl AppState {
    /// Build state without validating the conversion pair.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ServerError> {
        let url = parse_upstream_url(&config.upstream_url).map_err(ServerError::UpstreamUrl)?;
        let upstream = UpstreamClient::new(url, &config.timeouts)?;
        let concurrency = match config.limits.max_concurrency {
            0 => None,
            n => Some(Arc::new(Semaphore::new(n))),
        };

        Ok(Self {
            upstream,
            selector: config.selector(),
            scope: config.conversion_scope,
            concurrency,
        })
    }
}

/// HTTP server for the conversion proxy.
pub struct HttpServer {
    router: Router,
    routes: RouteTable,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Validate `config` and build the server.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        validate_config(&config).map_err(ServerError::Config)?;
        let state = AppState::from_config(&config)?;
        let routes = RouteTable::single(config.endpoint_path.clone());
        let router = build_router(&config, routes.clone(), state);

        Ok(Self {
            router,
            routes,
            config: Arc::new(config),
        })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        for (path, target) in self.routes.routes() {
            tracing::info!(path = %path, target = ?target, "Route registered");
        }
        tracing::info!(
            address = %addr,
            upstream_url = %self.config.upstream_url,
            selector = %self.config.selector(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ProxyConfig, routes: RouteTable, state: AppState) -> Router {
    routes
        .into_router()
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_size))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
