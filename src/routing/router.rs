//! Route table and dispatch.
//!
//! # Responsibilities
//! - Store the path → handler mapping built at startup
//! - Expose it for inspection (startup logs, tests)
//! - Compile it into an axum `Router`
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact path matching; only POST is routed
//! - Unknown paths fall through to axum's 404, other methods to 405

use std::collections::BTreeMap;

use axum::routing::post;
use axum::Router;

use crate::http::handler::proxy_handler;
use crate::http::server::AppState;

/// Handler bound to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Forward upstream and convert the response.
    ConvertProxy,
}

/// Inspectable mapping from request path to handler.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: BTreeMap<String, RouteTarget>,
}

impl RouteTable {
    /// The single-endpoint table used by the proxy.
    pub fn single(path: impl Into<String>) -> Self {
        let mut table = Self::default();
        table.insert(path, RouteTarget::ConvertProxy);
        table
    }

    pub fn insert(&mut self, path: impl Into<String>, target: RouteTarget) {
        self.routes.insert(path.into(), target);
    }

    pub fn get(&self, path: &str) -> Option<RouteTarget> {
        self.routes.get(path).copied()
    }

    pub fn routes(&self) -> impl Iterator<Item = (&str, RouteTarget)> {
        self.routes.iter().map(|(path, target)| (path.as_str(), *target))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build the axum router for this table.
    pub fn into_router(self) -> Router<AppState> {
        self.routes
            .into_iter()
            .fold(Router::new(), |router, (path, target)| match target {
                RouteTarget::ConvertProxy => router.route(&path, post(proxy_handler)),
            })
    }
}
