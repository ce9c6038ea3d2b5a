//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the level: `RUST_LOG`, else `--debug`, else config
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Bodies are logged at debug so production logs stay small

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for the given level.
pub fn default_directive(level: &str, debug: bool) -> String {
    let level = if debug { "debug" } else { level };
    format!("script_proxy={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init_logging(level: &str, debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level, debug)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if let Err(e) = result {
        eprintln!("logging already initialized: {e}");
    }
}
