//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::convert::{ConversionScope, ConversionSelector, Script};

/// Root configuration for the conversion proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Path the proxy accepts POST requests on (e.g., "/convert").
    pub endpoint_path: String,

    /// Absolute URL every request is forwarded to.
    pub upstream_url: String,

    /// Script the upstream responds in.
    pub source_script: Script,

    /// Script returned to callers.
    pub dest_script: Script,

    /// Apply vocabulary-level substitution where the pair supports it.
    pub idiom_convert: bool,

    /// Which parts of a successful upstream body are converted.
    pub conversion_scope: ConversionScope,

    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size and concurrency limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// The conversion every request on this endpoint uses.
    pub fn selector(&self) -> ConversionSelector {
        ConversionSelector::new(self.source_script, self.dest_script, self.idiom_convert)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint_path: "/convert".to_string(),
            upstream_url: String::new(),
            source_script: Script::Hans,
            dest_script: Script::Hant,
            idiom_convert: false,
            conversion_scope: ConversionScope::Body,
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            limits: LimitsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Upstream request timeout (send + full body) in seconds.
    pub upstream_secs: u64,

    /// Inbound request timeout (whole handler) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
            request_secs: 60,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_size: usize,

    /// Maximum requests in flight; 0 disables the cap.
    pub max_concurrency: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_size: 2 * 1024 * 1024, // 2MB
            max_concurrency: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
