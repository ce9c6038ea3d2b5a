//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Fail fast on conversion pairs missing from the dispatch table
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;
use crate::convert::UnsupportedSelector;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("endpoint_path '{0}' must start with '/'")]
    EndpointPath(String),

    #[error("endpoint_path '{0}' must be a literal path (no ':' or '*' segments, no braces)")]
    EndpointPattern(String),

    #[error("upstream_url is not set")]
    MissingUpstream,

    #[error("upstream_url '{url}' is invalid: {reason}")]
    UpstreamUrl { url: String, reason: String },

    #[error(transparent)]
    Selector(#[from] UnsupportedSelector),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("timeouts.request_secs ({request_secs}) must be greater than timeouts.upstream_secs ({upstream_secs})")]
    RequestTimeoutTooShort { request_secs: u64, upstream_secs: u64 },

    #[error("limits.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error("{field} '{value}' is not a socket address")]
    Address { field: &'static str, value: String },

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check `config` for semantic problems.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !config.endpoint_path.starts_with('/') {
        errors.push(ValidationError::EndpointPath(config.endpoint_path.clone()));
    } else if !is_literal_path(&config.endpoint_path) {
        errors.push(ValidationError::EndpointPattern(config.endpoint_path.clone()));
    }

    if config.upstream_url.trim().is_empty() {
        errors.push(ValidationError::MissingUpstream);
    } else if let Err(reason) = parse_upstream_url(&config.upstream_url) {
        errors.push(ValidationError::UpstreamUrl {
            url: config.upstream_url.clone(),
            reason,
        });
    }

    if let Err(e) = config.selector().validate() {
        errors.push(e.into());
    }

    let timeouts = &config.timeouts;
    for (name, secs) in [
        ("connect_secs", timeouts.connect_secs),
        ("upstream_secs", timeouts.upstream_secs),
        ("request_secs", timeouts.request_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }
    // The outer request deadline must leave room for the upstream deadline to fire first.
    if timeouts.upstream_secs > 0 && timeouts.request_secs <= timeouts.upstream_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: timeouts.request_secs,
            upstream_secs: timeouts.upstream_secs,
        });
    }

    if config.limits.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if !resolves(&config.listener.bind_address) {
        errors.push(ValidationError::Address {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::LogLevel(observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Axum treats `:name`, `*name` and `{...}` segments as captures.
fn is_literal_path(path: &str) -> bool {
    !path.contains(['{', '}'])
        && path
            .split('/')
            .all(|segment| !segment.starts_with(':') && !segment.starts_with('*'))
}

/// `host:port` where host is an IP literal or a resolvable name.
fn resolves(address: &str) -> bool {
    address
        .to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false)
}

/// Parse an absolute http(s) URL.
pub fn parse_upstream_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.has_host() {
        return Err("missing host".to_string());
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Script;

    fn valid_config() -> ProxyConfig {
        ProxyConfig {
            upstream_url: "http://up/api".to_string(),
            ..ProxyConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.endpoint_path = "convert".to_string();
        config.upstream_url = String::new();
        config.timeouts.upstream_secs = 0;
        config.listener.bind_address = "nowhere".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EndpointPath("convert".to_string())));
        assert!(errors.contains(&ValidationError::MissingUpstream));
        assert!(errors.contains(&ValidationError::ZeroTimeout("upstream_secs")));
    }

    #[test]
    fn test_unsupported_selector_fails_at_startup() {
        let mut config = valid_config();
        config.source_script = Script::Tw;
        config.dest_script = Script::Hk;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Selector(UnsupportedSelector {
                from: Script::Tw,
                to: Script::Hk,
            })]
        );
    }

    #[test]
    fn test_capture_segments_are_rejected() {
        for path in ["/v1/:model", "/a/*rest", "/a/{id}", "/a/{", "/a}"] {
            let mut config = valid_config();
            config.endpoint_path = path.to_string();
            assert_eq!(
                validate_config(&config),
                Err(vec![ValidationError::EndpointPattern(path.to_string())]),
                "{path}"
            );
        }

        let mut config = valid_config();
        config.endpoint_path = "/v1/chat/completions".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_request_timeout_must_exceed_upstream_timeout() {
        let mut config = valid_config();
        config.timeouts.request_secs = 1;
        config.timeouts.upstream_secs = 30;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::RequestTimeoutTooShort {
                request_secs: 1,
                upstream_secs: 30,
            }])
        );

        config.timeouts.request_secs = 30;
        assert!(validate_config(&config).is_err());

        config.timeouts.request_secs = 31;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_bind_address_accepts_hostnames() {
        let mut config = valid_config();
        config.listener.bind_address = "localhost:8081".to_string();
        assert!(validate_config(&config).is_ok());

        config.listener.bind_address = "localhost".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_upstream_url_rules() {
        assert!(parse_upstream_url("http://up/api").is_ok());
        assert!(parse_upstream_url("https://up:8443/v1").is_ok());
        assert!(parse_upstream_url("ftp://up/api").is_err());
        assert!(parse_upstream_url("/relative").is_err());
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "bad".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
