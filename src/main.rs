//! Script-converting reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──POST──▶ http::server ──▶ http::handler ──▶ upstream::client ──▶ Upstream
//!                                            │
//!     Client ◀──────── http::response ◀── convert (2xx only) ◀──────────────── Upstream
//! ```

use std::path::PathBuf;

use clap::Parser;

use script_proxy::config::{load_config, validate_config};
use script_proxy::lifecycle::{startup, Shutdown};
use script_proxy::observability::logging;

#[derive(Parser)]
#[command(name = "script-proxy")]
#[command(about = "Reverse proxy that converts Chinese script in upstream responses", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Host to listen on, IP literal or resolvable hostname (overrides listener.bind_address)
    #[arg(short = 'l', long)]
    listen_host: Option<String>,

    /// Port to listen on (overrides listener.bind_address)
    #[arg(short = 'p', long)]
    listen_port: Option<u16>,

    /// Enable debug logging (request and response bodies)
    #[arg(short, long)]
    debug: bool,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if cli.listen_host.is_some() || cli.listen_port.is_some() {
        config.listener.bind_address = override_bind_address(
            &config.listener.bind_address,
            cli.listen_host.as_deref(),
            cli.listen_port,
        );
        validate_config(&config).map_err(|errors| format!("invalid listen address: {errors:?}"))?;
    }

    logging::init_logging(&config.observability.log_level, cli.debug);

    tracing::info!(
        config = %cli.config.display(),
        endpoint_path = %config.endpoint_path,
        upstream_url = %config.upstream_url,
        selector = %config.selector(),
        scope = ?config.conversion_scope,
        "Configuration loaded"
    );

    if cli.check {
        println!("configuration OK");
        return Ok(());
    }

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn override_bind_address(current: &str, host: Option<&str>, port: Option<u16>) -> String {
    let (current_host, current_port) = current.rsplit_once(':').unwrap_or((current, "8081"));
    let host = host.unwrap_or(current_host);
    let port = port.map(|p| p.to_string()).unwrap_or_else(|| current_port.to_string());
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_bind_address() {
        assert_eq!(override_bind_address("127.0.0.1:8081", None, Some(9000)), "127.0.0.1:9000");
        assert_eq!(override_bind_address("127.0.0.1:8081", Some("0.0.0.0"), None), "0.0.0.0:8081");
        assert_eq!(override_bind_address("127.0.0.1:8081", Some("::1"), Some(80)), "[::1]:80");
        assert_eq!(override_bind_address("127.0.0.1:8081", Some("localhost"), None), "localhost:8081");
    }
}
