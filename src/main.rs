//! DNS Redirector
//!
//! An edge HTTP service that turns DNS TXT records into redirects.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                DNS REDIRECTOR                │
//!                      │                                              │
//!   Client Request     │  ┌─────────┐   ┌──────────┐   ┌──────────┐  │
//!   ──────────────────▶│  │  http   │──▶│ redirect │──▶│   dns    │──┼──▶ DoH resolver
//!                      │  │ server  │   │ resolver │   │  client  │  │    (TXT query)
//!                      │  └────┬────┘   └──────────┘   └──────────┘  │
//!                      │       │                                     │
//!   Client Response    │       ▼                                     │
//!   ◀──────────────────┼── 301 / 302 / 404 / 502                     │
//!                      │                                              │
//!                      │  Cross-cutting: config, observability        │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dns_redirector::config::{load_config, RedirectorConfig};
use dns_redirector::http::HttpServer;
use dns_redirector::observability::metrics;

#[derive(Debug, Parser)]
#[command(name = "dns-redirector", about = "DNS TXT record driven HTTP redirector")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dns_redirector=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("dns-redirector v0.1.0 starting");

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => load_config(&path)?,
        None => RedirectorConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        resolver_endpoint = %config.resolver.endpoint,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics exporter
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
