//! CORS forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 CORS PROXY                    │
//!                    │                                               │
//!  Client Request    │  ┌─────────┐   ┌──────────┐   ┌───────────┐ │
//!  ──────────────────┼─▶│  http   │──▶│ forward  │──▶│ transport │─┼──▶ Destination
//!                    │  │ server  │   │  (core)  │   │  (hyper)  │ │    (from `url`
//!                    │  └─────────┘   └──────────┘   └───────────┘ │     parameter)
//!                    │                                               │
//!  Client Response   │  ┌─────────────────────────────────────────┐ │
//!  ◀─────────────────┼──│ relay: status, headers minus            │◀┼─── Destination
//!                    │  │ Content-Disposition, streamed body,     │ │    Response
//!                    │  │ permissive CORS headers                 │ │
//!                    │  └─────────────────────────────────────────┘ │
//!                    │                                               │
//!                    │  Cross-cutting: config, observability,       │
//!                    │  lifecycle (graceful shutdown)               │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_proxy::config::{load_config, ProxyConfig};
use cors_proxy::http::HttpServer;
use cors_proxy::lifecycle::{signals, Shutdown};
use cors_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "cors-proxy")]
#[command(about = "Single-hop HTTP forwarding proxy with permissive CORS", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!("cors-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = ?config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&shutdown).await;
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
