//! Forwarding proxy.
//!
//! Accepts any request, resolves a target URL from the `url` query parameter
//! or the request path, swaps in browser-like headers and relays the
//! target's response.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────────┐
//!                   │                   FORWARDING PROXY                   │
//!   Client Request  │  ┌────────┐   ┌─────────┐   ┌─────────┐   ┌────────┐ │
//!   ────────────────┼─▶│  http  │──▶│ routing │──▶│ headers │──▶│upstream│─┼──▶ Target
//!                   │  │ server │   │ target  │   │ rewrite │   │ client │ │
//!   Client Response │  └────────┘   └─────────┘   └─────────┘   └───┬────┘ │
//!   ◀───────────────┼──────────── response relay / 503 / 500 ◀───────┘      │
//!                   │                                                      │
//!                   │   config · observability · lifecycle (shutdown)      │
//!                   └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use forward_proxy::config::load_config;
use forward_proxy::http::status::SERVICE_STATUS;
use forward_proxy::lifecycle::{signals, Shutdown};
use forward_proxy::observability::{logging, metrics};
use forward_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "forward-proxy")]
#[command(about = "HTTP forwarding proxy with browser-like headers", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    logging::init_tracing(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "{} starting...",
        SERVICE_STATUS.message
    );
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        base_origin = %config.upstream.base_origin,
        timeout_secs = config.upstream.timeout_secs,
        max_connections = config.upstream.max_connections,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::forward_signals(shutdown));

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
