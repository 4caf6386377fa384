//! Token-gated demo API service.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                 TIMMY API                      │
//!                    │                                                │
//!   Client Request   │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ dispatch │──▶│  routing   │  │
//!                    │  │ server  │   │   core   │   │   table    │  │
//!                    │  └─────────┘   └────┬─────┘   └─────┬──────┘  │
//!                    │                     │               │         │
//!                    │                     ▼               ▼         │
//!                    │              ┌────────────┐  ┌────────────┐   │
//!                    │              │ middleware │  │  handlers  │   │
//!                    │              │ auth gate  │  │  catalog   │   │
//!                    │              └────────────┘  └────────────┘   │
//!                    │                                               │
//!                    │  ┌─────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns         │  │
//!                    │  │  ┌────────┐ ┌───────┐ ┌──────────────┐  │  │
//!                    │  │  │ config │ │ users │ │observability │  │  │
//!                    │  │  └────────┘ └───────┘ └──────────────┘  │  │
//!                    │  └─────────────────────────────────────────┘  │
//!                    └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use timmy_api::clock::SystemClock;
use timmy_api::config::loader::{load_config, load_default};
use timmy_api::dispatch::Dispatcher;
use timmy_api::http::HttpServer;
use timmy_api::observability;
use timmy_api::routes::build_route_table;
use timmy_api::users::InMemoryUserDirectory;

#[derive(Parser)]
#[command(name = "timmy-api", version, about = "Token-gated demo API service")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply without one;
    /// the `API_TOKEN` environment variable overrides either way.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => load_default()?,
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.listener.request_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Wire the dispatch core: read-only collaborators in, route table out.
    let users = Arc::new(InMemoryUserDirectory::demo());
    let clock = Arc::new(SystemClock);
    let table = build_route_table(&config.auth.api_token, users, clock)?;
    let dispatcher = Arc::new(Dispatcher::new(table));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config, dispatcher);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
