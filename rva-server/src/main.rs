//! rva-server (Review Analyzer) - main entry point
//!
//! Loads the seed dataset into memory and serves review queries and
//! submissions over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rva_common::config::{Overrides, ServiceConfig};
use rva_common::{LexiconScorer, ReviewService};
use rva_server::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for rva-server
#[derive(Parser, Debug)]
#[command(name = "rva-server")]
#[command(about = "Review sentiment query service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "RVA_PORT")]
    port: Option<u16>,

    /// CSV file with the initial reviews
    #[arg(short, long, env = "RVA_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// TOML config file (port, data_file, locations)
    #[arg(short, long, env = "RVA_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rva_server=debug,rva_common=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Review Analyzer (rva-server) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = ServiceConfig::resolve(Overrides {
        port: args.port,
        data_file: args.data_file,
        config_file: args.config,
    })
    .context("Failed to resolve configuration")?;

    info!("Accepting {} locations", config.locations.len());

    let service = Arc::new(ReviewService::new(config.locations, Arc::new(LexiconScorer::new())));
    let report = service
        .load_csv(&config.data_file)
        .with_context(|| format!("Failed to load reviews from {}", config.data_file.display()))?;
    info!("✓ {} reviews in store", report.loaded);

    let app = build_router(AppState::new(service));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("rva-server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
