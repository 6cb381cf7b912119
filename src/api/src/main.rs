//! F1 Race Data API
//!
//! REST API and CLI answering race queries (fastest lap, schedule,
//! entrants) from the historical F1 dataset.

mod cli;
mod config;
mod dataset;
mod retry;
mod routes;
mod types;

use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::dataset::DatasetHandle;
use crate::retry::{retry_blocking, RetryConfig};
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for query output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "f1_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_file = cli.config.as_deref();

    match cli.command {
        Commands::Serve { host, port } => run_server(config_file, host, port).await,
        Commands::FastestLap {
            year,
            round,
            output,
        } => cli::run_fastest_lap(config_file, year, round, output),
        Commands::Schedule { year, output } => cli::run_schedule(config_file, year, output),
        Commands::Entrants {
            year,
            round,
            output,
        } => cli::run_entrants(config_file, year, round, output),
    }
}

/// Run the API server.
async fn run_server(
    config_file: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    // Load configuration
    let mut config = AppConfig::load_from(config_file)?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Dataset directory: {}", config.dataset.dir);

    let sources = config.dataset.sources();
    let dataset = if config.dataset.preload {
        tracing::info!("Preloading dataset tables...");
        let retry_config = RetryConfig::dataset_load(config.dataset.load_retries);
        retry_blocking(&retry_config, "Load dataset tables", move || {
            DatasetHandle::preload(sources.clone())
        })
        .await?
    } else {
        tracing::info!("Dataset tables will be loaded per request");
        DatasetHandle::PerRequest { sources }
    };

    let state = Arc::new(AppState { dataset });
    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
