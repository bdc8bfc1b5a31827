//! Server module for the hosts-directory HTTP service
//!
//! This module implements the server-side functionality including:
//! - HTTP routing and handlers (axum)
//! - Storage bootstrap through `hosts_directory_storage`
//! - Hosts-file text export

pub mod commands;
pub mod config;
pub mod hosts_file;
pub mod identity;
pub mod service;
pub mod tracing_setup;

use crate::server::commands::CommandHandler;
use crate::server::config::Config;
use crate::server::service::AppState;
use anyhow::{Context, Result};
use clap::Parser;
use hosts_directory_storage::{create_storage, StorageError};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage initialization failed: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hosts-directory")]
#[command(about = "Host record directory with hosts-file export", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, env = "HOSTS_DIRECTORY_CONFIG", default_value = "./config.toml")]
    pub config: PathBuf,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_file(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    tracing_setup::init(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    info!(config = %cli.config.display(), "hosts-directory starting");

    run_server(config)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

/// Run the HTTP server with the given configuration
///
/// Composition root: builds storage, command handler and router, then serves
/// until a shutdown signal arrives and closes the storage pool.
pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let storage_config = config
        .database
        .storage_config()
        .map_err(|e| ServerError::Config(format!("Invalid database config: {}", e)))?;

    info!(
        backend = ?storage_config.backend,
        max_connections = storage_config.pool.max_connections,
        "Initializing storage"
    );

    // Create storage using the factory function (handles initialization)
    let storage = create_storage(&storage_config).await?;

    let commands = Arc::new(CommandHandler::new(Arc::clone(&storage)));

    let cors = service::cors_layer(&config.cors)
        .map_err(|e| ServerError::Config(format!("Invalid CORS origin: {}", e)))?;
    let app = service::router(AppState::new(commands), cors);

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    info!(address = %listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await?;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolve when Ctrl+C or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use signal::unix::SignalKind;

        match signal::unix::signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = sigterm => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}
