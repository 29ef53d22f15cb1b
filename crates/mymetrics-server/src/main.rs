//! mymetrics server binary.
//!
//! - Durable storage with optional restore from the snapshot file
//! - HTTP ingestion (path and JSON forms), gzip framing, access log
//! - Final flush on shutdown; a failed flush is a non-zero exit

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use mymetrics_core::{MetricsError, Result};
use mymetrics_server::{
    app_state::AppState,
    config::ServerArgs,
    router, server,
    storage::FileStorage,
};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "mymetrics-server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = ServerArgs::parse().resolve()?;
    tracing::info!(?cfg, "init storage");

    let storage = FileStorage::new(&cfg.file_storage_path, cfg.store_interval());
    if cfg.restore && cfg.file_storage_path.exists() {
        storage.load()?;
    }

    let app = router::build_router(AppState::new(Arc::new(storage.clone())));
    let listener = tokio::net::TcpListener::bind(&cfg.address)
        .await
        .map_err(|e| MetricsError::Io(format!("failed to bind {}: {e}", cfg.address)))?;

    tracing::info!(address = %cfg.address, "mymetrics-server starting");
    let served = server::serve(listener, app, server::shutdown_signal(), cfg.shutdown_grace()).await;
    server::finish(&storage, served)
}
