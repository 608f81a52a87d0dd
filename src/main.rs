//! Meda Gas Token Reader — Entry Point
//!
//! Runs the token reader as a small service that polls watched
//! balances and exposes them as metrics. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the wallet session (RPC + chain id check)
//! 4. Initialize the token reader and log token metadata
//! 5. Spawn health/metrics server (/live, /ready, /metrics)
//! 6. Spawn balance watcher + metrics recorder
//! 7. Wait for SIGINT → reset reader → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use meda_token_reader::adapters::chain::{AlloyBinder, WalletSession};
use meda_token_reader::adapters::metrics::{HealthServer, HealthState, ReaderMetrics};
use meda_token_reader::config;
use meda_token_reader::usecases::{BalanceWatcher, TokenBalanceReader};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(path = "config.toml", "Configuration loaded successfully");
    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        token = %config.token.address,
        watched = config.watcher.addresses.len(),
        "Starting Meda Gas token reader"
    );

    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    let metrics = Arc::new(ReaderMetrics::new().context("Failed to register metrics")?);

    // ── 3. Open the wallet session ──────────────────────────
    // A failed connection leaves the reader uninitialized; queries then
    // report "not initialized" and /ready stays 503.
    let session = match WalletSession::connect(&config.chain).await {
        Ok(session) => Some(session),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to open wallet session");
            None
        }
    };

    // ── 4. Initialize the token reader ──────────────────────
    let settings = config.token.to_settings()?;
    let reader = Arc::new(TokenBalanceReader::new(AlloyBinder, settings));
    let health = Arc::new(HealthState::new(Arc::clone(&metrics), reader.subscribe_state()));

    if let Err(e) = reader.initialize(session.as_ref()).await {
        warn!(error = %e, "Token reader not initialized");
    }

    let token = reader.get_token_info().await;
    info!(
        name = %token.name,
        symbol = %token.symbol,
        decimals = token.decimals,
        address = %token.address,
        error = token.error.as_deref().unwrap_or(""),
        "Token metadata"
    );

    // ── 5. Spawn health/metrics server ──────────────────────
    let health_server = HealthServer::new(Arc::clone(&health), config.metrics.bind_address.clone());
    let health_shutdown = shutdown_tx.subscribe();
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.run(health_shutdown).await {
            error!(error = %e, "Health server failed");
        }
    });

    // ── 6. Spawn balance watcher + metrics recorder ─────────
    let (watcher, mut snapshot_rx) = BalanceWatcher::new(
        Arc::clone(&reader),
        config.watcher.addresses.clone(),
        config.watcher.poll_interval(),
    );

    let watcher_shutdown = shutdown_tx.subscribe();
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watcher.run(watcher_shutdown).await {
            error!(error = %e, "Balance watcher failed");
        }
    });

    let recorder_metrics = Arc::clone(&metrics);
    let recorder_handle = tokio::spawn(async move {
        while snapshot_rx.changed().await.is_ok() {
            let snapshots = snapshot_rx.borrow_and_update().clone();
            recorder_metrics.record_snapshots(&snapshots);
        }
    });

    info!("All tasks spawned — reader is running");

    // ── 7. Wait for SIGINT ──────────────────────────────────
    signal::ctrl_c().await.context("Failed to listen for SIGINT")?;
    info!("SIGINT received, initiating graceful shutdown");

    let _ = shutdown_tx.send(());
    reader.reset().await;

    // The recorder ends once the watcher drops its sender.
    let _ = tokio::time::timeout(Duration::from_secs(5), watcher_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(1), recorder_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), health_handle).await;

    info!("Shutdown complete");
    Ok(())
}
