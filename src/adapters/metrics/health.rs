//! Health Check Server - Liveness, Readiness and Metrics
//!
//! Exposes /live, /ready and /metrics via axum 0.7. Readiness follows
//! the token reader's binding state through its state channel.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tokio::sync::{broadcast, watch};
use tracing::{error, info, instrument};

use super::prometheus::ReaderMetrics;

/// Shared health state polled by readiness probes.
pub struct HealthState {
    /// Reader state from `TokenBalanceReader::subscribe_state`.
    reader_state: watch::Receiver<bool>,
    /// Metrics rendered on /metrics.
    metrics: Arc<ReaderMetrics>,
}

impl HealthState {
    /// Create a health state following `reader_state`.
    pub fn new(metrics: Arc<ReaderMetrics>, reader_state: watch::Receiver<bool>) -> Self {
        Self {
            reader_state,
            metrics,
        }
    }

    /// Check if the reader can serve queries.
    pub fn is_ready(&self) -> bool {
        let ready = *self.reader_state.borrow();
        self.metrics.set_initialized(ready);
        ready
    }
}

/// Axum-based health and metrics HTTP server.
pub struct HealthServer {
    /// Health state shared with the wiring in `main`.
    state: Arc<HealthState>,
    /// Bind address (e.g. `0.0.0.0:9090`).
    bind_address: String,
}

impl HealthServer {
    /// Create a new health server.
    pub fn new(state: Arc<HealthState>, bind_address: String) -> Self {
        Self {
            state,
            bind_address,
        }
    }

    /// Build the router without binding a socket.
    pub fn router(state: Arc<HealthState>) -> Router {
        Router::new()
            .route("/live", get(Self::liveness))
            .route("/ready", get(Self::readiness))
            .route("/metrics", get(Self::metrics))
            .with_state(state)
    }

    /// Serve until the shutdown broadcast fires.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let app = Self::router(Arc::clone(&self.state));
        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;

        info!(address = %self.bind_address, "Health server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }

    /// Liveness probe: always returns 200 if the process is running.
    async fn liveness() -> impl IntoResponse {
        (StatusCode::OK, "OK")
    }

    /// Readiness probe: returns 200 only while the reader is initialized.
    async fn readiness(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
        if state.is_ready() {
            (StatusCode::OK, "READY")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
        }
    }

    /// Prometheus text exposition.
    async fn metrics(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
        state.is_ready();
        match state.metrics.gather_text() {
            Ok(body) => (StatusCode::OK, body),
            Err(e) => {
                error!(error = %e, "Failed to encode metrics");
                (StatusCode::INTERNAL_SERVER_ERROR, String::new())
            }
        }
    }
}
