//! Prometheus Metrics Registry - Token Reader Observability
//!
//! Registers the reader's metrics and renders them in the text
//! exposition format for the `/metrics` endpoint.

use prometheus::{Encoder, Gauge, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};

use crate::usecases::BalanceSnapshot;

/// Centralized Prometheus metrics for the token reader.
///
/// All metrics follow the naming convention `token_reader_*`.
pub struct ReaderMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Balance polls by outcome (`ok` / `error`).
    pub polls: IntCounterVec,
    /// Last polled balance per address, in whole tokens.
    pub balance: GaugeVec,
    /// 1 while the reader holds a contract binding.
    pub initialized: Gauge,
    /// Unix timestamp of the last completed poll round.
    pub last_poll_timestamp: Gauge,
}

impl ReaderMetrics {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let polls = IntCounterVec::new(
            Opts::new("token_reader_polls_total", "Balance polls by outcome"),
            &["outcome"],
        )?;

        let balance = GaugeVec::new(
            Opts::new(
                "token_reader_balance",
                "Last polled token balance in whole tokens",
            ),
            &["address"],
        )?;

        let initialized = Gauge::new(
            "token_reader_initialized",
            "Whether the reader holds a contract binding (1=yes, 0=no)",
        )?;

        let last_poll_timestamp = Gauge::new(
            "token_reader_last_poll_timestamp_seconds",
            "Unix timestamp of the last completed poll round",
        )?;

        registry.register(Box::new(polls.clone()))?;
        registry.register(Box::new(balance.clone()))?;
        registry.register(Box::new(initialized.clone()))?;
        registry.register(Box::new(last_poll_timestamp.clone()))?;

        Ok(Self {
            registry,
            polls,
            balance,
            initialized,
            last_poll_timestamp,
        })
    }

    /// Record the reader's binding state.
    pub fn set_initialized(&self, initialized: bool) {
        self.initialized.set(if initialized { 1.0 } else { 0.0 });
    }

    /// Record one poll round.
    ///
    /// Failed polls bump the error counter but leave the balance gauge at
    /// its last good value.
    pub fn record_snapshots(&self, snapshots: &[BalanceSnapshot]) {
        for snapshot in snapshots {
            if snapshot.result.is_ok() {
                self.polls.with_label_values(&["ok"]).inc();
                self.balance
                    .with_label_values(&[snapshot.address.as_str()])
                    .set(snapshot.result.value);
            } else {
                self.polls.with_label_values(&["error"]).inc();
            }
        }

        if let Some(latest) = snapshots.iter().map(|s| s.taken_at).max() {
            #[allow(clippy::cast_precision_loss)]
            self.last_poll_timestamp.set(latest.timestamp() as f64);
        }
    }

    /// Render all metrics in the Prometheus text format.
    pub fn gather_text(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
