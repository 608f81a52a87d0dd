//! Balance Watcher Use Case - Periodic Balance Polling
//!
//! Polls a fixed list of addresses through the token reader on an
//! interval and broadcasts the latest round via a `tokio::sync::watch`
//! channel. Consumers (metrics, logs) subscribe to the receiver.
//!
//! Failed reads are published like successful ones; the error lives in
//! each snapshot's `BalanceResult`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, instrument, warn};

use crate::domain::BalanceResult;
use crate::ports::token_contract::ContractBinder;

use super::token_reader::TokenBalanceReader;

/// Balance of one watched address at a point in time.
#[derive(Debug, Clone)]
pub struct BalanceSnapshot {
  /// Address as configured.
  pub address: String,
  /// Result of the balance query.
  pub result: BalanceResult,
  /// When the query completed.
  pub taken_at: DateTime<Utc>,
}

/// Polls watched addresses and publishes their balances.
pub struct BalanceWatcher<B: ContractBinder> {
  reader: Arc<TokenBalanceReader<B>>,
  addresses: Vec<String>,
  interval: Duration,
  snapshot_tx: watch::Sender<Vec<BalanceSnapshot>>,
}

impl<B: ContractBinder> BalanceWatcher<B> {
  /// Create a watcher and the receiver its rounds are published on.
  pub fn new(
    reader: Arc<TokenBalanceReader<B>>,
    addresses: Vec<String>,
    interval: Duration,
  ) -> (Self, watch::Receiver<Vec<BalanceSnapshot>>) {
    let (snapshot_tx, snapshot_rx) = watch::channel(Vec::new());

    let watcher = Self {
      reader,
      addresses,
      interval,
      snapshot_tx,
    };

    (watcher, snapshot_rx)
  }

  /// Query every watched address once and publish the round.
  pub async fn poll_once(&self) -> Vec<BalanceSnapshot> {
    let mut snapshots = Vec::with_capacity(self.addresses.len());

    for address in &self.addresses {
      let result = self.reader.get_balance(address).await;
      if let Some(ref e) = result.error {
        warn!(address = %address, error = %e, "Balance poll failed");
      } else {
        debug!(address = %address, balance = %result.display, "Balance polled");
      }

      snapshots.push(BalanceSnapshot {
        address: address.clone(),
        result,
        taken_at: Utc::now(),
      });
    }

    if self.snapshot_tx.send(snapshots.clone()).is_err() {
      debug!("No balance subscribers, round dropped");
    }

    snapshots
  }

  /// Poll immediately, then every interval, until shutdown.
  #[instrument(skip(self, shutdown_rx), fields(addresses = self.addresses.len()))]
  pub async fn run(&self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
    info!(
      interval_secs = self.interval.as_secs(),
      "Balance watcher started"
    );

    self.poll_once().await;

    loop {
      tokio::select! {
        biased;
        _ = shutdown_rx.recv() => {
          info!("Balance watcher shutting down");
          return Ok(());
        }
        () = tokio::time::sleep(self.interval) => {
          self.poll_once().await;
        }
      }
    }
  }
}
