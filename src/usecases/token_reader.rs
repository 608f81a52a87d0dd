//! Token Balance Reader Use Case - Fail-soft ERC-20 Queries
//!
//! Holds at most one read-only contract binding and answers balance and
//! metadata queries through it. The reader is either Uninitialized (no
//! binding) or Ready (binding present):
//!
//! - `initialize(session)`: Uninitialized/Ready → Ready
//! - `reset()`: any → Uninitialized
//!
//! Queries never return `Err`. Every failure is rendered into the
//! `error` field of the returned `BalanceResult` / `TokenInfo`.
//!
//! The binding sits behind a `RwLock` that is held only to swap or clone
//! the `Arc`, never across a network call. A query in flight when `reset`
//! runs finishes against the binding it started with.
//!
//! Every transition is also published on a `watch` channel so readiness
//! probes can follow the state without polling the lock.

use std::sync::Arc;

use alloy::primitives::Address;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument, warn};

use crate::domain::{BalanceResult, ReaderError, TokenInfo, TokenSettings};
use crate::ports::token_contract::{ContractBinder, TokenContract};

/// Reads balances and metadata of one token contract.
pub struct TokenBalanceReader<B: ContractBinder> {
  binder: B,
  settings: TokenSettings,
  /// `None` while Uninitialized.
  binding: RwLock<Option<Arc<dyn TokenContract>>>,
  /// `true` while Ready. Written under the binding's write lock.
  state_tx: watch::Sender<bool>,
}

impl<B: ContractBinder> TokenBalanceReader<B> {
  /// Create an uninitialized reader.
  pub fn new(binder: B, settings: TokenSettings) -> Self {
    Self {
      binder,
      settings,
      binding: RwLock::new(None),
      state_tx: watch::Sender::new(false),
    }
  }

  /// Subscribe to Ready (`true`) / Uninitialized (`false`) transitions.
  pub fn subscribe_state(&self) -> watch::Receiver<bool> {
    self.state_tx.subscribe()
  }

  /// Settings the reader was constructed with.
  pub const fn settings(&self) -> &TokenSettings {
    &self.settings
  }

  /// Address of the token contract this reader binds to.
  pub const fn contract_address(&self) -> Address {
    self.settings.address
  }

  /// Bind to the token contract through `session`.
  ///
  /// A `None` session fails with `MissingHandle` without touching the
  /// binder. A binder failure is reported as `ExternalCall`. On failure
  /// the current state is left as it was.
  #[instrument(skip_all, fields(token = %self.settings.address))]
  pub async fn initialize(&self, session: Option<&B::Session>) -> Result<(), ReaderError> {
    let Some(session) = session else {
      warn!("Token reader initialize called without a connection handle");
      return Err(ReaderError::MissingHandle);
    };

    let contract = match self.binder.bind(session, self.settings.address).await {
      Ok(contract) => contract,
      Err(e) => {
        warn!(error = %format!("{e:#}"), "Token contract binding failed");
        return Err(ReaderError::external(&e));
      }
    };

    let mut binding = self.binding.write().await;
    *binding = Some(contract);
    self.state_tx.send_replace(true);
    drop(binding);

    info!(symbol = %self.settings.symbol, "Token reader initialized");
    Ok(())
  }

  /// Whether a binding is present.
  pub async fn is_initialized(&self) -> bool {
    self.binding.read().await.is_some()
  }

  /// Drop the binding. Idempotent.
  pub async fn reset(&self) {
    let mut binding = self.binding.write().await;
    if binding.take().is_some() {
      self.state_tx.send_replace(false);
      info!(token = %self.settings.address, "Token reader reset");
    }
  }

  /// Balance of `address` in whole tokens.
  ///
  /// Returns a zero balance with an error note when the reader is not
  /// initialized, the address is empty or malformed, or the call fails.
  #[instrument(skip(self))]
  pub async fn get_balance(&self, address: &str) -> BalanceResult {
    let Some(contract) = self.current().await else {
      debug!("Balance requested before initialization");
      return BalanceResult::failed(&ReaderError::NotInitialized);
    };

    let address = address.trim();
    if address.is_empty() {
      return BalanceResult::failed(&ReaderError::MissingInput("address"));
    }

    let Ok(owner) = address.parse::<Address>() else {
      return BalanceResult::failed(&ReaderError::InvalidAddress(address.to_string()));
    };

    match contract.balance_of(owner).await {
      Ok(raw) => {
        let result = BalanceResult::from_raw(raw, self.settings.decimals, &self.settings.locale);
        debug!(raw = %raw, display = %result.display, "Balance read");
        result
      }
      Err(e) => {
        warn!(error = %format!("{e:#}"), "balanceOf failed");
        BalanceResult::failed(&ReaderError::external(&e))
      }
    }
  }

  /// Token name, symbol and decimals.
  ///
  /// The three calls are issued concurrently and all are awaited. If any
  /// of them fails the configured fallback metadata is returned instead;
  /// partial results are never mixed in.
  #[instrument(skip(self))]
  pub async fn get_token_info(&self) -> TokenInfo {
    let Some(contract) = self.current().await else {
      return TokenInfo::fallback(&self.settings, &ReaderError::NotInitialized);
    };

    let (name, symbol, decimals) =
      tokio::join!(contract.name(), contract.symbol(), contract.decimals());

    match (name, symbol, decimals) {
      (Ok(name), Ok(symbol), Ok(decimals)) => {
        debug!(%name, %symbol, decimals, "Token metadata read");
        TokenInfo {
          name,
          symbol,
          decimals,
          address: self.settings.address,
          error: None,
        }
      }
      (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
        warn!(error = %format!("{e:#}"), "Token metadata query failed, using fallback");
        TokenInfo::fallback(&self.settings, &ReaderError::external(&e))
      }
    }
  }

  /// Clone of the current binding, releasing the lock immediately.
  async fn current(&self) -> Option<Arc<dyn TokenContract>> {
    self.binding.read().await.clone()
  }
}
