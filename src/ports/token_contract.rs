//! Token Contract Port - Read-only ERC-20 Interface
//!
//! Defines the narrow surface the token reader calls through:
//! - `ContractBinder`: turns a wallet connection handle into a binding
//! - `TokenContract`: the four read-only ERC-20 calls on that binding
//!
//! Adapters implement these with alloy-rs; tests implement them with mockall.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

/// Read-only calls against one deployed ERC-20 contract.
#[async_trait]
pub trait TokenContract: Send + Sync + 'static {
  /// Balance of `owner` in the token's smallest unit.
  async fn balance_of(&self, owner: Address) -> anyhow::Result<U256>;

  /// Number of decimals the token uses.
  async fn decimals(&self) -> anyhow::Result<u8>;

  /// Human-readable token name.
  async fn name(&self) -> anyhow::Result<String>;

  /// Token ticker symbol.
  async fn symbol(&self) -> anyhow::Result<String>;
}

/// Builds contract bindings from a wallet connection handle.
///
/// `Session` is the opaque handle obtained from the wallet or RPC
/// provider. Binding may perform network I/O (e.g. checking that code is
/// deployed at `address`) and may fail.
#[async_trait]
pub trait ContractBinder: Send + Sync + 'static {
  /// Connection handle type accepted by `bind`.
  type Session: Send + Sync + 'static;

  /// Create a read-only binding to the token at `address`.
  async fn bind(
    &self,
    session: &Self::Session,
    address: Address,
  ) -> anyhow::Result<Arc<dyn TokenContract>>;
}
