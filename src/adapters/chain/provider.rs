//! Wallet Session - alloy-rs 0.9 RPC Connection
//!
//! A `WalletSession` is the connection handle the token reader binds
//! through. It wraps a type-erased alloy provider together with the chain
//! id the endpoint reported when the session was opened.
//!
//! In alloy 0.9, `ProviderBuilder::new().on_http()` returns a provider
//! over the concrete HTTP transport. `dyn Provider` is only implemented
//! for the boxed transport, so the provider is boxed before erasure.

use std::sync::Arc;

use alloy::providers::{Provider, ProviderBuilder};
use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::ChainConfig;

/// Read-only session with an EVM JSON-RPC endpoint.
///
/// Cheap to clone; clones share the underlying provider.
#[derive(Clone)]
pub struct WalletSession {
    /// The alloy HTTP provider (type-erased).
    provider: Arc<dyn Provider + Send + Sync>,
    /// Chain id reported by the endpoint at connect time.
    chain_id: u64,
}

impl std::fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletSession")
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

impl WalletSession {
    /// Open a session against the configured RPC endpoint.
    ///
    /// Queries the chain id and, when `expected_chain_id` is configured,
    /// rejects an endpoint serving a different chain.
    #[instrument(skip_all)]
    pub async fn connect(config: &ChainConfig) -> Result<Self> {
        let provider = http_provider(&config.rpc_url)?;

        let chain_id = provider
            .get_chain_id()
            .await
            .context("Failed to query chain ID")?;

        if let Some(expected) = config.expected_chain_id {
            anyhow::ensure!(
                chain_id == expected,
                "Expected chain_id={expected}, RPC endpoint reports {chain_id}"
            );
        }

        info!(chain_id, "Wallet session connected");

        Ok(Self { provider, chain_id })
    }

    /// Get a shared reference to the alloy provider (type-erased).
    pub fn inner(&self) -> Arc<dyn Provider + Send + Sync> {
        Arc::clone(&self.provider)
    }

    /// Chain id reported at connect time.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

/// Build a type-erased HTTP provider. No request is sent.
fn http_provider(rpc_url: &str) -> Result<Arc<dyn Provider + Send + Sync>> {
    // alloy 0.9: on_http() is synchronous
    let provider = ProviderBuilder::new().on_http(rpc_url.parse().context("Invalid RPC URL")?);
    Ok(Arc::new(provider.boxed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_provider_erases_transport() {
        assert!(http_provider("http://127.0.0.1:8545").is_ok());
    }

    #[test]
    fn test_http_provider_rejects_bad_url() {
        let err = http_provider("not a url").err().expect("bad URL must be rejected");
        assert!(err.to_string().contains("Invalid RPC URL"));
    }
}
