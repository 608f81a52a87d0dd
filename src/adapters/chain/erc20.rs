//! ERC-20 Contract Binding - Read-only Token Calls
//!
//! Implements the `TokenContract` and `ContractBinder` ports over alloy-rs.
//! Calls are ABI-encoded with `sol!`-generated call types and sent as
//! plain `eth_call` requests through the session's type-erased provider.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::Provider;
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tracing::{info, instrument};

use crate::ports::token_contract::{ContractBinder, TokenContract};

use super::provider::WalletSession;

sol! {
    /// Read-only subset of the ERC-20 interface.
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function decimals() external view returns (uint8);
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
    }
}

/// One deployed ERC-20 contract reached through an alloy provider.
pub struct Erc20Contract {
    provider: Arc<dyn Provider + Send + Sync>,
    address: Address,
}

impl Erc20Contract {
    /// Bind to `address` without any on-chain check.
    pub fn new(provider: Arc<dyn Provider + Send + Sync>, address: Address) -> Self {
        Self { provider, address }
    }

    /// Send `call` as an `eth_call` and decode its return data.
    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return> {
        let tx = TransactionRequest::default()
            .to(self.address)
            .input(Bytes::from(call.abi_encode()).into());

        let output = self
            .provider
            .call(&tx)
            .await
            .with_context(|| format!("{} call to {} failed", C::SIGNATURE, self.address))?;

        C::abi_decode_returns(&output, true)
            .with_context(|| format!("Malformed {} response", C::SIGNATURE))
    }
}

#[async_trait]
impl TokenContract for Erc20Contract {
    async fn balance_of(&self, owner: Address) -> Result<U256> {
        Ok(self.read(IERC20::balanceOfCall { account: owner }).await?._0)
    }

    async fn decimals(&self) -> Result<u8> {
        Ok(self.read(IERC20::decimalsCall {}).await?._0)
    }

    async fn name(&self) -> Result<String> {
        Ok(self.read(IERC20::nameCall {}).await?._0)
    }

    async fn symbol(&self) -> Result<String> {
        Ok(self.read(IERC20::symbolCall {}).await?._0)
    }
}

/// Binds `Erc20Contract`s through a `WalletSession`.
///
/// Refuses to bind when no code is deployed at the token address, so a
/// wrong address or wrong chain fails at initialization instead of on
/// every query.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlloyBinder;

#[async_trait]
impl ContractBinder for AlloyBinder {
    type Session = WalletSession;

    #[instrument(skip(self, session), fields(chain_id = session.chain_id()))]
    async fn bind(
        &self,
        session: &WalletSession,
        address: Address,
    ) -> Result<Arc<dyn TokenContract>> {
        let provider = session.inner();

        let code = provider
            .get_code_at(address)
            .await
            .with_context(|| format!("Failed to query code at {address}"))?;

        if code.is_empty() {
            bail!("Token contract at {address} has no deployed code");
        }

        info!(address = %address, "Token contract validated on-chain");

        Ok(Arc::new(Erc20Contract::new(provider, address)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_of_calldata_layout() {
        let owner: Address = "0x00000000000000000000000000000000000000aa"
            .parse()
            .unwrap();
        let data = IERC20::balanceOfCall { account: owner }.abi_encode();

        // 4-byte selector + one left-padded address word
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(data[35], 0xaa);
    }

    #[test]
    fn test_decimals_return_decoding() {
        let mut word = [0u8; 32];
        word[31] = 18;
        let decoded = IERC20::decimalsCall::abi_decode_returns(&word, true).unwrap();
        assert_eq!(decoded._0, 18);
    }

    #[test]
    fn test_truncated_return_is_rejected() {
        assert!(IERC20::balanceOfCall::abi_decode_returns(&[0u8; 8], true).is_err());
    }
}
