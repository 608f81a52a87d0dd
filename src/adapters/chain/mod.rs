//! Chain Adapters - EVM Blockchain Access Layer
//!
//! Provides read-only on-chain access via alloy-rs 0.9 for:
//! - RPC session management with chain id validation
//! - ERC-20 bindings implementing the token contract ports

pub mod erc20;
pub mod provider;

pub use erc20::{AlloyBinder, Erc20Contract};
pub use provider::WalletSession;
