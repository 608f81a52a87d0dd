//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `TokenContract`: Read-only ERC-20 calls
//! - `ContractBinder`: Wallet session to contract binding

pub mod token_contract;

pub use token_contract::{ContractBinder, TokenContract};
