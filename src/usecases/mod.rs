//! Use Cases Layer - Application Logic
//!
//! Orchestrates domain types with the port interfaces.
//!
//! Use cases:
//! - `TokenBalanceReader`: Fail-soft balance and metadata queries
//! - `BalanceWatcher`: Periodic polling of watched addresses

pub mod balance_watcher;
pub mod token_reader;

pub use balance_watcher::{BalanceSnapshot, BalanceWatcher};
pub use token_reader::TokenBalanceReader;
