//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! The token address, decimal scale and fallback metadata are
//! externalized here so tests and deployments can point the reader at
//! a different contract.

pub mod loader;

use std::time::Duration;

use alloy::primitives::Address;
use anyhow::Context;
use serde::Deserialize;

use crate::domain::{
  NumberLocale, TokenSettings, MEDA_GAS_ADDRESS, MEDA_GAS_DECIMALS, MEDA_GAS_NAME,
  MEDA_GAS_SYMBOL,
};

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Service identity and logging.
  pub service: ServiceConfig,
  /// RPC endpoint.
  pub chain: ChainConfig,
  /// Token contract and display settings.
  #[serde(default)]
  pub token: TokenConfig,
  /// Addresses polled by the balance watcher.
  #[serde(default)]
  pub watcher: WatcherConfig,
  /// Metrics and health endpoints.
  #[serde(default)]
  pub metrics: MetricsConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
  /// JSON-RPC endpoint URL.
  pub rpc_url: String,
  /// Reject endpoints serving a different chain when set.
  pub expected_chain_id: Option<u64>,
}

/// Token contract configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
  /// Token contract address (hex).
  #[serde(default = "default_token_address")]
  pub address: String,
  /// Fixed decimal scale for balance conversion.
  #[serde(default = "default_decimals")]
  pub decimals: u8,
  /// Name reported when the contract cannot be queried.
  #[serde(default = "default_fallback_name")]
  pub fallback_name: String,
  /// Symbol reported when the contract cannot be queried.
  #[serde(default = "default_fallback_symbol")]
  pub fallback_symbol: String,
  /// Display locale tag (e.g. `en-US`, `de-DE`).
  #[serde(default = "default_locale")]
  pub locale: String,
}

impl Default for TokenConfig {
  fn default() -> Self {
    Self {
      address: default_token_address(),
      decimals: default_decimals(),
      fallback_name: default_fallback_name(),
      fallback_symbol: default_fallback_symbol(),
      locale: default_locale(),
    }
  }
}

impl TokenConfig {
  /// Convert into reader settings.
  pub fn to_settings(&self) -> anyhow::Result<TokenSettings> {
    let address: Address = self
      .address
      .parse()
      .with_context(|| format!("Invalid token address: {}", self.address))?;

    Ok(TokenSettings {
      address,
      decimals: self.decimals,
      name: self.fallback_name.clone(),
      symbol: self.fallback_symbol.clone(),
      locale: NumberLocale::from_tag(&self.locale),
    })
  }
}

/// Balance watcher configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WatcherConfig {
  /// Addresses to poll.
  #[serde(default)]
  pub addresses: Vec<String>,
  /// Seconds between poll rounds.
  #[serde(default = "default_poll_interval")]
  pub poll_interval_seconds: u64,
}

impl Default for WatcherConfig {
  fn default() -> Self {
    Self {
      addresses: Vec::new(),
      poll_interval_seconds: default_poll_interval(),
    }
  }
}

impl WatcherConfig {
  /// Poll interval as a `Duration`.
  pub const fn poll_interval(&self) -> Duration {
    Duration::from_secs(self.poll_interval_seconds)
  }
}

/// Metrics and health endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
  /// Bind address for /live, /ready and /metrics.
  #[serde(default = "default_metrics_addr")]
  pub bind_address: String,
}

impl Default for MetricsConfig {
  fn default() -> Self {
    Self {
      bind_address: default_metrics_addr(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_token_address() -> String {
  MEDA_GAS_ADDRESS.to_string()
}

const fn default_decimals() -> u8 {
  MEDA_GAS_DECIMALS
}

fn default_fallback_name() -> String {
  MEDA_GAS_NAME.to_string()
}

fn default_fallback_symbol() -> String {
  MEDA_GAS_SYMBOL.to_string()
}

fn default_locale() -> String {
  "en-US".to_string()
}

const fn default_poll_interval() -> u64 {
  30
}

fn default_metrics_addr() -> String {
  "0.0.0.0:9090".to_string()
}
