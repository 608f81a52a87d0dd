//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use alloy::primitives::Address;
use anyhow::{Context, Result};

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// Runs before the tracing subscriber is installed, so it does not log;
/// the caller reports the loaded configuration.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  parse_config(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty RPC URL
/// - Parseable token and watched addresses
/// - Decimal scale Decimal-representable (at most 28)
/// - Positive poll interval
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.chain.rpc_url.trim().is_empty(),
    "chain.rpc_url must not be empty"
  );

  config
    .token
    .address
    .parse::<Address>()
    .with_context(|| format!("token.address is not a valid address: {}", config.token.address))?;

  anyhow::ensure!(
    config.token.decimals <= 28,
    "token.decimals must be in [0, 28], got {}",
    config.token.decimals
  );

  for (i, address) in config.watcher.addresses.iter().enumerate() {
    address
      .parse::<Address>()
      .with_context(|| format!("watcher.addresses[{i}] is not a valid address: {address}"))?;
  }

  anyhow::ensure!(
    config.watcher.poll_interval_seconds > 0,
    "watcher.poll_interval_seconds must be positive"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{NumberLocale, MEDA_GAS_ADDRESS};

  const MINIMAL: &str = r#"
    [service]
    name = "meda-token-reader"

    [chain]
    rpc_url = "http://localhost:8545"
  "#;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_minimal_config_uses_meda_gas_defaults() {
    let config = parse_config(MINIMAL).unwrap();
    assert_eq!(config.service.log_level, "info");
    assert_eq!(config.chain.expected_chain_id, None);
    assert_eq!(config.watcher.poll_interval_seconds, 30);
    assert_eq!(config.metrics.bind_address, "0.0.0.0:9090");

    let settings = config.token.to_settings().unwrap();
    assert_eq!(settings.address, MEDA_GAS_ADDRESS);
    assert_eq!(settings.decimals, 18);
    assert_eq!(settings.name, "Meda Gas");
    assert_eq!(settings.symbol, "MG");
    assert_eq!(settings.locale, NumberLocale::EN_US);
  }

  #[test]
  fn test_full_config() {
    let content = r#"
      [service]
      name = "mg-reader"
      log_level = "debug"

      [chain]
      rpc_url = "http://localhost:8545"
      expected_chain_id = 137

      [token]
      address = "0x0000000000000000000000000000000000000001"
      decimals = 6
      fallback_name = "Test"
      fallback_symbol = "TST"
      locale = "de-DE"

      [watcher]
      addresses = ["0x00000000000000000000000000000000000000aa"]
      poll_interval_seconds = 5
    "#;

    let config = parse_config(content).unwrap();
    assert_eq!(config.chain.expected_chain_id, Some(137));
    assert_eq!(config.watcher.addresses.len(), 1);
    assert_eq!(config.watcher.poll_interval().as_secs(), 5);

    let settings = config.token.to_settings().unwrap();
    assert_eq!(settings.decimals, 6);
    assert_eq!(settings.symbol, "TST");
    assert_eq!(settings.locale, NumberLocale::DE_DE);
  }

  #[test]
  fn test_rejects_malformed_token_address() {
    let content = format!("{MINIMAL}\n[token]\naddress = \"0x1234\"\n");
    assert!(parse_config(&content).is_err());
  }

  #[test]
  fn test_rejects_malformed_watched_address() {
    let content = format!("{MINIMAL}\n[watcher]\naddresses = [\"not-an-address\"]\n");
    assert!(parse_config(&content).is_err());
  }

  #[test]
  fn test_rejects_zero_poll_interval() {
    let content = format!("{MINIMAL}\n[watcher]\npoll_interval_seconds = 0\n");
    assert!(parse_config(&content).is_err());
  }

  #[test]
  fn test_rejects_empty_rpc_url() {
    let content = r#"
      [service]
      name = "x"

      [chain]
      rpc_url = ""
    "#;
    assert!(parse_config(content).is_err());
  }
}
