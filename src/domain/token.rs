//! Token reader value types.
//!
//! `BalanceResult` and `TokenInfo` are fail-soft: they are always produced,
//! and a failure is carried in their `error` field rather than returned as
//! `Err`. Presentation code can render them directly.

use alloy::primitives::{address, Address, U256};

use super::error::ReaderError;
use super::units::{self, NumberLocale};

/// Default Meda Gas token contract.
pub const MEDA_GAS_ADDRESS: Address = address!("8d3e2f6a9b17c04d5e2a1f37b6c9d0e84a5f1c27");

/// Meda Gas decimal scale.
pub const MEDA_GAS_DECIMALS: u8 = 18;

/// Meda Gas display name.
pub const MEDA_GAS_NAME: &str = "Meda Gas";

/// Meda Gas ticker symbol.
pub const MEDA_GAS_SYMBOL: &str = "MG";

/// Construction-time settings of a token reader.
///
/// `decimals`, `name` and `symbol` double as the fallback metadata
/// reported when the contract cannot be queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSettings {
    /// Token contract address.
    pub address: Address,
    /// Fixed decimal scale used to convert raw balances.
    pub decimals: u8,
    /// Fallback token name.
    pub name: String,
    /// Fallback token symbol.
    pub symbol: String,
    /// Display formatting conventions.
    pub locale: NumberLocale,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            address: MEDA_GAS_ADDRESS,
            decimals: MEDA_GAS_DECIMALS,
            name: MEDA_GAS_NAME.to_string(),
            symbol: MEDA_GAS_SYMBOL.to_string(),
            locale: NumberLocale::default(),
        }
    }
}

/// Balance of one address.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceResult {
    /// Amount in the token's smallest unit.
    pub raw: U256,
    /// Decimal-adjusted amount.
    pub value: f64,
    /// Locale-formatted amount, at most two fraction digits.
    pub display: String,
    /// Failure description, `None` on success.
    pub error: Option<String>,
}

impl BalanceResult {
    /// Successful balance converted with the given scale and locale.
    pub fn from_raw(raw: U256, decimals: u8, locale: &NumberLocale) -> Self {
        Self {
            raw,
            value: units::to_decimal_value(raw, decimals),
            display: units::format_display(raw, decimals, locale),
            error: None,
        }
    }

    /// Zero balance carrying the failure.
    pub fn failed(err: &ReaderError) -> Self {
        Self {
            raw: U256::ZERO,
            value: 0.0,
            display: "0".to_string(),
            error: Some(err.to_string()),
        }
    }

    /// Whether the balance was read successfully.
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Static token metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Contract the metadata belongs to.
    pub address: Address,
    /// Failure description, `None` when read from the contract.
    pub error: Option<String>,
}

impl TokenInfo {
    /// Compiled-in metadata from `settings` with a failure note.
    pub fn fallback(settings: &TokenSettings, err: &ReaderError) -> Self {
        Self {
            name: settings.name.clone(),
            symbol: settings.symbol.clone(),
            decimals: settings.decimals,
            address: settings.address,
            error: Some(err.to_string()),
        }
    }

    /// Whether the metadata came from the contract.
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_meda_gas() {
        let settings = TokenSettings::default();
        assert_eq!(settings.address, MEDA_GAS_ADDRESS);
        assert_eq!(settings.decimals, 18);
        assert_eq!(settings.name, "Meda Gas");
        assert_eq!(settings.symbol, "MG");
    }

    #[test]
    fn test_failed_balance_is_zero() {
        let result = BalanceResult::failed(&ReaderError::NotInitialized);
        assert_eq!(result.raw, U256::ZERO);
        assert_eq!(result.value, 0.0);
        assert_eq!(result.display, "0");
        assert!(!result.is_ok());
        assert_eq!(
            result.error.as_deref(),
            Some("token reader is not initialized")
        );
    }

    #[test]
    fn test_fallback_info_uses_settings() {
        let settings = TokenSettings {
            name: "Test Token".to_string(),
            symbol: "TT".to_string(),
            decimals: 6,
            ..TokenSettings::default()
        };

        let info = TokenInfo::fallback(&settings, &ReaderError::NotInitialized);
        assert_eq!(info.name, "Test Token");
        assert_eq!(info.symbol, "TT");
        assert_eq!(info.decimals, 6);
        assert_eq!(info.address, MEDA_GAS_ADDRESS);
        assert!(!info.is_ok());
    }
}
