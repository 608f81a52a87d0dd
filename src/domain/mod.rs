//! Domain layer - Token values, units and errors.
//!
//! Pure types with no I/O: the fail-soft result values returned by the
//! reader, the raw-to-human unit conversion, and the error taxonomy.

pub mod error;
pub mod token;
pub mod units;

// Re-export core types for convenience
pub use error::ReaderError;
pub use token::{
    BalanceResult, TokenInfo, TokenSettings, MEDA_GAS_ADDRESS, MEDA_GAS_DECIMALS,
    MEDA_GAS_NAME, MEDA_GAS_SYMBOL,
};
pub use units::NumberLocale;
