//! Token reader error taxonomy.
//!
//! Every failure the reader can observe maps onto one of these variants.
//! Queries never surface them as `Err`; the rendered message is embedded
//! in the returned `BalanceResult` / `TokenInfo` instead.

use thiserror::Error;

/// Failure conditions observed at the token reader boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// `initialize` was called without a usable connection handle.
    #[error("wallet connection handle is required")]
    MissingHandle,

    /// A query was issued before a successful `initialize`.
    #[error("token reader is not initialized")]
    NotInitialized,

    /// A required argument was empty.
    #[error("{0} is required")]
    MissingInput(&'static str),

    /// The address argument is not a 20-byte hex address.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    /// The provider or contract call failed (network, revert, bad response).
    #[error("contract call failed: {0}")]
    ExternalCall(String),
}

impl ReaderError {
    /// Wrap an adapter error, keeping its full context chain in the message.
    pub fn external(err: &anyhow::Error) -> Self {
        Self::ExternalCall(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_messages_name_the_violation() {
        assert_eq!(
            ReaderError::NotInitialized.to_string(),
            "token reader is not initialized"
        );
        assert_eq!(
            ReaderError::MissingInput("address").to_string(),
            "address is required"
        );
    }

    #[test]
    fn test_external_keeps_context_chain() {
        let err: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
        let err = err.context("balanceOf call failed").unwrap_err();

        let wrapped = ReaderError::external(&err);
        assert_eq!(
            wrapped.to_string(),
            "contract call failed: balanceOf call failed: connection refused"
        );
    }
}
