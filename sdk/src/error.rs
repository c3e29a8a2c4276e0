//! SDK error types

use alloy_primitives::{Address, B256, U256};
use launchpad_types::{LaunchpadError, ERROR_MESSAGE_LIMIT};
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Error raised below the client: transport, revert, decode or math
    #[error(transparent)]
    Launchpad(#[from] LaunchpadError),

    /// Input rejected before anything was sent
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Trading is closed once a token leaves its curve
    #[error("Token {0} has graduated; trading is closed")]
    TokenGraduated(Address),

    /// Insufficient balance
    #[error("Insufficient balance: expected {expected}, available {available}")]
    InsufficientBalance { expected: U256, available: U256 },

    /// No receipt arrived in time
    #[error("Transaction {tx_hash} not confirmed after {waited_secs}s")]
    ConfirmationTimeout { tx_hash: B256, waited_secs: u64 },

    /// Receipt did not carry the expected event
    #[error("Transaction {tx_hash} emitted no {event} event")]
    MissingEvent { tx_hash: B256, event: &'static str },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    /// Message trimmed for one-line display
    pub fn short_message(&self) -> String {
        let full = self.to_string();
        if full.chars().count() <= ERROR_MESSAGE_LIMIT {
            return full;
        }
        let cut: String = full.chars().take(ERROR_MESSAGE_LIMIT).collect();
        format!("{}...", cut)
    }

    /// True for rejections decided on-chain
    pub fn is_revert(&self) -> bool {
        matches!(self, SdkError::Launchpad(e) if e.is_revert())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_truncates() {
        let err = SdkError::Launchpad(LaunchpadError::reverted(&"x".repeat(300)));
        let short = err.short_message();
        assert_eq!(short.chars().count(), ERROR_MESSAGE_LIMIT + 3);
        assert!(short.ends_with("..."));
        assert!(err.is_revert());
    }

    #[test]
    fn test_short_message_keeps_short_errors() {
        let err = SdkError::InvalidParameters("amount must be greater than 0".into());
        assert_eq!(err.short_message(), "Invalid parameters: amount must be greater than 0");
        assert!(!err.is_revert());
    }
}
