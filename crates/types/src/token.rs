//! Token state as read from a bonding-curve contract

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::MAX_PROGRESS;

/// Bonding-curve completion percentage, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Progress(u8);

impl Progress {
    pub const COMPLETE: Progress = Progress(MAX_PROGRESS);

    pub fn new(percent: u8) -> Self {
        Self(percent.min(MAX_PROGRESS))
    }

    /// Build from the raw `getProgress()` word, clamping out-of-range values
    pub fn from_raw(raw: U256) -> Self {
        if raw >= U256::from(MAX_PROGRESS) {
            Self::COMPLETE
        } else {
            Self(raw.to::<u8>())
        }
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 >= MAX_PROGRESS
    }
}

impl From<u8> for Progress {
    fn from(percent: u8) -> Self {
        Self::new(percent)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Snapshot of a launched token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    /// Tokens minted so far, in base units
    pub total_minted: U256,
    pub progress: Progress,
    pub graduated: bool,
    /// Wei per whole token
    pub price: U256,
    pub virtual_eth: U256,
    pub virtual_tokens: U256,
}

impl TokenInfo {
    /// Trading is only open while the token sits on its curve
    pub fn is_tradable(&self) -> bool {
        !self.graduated
    }
}

/// Trade direction against a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "BUY"),
            TradeSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Pre-trade estimate read from the contract's quote getters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeQuote {
    pub side: TradeSide,
    pub input: U256,
    pub estimated_output: U256,
    /// Client-side fee estimate; only known up front for buys
    pub estimated_fee: Option<U256>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamping() {
        assert_eq!(Progress::from_raw(U256::from(42)).percent(), 42);
        assert_eq!(Progress::from_raw(U256::from(250)), Progress::COMPLETE);
        assert_eq!(Progress::from_raw(U256::MAX), Progress::COMPLETE);
        assert_eq!(Progress::new(101).percent(), 100);
        assert!(!Progress::new(99).is_complete());
        assert_eq!(Progress::new(7).to_string(), "7%");
    }

    #[test]
    fn test_progress_deserialize_clamps() {
        let progress: Progress = serde_json::from_str("250").unwrap();
        assert_eq!(progress, Progress::COMPLETE);

        let progress: Progress = serde_json::from_str("64").unwrap();
        assert_eq!(progress.percent(), 64);
        assert_eq!(serde_json::to_string(&progress).unwrap(), "64");
    }
}
