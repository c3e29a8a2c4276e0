//! Records decoded from the contracts' event logs

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::TradeSide;

/// Executed trade, decoded from a `Bought` or `Sold` log
///
/// For a buy the input is ETH and the output tokens; for a sell the input
/// is tokens and the output ETH.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub side: TradeSide,
    pub token: Address,
    pub trader: Address,
    pub input_amount: U256,
    pub output_amount: U256,
    pub fee_amount: U256,
    pub tx_hash: Option<B256>,
    pub block_number: Option<u64>,
    /// Block timestamp in unix seconds, when it could be resolved
    pub timestamp: Option<u64>,
}

impl Trade {
    pub fn eth_amount(&self) -> U256 {
        match self.side {
            TradeSide::Buy => self.input_amount,
            TradeSide::Sell => self.output_amount,
        }
    }

    pub fn token_amount(&self) -> U256 {
        match self.side {
            TradeSide::Buy => self.output_amount,
            TradeSide::Sell => self.input_amount,
        }
    }
}

/// Token deployment, decoded from an `OrgLaunched` log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launch {
    pub token: Address,
    pub creator: Address,
    pub tx_hash: Option<B256>,
    pub block_number: Option<u64>,
}
