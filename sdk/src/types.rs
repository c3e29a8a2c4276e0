//! Type definitions for SDK

use alloy_primitives::{Address, B256};
use alloy_sol_types::SolEvent;
use launchpad_types::{Log, Trade};

/// Confirmed transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: B256,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    pub logs: Vec<Log>,
}

impl TxOutcome {
    /// First log of type `E` emitted by `emitter`
    pub fn find_event<E: SolEvent>(&self, emitter: Address) -> Option<(E, &Log)> {
        self.logs
            .iter()
            .filter(|log| log.address == emitter)
            .find_map(|log| {
                E::decode_raw_log(log.topics.iter().copied(), &log.data, true)
                    .ok()
                    .map(|event| (event, log))
            })
    }
}

/// Result of a factory launch
#[derive(Clone, Debug)]
pub struct LaunchOutcome {
    /// Address of the deployed token
    pub token: Address,
    pub outcome: TxOutcome,
}

/// Result of a buy or sell
#[derive(Clone, Debug)]
pub struct TradeOutcome {
    pub trade: Trade,
    pub outcome: TxOutcome,
}
