//! JSON-RPC wire types and the chain access seam

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};

use crate::LaunchpadResult;

/// Transaction submitted through `eth_sendTransaction`
///
/// The node or wallet owning `from` is responsible for nonce, gas price
/// and signing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    pub data: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<U64>,
}

impl TransactionRequest {
    pub fn new(from: Address, to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            from,
            to,
            value: None,
            data: data.into(),
            gas: None,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

/// Receipt returned by `eth_getTransactionReceipt`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// 1 on success, 0 on revert
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub gas_used: Option<U64>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map(|s| s == U64::from(1)).unwrap_or(false)
    }

    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

/// Event log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub block_number: Option<U64>,
    #[serde(default)]
    pub transaction_hash: Option<B256>,
    #[serde(default)]
    pub log_index: Option<U64>,
}

impl Log {
    /// Sort key placing logs in chain order
    pub fn position(&self) -> (u64, u64) {
        (
            self.block_number.map(|n| n.to::<u64>()).unwrap_or(0),
            self.log_index.map(|n| n.to::<u64>()).unwrap_or(0),
        )
    }
}

/// Block selector for filters and state reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockTag {
    Earliest,
    #[default]
    Latest,
    Number(u64),
}

impl Serialize for BlockTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BlockTag::Earliest => serializer.serialize_str("earliest"),
            BlockTag::Latest => serializer.serialize_str("latest"),
            BlockTag::Number(n) => serializer.serialize_str(&format!("{:#x}", n)),
        }
    }
}

/// Filter for `eth_getLogs`
///
/// `topics[0]` is the event signature; later positions match indexed
/// arguments, with `None` as a wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub address: Address,
    pub topics: Vec<Option<B256>>,
    pub from_block: BlockTag,
    pub to_block: BlockTag,
}

impl LogFilter {
    pub fn new(address: Address, signature: B256) -> Self {
        Self {
            address,
            topics: vec![Some(signature)],
            from_block: BlockTag::Earliest,
            to_block: BlockTag::Latest,
        }
    }

    /// Restrict an indexed argument (1-based position after the signature)
    pub fn with_topic(mut self, position: usize, value: B256) -> Self {
        if self.topics.len() <= position {
            self.topics.resize(position + 1, None);
        }
        self.topics[position] = Some(value);
        self
    }

    pub fn from_block(mut self, block: BlockTag) -> Self {
        self.from_block = block;
        self
    }

    /// Whether a log satisfies this filter
    pub fn matches(&self, log: &Log) -> bool {
        if log.address != self.address {
            return false;
        }
        if let BlockTag::Number(from) = self.from_block {
            if log.position().0 < from {
                return false;
            }
        }
        if let BlockTag::Number(to) = self.to_block {
            if log.position().0 > to {
                return false;
            }
        }
        self.topics.iter().enumerate().all(|(i, wanted)| match wanted {
            Some(topic) => log.topics.get(i) == Some(topic),
            None => true,
        })
    }
}

/// Subset of `eth_getBlockByNumber` used for trade timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: U64,
    pub timestamp: U64,
}

/// Read and write access to an EVM chain
///
/// Implemented over HTTP JSON-RPC by the SDK and in memory by the
/// simulation crate.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// `eth_chainId`
    async fn chain_id(&self) -> LaunchpadResult<u64>;

    /// `eth_call` against the latest block
    async fn call(&self, to: Address, data: Bytes) -> LaunchpadResult<Bytes>;

    /// `eth_sendTransaction`, returning the transaction hash
    async fn send_transaction(&self, tx: &TransactionRequest) -> LaunchpadResult<B256>;

    /// `eth_getTransactionReceipt`; `None` while pending
    async fn transaction_receipt(&self, hash: B256) -> LaunchpadResult<Option<TransactionReceipt>>;

    /// `eth_getLogs`
    async fn logs(&self, filter: &LogFilter) -> LaunchpadResult<Vec<Log>>;

    /// `eth_getBalance` at the latest block
    async fn balance(&self, account: Address) -> LaunchpadResult<U256>;

    /// `eth_getBlockByNumber` without transaction bodies
    async fn block(&self, number: u64) -> LaunchpadResult<Option<BlockHeader>>;
}
