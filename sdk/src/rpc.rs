//! Lightweight EVM JSON-RPC client
//!
//! Implements only the methods the launchpad client needs, over a blocking
//! `ureq` agent driven from `spawn_blocking`.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256, U64};
use alloy_sol_types::{Revert, SolError};
use async_trait::async_trait;
use launchpad_types::{
    BlockHeader, ChainRpc, LaunchpadError, LaunchpadResult, Log, LogFilter, TransactionReceipt,
    TransactionRequest,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// JSON-RPC error code geth uses for reverts
const REVERT_CODE: i64 = 3;

/// HTTP JSON-RPC client for an EVM node
pub struct HttpRpc {
    url: String,
    agent: ureq::Agent,
}

/// RPC response wrapper
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

/// RPC error structure
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl RpcErrorBody {
    /// Map a node error onto the shared error type, decoding revert data
    /// when the node returned it
    fn into_error(self) -> LaunchpadError {
        let is_revert = self.code == REVERT_CODE || self.message.to_lowercase().contains("revert");
        if !is_revert {
            return LaunchpadError::rpc_error(&self.message, Some(self.code));
        }

        let decoded = self
            .data
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|hex| hex.parse::<Bytes>().ok())
            .and_then(|raw| Revert::abi_decode(&raw, true).ok())
            .map(|revert| revert.reason);

        let reason = decoded.unwrap_or_else(|| {
            self.message
                .trim_start_matches("execution reverted")
                .trim_start_matches(':')
                .trim()
                .to_string()
        });
        LaunchpadError::reverted(&reason)
    }
}

impl HttpRpc {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .timeout_read(timeout)
            .build();

        Self {
            url: url.to_string(),
            agent,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Make a JSON-RPC call; `Ok(None)` when the node answers `null`
    async fn request_optional<T>(&self, method: &str, params: Value) -> LaunchpadResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let request_body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        debug!("RPC call: {} with params: {}", method, params);

        // Use blocking call since ureq is sync
        let response_body = tokio::task::spawn_blocking({
            let agent = self.agent.clone();
            let url = self.url.clone();
            let body = request_body.to_string();

            move || -> Result<String, String> {
                let response = agent
                    .post(&url)
                    .set("Content-Type", "application/json")
                    .send_string(&body)
                    .map_err(|e| e.to_string())?;
                response.into_string().map_err(|e| e.to_string())
            }
        })
        .await
        .map_err(|e| LaunchpadError::Transport(format!("RPC task failed: {}", e)))?
        .map_err(LaunchpadError::Transport)?;

        let rpc_response: RpcResponse<T> = serde_json::from_str(&response_body)
            .map_err(|e| LaunchpadError::decode_error(method, &e.to_string()))?;

        if let Some(error) = rpc_response.error {
            return Err(error.into_error());
        }

        Ok(rpc_response.result)
    }

    async fn request<T>(&self, method: &str, params: Value) -> LaunchpadResult<T>
    where
        T: DeserializeOwned,
    {
        self.request_optional(method, params)
            .await?
            .ok_or_else(|| LaunchpadError::decode_error(method, "no result in RPC response"))
    }
}

#[async_trait]
impl ChainRpc for HttpRpc {
    async fn chain_id(&self) -> LaunchpadResult<u64> {
        let id: U64 = self.request("eth_chainId", json!([])).await?;
        Ok(id.to::<u64>())
    }

    async fn call(&self, to: Address, data: Bytes) -> LaunchpadResult<Bytes> {
        self.request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> LaunchpadResult<B256> {
        self.request("eth_sendTransaction", json!([tx])).await
    }

    async fn transaction_receipt(&self, hash: B256) -> LaunchpadResult<Option<TransactionReceipt>> {
        self.request_optional("eth_getTransactionReceipt", json!([hash]))
            .await
    }

    async fn logs(&self, filter: &LogFilter) -> LaunchpadResult<Vec<Log>> {
        self.request("eth_getLogs", json!([filter])).await
    }

    async fn balance(&self, account: Address) -> LaunchpadResult<U256> {
        self.request("eth_getBalance", json!([account, "latest"])).await
    }

    async fn block(&self, number: u64) -> LaunchpadResult<Option<BlockHeader>> {
        self.request_optional("eth_getBlockByNumber", json!([format!("{:#x}", number), false]))
            .await
    }
}
