use std::sync::Arc;
use std::time::{Duration, Instant};

use alloy_primitives::{Address, B256, U256, U64};
use alloy_sol_types::SolCall;
use launchpad_types::{ChainRpc, LaunchpadError, TransactionRequest};
use tracing::{debug, info};

use crate::config::LaunchpadConfig;
use crate::error::{SdkError, SdkResult};
use crate::types::TxOutcome;

/// How transactions are sent and confirmed
#[derive(Clone, Debug)]
pub struct TxSettings {
    pub from: Option<Address>,
    pub gas_limit: Option<u64>,
    pub confirmation_timeout: Duration,
    pub receipt_poll_interval: Duration,
}

impl TxSettings {
    pub fn from_config(config: &LaunchpadConfig) -> Self {
        Self {
            from: config.account.from,
            gas_limit: config.transactions.gas_limit,
            confirmation_timeout: config.confirmation_timeout(),
            receipt_poll_interval: config.receipt_poll_interval(),
        }
    }
}

/// Base RPC client wrapper for common operations
pub struct BaseClient {
    rpc: Arc<dyn ChainRpc>,
    settings: TxSettings,
}

impl BaseClient {
    pub fn new(rpc: Arc<dyn ChainRpc>, settings: TxSettings) -> Self {
        Self { rpc, settings }
    }

    /// Get the RPC client
    pub fn rpc(&self) -> &dyn ChainRpc {
        self.rpc.as_ref()
    }

    pub fn settings(&self) -> &TxSettings {
        &self.settings
    }

    /// Account transactions are sent from
    pub fn sender(&self) -> SdkResult<Address> {
        self.settings
            .from
            .ok_or_else(|| SdkError::Config("no sender account configured (set account.from or --from)".into()))
    }

    /// `eth_call` a typed contract function and decode its return values
    pub async fn read<C: SolCall>(&self, to: Address, call: &C) -> SdkResult<C::Return> {
        let raw = self.rpc.call(to, call.abi_encode().into()).await?;
        C::abi_decode_returns(&raw, true)
            .map_err(|e| LaunchpadError::decode_error(C::SIGNATURE, &e.to_string()).into())
    }

    /// Send a contract call and wait for its receipt
    pub async fn send<C: SolCall>(&self, to: Address, call: &C, value: Option<U256>) -> SdkResult<TxOutcome> {
        let from = self.sender()?;
        let mut tx = TransactionRequest::new(from, to, call.abi_encode());
        tx.value = value;
        tx.gas = self.settings.gas_limit.map(U64::from);

        info!("Sending {} to {} from {}", C::SIGNATURE, to, from);
        let tx_hash = self.rpc.send_transaction(&tx).await?;
        info!("Submitted transaction {}", tx_hash);

        self.wait_for_receipt(tx_hash).await
    }

    /// Poll for a receipt until it arrives or the confirmation timeout passes
    pub async fn wait_for_receipt(&self, tx_hash: B256) -> SdkResult<TxOutcome> {
        let started = Instant::now();

        loop {
            if let Some(receipt) = self.rpc.transaction_receipt(tx_hash).await? {
                if !receipt.succeeded() {
                    return Err(LaunchpadError::reverted(&format!("transaction {} reverted", tx_hash)).into());
                }

                debug!("Transaction {} confirmed in block {:?}", tx_hash, receipt.block());
                return Ok(TxOutcome {
                    tx_hash,
                    block_number: receipt.block(),
                    gas_used: receipt.gas_used.map(|g| g.to::<u64>()),
                    logs: receipt.logs,
                });
            }

            if started.elapsed() >= self.settings.confirmation_timeout {
                return Err(SdkError::ConfirmationTimeout {
                    tx_hash,
                    waited_secs: started.elapsed().as_secs(),
                });
            }

            tokio::time::sleep(self.settings.receipt_poll_interval).await;
        }
    }
}
