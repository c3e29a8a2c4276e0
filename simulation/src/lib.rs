/// In-memory chain for exercising the launchpad client
///
/// Provides:
/// - A factory and per-token bonding curves played in process
/// - The `ChainRpc` seam, so SDK code runs unchanged against it
/// - Hooks for funding accounts and injecting failures
/// - A ready-made test environment with funded accounts

pub mod bonding_token;
pub mod test_environment;
pub mod token_factory;

pub use bonding_token::*;
pub use test_environment::*;
pub use token_factory::*;

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use alloy_primitives::{keccak256, Address, Bytes, LogData, B256, U256, U64};
use async_trait::async_trait;
use launchpad_math::{safe_add, safe_sub, CurveParams};
use launchpad_types::{
    BlockHeader, ChainRpc, LaunchpadError, LaunchpadResult, Log, LogFilter, TransactionReceipt,
    TransactionRequest, CORE_CHAIN_ID, DEFAULT_FACTORY_ADDRESS,
};
use tracing::{debug, info};

/// Basic simulation configuration
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub chain_id: u64,
    pub factory: Address,
    /// Receives trading fees
    pub fee_recipient: Address,
    pub genesis_timestamp: u64,
    pub block_time_secs: u64,
    pub curve: CurveParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            chain_id: CORE_CHAIN_ID,
            factory: DEFAULT_FACTORY_ADDRESS,
            fee_recipient: Address::repeat_byte(0xfe),
            genesis_timestamp: 1_700_000_000,
            block_time_secs: 3,
            curve: CurveParams::default(),
        }
    }
}

/// Account balances and contract storage; cloned per transaction so a
/// revert leaves nothing behind
#[derive(Debug, Clone)]
struct Ledger {
    balances: HashMap<Address, U256>,
    factory: TokenFactory,
    tokens: HashMap<Address, BondingToken>,
}

impl Ledger {
    fn balance(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn credit(&mut self, account: Address, amount: U256) -> LaunchpadResult<()> {
        let balance = safe_add(self.balance(&account), amount)?;
        self.balances.insert(account, balance);
        Ok(())
    }

    fn debit(&mut self, account: Address, amount: U256) -> LaunchpadResult<()> {
        let balance = self.balance(&account);
        if balance < amount {
            return Err(LaunchpadError::reverted("insufficient balance for transfer"));
        }
        self.balances.insert(account, balance - amount);
        Ok(())
    }
}

#[derive(Debug)]
struct ChainState {
    ledger: Ledger,
    block_number: u64,
    tx_count: u64,
    receipts: HashMap<B256, TransactionReceipt>,
    logs: Vec<Log>,
    broken: HashSet<Address>,
    withhold_receipts: bool,
}

/// Single-node chain with instant mining: every transaction gets its own block
#[derive(Debug)]
pub struct SimulatedChain {
    config: SimulationConfig,
    state: Mutex<ChainState>,
}

impl SimulatedChain {
    pub fn new(config: SimulationConfig) -> Self {
        let factory = TokenFactory::new(config.factory, config.curve);
        info!("Simulated chain {} with factory {}", config.chain_id, config.factory);

        Self {
            config,
            state: Mutex::new(ChainState {
                ledger: Ledger {
                    balances: HashMap::new(),
                    factory,
                    tokens: HashMap::new(),
                },
                block_number: 0,
                tx_count: 0,
                receipts: HashMap::new(),
                logs: Vec::new(),
                broken: HashSet::new(),
                withhold_receipts: false,
            }),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn state(&self) -> LaunchpadResult<MutexGuard<'_, ChainState>> {
        self.state
            .lock()
            .map_err(|_| LaunchpadError::generic("simulated chain state lock poisoned"))
    }

    /// Credit native currency to an account
    pub fn fund(&self, account: Address, amount: U256) -> LaunchpadResult<()> {
        self.state()?.ledger.credit(account, amount)
    }

    /// Append a raw entry to the factory's token array
    pub fn insert_slot(&self, token: Address) -> LaunchpadResult<()> {
        self.state()?.ledger.factory.push_slot(token);
        Ok(())
    }

    /// Make every `eth_call` to `contract` revert
    pub fn break_contract(&self, contract: Address) -> LaunchpadResult<()> {
        self.state()?.broken.insert(contract);
        Ok(())
    }

    /// While set, receipts stay pending forever
    pub fn withhold_receipts(&self, withhold: bool) -> LaunchpadResult<()> {
        self.state()?.withhold_receipts = withhold;
        Ok(())
    }

    /// Transactions accepted so far, reverted ones included
    pub fn transaction_count(&self) -> LaunchpadResult<u64> {
        Ok(self.state()?.tx_count)
    }

    pub fn block_number(&self) -> LaunchpadResult<u64> {
        Ok(self.state()?.block_number)
    }

    /// Snapshot of a deployed token's contract state
    pub fn token(&self, address: Address) -> LaunchpadResult<Option<BondingToken>> {
        Ok(self.state()?.ledger.tokens.get(&address).cloned())
    }

    /// Addresses in the factory's token array
    pub fn deployed_tokens(&self) -> LaunchpadResult<Vec<Address>> {
        Ok(self.state()?.ledger.factory.tokens().to_vec())
    }

    fn timestamp_of(&self, block: u64) -> u64 {
        self.config.genesis_timestamp + block * self.config.block_time_secs
    }

    fn transaction_hash(tx: &TransactionRequest, nonce: u64) -> B256 {
        let mut preimage = Vec::with_capacity(28 + tx.data.len());
        preimage.extend_from_slice(tx.from.as_slice());
        preimage.extend_from_slice(&nonce.to_be_bytes());
        preimage.extend_from_slice(&tx.data);
        keccak256(preimage)
    }

    /// Run a transaction against `ledger`, returning the emitted logs
    fn execute(
        &self,
        ledger: &mut Ledger,
        tx: &TransactionRequest,
    ) -> LaunchpadResult<Vec<(Address, LogData)>> {
        let value = tx.value.unwrap_or_default();
        ledger.debit(tx.from, value)?;

        if tx.to == ledger.factory.address {
            let (token, logs) = ledger.factory.execute(tx.from, value, &tx.data)?;
            if let Some(token) = token {
                ledger.tokens.insert(token.address, token);
            }
            return Ok(logs.into_iter().map(|log| (tx.to, log)).collect());
        }

        let Some(token) = ledger.tokens.get_mut(&tx.to) else {
            // Plain transfer to an account without code
            ledger.credit(tx.to, value)?;
            return Ok(Vec::new());
        };

        let execution = token.execute(tx.from, value, &tx.data)?;
        if execution.graduated {
            info!("Token {} graduated", tx.to);
        }

        // The contract keeps whatever it does not pay out
        let paid_out = safe_add(execution.eth_to_sender, execution.eth_to_fees)?;
        if value >= paid_out {
            ledger.credit(tx.to, value - paid_out)?;
        } else {
            ledger.debit(tx.to, safe_sub(paid_out, value)?)?;
        }
        ledger.credit(tx.from, execution.eth_to_sender)?;
        ledger.credit(self.config.fee_recipient, execution.eth_to_fees)?;

        Ok(execution.logs.into_iter().map(|log| (tx.to, log)).collect())
    }
}

impl Default for SimulatedChain {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

#[async_trait]
impl ChainRpc for SimulatedChain {
    async fn chain_id(&self) -> LaunchpadResult<u64> {
        Ok(self.config.chain_id)
    }

    async fn call(&self, to: Address, data: Bytes) -> LaunchpadResult<Bytes> {
        let state = self.state()?;
        if state.broken.contains(&to) {
            return Err(LaunchpadError::reverted("simulated contract failure"));
        }
        if to == state.ledger.factory.address {
            return state.ledger.factory.call(&data);
        }
        match state.ledger.tokens.get(&to) {
            Some(token) => token.call(&data),
            // Calls to accounts without code succeed with empty return data
            None => Ok(Bytes::new()),
        }
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> LaunchpadResult<B256> {
        let mut state = self.state()?;

        let value = tx.value.unwrap_or_default();
        if state.ledger.balance(&tx.from) < value {
            return Err(LaunchpadError::rpc_error(
                "insufficient funds for gas * price + value",
                Some(-32000),
            ));
        }

        let mut ledger = state.ledger.clone();
        let outcome = self.execute(&mut ledger, tx);

        // Without an explicit gas limit the node estimates first, which
        // surfaces a revert before anything is mined
        if let (Err(e), None) = (&outcome, tx.gas) {
            debug!("Rejected transaction from {}: {}", tx.from, e);
            return Err(e.clone());
        }

        state.tx_count += 1;
        state.block_number += 1;
        let hash = Self::transaction_hash(tx, state.tx_count);
        let block = state.block_number;

        let (status, logs) = match outcome {
            Ok(emitted) => {
                state.ledger = ledger;
                let logs: Vec<Log> = emitted
                    .into_iter()
                    .enumerate()
                    .map(|(index, (address, data))| Log {
                        address,
                        topics: data.topics().to_vec(),
                        data: data.data,
                        block_number: Some(U64::from(block)),
                        transaction_hash: Some(hash),
                        log_index: Some(U64::from(index)),
                    })
                    .collect();
                state.logs.extend(logs.iter().cloned());
                (1u64, logs)
            }
            Err(e) => {
                debug!("Transaction {} reverted in block {}: {}", hash, block, e);
                (0u64, Vec::new())
            }
        };

        state.receipts.insert(
            hash,
            TransactionReceipt {
                transaction_hash: hash,
                block_number: Some(U64::from(block)),
                status: Some(U64::from(status)),
                gas_used: Some(U64::from(21_000u64)),
                logs,
            },
        );

        debug!("Mined {} in block {}", hash, block);
        Ok(hash)
    }

    async fn transaction_receipt(&self, hash: B256) -> LaunchpadResult<Option<TransactionReceipt>> {
        let state = self.state()?;
        if state.withhold_receipts {
            return Ok(None);
        }
        Ok(state.receipts.get(&hash).cloned())
    }

    async fn logs(&self, filter: &LogFilter) -> LaunchpadResult<Vec<Log>> {
        let state = self.state()?;
        Ok(state.logs.iter().filter(|log| filter.matches(log)).cloned().collect())
    }

    async fn balance(&self, account: Address) -> LaunchpadResult<U256> {
        Ok(self.state()?.ledger.balance(&account))
    }

    async fn block(&self, number: u64) -> LaunchpadResult<Option<BlockHeader>> {
        let latest = self.state()?.block_number;
        if number > latest {
            return Ok(None);
        }
        Ok(Some(BlockHeader {
            number: U64::from(number),
            timestamp: U64::from(self.timestamp_of(number)),
        }))
    }
}
