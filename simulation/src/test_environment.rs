use std::sync::Arc;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolEvent};
use launchpad_math::parse_ether;
use launchpad_types::{
    ChainRpc, IBondingToken, IFactory, LaunchpadError, LaunchpadResult, TransactionRequest,
};

use crate::{SimulatedChain, SimulationConfig};

/// Test environment for simulating launchpad operations
pub struct TestEnvironment {
    pub chain: Arc<SimulatedChain>,
    pub deployer: Address,
    pub alice: Address,
    pub bob: Address,
}

impl TestEnvironment {
    /// Native balance given to every named account
    pub const STARTING_BALANCE: &'static str = "1000";

    /// Create a new environment with funded accounts
    pub fn new() -> LaunchpadResult<Self> {
        Self::with_config(SimulationConfig::default())
    }

    pub fn with_config(config: SimulationConfig) -> LaunchpadResult<Self> {
        let chain = Arc::new(SimulatedChain::new(config));
        let env = Self {
            chain,
            deployer: Address::repeat_byte(0xd0),
            alice: Address::repeat_byte(0xa1),
            bob: Address::repeat_byte(0xb0),
        };

        let amount = parse_ether(Self::STARTING_BALANCE)?;
        for account in [env.deployer, env.alice, env.bob] {
            env.chain.fund(account, amount)?;
        }
        Ok(env)
    }

    pub fn factory(&self) -> Address {
        self.chain.config().factory
    }

    /// Launch a token and return its address
    pub async fn launch_token(&self, creator: Address, name: &str, symbol: &str) -> LaunchpadResult<Address> {
        let data = IFactory::launchTokenCall {
            name: name.to_string(),
            symbol: symbol.to_string(),
        }
        .abi_encode();
        let hash = self
            .chain
            .send_transaction(&TransactionRequest::new(creator, self.factory(), data))
            .await?;

        let receipt = self
            .chain
            .transaction_receipt(hash)
            .await?
            .ok_or_else(|| LaunchpadError::generic("launch receipt missing"))?;

        receipt
            .logs
            .iter()
            .find_map(|log| {
                IFactory::OrgLaunched::decode_raw_log(log.topics.iter().copied(), &log.data, true).ok()
            })
            .map(|event| event.token)
            .ok_or_else(|| LaunchpadError::decode_error("OrgLaunched", "no launch event in receipt"))
    }

    /// Buy `eth` (decimal string) worth of `token`
    pub async fn buy(&self, buyer: Address, token: Address, eth: &str) -> LaunchpadResult<()> {
        let tx = TransactionRequest::new(buyer, token, IBondingToken::buyCall {}.abi_encode())
            .with_value(parse_ether(eth)?);
        self.chain.send_transaction(&tx).await?;
        Ok(())
    }

    pub async fn sell(&self, seller: Address, token: Address, amount: U256) -> LaunchpadResult<()> {
        let data = IBondingToken::sellCall { tokenAmount: amount }.abi_encode();
        self.chain
            .send_transaction(&TransactionRequest::new(seller, token, data))
            .await?;
        Ok(())
    }

    /// Launch a small demo catalogue: a fresh token, a traded one and a
    /// graduated one
    pub async fn seed_demo_tokens(&self) -> LaunchpadResult<Vec<Address>> {
        let fresh = self.launch_token(self.deployer, "Core Doge", "CDOGE").await?;

        let traded = self.launch_token(self.alice, "Global Tech DAO", "GTD").await?;
        self.buy(self.alice, traded, "2.5").await?;
        self.buy(self.bob, traded, "0.75").await?;

        let graduated = self.launch_token(self.bob, "Satoshi Cat", "SCAT").await?;
        self.buy(self.bob, graduated, "100").await?;

        Ok(vec![fresh, traded, graduated])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalogue() {
        let env = TestEnvironment::new().unwrap();
        let tokens = env.seed_demo_tokens().await.unwrap();
        assert_eq!(env.chain.deployed_tokens().unwrap(), tokens);

        let graduated = env.chain.token(tokens[2]).unwrap().unwrap();
        assert!(graduated.curve.graduated);

        let traded = env.chain.token(tokens[1]).unwrap().unwrap();
        assert!(traded.balance_of(&env.bob) > U256::ZERO);
        assert!(!traded.curve.graduated);
    }
}
