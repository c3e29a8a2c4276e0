pub mod base;
pub mod factory;
pub mod history;
pub mod token;
pub mod trade;

use std::sync::Arc;

use alloy_primitives::Address;
use launchpad_types::ChainRpc;
use tracing::warn;

use crate::config::LaunchpadConfig;
use crate::discovery::TokenDiscovery;
use crate::error::SdkResult;
use crate::rpc::HttpRpc;

pub use base::{BaseClient, TxSettings};
pub use factory::FactoryService;
pub use history::HistoryService;
pub use token::TokenService;
pub use trade::TradeService;

/// Main launchpad client with service-based architecture
pub struct LaunchpadClient {
    /// Base RPC client
    pub base: Arc<BaseClient>,
    /// Factory reads and launches
    pub factory: FactoryService,
    /// Token getters, balances and quotes
    pub tokens: TokenService,
    /// Buy and sell execution
    pub trade: TradeService,
    /// Event-log history
    pub history: HistoryService,
    expected_chain_id: u64,
}

impl LaunchpadClient {
    /// Create a client over an HTTP JSON-RPC endpoint
    pub fn from_config(config: &LaunchpadConfig) -> Self {
        let rpc = HttpRpc::new(
            &config.network.rpc_url,
            std::time::Duration::from_secs(config.network.request_timeout_secs),
        );
        Self::with_rpc(Arc::new(rpc), config)
    }

    /// Create a client over any chain backend
    pub fn with_rpc(rpc: Arc<dyn ChainRpc>, config: &LaunchpadConfig) -> Self {
        let base = Arc::new(BaseClient::new(rpc, TxSettings::from_config(config)));
        let factory = config.contracts.factory;

        Self {
            factory: FactoryService::new(base.clone(), factory),
            tokens: TokenService::new(base.clone()),
            trade: TradeService::new(base.clone()),
            history: HistoryService::new(base.clone(), factory),
            base,
            expected_chain_id: config.network.chain_id,
        }
    }

    /// Token discovery over this client's factory
    pub fn discovery(&self) -> TokenDiscovery {
        TokenDiscovery::new(self.factory.clone(), self.tokens.clone())
    }

    /// Account transactions are sent from, if configured
    pub fn sender(&self) -> Option<Address> {
        self.base.settings().from
    }

    /// Compare the node's chain id with the configured one
    pub async fn check_chain(&self) -> SdkResult<bool> {
        let actual = self.base.rpc().chain_id().await?;
        if actual != self.expected_chain_id {
            warn!(
                "Connected to chain {} but configuration expects {}",
                actual, self.expected_chain_id
            );
            return Ok(false);
        }
        Ok(true)
    }
}
