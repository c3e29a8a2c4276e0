use std::sync::Arc;

use alloy_primitives::{Address, U256};
use launchpad_types::IFactory;
use tracing::info;

use crate::client::BaseClient;
use crate::error::{SdkError, SdkResult};
use crate::types::LaunchOutcome;

/// Factory reads and token launches
#[derive(Clone)]
pub struct FactoryService {
    base: Arc<BaseClient>,
    factory: Address,
}

impl FactoryService {
    pub fn new(base: Arc<BaseClient>, factory: Address) -> Self {
        Self { base, factory }
    }

    pub fn address(&self) -> Address {
        self.factory
    }

    /// Entry `index` of the factory's deployed-token array
    pub async fn token_at(&self, index: u64) -> SdkResult<Address> {
        let ret = self
            .base
            .read(self.factory, &IFactory::allSubTokensCall { index: U256::from(index) })
            .await?;
        Ok(ret._0)
    }

    /// Number of tokens the factory reports
    pub async fn token_count(&self) -> SdkResult<u64> {
        let ret = self
            .base
            .read(self.factory, &IFactory::getSubTokensCountCall {})
            .await?;
        Ok(u64::try_from(ret._0).unwrap_or(u64::MAX))
    }

    /// Deploy a new token through the factory
    ///
    /// Name and symbol are trimmed and must be non-empty; the symbol is
    /// upper-cased. The new address is read from the `OrgLaunched` event.
    pub async fn launch_token(&self, name: &str, symbol: &str) -> SdkResult<LaunchOutcome> {
        let (name, symbol) = normalize_launch_input(name, symbol)?;

        let outcome = self
            .base
            .send(
                self.factory,
                &IFactory::launchTokenCall {
                    name: name.clone(),
                    symbol: symbol.clone(),
                },
                None,
            )
            .await?;

        let token = outcome
            .find_event::<IFactory::OrgLaunched>(self.factory)
            .map(|(event, _)| event.token)
            .ok_or(SdkError::MissingEvent {
                tx_hash: outcome.tx_hash,
                event: "OrgLaunched",
            })?;

        info!("Launched {} ({}) at {}", name, symbol, token);
        Ok(LaunchOutcome { token, outcome })
    }
}

fn normalize_launch_input(name: &str, symbol: &str) -> SdkResult<(String, String)> {
    let name = name.trim();
    let symbol = symbol.trim();

    if name.is_empty() {
        return Err(SdkError::InvalidParameters("token name must not be empty".into()));
    }
    if symbol.is_empty() {
        return Err(SdkError::InvalidParameters("token symbol must not be empty".into()));
    }

    Ok((name.to_string(), symbol.to_uppercase()))
}
