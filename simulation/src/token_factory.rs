//! In-memory stand-in for the launchpad factory contract

use alloy_primitives::{Address, Bytes, LogData, U256};
use alloy_sol_types::{SolEvent, SolInterface, SolValue};
use launchpad_math::CurveParams;
use launchpad_types::{IFactory, LaunchpadError, LaunchpadResult};

use launchpad_types::IFactory::IFactoryCalls as Call;

use crate::bonding_token::BondingToken;

/// Factory storage: the deployed-token array and the curve template
#[derive(Debug, Clone)]
pub struct TokenFactory {
    pub address: Address,
    pub params: CurveParams,
    slots: Vec<Address>,
    deployments: u64,
}

impl TokenFactory {
    pub fn new(address: Address, params: CurveParams) -> Self {
        Self {
            address,
            params,
            slots: Vec::new(),
            deployments: 0,
        }
    }

    pub fn tokens(&self) -> &[Address] {
        &self.slots
    }

    /// Write a raw slot, bypassing `launchToken`
    pub fn push_slot(&mut self, token: Address) {
        self.slots.push(token);
    }

    /// Answer an `eth_call`
    pub fn call(&self, data: &[u8]) -> LaunchpadResult<Bytes> {
        let call = Call::abi_decode(data, true)
            .map_err(|e| LaunchpadError::reverted(&format!("unknown selector: {}", e)))?;

        let encoded = match call {
            Call::allSubTokens(c) => {
                let index = usize::try_from(c.index).unwrap_or(usize::MAX);
                match self.slots.get(index) {
                    Some(token) => token.abi_encode(),
                    None => return Err(LaunchpadError::reverted("panic: array out-of-bounds access (0x32)")),
                }
            }
            Call::getSubTokensCount(_) => U256::from(self.slots.len()).abi_encode(),
            Call::launchToken(_) => Vec::new(),
        };

        Ok(encoded.into())
    }

    /// Apply a transaction; returns the deployed token when one was launched
    pub fn execute(
        &mut self,
        sender: Address,
        value: U256,
        data: &[u8],
    ) -> LaunchpadResult<(Option<BondingToken>, Vec<LogData>)> {
        let call = Call::abi_decode(data, true)
            .map_err(|e| LaunchpadError::reverted(&format!("unknown selector: {}", e)))?;

        if !value.is_zero() {
            return Err(LaunchpadError::reverted("function is not payable"));
        }

        match call {
            Call::launchToken(c) => {
                let token = self.launch(sender, c.name, c.symbol)?;
                let log = IFactory::OrgLaunched {
                    token: token.address,
                    creator: sender,
                }
                .encode_log_data();
                Ok((Some(token), vec![log]))
            }
            _ => Ok((None, Vec::new())),
        }
    }

    fn launch(&mut self, creator: Address, name: String, symbol: String) -> LaunchpadResult<BondingToken> {
        if name.is_empty() || symbol.is_empty() {
            return Err(LaunchpadError::reverted("Name and symbol required"));
        }

        self.deployments += 1;
        let address = self.address.create(self.deployments);
        let token = BondingToken::new(address, name, symbol, creator, self.params)?;
        self.slots.push(address);

        tracing::debug!("Factory {} deployed {} ({})", self.address, address, token.symbol);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;

    fn factory() -> TokenFactory {
        TokenFactory::new(Address::repeat_byte(0xfa), CurveParams::default())
    }

    #[test]
    fn test_launch_appends_slot() {
        let mut factory = factory();
        let creator = Address::repeat_byte(0x01);
        let data = IFactory::launchTokenCall {
            name: "Global Tech DAO".into(),
            symbol: "GTD".into(),
        }
        .abi_encode();

        let (token, logs) = factory.execute(creator, U256::ZERO, &data).unwrap();
        let token = token.unwrap();
        assert_eq!(factory.tokens(), &[token.address]);
        assert_eq!(logs.len(), 1);

        let raw = factory
            .call(&IFactory::allSubTokensCall { index: U256::ZERO }.abi_encode())
            .unwrap();
        assert_eq!(IFactory::allSubTokensCall::abi_decode_returns(&raw, true).unwrap()._0, token.address);
    }

    #[test]
    fn test_out_of_range_index_reverts() {
        let factory = factory();
        let err = factory
            .call(&IFactory::allSubTokensCall { index: U256::from(0) }.abi_encode())
            .unwrap_err();
        assert!(err.is_revert());
    }

    #[test]
    fn test_distinct_addresses() {
        let mut factory = factory();
        let data = IFactory::launchTokenCall { name: "A".into(), symbol: "A".into() }.abi_encode();
        let (a, _) = factory.execute(Address::ZERO, U256::ZERO, &data).unwrap();
        let (b, _) = factory.execute(Address::ZERO, U256::ZERO, &data).unwrap();
        assert_ne!(a.unwrap().address, b.unwrap().address);
    }
}
