//! In-memory stand-in for a deployed bonding-curve token contract

use std::collections::HashMap;

use alloy_primitives::{Address, Bytes, LogData, U256};
use alloy_sol_types::{SolEvent, SolInterface, SolValue};
use launchpad_math::{CurveParams, CurveState};
use launchpad_types::{IBondingToken, LaunchpadError, LaunchpadResult};

use launchpad_types::IBondingToken::IBondingTokenCalls as Call;

/// Effects of a successful state-changing call
#[derive(Debug, Default)]
pub struct Execution {
    pub logs: Vec<LogData>,
    /// ETH paid out by the contract to the sender
    pub eth_to_sender: U256,
    /// ETH retained by the contract's curve
    pub eth_to_curve: U256,
    /// ETH routed to the fee recipient
    pub eth_to_fees: U256,
    /// Curve completed during this call
    pub graduated: bool,
}

/// One launched token: ERC-20 balances plus its curve
#[derive(Debug, Clone)]
pub struct BondingToken {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub creator: Address,
    pub curve: CurveState,
    pub total_minted: U256,
    pub balances: HashMap<Address, U256>,
}

impl BondingToken {
    pub fn new(
        address: Address,
        name: String,
        symbol: String,
        creator: Address,
        params: CurveParams,
    ) -> LaunchpadResult<Self> {
        Ok(Self {
            address,
            name,
            symbol,
            creator,
            curve: CurveState::new(params)?,
            total_minted: U256::ZERO,
            balances: HashMap::new(),
        })
    }

    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Answer an `eth_call`
    pub fn call(&self, data: &[u8]) -> LaunchpadResult<Bytes> {
        let call = Call::abi_decode(data, true)
            .map_err(|e| LaunchpadError::reverted(&format!("unknown selector: {}", e)))?;

        let encoded = match call {
            Call::name(_) => self.name.abi_encode(),
            Call::symbol(_) => self.symbol.abi_encode(),
            Call::totalMinted(_) => self.total_minted.abi_encode(),
            Call::isGraduated(_) => self.curve.graduated.abi_encode(),
            Call::virtualEthReserves(_) => self.curve.virtual_eth.abi_encode(),
            Call::virtualTokenReserves(_) => self.curve.virtual_tokens.abi_encode(),
            Call::getProgress(_) => U256::from(self.curve.progress().percent()).abi_encode(),
            Call::getCurrentPrice(_) => self.curve.spot_price()?.abi_encode(),
            Call::getBuyAmount(c) => {
                if self.curve.graduated {
                    U256::ZERO.abi_encode()
                } else {
                    self.curve.quote_buy(c.ethIn)?.tokens_out.abi_encode()
                }
            }
            Call::getSellAmount(c) => {
                if self.curve.graduated || c.tokenIn > self.curve.tokens_sold {
                    U256::ZERO.abi_encode()
                } else {
                    self.curve.quote_sell(c.tokenIn)?.eth_out.abi_encode()
                }
            }
            Call::balanceOf(c) => self.balance_of(&c.account).abi_encode(),
            Call::buy(_) | Call::sell(_) => Vec::new(),
        };

        Ok(encoded.into())
    }

    /// Apply a transaction; callers discard the token on error
    pub fn execute(&mut self, sender: Address, value: U256, data: &[u8]) -> LaunchpadResult<Execution> {
        let call = Call::abi_decode(data, true)
            .map_err(|e| LaunchpadError::reverted(&format!("unknown selector: {}", e)))?;

        match call {
            Call::buy(_) => self.buy(sender, value),
            Call::sell(c) => {
                if !value.is_zero() {
                    return Err(LaunchpadError::reverted("sell is not payable"));
                }
                self.sell(sender, c.tokenAmount)
            }
            _ if !value.is_zero() => Err(LaunchpadError::reverted("function is not payable")),
            // View functions sent as transactions succeed without effects
            _ => Ok(Execution::default()),
        }
    }

    fn buy(&mut self, buyer: Address, eth_in: U256) -> LaunchpadResult<Execution> {
        if eth_in.is_zero() {
            return Err(LaunchpadError::reverted("Must send ETH"));
        }

        let quote = self.curve.quote_buy(eth_in)?;
        if quote.tokens_out.is_zero() {
            return Err(LaunchpadError::reverted("Amount too small"));
        }

        self.curve.apply_buy(&quote)?;
        self.mint(buyer, quote.tokens_out);

        let logs = vec![IBondingToken::Bought {
            buyer,
            ethAmount: quote.eth_to_curve + quote.fee,
            feeAmount: quote.fee,
            tokenAmount: quote.tokens_out,
        }
        .encode_log_data()];

        if quote.completes {
            // Pair the reserved supply with the raised ETH; the LP position is burned
            let liquidity = self.curve.params.liquidity_supply;
            self.mint(Address::ZERO, liquidity);
        }

        Ok(Execution {
            logs,
            eth_to_sender: quote.refund,
            eth_to_curve: quote.eth_to_curve,
            eth_to_fees: quote.fee,
            graduated: quote.completes,
        })
    }

    fn sell(&mut self, seller: Address, tokens_in: U256) -> LaunchpadResult<Execution> {
        if tokens_in.is_zero() {
            return Err(LaunchpadError::reverted("Amount must be > 0"));
        }
        let held = self.balance_of(&seller);
        if held < tokens_in {
            return Err(LaunchpadError::reverted("Insufficient balance"));
        }

        let quote = self.curve.quote_sell(tokens_in)?;
        self.curve.apply_sell(tokens_in, &quote)?;
        self.balances.insert(seller, held - tokens_in);
        self.total_minted = self.total_minted.saturating_sub(tokens_in);

        let log = IBondingToken::Sold {
            seller,
            tokenAmount: tokens_in,
            feeAmount: quote.fee,
            ethAmount: quote.eth_out,
        }
        .encode_log_data();

        Ok(Execution {
            logs: vec![log],
            eth_to_sender: quote.eth_out,
            eth_to_curve: U256::ZERO,
            eth_to_fees: quote.fee,
            graduated: false,
        })
    }

    fn mint(&mut self, to: Address, amount: U256) {
        *self.balances.entry(to).or_default() += amount;
        self.total_minted += amount;
    }
}
