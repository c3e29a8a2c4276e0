use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolEvent;
use launchpad_types::{IBondingToken, Log, Trade};
use tracing::info;

use crate::client::history::decode_trade;
use crate::client::{BaseClient, TokenService};
use crate::error::{SdkError, SdkResult};
use crate::types::{TradeOutcome, TxOutcome};

/// Buy and sell against a token's curve
///
/// Every trade is checked client-side first: a zero amount, a graduated
/// token or a sell above the sender's balance never reaches the chain.
#[derive(Clone)]
pub struct TradeService {
    base: Arc<BaseClient>,
    tokens: TokenService,
}

impl TradeService {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self {
            tokens: TokenService::new(base.clone()),
            base,
        }
    }

    /// Spend `eth_in` wei on `token`
    pub async fn buy(&self, token: Address, eth_in: U256) -> SdkResult<TradeOutcome> {
        if eth_in.is_zero() {
            return Err(SdkError::InvalidParameters("buy amount must be greater than 0".into()));
        }
        self.ensure_tradable(token).await?;

        let outcome = self
            .base
            .send(token, &IBondingToken::buyCall {}, Some(eth_in))
            .await?;
        self.trade_from(token, outcome, IBondingToken::Bought::SIGNATURE_HASH, "Bought")
            .await
    }

    /// Sell `amount` base units of `token`
    pub async fn sell(&self, token: Address, amount: U256) -> SdkResult<TradeOutcome> {
        if amount.is_zero() {
            return Err(SdkError::InvalidParameters("sell amount must be greater than 0".into()));
        }
        self.ensure_tradable(token).await?;

        let seller = self.base.sender()?;
        let available = self.tokens.balance_of(token, seller).await?;
        if available < amount {
            return Err(SdkError::InsufficientBalance {
                expected: amount,
                available,
            });
        }

        let outcome = self
            .base
            .send(token, &IBondingToken::sellCall { tokenAmount: amount }, None)
            .await?;
        self.trade_from(token, outcome, IBondingToken::Sold::SIGNATURE_HASH, "Sold")
            .await
    }

    async fn ensure_tradable(&self, token: Address) -> SdkResult<()> {
        if self.tokens.is_graduated(token).await? {
            return Err(SdkError::TokenGraduated(token));
        }
        Ok(())
    }

    async fn trade_from(
        &self,
        token: Address,
        outcome: TxOutcome,
        signature: B256,
        event: &'static str,
    ) -> SdkResult<TradeOutcome> {
        let mut trade = find_trade(&outcome.logs, token, signature).ok_or(SdkError::MissingEvent {
            tx_hash: outcome.tx_hash,
            event,
        })?;

        trade.tx_hash = trade.tx_hash.or(Some(outcome.tx_hash));
        trade.block_number = trade.block_number.or(outcome.block_number);
        if let Some(number) = trade.block_number {
            let header = self.base.rpc().block(number).await?;
            trade.timestamp = header.map(|h| h.timestamp.to::<u64>());
        }

        info!(
            "{} {} on {}: in {} out {} fee {}",
            trade.side, trade.trader, token, trade.input_amount, trade.output_amount, trade.fee_amount
        );
        Ok(TradeOutcome { trade, outcome })
    }
}

/// First log emitted by `token` with event `signature`, decoded
fn find_trade(logs: &[Log], token: Address, signature: B256) -> Option<Trade> {
    logs.iter()
        .filter(|log| log.address == token && log.topics.first() == Some(&signature))
        .find_map(decode_trade)
}
