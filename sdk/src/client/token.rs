use std::sync::Arc;

use alloy_primitives::{Address, U256};
use launchpad_math::trade_fee;
use launchpad_types::{IBondingToken, Progress, TokenInfo, TradeQuote, TradeSide};
use tracing::debug;

use crate::client::BaseClient;
use crate::error::SdkResult;

/// Per-token getters, balances and quotes
#[derive(Clone)]
pub struct TokenService {
    base: Arc<BaseClient>,
}

impl TokenService {
    pub fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Read every getter that makes up a token snapshot
    pub async fn info(&self, token: Address) -> SdkResult<TokenInfo> {
        let base = &self.base;
        let (name, symbol, total_minted, graduated, virtual_eth, virtual_tokens, progress, price) = tokio::try_join!(
            base.read(token, &IBondingToken::nameCall {}),
            base.read(token, &IBondingToken::symbolCall {}),
            base.read(token, &IBondingToken::totalMintedCall {}),
            base.read(token, &IBondingToken::isGraduatedCall {}),
            base.read(token, &IBondingToken::virtualEthReservesCall {}),
            base.read(token, &IBondingToken::virtualTokenReservesCall {}),
            base.read(token, &IBondingToken::getProgressCall {}),
            base.read(token, &IBondingToken::getCurrentPriceCall {}),
        )?;

        Ok(TokenInfo {
            address: token,
            name: name._0,
            symbol: symbol._0,
            total_minted: total_minted._0,
            progress: Progress::from_raw(progress._0),
            graduated: graduated._0,
            price: price._0,
            virtual_eth: virtual_eth._0,
            virtual_tokens: virtual_tokens._0,
        })
    }

    pub async fn is_graduated(&self, token: Address) -> SdkResult<bool> {
        Ok(self.base.read(token, &IBondingToken::isGraduatedCall {}).await?._0)
    }

    pub async fn progress(&self, token: Address) -> SdkResult<Progress> {
        let raw = self.base.read(token, &IBondingToken::getProgressCall {}).await?._0;
        Ok(Progress::from_raw(raw))
    }

    /// Token balance of `account`, in base units
    pub async fn balance_of(&self, token: Address, account: Address) -> SdkResult<U256> {
        Ok(self
            .base
            .read(token, &IBondingToken::balanceOfCall { account })
            .await?
            ._0)
    }

    /// Native currency balance of `account`, in wei
    pub async fn native_balance(&self, account: Address) -> SdkResult<U256> {
        Ok(self.base.rpc().balance(account).await?)
    }

    /// Tokens received for `eth_in` wei, with the client-side fee estimate
    pub async fn quote_buy(&self, token: Address, eth_in: U256) -> SdkResult<TradeQuote> {
        if eth_in.is_zero() {
            return Ok(zero_quote(TradeSide::Buy));
        }

        let estimated_output = self
            .base
            .read(token, &IBondingToken::getBuyAmountCall { ethIn: eth_in })
            .await?
            ._0;
        debug!("Quote buy {} wei of {} -> {}", eth_in, token, estimated_output);

        Ok(TradeQuote {
            side: TradeSide::Buy,
            input: eth_in,
            estimated_output,
            estimated_fee: Some(trade_fee(eth_in)?),
        })
    }

    /// ETH received for `token_in` base units
    pub async fn quote_sell(&self, token: Address, token_in: U256) -> SdkResult<TradeQuote> {
        if token_in.is_zero() {
            return Ok(zero_quote(TradeSide::Sell));
        }

        let estimated_output = self
            .base
            .read(token, &IBondingToken::getSellAmountCall { tokenIn: token_in })
            .await?
            ._0;
        debug!("Quote sell {} of {} -> {} wei", token_in, token, estimated_output);

        Ok(TradeQuote {
            side: TradeSide::Sell,
            input: token_in,
            estimated_output,
            estimated_fee: None,
        })
    }
}

fn zero_quote(side: TradeSide) -> TradeQuote {
    TradeQuote {
        side,
        input: U256::ZERO,
        estimated_output: U256::ZERO,
        estimated_fee: match side {
            TradeSide::Buy => Some(U256::ZERO),
            TradeSide::Sell => None,
        },
    }
}
