/// Reference virtual-reserve bonding curve
///
/// Constant product over virtual reserves: `virtual_eth * virtual_tokens = k`.
/// A buy of `eth_in` (after fee) moves the curve to
/// `virtual_tokens' = k / (virtual_eth + eth_in)` and pays out the
/// difference in tokens. Once `curve_supply` tokens are sold the curve is
/// complete and the token graduates.
///
/// The live contracts own this math; the client only uses it to play the
/// contracts in simulation.

use alloy_primitives::U256;
use launchpad_types::{LaunchpadError, LaunchpadResult, Progress, MAX_PROGRESS, TRADE_FEE_BPS, WEI_PER_ETHER};
use serde::{Deserialize, Serialize};

use crate::fees::{fee_for, split_fee};
use crate::safe::{mul_div, safe_add, safe_div_ceil, safe_mul, safe_sub};

/// Launch-time parameters of a curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    pub initial_virtual_eth: U256,
    pub initial_virtual_tokens: U256,
    /// Tokens sold along the curve before graduation
    pub curve_supply: U256,
    /// Tokens paired with the collected ETH at graduation
    pub liquidity_supply: U256,
    pub fee_bps: u64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            initial_virtual_eth: WEI_PER_ETHER,
            initial_virtual_tokens: U256::from(1_073_000_000u64) * WEI_PER_ETHER,
            curve_supply: U256::from(793_100_000u64) * WEI_PER_ETHER,
            liquidity_supply: U256::from(206_900_000u64) * WEI_PER_ETHER,
            fee_bps: TRADE_FEE_BPS,
        }
    }
}

impl CurveParams {
    pub fn validate(&self) -> LaunchpadResult<()> {
        if self.initial_virtual_eth.is_zero() {
            return Err(LaunchpadError::invalid_parameter("initial_virtual_eth", "0", "greater than 0"));
        }
        if self.curve_supply >= self.initial_virtual_tokens {
            return Err(LaunchpadError::invalid_parameter(
                "curve_supply",
                &self.curve_supply.to_string(),
                "less than initial_virtual_tokens",
            ));
        }
        Ok(())
    }
}

/// Result of pricing a buy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuyQuote {
    pub tokens_out: U256,
    pub fee: U256,
    /// ETH added to the curve's virtual reserve
    pub eth_to_curve: U256,
    /// ETH returned when the buy would overshoot the curve
    pub refund: U256,
    /// Whether this buy completes the curve
    pub completes: bool,
}

/// Result of pricing a sell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellQuote {
    /// ETH paid to the seller after fee
    pub eth_out: U256,
    pub fee: U256,
    /// ETH removed from the curve's virtual reserve
    pub eth_from_curve: U256,
}

/// Mutable curve state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveState {
    pub params: CurveParams,
    pub virtual_eth: U256,
    pub virtual_tokens: U256,
    pub tokens_sold: U256,
    pub graduated: bool,
}

impl CurveState {
    pub fn new(params: CurveParams) -> LaunchpadResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            virtual_eth: params.initial_virtual_eth,
            virtual_tokens: params.initial_virtual_tokens,
            tokens_sold: U256::ZERO,
            graduated: false,
        })
    }

    fn invariant(&self) -> LaunchpadResult<U256> {
        safe_mul(self.virtual_eth, self.virtual_tokens)
    }

    /// Spot price in wei per whole token
    pub fn spot_price(&self) -> LaunchpadResult<U256> {
        mul_div(self.virtual_eth, WEI_PER_ETHER, self.virtual_tokens)
    }

    pub fn remaining_supply(&self) -> U256 {
        self.params.curve_supply.saturating_sub(self.tokens_sold)
    }

    pub fn progress(&self) -> Progress {
        if self.graduated {
            return Progress::COMPLETE;
        }
        let percent = mul_div(self.tokens_sold, U256::from(MAX_PROGRESS), self.params.curve_supply)
            .unwrap_or(U256::from(MAX_PROGRESS));
        Progress::from_raw(percent)
    }

    /// Price a buy of `eth_in` wei, fee included
    pub fn quote_buy(&self, eth_in: U256) -> LaunchpadResult<BuyQuote> {
        if self.graduated {
            return Err(LaunchpadError::reverted("Token graduated"));
        }

        let (net, fee) = split_fee(eth_in, self.params.fee_bps)?;
        let k = self.invariant()?;
        let new_tokens = safe_div_ceil(k, safe_add(self.virtual_eth, net)?)?;
        let tokens_out = self.virtual_tokens.saturating_sub(new_tokens);

        let remaining = self.remaining_supply();
        if tokens_out < remaining {
            return Ok(BuyQuote {
                tokens_out,
                fee,
                eth_to_curve: net,
                refund: U256::ZERO,
                completes: false,
            });
        }

        // Overshoot: sell exactly the remainder and hand back the excess
        let tokens_after = safe_sub(self.virtual_tokens, remaining)?;
        let eth_after = safe_div_ceil(k, tokens_after)?;
        let needed = safe_sub(eth_after, self.virtual_eth)?.min(net);
        let capped_fee = fee_for(needed, self.params.fee_bps)?;
        let refund = safe_sub(eth_in, safe_add(needed, capped_fee)?)?;

        Ok(BuyQuote {
            tokens_out: remaining,
            fee: capped_fee,
            eth_to_curve: needed,
            refund,
            completes: true,
        })
    }

    /// Price a sell of `tokens_in` base units, fee included
    pub fn quote_sell(&self, tokens_in: U256) -> LaunchpadResult<SellQuote> {
        if self.graduated {
            return Err(LaunchpadError::reverted("Token graduated"));
        }
        if tokens_in > self.tokens_sold {
            return Err(LaunchpadError::reverted("Sell exceeds curve supply"));
        }

        let k = self.invariant()?;
        let new_eth = safe_div_ceil(k, safe_add(self.virtual_tokens, tokens_in)?)?;
        let gross = self.virtual_eth.saturating_sub(new_eth);
        let (eth_out, fee) = split_fee(gross, self.params.fee_bps)?;

        Ok(SellQuote {
            eth_out,
            fee,
            eth_from_curve: gross,
        })
    }

    pub fn apply_buy(&mut self, quote: &BuyQuote) -> LaunchpadResult<()> {
        self.virtual_eth = safe_add(self.virtual_eth, quote.eth_to_curve)?;
        self.virtual_tokens = safe_sub(self.virtual_tokens, quote.tokens_out)?;
        self.tokens_sold = safe_add(self.tokens_sold, quote.tokens_out)?;
        if quote.completes {
            self.graduated = true;
        }
        Ok(())
    }

    pub fn apply_sell(&mut self, tokens_in: U256, quote: &SellQuote) -> LaunchpadResult<()> {
        self.virtual_eth = safe_sub(self.virtual_eth, quote.eth_from_curve)?;
        self.virtual_tokens = safe_add(self.virtual_tokens, tokens_in)?;
        self.tokens_sold = safe_sub(self.tokens_sold, tokens_in)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_ether;
    use proptest::prelude::*;

    fn fresh() -> CurveState {
        CurveState::new(CurveParams::default()).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let curve = fresh();
        assert_eq!(curve.progress().percent(), 0);
        // 1 ETH / 1.073B tokens
        assert_eq!(curve.spot_price().unwrap(), U256::from(931_966_449u64));
    }

    #[test]
    fn test_buy_moves_curve() {
        let mut curve = fresh();
        let price_before = curve.spot_price().unwrap();

        let quote = curve.quote_buy(parse_ether("0.5").unwrap()).unwrap();
        assert_eq!(quote.fee, parse_ether("0.0025").unwrap());
        assert!(!quote.completes);
        assert!(quote.tokens_out > U256::ZERO);

        curve.apply_buy(&quote).unwrap();
        assert_eq!(curve.tokens_sold, quote.tokens_out);
        assert!(curve.spot_price().unwrap() > price_before);
        assert!(curve.progress().percent() > 0);
    }

    #[test]
    fn test_sell_round_trip_loses_fees() {
        let mut curve = fresh();
        let eth_in = parse_ether("1").unwrap();
        let buy = curve.quote_buy(eth_in).unwrap();
        curve.apply_buy(&buy).unwrap();

        let sell = curve.quote_sell(buy.tokens_out).unwrap();
        assert!(sell.eth_out < eth_in);
        curve.apply_sell(buy.tokens_out, &sell).unwrap();
        assert_eq!(curve.tokens_sold, U256::ZERO);
        assert_eq!(curve.virtual_tokens, CurveParams::default().initial_virtual_tokens);
    }

    #[test]
    fn test_overshoot_graduates_and_refunds() {
        let mut curve = fresh();
        let eth_in = parse_ether("100").unwrap();
        let quote = curve.quote_buy(eth_in).unwrap();

        assert!(quote.completes);
        assert_eq!(quote.tokens_out, CurveParams::default().curve_supply);
        assert!(quote.refund > U256::ZERO);
        assert_eq!(quote.eth_to_curve + quote.fee + quote.refund, eth_in);

        curve.apply_buy(&quote).unwrap();
        assert!(curve.graduated);
        assert_eq!(curve.progress(), Progress::COMPLETE);
        assert!(curve.quote_buy(parse_ether("1").unwrap()).is_err());
        assert!(curve.quote_sell(U256::from(1)).is_err());
    }

    #[test]
    fn test_cannot_sell_more_than_sold() {
        let curve = fresh();
        assert!(curve.quote_sell(U256::from(1)).unwrap_err().is_revert());
    }

    proptest! {
        #[test]
        fn prop_price_and_progress_rise_with_buys(
            amounts in prop::collection::vec(1_000_000_000_000_000u64..1_000_000_000_000_000_000u64, 1..20)
        ) {
            let mut curve = fresh();
            let mut last_price = curve.spot_price().unwrap();
            let mut last_progress = curve.progress();

            for amount in amounts {
                if curve.graduated {
                    break;
                }
                let quote = curve.quote_buy(U256::from(amount)).unwrap();
                curve.apply_buy(&quote).unwrap();

                let price = curve.spot_price().unwrap();
                if quote.completes {
                    prop_assert!(price >= last_price);
                } else {
                    prop_assert!(price > last_price);
                }
                prop_assert!(curve.progress() >= last_progress);
                last_price = price;
                last_progress = curve.progress();
            }
        }
    }
}
