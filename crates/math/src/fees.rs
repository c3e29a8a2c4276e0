/// Fee estimation for curve trades

use alloy_primitives::U256;
use launchpad_types::{LaunchpadError, LaunchpadResult, BPS_DENOMINATOR, TRADE_FEE_BPS};

use crate::safe::{mul_div, safe_sub};

/// Fee taken from `amount` at `fee_bps`, rounded down
pub fn fee_for(amount: U256, fee_bps: u64) -> LaunchpadResult<U256> {
    if fee_bps > BPS_DENOMINATOR {
        return Err(LaunchpadError::invalid_parameter(
            "fee_bps",
            &fee_bps.to_string(),
            "at most 10000 (100%)",
        ));
    }
    mul_div(amount, U256::from(fee_bps), U256::from(BPS_DENOMINATOR))
}

/// Fee at the protocol's trading rate
pub fn trade_fee(amount: U256) -> LaunchpadResult<U256> {
    fee_for(amount, TRADE_FEE_BPS)
}

/// Split `amount` into (net, fee)
pub fn split_fee(amount: U256, fee_bps: u64) -> LaunchpadResult<(U256, U256)> {
    let fee = fee_for(amount, fee_bps)?;
    Ok((safe_sub(amount, fee)?, fee))
}
