/// Safe arithmetic operations with overflow protection
///
/// All operations return errors instead of panicking or wrapping.

use alloy_primitives::U256;
use launchpad_types::{LaunchpadError, LaunchpadResult};

// ============================================================================
// Safe Basic Arithmetic
// ============================================================================

/// Safe addition for U256 values
pub fn safe_add(a: U256, b: U256) -> LaunchpadResult<U256> {
    a.checked_add(b)
        .ok_or_else(|| LaunchpadError::math_overflow("U256 addition", &[&a.to_string(), &b.to_string()]))
}

/// Safe subtraction for U256 values
pub fn safe_sub(a: U256, b: U256) -> LaunchpadResult<U256> {
    a.checked_sub(b)
        .ok_or_else(|| LaunchpadError::math_underflow("U256 subtraction", &[&a.to_string(), &b.to_string()]))
}

/// Safe multiplication for U256 values
pub fn safe_mul(a: U256, b: U256) -> LaunchpadResult<U256> {
    a.checked_mul(b)
        .ok_or_else(|| LaunchpadError::math_overflow("U256 multiplication", &[&a.to_string(), &b.to_string()]))
}

/// Safe division for U256 values, rounding down
pub fn safe_div(a: U256, b: U256) -> LaunchpadResult<U256> {
    if b.is_zero() {
        return Err(LaunchpadError::DivisionByZero {
            context: format!("U256 division: {} / {}", a, b),
        });
    }
    Ok(a / b)
}

/// Safe division rounding up
pub fn safe_div_ceil(a: U256, b: U256) -> LaunchpadResult<U256> {
    let quotient = safe_div(a, b)?;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        safe_add(quotient, U256::from(1))
    }
}

// ============================================================================
// Compound Operations
// ============================================================================

/// a * b / denominator without intermediate overflow for realistic token amounts
pub fn mul_div(a: U256, b: U256, denominator: U256) -> LaunchpadResult<U256> {
    safe_div(safe_mul(a, b)?, denominator)
}

/// a * b / denominator rounded up
pub fn mul_div_ceil(a: U256, b: U256, denominator: U256) -> LaunchpadResult<U256> {
    safe_div_ceil(safe_mul(a, b)?, denominator)
}
