/// Conversion between decimal strings and base-unit integers
///
/// Mirrors ether/wei handling: "0.01" with 18 decimals is 10^16. Parsing is
/// delegated to `alloy_primitives::utils`; input is checked first because
/// alloy accepts negative amounts and silently truncates excess decimals.

use alloy_primitives::utils::{self, ParseUnits};
use alloy_primitives::U256;
use launchpad_types::{LaunchpadError, LaunchpadResult, ETHER_DECIMALS};

fn pow10(exp: u8) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Parse a non-negative decimal string into base units
pub fn parse_units(input: &str, decimals: u8) -> LaunchpadResult<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LaunchpadError::invalid_amount(input, "empty amount"));
    }
    if trimmed.starts_with('-') {
        return Err(LaunchpadError::invalid_amount(input, "negative amounts are not allowed"));
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(LaunchpadError::invalid_amount(input, "no digits"));
    }
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(LaunchpadError::invalid_amount(input, "not a decimal number"));
    }
    if fraction.len() > decimals as usize {
        return Err(LaunchpadError::invalid_amount(
            input,
            &format!("more than {} decimal places", decimals),
        ));
    }

    // alloy wants at least one digit on each side it sees
    let normalized = format!(
        "{}.{}",
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    match utils::parse_units(&normalized, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(LaunchpadError::invalid_amount(input, "negative amounts are not allowed")),
        Err(e) => Err(LaunchpadError::invalid_amount(input, &e.to_string())),
    }
}

/// Parse an ether amount into wei
pub fn parse_ether(input: &str) -> LaunchpadResult<U256> {
    parse_units(input, ETHER_DECIMALS)
}

/// Rendering with exactly `places` fractional digits, rounded half up
pub fn format_units_fixed(value: U256, decimals: u8, places: u8) -> String {
    if places >= decimals {
        let exact = value / pow10(decimals);
        let fraction = value % pow10(decimals);
        if places == 0 {
            return exact.to_string();
        }
        let digits = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
        return format!("{}.{:0<width$}", exact, digits, width = places as usize);
    }

    let step = pow10(decimals - places);
    let rounded = value.saturating_add(step / U256::from(2)) / step;
    let unit = pow10(places);
    let whole = rounded / unit;
    if places == 0 {
        return whole.to_string();
    }
    let fraction = rounded % unit;
    format!(
        "{}.{:0>width$}",
        whole,
        fraction.to_string(),
        width = places as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ether() {
        assert_eq!(parse_ether("1").unwrap(), U256::from(10u64).pow(U256::from(18)));
        assert_eq!(parse_ether("0.01").unwrap(), U256::from(10_000_000_000_000_000u64));
        assert_eq!(parse_ether(".5").unwrap(), U256::from(500_000_000_000_000_000u64));
        assert_eq!(parse_ether("2.").unwrap(), U256::from(2_000_000_000_000_000_000u64));
        assert_eq!(parse_ether(" 0 ").unwrap(), U256::ZERO);
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), U256::from(1));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for bad in ["", "   ", ".", "-1", "1e18", "abc", "1.2.3", "0.0000000000000000001"] {
            assert!(parse_ether(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parse_matches_alloy_formatting() {
        let value = parse_units("1234.5", 6).unwrap();
        assert_eq!(value, U256::from(1_234_500_000u64));
        assert_eq!(utils::format_units(value, 6u8).unwrap(), "1234.500000");
        assert_eq!(utils::format_ether(parse_ether("1.5").unwrap()), "1.500000000000000000");
    }

    #[test]
    fn test_format_fixed() {
        let value = parse_ether("1.23456").unwrap();
        assert_eq!(format_units_fixed(value, 18, 4), "1.2346");
        assert_eq!(format_units_fixed(value, 18, 2), "1.23");
        assert_eq!(format_units_fixed(value, 18, 0), "1");
        assert_eq!(format_units_fixed(U256::ZERO, 18, 2), "0.00");
        assert_eq!(format_units_fixed(parse_ether("0.99999").unwrap(), 18, 2), "1.00");
        assert_eq!(format_units_fixed(U256::from(15), 1, 3), "1.500");
    }
}
