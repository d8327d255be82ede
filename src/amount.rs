//! Raw amount parsing, threshold filtering and unit formatting
//!
//! Raw amounts are integers in the token's smallest unit. They stay strings
//! until compared or formatted, and are only ever handled as `BigInt`.

use num_bigint::{BigInt, BigUint, Sign};

/// Parse an integer the way `BigInt("...")` does: surrounding whitespace is
/// ignored, an empty string is zero, decimal literals may carry a sign, and
/// unsigned `0x`/`0o`/`0b` literals are accepted.
pub fn parse_big_int(raw: &str) -> Option<BigInt> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(BigInt::from(0));
    }

    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)];
    for (prefix, radix) in prefixed {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_digits(digits, radix).map(|n| BigInt::from_biguint(Sign::Plus, n));
        }
    }

    let (sign, digits) = match s.as_bytes()[0] {
        b'-' => (Sign::Minus, &s[1..]),
        b'+' => (Sign::Plus, &s[1..]),
        _ => (Sign::Plus, s),
    };
    parse_digits(digits, 10).map(|n| BigInt::from_biguint(sign, n))
}

fn parse_digits(digits: &str, radix: u32) -> Option<BigUint> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigUint::parse_bytes(digits.as_bytes(), radix)
}

/// Only an absent, empty or literal `"0"` value is zero. Padded forms such as
/// `"000"` are left to the threshold check.
pub fn is_zero(raw: Option<&str>) -> bool {
    matches!(raw, None | Some("") | Some("0"))
}

/// `value >= threshold` as big integers. No threshold always passes; a
/// malformed value or threshold never does.
pub fn passes_min_claimable(raw: Option<&str>, threshold: Option<&str>) -> bool {
    let Some(threshold) = threshold.filter(|t| !t.is_empty()) else {
        return true;
    };
    match (parse_big_int(raw.unwrap_or("0")), parse_big_int(threshold)) {
        (Some(value), Some(min)) => value >= min,
        _ => false,
    }
}

/// Inclusion rule for a resolved amount.
pub fn should_include(raw: Option<&str>, include_zero: bool, threshold: Option<&str>) -> bool {
    include_zero || (!is_zero(raw) && passes_min_claimable(raw, threshold))
}

/// Scale a raw integer down by `10^decimals`, rendering it like ethers'
/// `formatUnits` (`"1.5"`, `"500.0"`). Returns `None` when decimals are
/// unknown or the raw value is not an integer.
pub fn format_units(raw: &str, decimals: Option<u8>) -> Option<String> {
    let decimals = decimals?;
    let value = parse_big_int(raw)?;

    let scale = BigUint::from(10u32).pow(u32::from(decimals));
    let magnitude = value.magnitude();
    let whole = magnitude / &scale;
    let fraction = magnitude % &scale;

    let mut fraction = format!("{:0>width$}", fraction.to_string(), width = usize::from(decimals));
    while fraction.ends_with('0') {
        fraction.pop();
    }
    if fraction.is_empty() {
        fraction.push('0');
    }

    let sign = if value.sign() == Sign::Minus { "-" } else { "" };
    Some(format!("{sign}{whole}.{fraction}"))
}
