//! Fixed-point amounts and address display helpers

use alloy_primitives::{Address, U256};
use serde::Serializer;

/// Render a fixed-point integer with `decimals` fractional digits.
///
/// Trailing zeros of the fractional part are dropped, and so is the dot when
/// nothing remains after it: `1500000000000000000` at 18 decimals is `"1.5"`,
/// `10^18` is `"1"`.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let (whole, frac) = match U256::from(10u64).checked_pow(U256::from(decimals)) {
        Some(base) => (value / base, value % base),
        // 10^decimals does not fit: every representable value is fractional
        None => (U256::ZERO, value),
    };

    if frac.is_zero() {
        return whole.to_string();
    }

    let padded = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}

/// Parse a decimal amount such as `"0.25"` into its fixed-point integer.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty amount".into());
    }

    let (integer_part, fraction_part) = match input.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (input, ""),
    };

    if fraction_part.len() > decimals as usize {
        return Err(format!(
            "Too many decimal places in {} (max {})",
            input, decimals
        ));
    }
    if !integer_part.chars().all(|c| c.is_ascii_digit())
        || !fraction_part.chars().all(|c| c.is_ascii_digit())
        || (integer_part.is_empty() && fraction_part.is_empty())
    {
        return Err(format!("Invalid amount: {}", input));
    }

    let digits = format!(
        "{}{:0<width$}",
        integer_part,
        fraction_part,
        width = decimals as usize
    );
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 10).map_err(|_| format!("Amount out of range: {}", input))
}

/// `0x1234...abcd` form of a checksummed address.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Serialize a `U256` as a plain decimal string.
pub fn serialize_decimal<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

/// Seconds since the epoch, clamped at zero.
pub fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
