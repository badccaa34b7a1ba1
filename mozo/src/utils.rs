use rust_decimal::Decimal;

use crate::error::{MozoError, Result};

/// Convert a raw integer amount into a display amount by dividing by
/// `10^decimals`.
///
/// # Errors
///
/// Returns `MozoError::Overflow` if `10^decimals` does not fit in a `u64`.
pub fn from_scaled(raw: Decimal, decimals: u32) -> Result<Decimal> {
    let scale = 10u64
        .checked_pow(decimals)
        .map(Decimal::from)
        .ok_or_else(|| MozoError::Overflow(format!("from_scaled: 10^{decimals}")))?;
    raw.checked_div(scale)
        .ok_or_else(|| MozoError::Overflow(format!("from_scaled: {raw} / 10^{decimals}")))
}

/// Shorten an address for log lines: `0x1234..abcd`.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}..{tail}")
}
