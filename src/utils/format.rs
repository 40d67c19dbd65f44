//! # Formatting Utilities
//!
//! Display formatting for wallet addresses and native-chain balances.
//!
//! ## Functions
//!
//! - [`format_address`] - Format an address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - Alias for `format_address` with the navbar's display parameters
//! - [`parse_wei_hex`] - Parse the provider's hex-encoded wei balance
//! - [`wei_to_eth`] - Convert raw wei to ETH
//! - [`format_balance`] - Format an ETH amount for the connected-account panel

use super::constants::{BALANCE_DISPLAY_DECIMALS, WEI_PER_ETH};

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
/// The stored account value is never modified; this is display-only.
///
/// # Examples
///
/// ```rust
/// use lomi_web::utils::format::format_address;
///
/// let addr = "0xABCDEF1234567890ABCDEF1234567890ABCDEF12";
/// assert_eq!(format_address(addr, 6, 4), "0xABCD...EF12");
/// assert_eq!(format_address("short", 6, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Return early if the address is too short to truncate meaningfully.
    // Hex addresses are ASCII-only, so byte indexing below is safe.
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with the navbar's 6-character prefix and 4-character suffix.
///
/// # Examples
///
/// ```rust
/// use lomi_web::utils::format::truncate_address;
///
/// assert_eq!(truncate_address("0xABCDEF1234567890"), "0xABCD...7890");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Parse a hex-encoded wei quantity as returned by `eth_getBalance`.
///
/// Accepts an optional `0x`/`0X` prefix. Returns `None` for anything that is
/// not a hex integer.
pub fn parse_wei_hex(raw: &str) -> Option<u128> {
    let raw = raw.trim();
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);

    if digits.is_empty() {
        return None;
    }

    u128::from_str_radix(digits, 16).ok()
}

/// Convert raw wei (18 decimals) to ETH.
pub fn wei_to_eth(wei: u128) -> f64 {
    wei as f64 / WEI_PER_ETH
}

/// Format an ETH amount for display with 4 decimal places.
///
/// # Examples
///
/// ```rust
/// use lomi_web::utils::format::format_balance;
///
/// assert_eq!(format_balance(1.5), "1.5000");
/// assert_eq!(format_balance(0.12345678), "0.1235");
/// ```
pub fn format_balance(eth: f64) -> String {
    format!("{:.prec$}", eth, prec = BALANCE_DISPLAY_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0xABCDEF1234567890ABCDEF1234567890ABCDEF12";
        assert_eq!(format_address(addr, 6, 4), "0xABCD...EF12");
        assert_eq!(format_address(addr, 4, 4), "0xAB...EF12");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 6, 4), "short");
        assert_eq!(format_address("0xABCD1234", 6, 4), "0xABCD1234");
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(truncate_address("0xABCDEF1234567890"), "0xABCD...7890");
    }

    #[test]
    fn test_parse_wei_hex() {
        assert_eq!(parse_wei_hex("0x14d1120d7b160000"), Some(1_500_000_000_000_000_000));
        assert_eq!(parse_wei_hex("0x0"), Some(0));
        assert_eq!(parse_wei_hex("de0b6b3a7640000"), Some(1_000_000_000_000_000_000));
        assert_eq!(parse_wei_hex("0x"), None);
        assert_eq!(parse_wei_hex("not-hex"), None);
    }

    #[test]
    fn test_wei_to_eth_display() {
        let wei = parse_wei_hex("0x14d1120d7b160000").unwrap();
        assert_eq!(format_balance(wei_to_eth(wei)), "1.5000");

        assert_eq!(format_balance(wei_to_eth(0)), "0.0000");
        assert_eq!(format_balance(wei_to_eth(500_000_000_000_000_000)), "0.5000");
    }
}
