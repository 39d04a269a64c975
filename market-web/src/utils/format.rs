//! Display formatting helpers for the marketplace pages.
//! For address formatting, use [`shared::utils::truncate_address`].

use alloy_primitives::{utils::format_ether, U256};
use chrono::DateTime;

/// Format a wei amount in native units for display.
///
/// `format_ether` keeps the full 18-decimal expansion; trailing zeros are
/// trimmed for readability.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::utils::parse_ether;
/// use market_web::utils::format::format_price;
///
/// assert_eq!(format_price(parse_ether("1.5").unwrap()), "1.5 ETH");
/// assert_eq!(format_price(parse_ether("2").unwrap()), "2 ETH");
/// ```
pub fn format_price(wei: U256) -> String {
    let text = format_ether(wei);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0 ETH".to_string()
    } else {
        format!("{trimmed} ETH")
    }
}

/// Format a block timestamp (Unix seconds) as a calendar date.
pub fn format_created_at(timestamp: U256) -> String {
    let seconds = i64::try_from(timestamp).unwrap_or_default();
    match DateTime::from_timestamp(seconds, 0) {
        Some(when) => when.format("%Y-%m-%d").to_string(),
        None => "unknown".to_string(),
    }
}
