//! # Shared Utility Functions
//!
//! Display and URI helpers used across the library and the front-end.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - shorten an address with an ellipsis
//! - [`truncate_address`] - `format_address` with the display defaults
//!
//! ## URI Rewriting
//!
//! - [`ipfs_to_http`] - rewrite an `ipfs://` URI to an HTTP gateway URL

/// Format a wallet address by showing the first `prefix_len` and last
/// `suffix_len` characters.
///
/// If the address is too short to truncate meaningfully it is returned
/// as-is. Addresses are `0x`-prefixed hex, so byte indexing is safe.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x90F79bf6EB2c4f870365E785982E1f101E93b906";
/// assert_eq!(format_address(addr, 6, 4), "0x90F7...b906");
/// assert_eq!(format_address("0xabc", 6, 4), "0xabc");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

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

/// Format a wallet address with the default 6-character prefix (keeping the
/// `0x`) and 4-character suffix.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0x90F79bf6EB2c4f870365E785982E1f101E93b906";
/// assert_eq!(truncate_address(addr), "0x90F7...b906");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Rewrite an `ipfs://` URI into an HTTP gateway URL.
///
/// Any other scheme passes through unchanged. The gateway serves content
/// under `/ipfs/<cid>`; a trailing slash on the gateway base is tolerated.
///
/// # Examples
///
/// ```rust
/// use shared::utils::ipfs_to_http;
///
/// assert_eq!(
///     ipfs_to_http("ipfs://QmHash", "https://ipfs.io"),
///     "https://ipfs.io/ipfs/QmHash"
/// );
/// assert_eq!(
///     ipfs_to_http("https://example.com/meta.json", "https://ipfs.io"),
///     "https://example.com/meta.json"
/// );
/// ```
pub fn ipfs_to_http(uri: &str, gateway: &str) -> String {
    match uri.strip_prefix("ipfs://") {
        Some(cid) => format!("{}/ipfs/{}", gateway.trim_end_matches('/'), cid),
        None => uri.to_string(),
    }
}
