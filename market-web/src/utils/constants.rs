//! Deployment constants.
//!
//! Each value can be overridden at build time through the matching
//! environment variable; the checked-in defaults target a local
//! development deployment.

use lib_ethereum::ChainConfig;

/// Collection factory address (`MINTBAY_FACTORY_ADDRESS`).
pub const FACTORY_ADDRESS: &str = match option_env!("MINTBAY_FACTORY_ADDRESS") {
    Some(value) => value,
    None => "0x2203994926b94DD7a1C16092566ebCbae6972372",
};

/// Marketplace contract address (`MINTBAY_MARKETPLACE_ADDRESS`).
pub const MARKETPLACE_ADDRESS: &str = match option_env!("MINTBAY_MARKETPLACE_ADDRESS") {
    Some(value) => value,
    None => "0x0165878A594ca255338adfa4d48449f69242Eb8F",
};

/// IPFS HTTP API base URL for uploads (`MINTBAY_IPFS_API`).
pub const IPFS_API_URL: &str = match option_env!("MINTBAY_IPFS_API") {
    Some(value) => value,
    None => "http://127.0.0.1:5001",
};

/// IPFS gateway base URL for fetches (`MINTBAY_IPFS_GATEWAY`).
pub const IPFS_GATEWAY_URL: &str = match option_env!("MINTBAY_IPFS_GATEWAY") {
    Some(value) => value,
    None => "https://ipfs.io",
};

/// Build the chain configuration from the compile-time constants.
///
/// Panics on an invalid deployment address; the constants are fixed at
/// build time, so this cannot fail at runtime for a correct build.
pub fn chain_config() -> ChainConfig {
    let mut config = ChainConfig::new(FACTORY_ADDRESS, MARKETPLACE_ADDRESS)
        .expect("deployment addresses must be valid");
    config.ipfs_api_url = IPFS_API_URL.to_string();
    config.ipfs_gateway_url = IPFS_GATEWAY_URL.to_string();
    config
}
