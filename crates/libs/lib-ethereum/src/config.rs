//! # Chain Configuration
//!
//! Deployment addresses and tuning knobs, built once at startup and passed
//! explicitly into every service. There is no global configuration
//! instance: services receive their `ChainConfig` at construction so tests
//! can run each of them against mock gateways.

use alloy_primitives::Address;

use crate::error::{ChainError, Result};

/// Default public IPFS gateway used to dereference `ipfs://` URIs.
pub const DEFAULT_IPFS_GATEWAY: &str = "https://ipfs.io";

/// Default IPFS HTTP API endpoint used for uploads.
pub const DEFAULT_IPFS_API: &str = "http://127.0.0.1:5001";

/// Configuration for the marketplace deployment this front-end talks to.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// Address of the deployed collection factory.
    pub factory_address: Address,

    /// Address of the deployed marketplace contract. Tokens owned by this
    /// address are classified as listed.
    pub marketplace_address: Address,

    /// IPFS HTTP API base URL (uploads).
    pub ipfs_api_url: String,

    /// IPFS gateway base URL (`ipfs://` rewrites for fetches).
    pub ipfs_gateway_url: String,

    /// Upper bound on in-flight discovery queries, per fan-out level.
    pub max_concurrent_queries: usize,

    /// Gas ceiling attached to `buyNFT` transactions.
    pub buy_gas_limit: u64,

    /// Interval between `eth_getTransactionReceipt` polls while waiting for
    /// a transaction to be mined.
    pub receipt_poll_interval_ms: u32,
}

impl ChainConfig {
    /// Build a configuration from the two deployment addresses, with
    /// defaults for everything else.
    pub fn new(factory_address: &str, marketplace_address: &str) -> Result<Self> {
        let factory_address = factory_address
            .parse::<Address>()
            .map_err(|e| ChainError::Config(format!("invalid factory address: {e}")))?;
        let marketplace_address = marketplace_address
            .parse::<Address>()
            .map_err(|e| ChainError::Config(format!("invalid marketplace address: {e}")))?;

        let config = Self {
            factory_address,
            marketplace_address,
            ipfs_api_url: DEFAULT_IPFS_API.to_string(),
            ipfs_gateway_url: DEFAULT_IPFS_GATEWAY.to_string(),
            max_concurrent_queries: 8,
            buy_gas_limit: 300_000,
            receipt_poll_interval_ms: 1_000,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.factory_address == Address::ZERO {
            return Err(ChainError::Config("factory address is unset".to_string()));
        }
        if self.marketplace_address == Address::ZERO {
            return Err(ChainError::Config("marketplace address is unset".to_string()));
        }
        if self.max_concurrent_queries == 0 {
            return Err(ChainError::Config(
                "max_concurrent_queries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORY: &str = "0x2203994926b94DD7a1C16092566ebCbae6972372";
    const MARKET: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[test]
    fn test_new_parses_addresses() {
        let config = ChainConfig::new(FACTORY, MARKET).unwrap();
        assert_eq!(config.factory_address, FACTORY.parse::<Address>().unwrap());
        assert_eq!(config.max_concurrent_queries, 8);
    }

    #[test]
    fn test_new_rejects_bad_address() {
        assert!(ChainConfig::new("not-an-address", MARKET).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_addresses() {
        let mut config = ChainConfig::new(FACTORY, MARKET).unwrap();
        config.marketplace_address = Address::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let mut config = ChainConfig::new(FACTORY, MARKET).unwrap();
        config.max_concurrent_queries = 0;
        assert!(config.validate().is_err());
    }
}
