//! Browser-side service wiring.
//!
//! - [`eth`] - `window.ethereum` interop and wallet session helpers
//! - [`ipfs`] - the metadata store over the IPFS HTTP API
//!
//! Pages construct services per action from the [`ChainConfig`] in
//! context, matching the read-through model: nothing is cached between
//! page mounts.

use std::sync::Arc;

use lib_ethereum::{ChainConfig, CollectionService, EthereumClient, MarketService};

pub mod eth;
pub mod ipfs;

pub use eth::BrowserProvider;
pub use ipfs::GatewayStore;

/// Client over the injected wallet provider.
pub fn eth_client(config: &ChainConfig) -> Arc<EthereumClient<BrowserProvider>> {
    Arc::new(
        EthereumClient::new(BrowserProvider).with_poll_interval(config.receipt_poll_interval_ms),
    )
}

/// Market service bound to the browser provider and gateway store.
pub fn market_service(config: &ChainConfig) -> MarketService<BrowserProvider, GatewayStore> {
    MarketService::new(
        eth_client(config),
        Arc::new(GatewayStore::new(config)),
        config.clone(),
    )
}

/// Collection service bound to the browser provider and gateway store.
pub fn collection_service(config: &ChainConfig) -> CollectionService<BrowserProvider, GatewayStore> {
    CollectionService::new(
        eth_client(config),
        Arc::new(GatewayStore::new(config)),
        config.clone(),
    )
}
