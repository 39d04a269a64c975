//! # Ethereum Integration Library
//!
//! Chain access for the marketplace front-end: a JSON-RPC provider
//! abstraction, a typed Ethereum client, ABI-typed wrappers for the three
//! marketplace contracts, the metadata store client, and the services the
//! pages call.
//!
//! ## Architecture
//!
//! ```text
//! pages (market-web)
//!     → services (MarketService, CollectionService)
//!         → contracts (factory / collection / marketplace wrappers)
//!             → EthereumClient (typed JSON-RPC helpers)
//!                 → EthereumProvider (transport trait)
//! ```
//!
//! Every layer below the services is stateless; all durable state lives in
//! the on-chain contracts. The [`provider::EthereumProvider`] trait is the
//! seam for transports: `reqwest` on native targets, `window.ethereum` in
//! the browser, and in-memory mock chains in tests.

pub mod abi;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod metadata;
pub mod provider;
pub mod services;
pub mod types;

// Re-export the types most callers need
pub use client::EthereumClient;
pub use config::ChainConfig;
pub use error::{ChainError, Result};
pub use metadata::MetadataStore;
pub use provider::EthereumProvider;
#[cfg(not(target_arch = "wasm32"))]
pub use provider::HttpProvider;
pub use services::{CollectionService, MarketService};
pub use types::DiscoveryScope;
