//! # Contract Wrappers
//!
//! Address-bound typed wrappers over [`crate::client::EthereumClient`],
//! one per contract surface the application consumes:
//!
//! - [`factory::FactoryContract`] - collection registry and creation
//! - [`collection::CollectionContract`] - minting, token enumeration,
//!   ownership and approvals
//! - [`marketplace::MarketplaceContract`] - listing, purchase and listing
//!   event history

pub mod collection;
pub mod factory;
pub mod marketplace;

pub use collection::CollectionContract;
pub use factory::FactoryContract;
pub use marketplace::MarketplaceContract;
