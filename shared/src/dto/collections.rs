use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// A deployed collection, as recorded by the factory contract.
///
/// Immutable from this application's perspective: the factory appends a
/// record when `createCollection` is mined and never updates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub symbol: String,
    pub collection_address: Address,
    pub owner: Address,
    /// Unix timestamp (seconds) of the creation block.
    pub created_at: U256,
}
