//! # Chain-Layer Types
//!
//! Request/response structures for the JSON-RPC surface plus the small
//! domain types the services exchange with the pages.

use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};

/// An `eth_sendTransaction` request. The wallet holding `from` signs it;
/// this application never touches keys.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Bytes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<U256>,
}

impl TransactionRequest {
    /// A contract-call transaction with the given calldata.
    pub fn new(from: Address, to: Address, data: Vec<u8>) -> Self {
        Self {
            from,
            to,
            data: Some(data.into()),
            value: None,
            gas: None,
        }
    }

    /// Attach native currency to the transaction.
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }

    /// Set an explicit gas ceiling.
    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(U256::from(gas));
        self
    }
}

/// A mined transaction receipt. Unknown fields from the node are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub status: Option<U256>,
    #[serde(default)]
    pub block_number: Option<U256>,
}

impl TxReceipt {
    /// Whether the transaction was mined successfully. A missing status
    /// (pre-Byzantium nodes) counts as failure here; the flows treat a
    /// non-success receipt as an error.
    pub fn succeeded(&self) -> bool {
        self.status == Some(U256::from(1u8))
    }
}

/// An `eth_getLogs` filter: one contract address plus positional topics,
/// `None` acting as a wildcard. The query always starts at the earliest
/// block since listing history can be arbitrarily old.
#[derive(Debug, Clone)]
pub struct LogFilter {
    pub address: Address,
    pub topics: Vec<Option<B256>>,
}

/// A log entry as returned by `eth_getLogs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub topics: Vec<B256>,
    pub data: Bytes,
    #[serde(default)]
    pub block_number: Option<U256>,
    #[serde(default)]
    pub log_index: Option<U256>,
}

impl LogEntry {
    /// Chain position used to order matches. Pending logs sort first.
    pub fn position(&self) -> (U256, U256) {
        (
            self.block_number.unwrap_or_default(),
            self.log_index.unwrap_or_default(),
        )
    }
}

/// Price and seller carried by a decoded `NFTListed` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingEvent {
    pub price: U256,
    pub seller: Address,
}

/// Which collections marketplace discovery should enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryScope {
    /// Every collection known to the factory.
    Everything,
    /// Only collections created by the given owner.
    OwnedBy(Address),
}

/// Image file picked in the mint form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Input to the minting flow, validated as a whole before any upload.
#[derive(Debug, Clone, Default)]
pub struct MintRequest {
    pub collection: Option<Address>,
    pub name: String,
    pub description: String,
    pub image: Option<ImageFile>,
}
