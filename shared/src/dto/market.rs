use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::dto::collections::CollectionInfo;

/// A minted token as reported by a collection's `getAllNFTs` accessor.
///
/// The `owner` field is the owner at mint-record time and may be stale;
/// marketplace discovery re-reads `ownerOf` before classifying a token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRecord {
    pub token_id: U256,
    pub owner: Address,
    pub token_uri: String,
}

/// Off-chain token metadata document.
///
/// Fetched lazily per token; a failed fetch yields `None` at the call site,
/// never an error, so missing fields default instead of failing the parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A fully resolved token row as rendered by the marketplace view.
///
/// `price`/`seller` are reconstructed from historical listing events.
/// When no event matched, both stay at their zero sentinel: the token is
/// listed with an *unknown* price, not a free one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenView {
    pub token_id: U256,
    pub owner: Address,
    pub token_uri: String,
    pub metadata: Option<NftMetadata>,
    pub is_listed: bool,
    pub price: U256,
    pub seller: Address,
}

impl TokenView {
    /// Whether the token can actually be bought: listed and the price
    /// reconstruction found a real (non-sentinel) price.
    pub fn has_known_price(&self) -> bool {
        self.is_listed && self.price > U256::ZERO
    }
}

/// Discovery output for one collection: the record plus its resolved tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionTokens {
    pub collection: CollectionInfo,
    pub tokens: Vec<TokenView>,
}
