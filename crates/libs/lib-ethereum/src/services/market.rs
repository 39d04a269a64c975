//! # Market Service
//!
//! Marketplace discovery plus the listing and purchase flows.
//!
//! ## Discovery
//!
//! One parametrized routine serves both the marketplace-wide view and the
//! per-user view (see [`DiscoveryScope`]):
//!
//! 1. enumerate collections through the factory;
//! 2. per collection, read every minted token;
//! 3. per token, re-read the current owner and classify it as listed when
//!    the owner is the marketplace contract;
//! 4. for listed tokens, reconstruct price and seller from the most recent
//!    `NFTListed` event, falling back to the zero/zero "unknown" sentinel;
//! 5. resolve off-chain metadata, degrading to `None` on any failure.
//!
//! Fan-out across collections and across tokens is bounded by
//! `max_concurrent_queries` at each level, so a large catalog cannot flood
//! the RPC endpoint.

use std::sync::Arc;

use alloy_primitives::{
    utils::parse_ether,
    Address, U256,
};
use futures::stream::{self, StreamExt, TryStreamExt};
use shared::dto::{CollectionInfo, CollectionTokens, TokenRecord, TokenView};
use tracing::{instrument, warn};

use crate::client::EthereumClient;
use crate::config::ChainConfig;
use crate::contracts::{CollectionContract, FactoryContract, MarketplaceContract};
use crate::error::{ChainError, Result};
use crate::metadata::{fetch_metadata, MetadataStore};
use crate::provider::EthereumProvider;
use crate::types::{DiscoveryScope, TxReceipt};

/// Service backing the marketplace view.
pub struct MarketService<P, S> {
    client: Arc<EthereumClient<P>>,
    store: Arc<S>,
    config: ChainConfig,
}

impl<P: EthereumProvider, S: MetadataStore> MarketService<P, S> {
    pub fn new(client: Arc<EthereumClient<P>>, store: Arc<S>, config: ChainConfig) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    /// Discover collections and their tokens for the given scope.
    #[instrument(skip(self))]
    pub async fn discover(&self, scope: DiscoveryScope) -> Result<Vec<CollectionTokens>> {
        let factory = FactoryContract::new(&self.client, self.config.factory_address);
        let collections = match scope {
            DiscoveryScope::Everything => factory.all_collections().await?,
            DiscoveryScope::OwnedBy(owner) => factory.collections_by_owner(owner).await?,
        };

        stream::iter(
            collections
                .into_iter()
                .map(|collection| self.collection_tokens(collection)),
        )
        .buffered(self.config.max_concurrent_queries)
        .try_collect()
        .await
    }

    /// List a token: approve the marketplace, then submit the listing.
    ///
    /// The price is entered in native units ("1.5") and converted to wei.
    /// A failure after the approval leaves the approval in place; the next
    /// discovery still shows the token as unlisted.
    #[instrument(skip(self))]
    pub async fn list_nft(
        &self,
        collection: Address,
        token_id: U256,
        price_input: &str,
        from: Address,
    ) -> Result<TxReceipt> {
        let price = parse_price(price_input)?;

        let nft = CollectionContract::new(&self.client, collection);
        nft.approve(self.config.marketplace_address, token_id, from)
            .await?;

        let marketplace = MarketplaceContract::new(&self.client, self.config.marketplace_address);
        marketplace.list_nft(collection, token_id, price, from).await
    }

    /// Buy a listed token at its reconstructed price.
    ///
    /// Rejected locally, without submitting a transaction, when the token
    /// is not listed, the price is the unknown sentinel, the buyer is the
    /// seller, or the buyer's balance cannot cover the price.
    #[instrument(skip(self, token), fields(token_id = %token.token_id))]
    pub async fn buy_nft(
        &self,
        collection: Address,
        token: &TokenView,
        buyer: Address,
    ) -> Result<TxReceipt> {
        if !token.is_listed {
            return Err(ChainError::InvalidInput("token is not listed".to_string()));
        }
        if token.price.is_zero() {
            return Err(ChainError::InvalidInput(
                "listing price is unknown".to_string(),
            ));
        }
        if token.seller == buyer {
            return Err(ChainError::InvalidInput(
                "cannot buy your own listing".to_string(),
            ));
        }

        let balance = self.client.get_balance(buyer).await?;
        if balance < token.price {
            return Err(ChainError::InsufficientFunds {
                balance,
                price: token.price,
            });
        }

        let marketplace = MarketplaceContract::new(&self.client, self.config.marketplace_address);
        marketplace
            .buy_nft(
                collection,
                token.token_id,
                token.price,
                self.config.buy_gas_limit,
                buyer,
            )
            .await
    }

    /// Resolve one collection: enumerate its tokens with bounded fan-out.
    async fn collection_tokens(&self, collection: CollectionInfo) -> Result<CollectionTokens> {
        let contract = CollectionContract::new(&self.client, collection.collection_address);
        let records = contract.all_nfts().await?;

        let address = collection.collection_address;
        let tokens = stream::iter(
            records
                .into_iter()
                .map(|record| self.resolve_token(address, record)),
        )
        .buffered(self.config.max_concurrent_queries)
        .try_collect()
        .await?;

        Ok(CollectionTokens { collection, tokens })
    }

    /// Resolve one token row: current owner, listing status, price, and
    /// metadata.
    async fn resolve_token(&self, collection: Address, record: TokenRecord) -> Result<TokenView> {
        let contract = CollectionContract::new(&self.client, collection);
        // The record's owner field may be stale; classification uses the
        // live owner.
        let owner = contract.owner_of(record.token_id).await?;
        let is_listed = owner == self.config.marketplace_address;

        let (price, seller) = if is_listed {
            let marketplace =
                MarketplaceContract::new(&self.client, self.config.marketplace_address);
            match marketplace.latest_listing(collection, record.token_id).await {
                Ok(Some(event)) => (event.price, event.seller),
                Ok(None) => (U256::ZERO, Address::ZERO),
                Err(err) => {
                    warn!(%collection, token_id = %record.token_id, %err,
                        "listing reconstruction failed, reporting unknown price");
                    (U256::ZERO, Address::ZERO)
                }
            }
        } else {
            (U256::ZERO, Address::ZERO)
        };

        // Metadata resolves through a live tokenURI read; a failure there
        // degrades to a missing document, not a discovery error.
        let metadata = match contract.token_uri(record.token_id).await {
            Ok(uri) => {
                fetch_metadata(self.store.as_ref(), &uri, &self.config.ipfs_gateway_url).await
            }
            Err(err) => {
                warn!(%collection, token_id = %record.token_id, %err, "tokenURI read failed");
                None
            }
        };

        Ok(TokenView {
            token_id: record.token_id,
            owner,
            token_uri: record.token_uri,
            metadata,
            is_listed,
            price,
            seller,
        })
    }
}

/// Parse a user-entered price in native units into wei.
///
/// Rejects empty, unparsable, negative and zero inputs.
pub fn parse_price(input: &str) -> Result<U256> {
    let input = input.trim();
    let price = parse_ether(input)
        .map_err(|_| ChainError::InvalidInput(format!("invalid price: {input:?}")))?;
    if price.is_zero() {
        return Err(ChainError::InvalidInput(
            "price must be positive".to_string(),
        ));
    }
    Ok(price)
}
