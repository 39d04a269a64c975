//! # Collection Service
//!
//! Registry reads, collection creation and the minting flow.
//!
//! Minting is a sequential gate chain: validate the whole form, upload the
//! image, upload the metadata document referencing it, then submit the
//! mint transaction. A failure at any step aborts the flow; uploads that
//! already happened are not rolled back, orphaned store objects are an
//! accepted cost.

use std::sync::Arc;

use alloy_primitives::Address;
use shared::dto::{CollectionInfo, NftMetadata};
use tracing::{debug, instrument};

use crate::client::EthereumClient;
use crate::config::ChainConfig;
use crate::contracts::{CollectionContract, FactoryContract};
use crate::error::{ChainError, Result};
use crate::metadata::MetadataStore;
use crate::provider::EthereumProvider;
use crate::types::{MintRequest, TxReceipt};

/// Service backing the collections and mint pages.
pub struct CollectionService<P, S> {
    client: Arc<EthereumClient<P>>,
    store: Arc<S>,
    config: ChainConfig,
}

impl<P: EthereumProvider, S: MetadataStore> CollectionService<P, S> {
    pub fn new(client: Arc<EthereumClient<P>>, store: Arc<S>, config: ChainConfig) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    /// Collections created by `owner`.
    pub async fn collections_by_owner(&self, owner: Address) -> Result<Vec<CollectionInfo>> {
        let factory = FactoryContract::new(&self.client, self.config.factory_address);
        factory.collections_by_owner(owner).await
    }

    /// Every collection known to the factory.
    pub async fn all_collections(&self) -> Result<Vec<CollectionInfo>> {
        let factory = FactoryContract::new(&self.client, self.config.factory_address);
        factory.all_collections().await
    }

    /// Create a collection. Name and symbol must both be non-empty; the
    /// call blocks until the factory transaction is mined.
    #[instrument(skip(self))]
    pub async fn create_collection(
        &self,
        name: &str,
        symbol: &str,
        from: Address,
    ) -> Result<TxReceipt> {
        let name = name.trim();
        let symbol = symbol.trim();
        if name.is_empty() || symbol.is_empty() {
            return Err(ChainError::InvalidInput(
                "collection name and symbol are required".to_string(),
            ));
        }

        let factory = FactoryContract::new(&self.client, self.config.factory_address);
        factory
            .create_collection(name.to_string(), symbol.to_string(), from)
            .await
    }

    /// Mint a token: upload image, upload metadata, submit the mint.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn mint_nft(&self, request: MintRequest, from: Address) -> Result<TxReceipt> {
        let collection = request
            .collection
            .ok_or_else(|| ChainError::InvalidInput("select a collection".to_string()))?;
        let name = request.name.trim();
        let description = request.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(ChainError::InvalidInput(
                "name and description are required".to_string(),
            ));
        }
        let image = request
            .image
            .ok_or_else(|| ChainError::InvalidInput("choose an image file".to_string()))?;

        let image_uri = self.store.upload_file(image.bytes, &image.filename).await?;
        debug!(%image_uri, "image uploaded");

        let metadata = NftMetadata {
            name: name.to_string(),
            description: description.to_string(),
            image: Some(image_uri),
        };
        let metadata_uri = self.store.upload_json(&metadata).await?;
        debug!(%metadata_uri, "metadata uploaded");

        let contract = CollectionContract::new(&self.client, collection);
        contract.mint(from, metadata_uri, from).await
    }
}
