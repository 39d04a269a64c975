//! Collection factory surface: registry reads and collection creation.

use alloy_primitives::Address;
use alloy_sol_types::SolCall;
use shared::dto::CollectionInfo;

use crate::abi::INFTCollectionFactory;
use crate::client::EthereumClient;
use crate::error::Result;
use crate::provider::EthereumProvider;
use crate::types::{TransactionRequest, TxReceipt};

/// The deployed collection factory, bound to its address.
pub struct FactoryContract<'a, P> {
    client: &'a EthereumClient<P>,
    address: Address,
}

impl<'a, P: EthereumProvider> FactoryContract<'a, P> {
    pub fn new(client: &'a EthereumClient<P>, address: Address) -> Self {
        Self { client, address }
    }

    /// Every collection the factory has ever deployed.
    pub async fn all_collections(&self) -> Result<Vec<CollectionInfo>> {
        let data = INFTCollectionFactory::getAllCollectionsCall {}.abi_encode();
        let raw = self.client.call(self.address, data).await?;
        let ret = INFTCollectionFactory::getAllCollectionsCall::abi_decode_returns(&raw, true)?;
        Ok(ret._0.into_iter().map(Into::into).collect())
    }

    /// Collections created by `owner`.
    pub async fn collections_by_owner(&self, owner: Address) -> Result<Vec<CollectionInfo>> {
        let data = INFTCollectionFactory::getCollectionsByOwnerCall { owner }.abi_encode();
        let raw = self.client.call(self.address, data).await?;
        let ret =
            INFTCollectionFactory::getCollectionsByOwnerCall::abi_decode_returns(&raw, true)?;
        Ok(ret._0.into_iter().map(Into::into).collect())
    }

    /// Deploy a new collection. Blocks until the transaction is mined.
    pub async fn create_collection(
        &self,
        name: String,
        symbol: String,
        from: Address,
    ) -> Result<TxReceipt> {
        let data = INFTCollectionFactory::createCollectionCall { name, symbol }.abi_encode();
        self.client
            .send_and_confirm(&TransactionRequest::new(from, self.address, data))
            .await
    }
}
