//! Per-collection NFT contract surface: minting, enumeration, ownership
//! and marketplace approvals.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use shared::dto::TokenRecord;

use crate::abi::INFTCollection;
use crate::client::EthereumClient;
use crate::error::Result;
use crate::provider::EthereumProvider;
use crate::types::{TransactionRequest, TxReceipt};

/// A deployed collection contract, bound to its address.
pub struct CollectionContract<'a, P> {
    client: &'a EthereumClient<P>,
    address: Address,
}

impl<'a, P: EthereumProvider> CollectionContract<'a, P> {
    pub fn new(client: &'a EthereumClient<P>, address: Address) -> Self {
        Self { client, address }
    }

    /// Mint a token to `to` with the given metadata URI. Blocks until the
    /// transaction is mined.
    pub async fn mint(&self, to: Address, metadata_uri: String, from: Address) -> Result<TxReceipt> {
        let data = INFTCollection::mintCall {
            to,
            ipfsHash: metadata_uri,
        }
        .abi_encode();
        self.client
            .send_and_confirm(&TransactionRequest::new(from, self.address, data))
            .await
    }

    /// Every minted token with its mint-time owner and URI.
    pub async fn all_nfts(&self) -> Result<Vec<TokenRecord>> {
        let data = INFTCollection::getAllNFTsCall {}.abi_encode();
        let raw = self.client.call(self.address, data).await?;
        let ret = INFTCollection::getAllNFTsCall::abi_decode_returns(&raw, true)?;
        Ok(ret._0.into_iter().map(Into::into).collect())
    }

    /// Current owner of `token_id`.
    pub async fn owner_of(&self, token_id: U256) -> Result<Address> {
        let data = INFTCollection::ownerOfCall { tokenId: token_id }.abi_encode();
        let raw = self.client.call(self.address, data).await?;
        let ret = INFTCollection::ownerOfCall::abi_decode_returns(&raw, true)?;
        Ok(ret._0)
    }

    /// Grant `spender` transfer rights over `token_id`. Blocks until the
    /// transaction is mined.
    pub async fn approve(&self, spender: Address, token_id: U256, from: Address) -> Result<TxReceipt> {
        let data = INFTCollection::approveCall {
            to: spender,
            tokenId: token_id,
        }
        .abi_encode();
        self.client
            .send_and_confirm(&TransactionRequest::new(from, self.address, data))
            .await
    }

    /// Metadata URI of `token_id`.
    pub async fn token_uri(&self, token_id: U256) -> Result<String> {
        let data = INFTCollection::tokenURICall { tokenId: token_id }.abi_encode();
        let raw = self.client.call(self.address, data).await?;
        let ret = INFTCollection::tokenURICall::abi_decode_returns(&raw, true)?;
        Ok(ret._0)
    }
}
