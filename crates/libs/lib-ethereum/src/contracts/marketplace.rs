//! Marketplace contract surface: listing, purchase and the `NFTListed`
//! event history used to reconstruct listing prices.

use alloy_primitives::{Address, B256, LogData, U256};
use alloy_sol_types::{SolCall, SolEvent};
use tracing::debug;

use crate::abi::INFTMarketplace;
use crate::client::EthereumClient;
use crate::error::Result;
use crate::provider::EthereumProvider;
use crate::types::{ListingEvent, LogFilter, TransactionRequest, TxReceipt};

/// The deployed marketplace contract, bound to its address.
pub struct MarketplaceContract<'a, P> {
    client: &'a EthereumClient<P>,
    address: Address,
}

impl<'a, P: EthereumProvider> MarketplaceContract<'a, P> {
    pub fn new(client: &'a EthereumClient<P>, address: Address) -> Self {
        Self { client, address }
    }

    /// List `token_id` of `collection` at `price` wei. The marketplace must
    /// already hold transfer approval for the token. Blocks until mined.
    pub async fn list_nft(
        &self,
        collection: Address,
        token_id: U256,
        price: U256,
        from: Address,
    ) -> Result<TxReceipt> {
        let data = INFTMarketplace::listNFTCall {
            nftContract: collection,
            tokenId: token_id,
            price,
        }
        .abi_encode();
        self.client
            .send_and_confirm(&TransactionRequest::new(from, self.address, data))
            .await
    }

    /// Buy a listed token, attaching `value` wei as payment and the
    /// configured gas ceiling. Blocks until mined; the contract enforces
    /// payment-for-transfer atomicity.
    pub async fn buy_nft(
        &self,
        collection: Address,
        token_id: U256,
        value: U256,
        gas_limit: u64,
        from: Address,
    ) -> Result<TxReceipt> {
        let data = INFTMarketplace::buyNFTCall {
            nftContract: collection,
            tokenId: token_id,
        }
        .abi_encode();
        let tx = TransactionRequest::new(from, self.address, data)
            .with_value(value)
            .with_gas(gas_limit);
        self.client.send_and_confirm(&tx).await
    }

    /// Historical `NFTListed` events for `(collection, token_id)`, ordered
    /// by block number and log index.
    pub async fn listing_events(
        &self,
        collection: Address,
        token_id: U256,
    ) -> Result<Vec<ListingEvent>> {
        let filter = LogFilter {
            address: self.address,
            topics: vec![
                Some(INFTMarketplace::NFTListed::SIGNATURE_HASH),
                Some(collection.into_word()),
                Some(B256::from(token_id)),
            ],
        };
        let mut logs = self.client.get_logs(&filter).await?;
        logs.sort_by_key(|log| log.position());

        let mut events = Vec::with_capacity(logs.len());
        for log in logs {
            let data = LogData::new_unchecked(log.topics, log.data);
            let event = INFTMarketplace::NFTListed::decode_log_data(&data, true)?;
            events.push(ListingEvent {
                price: event.price,
                seller: event.seller,
            });
        }
        Ok(events)
    }

    /// Price and seller of the most recent listing event, if any.
    ///
    /// `None` means the token has no recorded listing history; callers
    /// must treat that as "price unknown", never as "free".
    pub async fn latest_listing(
        &self,
        collection: Address,
        token_id: U256,
    ) -> Result<Option<ListingEvent>> {
        let events = self.listing_events(collection, token_id).await?;
        if events.is_empty() {
            debug!(%collection, %token_id, "token has no listing history");
        }
        Ok(events.last().copied())
    }
}
