//! In-memory mock chain and metadata store used by the flow tests.
//!
//! The mock implements the three contract surfaces over the provider
//! trait: calldata is decoded with the same ABI types the wrappers encode
//! with, transactions execute instantly, and reverts surface as mined
//! receipts with a failure status.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use lib_ethereum::abi::{CollectionData, INFTCollection, INFTCollectionFactory, INFTMarketplace, MintedNft};
use lib_ethereum::error::{ChainError, Result};
use lib_ethereum::metadata::MetadataStore;
use lib_ethereum::provider::EthereumProvider;
use lib_ethereum::types::LogEntry;
use shared::dto::{CollectionInfo, NftMetadata, TokenRecord};

/// One minted token. `record_owner` is what `getAllNFTs` reports (frozen at
/// mint time); `current_owner` is what `ownerOf` reports.
struct MockToken {
    token_id: U256,
    record_owner: Address,
    current_owner: Address,
    token_uri: String,
}

#[derive(Default)]
struct ChainState {
    collections: Vec<CollectionInfo>,
    tokens: HashMap<Address, Vec<MockToken>>,
    approvals: HashMap<(Address, U256), Address>,
    listings: HashMap<(Address, U256), (U256, Address)>,
    balances: HashMap<Address, U256>,
    logs: Vec<(Address, LogEntry)>,
    receipts: HashMap<B256, bool>,
    block_number: u64,
    tx_count: u64,
}

/// Mock chain hosting a factory, its collections and a marketplace.
#[derive(Clone)]
pub struct MockChain {
    factory: Address,
    marketplace: Address,
    state: Arc<Mutex<ChainState>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TxParams {
    from: Address,
    to: Address,
    #[serde(default)]
    data: Option<Bytes>,
    #[serde(default)]
    value: Option<U256>,
}

impl MockChain {
    pub fn new(factory: Address, marketplace: Address) -> Self {
        Self {
            factory,
            marketplace,
            state: Arc::new(Mutex::new(ChainState::default())),
        }
    }

    /// Number of transactions submitted so far. Local-validation tests
    /// assert this stays unchanged.
    pub fn tx_count(&self) -> u64 {
        self.state.lock().unwrap().tx_count
    }

    pub fn set_balance(&self, address: Address, wei: U256) {
        self.state.lock().unwrap().balances.insert(address, wei);
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.state
            .lock()
            .unwrap()
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default()
    }

    /// Move custody of a token without emitting any event, for exercising
    /// stale record owners and listings without history.
    pub fn set_token_owner(&self, collection: Address, token_id: U256, owner: Address) {
        let mut state = self.state.lock().unwrap();
        let token = state
            .tokens
            .get_mut(&collection)
            .and_then(|tokens| tokens.iter_mut().find(|t| t.token_id == token_id))
            .expect("unknown token");
        token.current_owner = owner;
    }

    fn handle_call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>> {
        let state = self.state.lock().unwrap();
        if data.len() < 4 {
            return Err(ChainError::Provider("calldata too short".to_string()));
        }
        let selector: [u8; 4] = data[..4].try_into().unwrap();

        if to == self.factory {
            return if selector == INFTCollectionFactory::getAllCollectionsCall::SELECTOR {
                let collections: Vec<CollectionData> =
                    state.collections.iter().cloned().map(Into::into).collect();
                Ok(INFTCollectionFactory::getAllCollectionsCall::abi_encode_returns(&(
                    collections,
                )))
            } else if selector == INFTCollectionFactory::getCollectionsByOwnerCall::SELECTOR {
                let call =
                    INFTCollectionFactory::getCollectionsByOwnerCall::abi_decode(data, true)?;
                let collections: Vec<CollectionData> = state
                    .collections
                    .iter()
                    .filter(|c| c.owner == call.owner)
                    .cloned()
                    .map(Into::into)
                    .collect();
                Ok(INFTCollectionFactory::getCollectionsByOwnerCall::abi_encode_returns(&(
                    collections,
                )))
            } else {
                Err(ChainError::Provider("unknown factory method".to_string()))
            };
        }

        let Some(tokens) = state.tokens.get(&to) else {
            return Err(ChainError::Provider(format!("no contract at {to}")));
        };

        if selector == INFTCollection::getAllNFTsCall::SELECTOR {
            let nfts: Vec<MintedNft> = tokens
                .iter()
                .map(|t| {
                    MintedNft::from(TokenRecord {
                        token_id: t.token_id,
                        owner: t.record_owner,
                        token_uri: t.token_uri.clone(),
                    })
                })
                .collect();
            Ok(INFTCollection::getAllNFTsCall::abi_encode_returns(&(nfts,)))
        } else if selector == INFTCollection::ownerOfCall::SELECTOR {
            let call = INFTCollection::ownerOfCall::abi_decode(data, true)?;
            let token = tokens
                .iter()
                .find(|t| t.token_id == call.tokenId)
                .ok_or_else(|| ChainError::Contract("nonexistent token".to_string()))?;
            Ok(INFTCollection::ownerOfCall::abi_encode_returns(&(
                token.current_owner,
            )))
        } else if selector == INFTCollection::tokenURICall::SELECTOR {
            let call = INFTCollection::tokenURICall::abi_decode(data, true)?;
            let token = tokens
                .iter()
                .find(|t| t.token_id == call.tokenId)
                .ok_or_else(|| ChainError::Contract("nonexistent token".to_string()))?;
            Ok(INFTCollection::tokenURICall::abi_encode_returns(&(
                token.token_uri.clone(),
            )))
        } else {
            Err(ChainError::Provider("unknown collection method".to_string()))
        }
    }

    /// Execute a transaction. A returned error marks the receipt as failed
    /// instead of failing the RPC call, mirroring mined-but-reverted.
    fn execute(&self, state: &mut ChainState, tx: &TxParams) -> std::result::Result<(), String> {
        let data: &[u8] = tx.data.as_ref().map(|b| b.as_ref()).unwrap_or_default();
        if data.len() < 4 {
            return Err("calldata too short".to_string());
        }
        let selector: [u8; 4] = data[..4].try_into().unwrap();

        if tx.to == self.factory {
            let call = INFTCollectionFactory::createCollectionCall::abi_decode(data, true)
                .map_err(|e| e.to_string())?;
            let index = state.collections.len() as u8;
            let mut raw = [0u8; 20];
            raw[18] = 0xC0;
            raw[19] = index + 1;
            let collection_address = Address::from(raw);
            state.collections.push(CollectionInfo {
                name: call.name,
                symbol: call.symbol,
                collection_address,
                owner: tx.from,
                created_at: U256::from(1_700_000_000u64 + u64::from(index)),
            });
            state.tokens.insert(collection_address, Vec::new());
            return Ok(());
        }

        if tx.to == self.marketplace {
            if selector == INFTMarketplace::listNFTCall::SELECTOR {
                let call = INFTMarketplace::listNFTCall::abi_decode(data, true)
                    .map_err(|e| e.to_string())?;
                let key = (call.nftContract, call.tokenId);
                let approved = state.approvals.get(&key) == Some(&self.marketplace);
                if !approved {
                    return Err("marketplace is not approved".to_string());
                }
                let token = state
                    .tokens
                    .get_mut(&call.nftContract)
                    .and_then(|tokens| tokens.iter_mut().find(|t| t.token_id == call.tokenId))
                    .ok_or("nonexistent token")?;
                if token.current_owner != tx.from {
                    return Err("only the owner can list".to_string());
                }
                token.current_owner = self.marketplace;
                state.listings.insert(key, (call.price, tx.from));

                let event = INFTMarketplace::NFTListed {
                    nftContract: call.nftContract,
                    tokenId: call.tokenId,
                    price: call.price,
                    seller: tx.from,
                };
                let log_data = event.encode_log_data();
                state.logs.push((
                    self.marketplace,
                    LogEntry {
                        topics: log_data.topics().to_vec(),
                        data: log_data.data.clone(),
                        block_number: Some(U256::from(state.block_number)),
                        log_index: Some(U256::ZERO),
                    },
                ));
                return Ok(());
            }
            if selector == INFTMarketplace::buyNFTCall::SELECTOR {
                let call = INFTMarketplace::buyNFTCall::abi_decode(data, true)
                    .map_err(|e| e.to_string())?;
                let key = (call.nftContract, call.tokenId);
                let (price, seller) = *state.listings.get(&key).ok_or("token is not listed")?;
                let paid = tx.value.unwrap_or_default();
                if paid < price {
                    return Err("payment below listing price".to_string());
                }
                let buyer_balance = state.balances.get(&tx.from).copied().unwrap_or_default();
                if buyer_balance < paid {
                    return Err("insufficient balance".to_string());
                }
                let token = state
                    .tokens
                    .get_mut(&call.nftContract)
                    .and_then(|tokens| tokens.iter_mut().find(|t| t.token_id == call.tokenId))
                    .ok_or("nonexistent token")?;
                token.current_owner = tx.from;
                state.listings.remove(&key);
                state.approvals.remove(&key);
                state.balances.insert(tx.from, buyer_balance - paid);
                let seller_balance = state.balances.get(&seller).copied().unwrap_or_default();
                state.balances.insert(seller, seller_balance + paid);
                return Ok(());
            }
            return Err("unknown marketplace method".to_string());
        }

        if state.tokens.contains_key(&tx.to) {
            if selector == INFTCollection::mintCall::SELECTOR {
                let call =
                    INFTCollection::mintCall::abi_decode(data, true).map_err(|e| e.to_string())?;
                let tokens = state.tokens.get_mut(&tx.to).unwrap();
                let token_id = U256::from(tokens.len() as u64 + 1);
                tokens.push(MockToken {
                    token_id,
                    record_owner: call.to,
                    current_owner: call.to,
                    token_uri: call.ipfsHash,
                });
                return Ok(());
            }
            if selector == INFTCollection::approveCall::SELECTOR {
                let call = INFTCollection::approveCall::abi_decode(data, true)
                    .map_err(|e| e.to_string())?;
                let tokens = state.tokens.get(&tx.to).unwrap();
                let token = tokens
                    .iter()
                    .find(|t| t.token_id == call.tokenId)
                    .ok_or("nonexistent token")?;
                if token.current_owner != tx.from {
                    return Err("only the owner can approve".to_string());
                }
                state.approvals.insert((tx.to, call.tokenId), call.to);
                return Ok(());
            }
            return Err("unknown collection method".to_string());
        }

        Err(format!("no contract at {}", tx.to))
    }

    fn handle_send(&self, tx: TxParams) -> B256 {
        let mut state = self.state.lock().unwrap();
        state.tx_count += 1;
        state.block_number += 1;
        let hash = B256::from(U256::from(state.tx_count));
        let status = self.execute(&mut state, &tx).is_ok();
        state.receipts.insert(hash, status);
        hash
    }

    fn handle_get_logs(&self, filter: &Value) -> Result<Value> {
        let address: Address = serde_json::from_value(filter["address"].clone())?;
        let topics: Vec<Option<B256>> = serde_json::from_value(filter["topics"].clone())?;
        let state = self.state.lock().unwrap();
        let matches: Vec<&LogEntry> = state
            .logs
            .iter()
            .filter(|(log_address, entry)| {
                *log_address == address
                    && topics.iter().enumerate().all(|(i, want)| match want {
                        Some(topic) => entry.topics.get(i) == Some(topic),
                        None => true,
                    })
            })
            .map(|(_, entry)| entry)
            .collect();
        Ok(serde_json::to_value(matches)?)
    }
}

#[async_trait(?Send)]
impl EthereumProvider for MockChain {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        match method {
            "eth_getBalance" => {
                let address: Address = serde_json::from_value(params[0].clone())?;
                Ok(serde_json::to_value(self.balance(address))?)
            }
            "eth_call" => {
                let to: Address = serde_json::from_value(params[0]["to"].clone())?;
                let data: Bytes = serde_json::from_value(params[0]["data"].clone())?;
                let ret = self.handle_call(to, &data)?;
                Ok(serde_json::to_value(Bytes::from(ret))?)
            }
            "eth_sendTransaction" => {
                let tx: TxParams = serde_json::from_value(params[0].clone())?;
                Ok(serde_json::to_value(self.handle_send(tx))?)
            }
            "eth_getTransactionReceipt" => {
                let hash: B256 = serde_json::from_value(params[0].clone())?;
                let state = self.state.lock().unwrap();
                match state.receipts.get(&hash) {
                    Some(status) => Ok(json!({
                        "transactionHash": hash,
                        "status": if *status { "0x1" } else { "0x0" },
                        "blockNumber": format!("{:#x}", state.block_number),
                    })),
                    None => Ok(Value::Null),
                }
            }
            "eth_getLogs" => self.handle_get_logs(&params[0]),
            "eth_accounts" | "eth_requestAccounts" => Ok(json!([])),
            other => Err(ChainError::Provider(format!("unsupported method {other}"))),
        }
    }
}

/// In-memory metadata store keyed by fake CIDs, serving fetches only
/// through its gateway-rewritten URLs.
pub struct MemoryStore {
    gateway: String,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new(gateway: &str) -> Self {
        Self {
            gateway: gateway.trim_end_matches('/').to_string(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl MetadataStore for MemoryStore {
    async fn upload_file(&self, bytes: Vec<u8>, _filename: &str) -> Result<String> {
        let mut objects = self.objects.lock().unwrap();
        let cid = format!("Qmmem{}", objects.len() + 1);
        objects.insert(cid.clone(), bytes);
        Ok(format!("ipfs://{cid}"))
    }

    async fn upload_json(&self, metadata: &NftMetadata) -> Result<String> {
        let bytes = serde_json::to_vec(metadata)
            .map_err(|e| ChainError::Metadata(e.to_string()))?;
        self.upload_file(bytes, "metadata.json").await
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let prefix = format!("{}/ipfs/", self.gateway);
        let cid = url
            .strip_prefix(&prefix)
            .ok_or_else(|| ChainError::Metadata(format!("not a gateway URL: {url}")))?;
        let objects = self.objects.lock().unwrap();
        let bytes = objects
            .get(cid)
            .ok_or_else(|| ChainError::Metadata(format!("object not found: {cid}")))?;
        String::from_utf8(bytes.clone()).map_err(|e| ChainError::Metadata(e.to_string()))
    }
}
