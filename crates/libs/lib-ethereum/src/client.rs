//! # Typed Ethereum Client
//!
//! High-level wrapper over an [`EthereumProvider`] transport exposing the
//! handful of JSON-RPC methods this application needs: account access,
//! balance reads, contract calls, transaction submission with receipt
//! polling, and log queries.
//!
//! The client encodes parameters to the standard JSON-RPC shapes and
//! decodes results with `serde`; ABI-level encoding belongs to
//! [`crate::contracts`].

use alloy_primitives::{Address, Bytes, B256, U256};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ChainError, Result};
use crate::provider::EthereumProvider;
use crate::types::{LogEntry, LogFilter, TransactionRequest, TxReceipt};

/// Default interval between receipt polls.
const DEFAULT_POLL_INTERVAL_MS: u32 = 1_000;

/// Typed JSON-RPC client, generic over its transport.
pub struct EthereumClient<P> {
    provider: P,
    receipt_poll_interval_ms: u32,
}

impl<P: EthereumProvider> EthereumClient<P> {
    /// Wrap a transport with the default receipt poll interval.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            receipt_poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Override the receipt poll interval.
    pub fn with_poll_interval(mut self, interval_ms: u32) -> Self {
        self.receipt_poll_interval_ms = interval_ms;
        self
    }

    /// Accounts the wallet currently exposes, without prompting.
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        let result = self.provider.request("eth_accounts", json!([])).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Ask the wallet to expose its accounts, prompting the user if the
    /// application is not yet authorized.
    pub async fn request_accounts(&self) -> Result<Vec<Address>> {
        let result = self
            .provider
            .request("eth_requestAccounts", json!([]))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Native-currency balance of `address` at the latest block, in wei.
    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        let result = self
            .provider
            .request("eth_getBalance", json!([address, "latest"]))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Execute a read-only contract call and return the raw return data.
    pub async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        let call = json!({ "to": to, "data": Bytes::from(data) });
        let result = self
            .provider
            .request("eth_call", json!([call, "latest"]))
            .await?;
        let bytes: Bytes = serde_json::from_value(result)?;
        Ok(bytes.to_vec())
    }

    /// Submit a transaction for signing and broadcast; returns its hash.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256> {
        let result = self
            .provider
            .request("eth_sendTransaction", json!([tx]))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Receipt for a transaction hash, `None` while still pending.
    pub async fn transaction_receipt(&self, hash: B256) -> Result<Option<TxReceipt>> {
        let result = self
            .provider
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(result)?))
    }

    /// Poll until the transaction is mined.
    ///
    /// There is no timeout and no cancellation: the flow waits as long as
    /// the chain does.
    pub async fn wait_for_receipt(&self, hash: B256) -> Result<TxReceipt> {
        loop {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                return Ok(receipt);
            }
            sleep_ms(self.receipt_poll_interval_ms).await;
        }
    }

    /// Submit a transaction and wait for its receipt, treating a mined
    /// failure status as an error.
    pub async fn send_and_confirm(&self, tx: &TransactionRequest) -> Result<TxReceipt> {
        let hash = self.send_transaction(tx).await?;
        debug!(%hash, "transaction submitted, waiting for confirmation");
        let receipt = self.wait_for_receipt(hash).await?;
        if !receipt.succeeded() {
            return Err(ChainError::Contract(format!(
                "transaction {hash} was mined but failed"
            )));
        }
        Ok(receipt)
    }

    /// Query historical logs for `filter`, from the earliest block.
    ///
    /// Nodes return matches ordered by block number, then log index within
    /// the block; callers relying on "the latest match" depend on that
    /// ordering.
    pub async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<LogEntry>> {
        let params = json!([{
            "address": filter.address,
            "topics": filter.topics.clone(),
            "fromBlock": "earliest",
            "toBlock": "latest",
        }]);
        let result = self.provider.request("eth_getLogs", params).await?;
        Ok(serde_json::from_value(result)?)
    }
}

/// Suspend the current flow. Timer source differs per target; neither
/// blocks the event loop.
async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}
