//! # JSON-RPC Provider Abstraction
//!
//! The transport seam between the typed client and whatever actually
//! carries the request: a `reqwest` HTTP endpoint on native targets, the
//! injected `window.ethereum` object in the browser, or an in-memory mock
//! chain in tests.
//!
//! Implementations only move JSON around; method semantics live in
//! [`crate::client::EthereumClient`].

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
#[cfg(not(target_arch = "wasm32"))]
use crate::error::ChainError;

/// A JSON-RPC transport.
///
/// `params` is always a JSON array (possibly empty). The returned value is
/// the request's `result` member with any envelope already stripped.
///
/// Futures are not required to be `Send`: the browser implementation runs
/// on a single-threaded executor and wraps non-`Send` JavaScript handles.
#[async_trait(?Send)]
pub trait EthereumProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value>;
}

/// HTTP JSON-RPC provider for native targets.
///
/// Sends standard JSON-RPC 2.0 envelopes with incrementing request ids.
#[cfg(not(target_arch = "wasm32"))]
pub struct HttpProvider {
    url: String,
    client: reqwest::Client,
    id: std::sync::atomic::AtomicU64,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpProvider {
    /// Create a provider for an existing JSON-RPC endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            id: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl EthereumProvider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.id.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, "sending JSON-RPC request");

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;
        let body: Value = response.json().await?;

        if let Some(error) = body.get("error") {
            return Err(ChainError::Provider(format!(
                "{method} failed: {error}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| ChainError::Provider(format!("{method}: response has no result")))
    }
}
