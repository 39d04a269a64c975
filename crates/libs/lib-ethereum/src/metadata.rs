//! # Metadata Store
//!
//! Access to the content-addressed store holding token metadata documents
//! and images. Uploads go through the store's HTTP API; fetches go through
//! a public gateway after rewriting `ipfs://` URIs.
//!
//! The [`MetadataStore`] trait is the seam: the native implementation uses
//! `reqwest`, the browser one lives in `market-web` on top of `gloo-net`,
//! and tests use an in-memory map.

use async_trait::async_trait;
use shared::dto::NftMetadata;
use shared::utils::ipfs_to_http;
use tracing::debug;

use crate::error::Result;
#[cfg(not(target_arch = "wasm32"))]
use crate::error::ChainError;

/// A content-addressed metadata store reachable over HTTP.
#[async_trait(?Send)]
pub trait MetadataStore {
    /// Upload raw file bytes. Returns the minted `ipfs://` URI.
    async fn upload_file(&self, bytes: Vec<u8>, filename: &str) -> Result<String>;

    /// Upload a metadata document as JSON. Returns the minted URI.
    async fn upload_json(&self, metadata: &NftMetadata) -> Result<String>;

    /// Fetch the body behind an already-resolved HTTP URL.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Resolve a token URI into its metadata document.
///
/// A URI that already is an inline JSON document is parsed directly;
/// anything else is gateway-rewritten and fetched. An `image` field with
/// the `ipfs://` scheme gets the same rewrite. Every failure degrades to
/// `None` so discovery renders a placeholder instead of erroring.
pub async fn fetch_metadata<S>(store: &S, token_uri: &str, gateway: &str) -> Option<NftMetadata>
where
    S: MetadataStore + ?Sized,
{
    let document = if token_uri.trim_start().starts_with('{') {
        token_uri.to_string()
    } else {
        let url = ipfs_to_http(token_uri, gateway);
        match store.fetch_text(&url).await {
            Ok(body) => body,
            Err(err) => {
                debug!(token_uri, %err, "metadata fetch failed");
                return None;
            }
        }
    };

    let mut metadata: NftMetadata = match serde_json::from_str(&document) {
        Ok(metadata) => metadata,
        Err(err) => {
            debug!(token_uri, %err, "metadata document is not valid JSON");
            return None;
        }
    };
    if let Some(image) = metadata.image.take() {
        metadata.image = Some(ipfs_to_http(&image, gateway));
    }
    Some(metadata)
}

/// Response of the IPFS HTTP API `add` endpoint.
#[cfg(not(target_arch = "wasm32"))]
#[derive(serde::Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

/// Native IPFS HTTP API client.
#[cfg(not(target_arch = "wasm32"))]
pub struct IpfsClient {
    api_url: String,
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl IpfsClient {
    /// Client for an IPFS node's HTTP API (the `/api/v0` surface).
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl MetadataStore for IpfsClient {
    async fn upload_file(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let url = format!("{}/api/v0/add", self.api_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ChainError::Metadata(format!("upload failed: {e}")))?
            .error_for_status()
            .map_err(|e| ChainError::Metadata(format!("upload rejected: {e}")))?;
        let added: AddResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Metadata(format!("malformed add response: {e}")))?;
        Ok(format!("ipfs://{}", added.hash))
    }

    async fn upload_json(&self, metadata: &NftMetadata) -> Result<String> {
        let bytes = serde_json::to_vec(metadata)
            .map_err(|e| ChainError::Metadata(format!("metadata serialization failed: {e}")))?;
        self.upload_file(bytes, "metadata.json").await
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ChainError::Metadata(format!("fetch failed: {e}")))?
            .error_for_status()
            .map_err(|e| ChainError::Metadata(format!("fetch rejected: {e}")))?;
        response
            .text()
            .await
            .map_err(|e| ChainError::Metadata(format!("fetch body failed: {e}")))
    }
}
