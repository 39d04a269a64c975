//! Browser metadata store over the IPFS HTTP API.
//!
//! Uploads post multipart forms to the node's `add` endpoint and mint
//! `ipfs://` URIs from the returned CID; fetches hit the already
//! gateway-rewritten URL. File reading happens here too since it needs the
//! browser `File` API.

use async_trait::async_trait;
use gloo_net::http::Request;
use serde::Deserialize;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData};

use lib_ethereum::error::{ChainError, Result};
use lib_ethereum::metadata::MetadataStore;
use lib_ethereum::types::ImageFile;
use lib_ethereum::ChainConfig;
use shared::dto::NftMetadata;

/// Response of the IPFS HTTP API `add` endpoint.
#[derive(Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

/// Metadata store talking to the configured IPFS node from the browser.
pub struct GatewayStore {
    api_url: String,
}

impl GatewayStore {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            api_url: config.ipfs_api_url.trim_end_matches('/').to_string(),
        }
    }

    async fn add(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::of1(&array);
        let blob = Blob::new_with_u8_array_sequence(&parts)
            .map_err(|e| ChainError::Metadata(format!("blob creation failed: {e:?}")))?;
        let form = FormData::new()
            .map_err(|e| ChainError::Metadata(format!("form creation failed: {e:?}")))?;
        form.append_with_blob_and_filename("file", &blob, filename)
            .map_err(|e| ChainError::Metadata(format!("form append failed: {e:?}")))?;

        let url = format!("{}/api/v0/add", self.api_url);
        let response = Request::post(&url)
            .body(form)
            .map_err(|e| ChainError::Metadata(format!("upload request failed: {e}")))?
            .send()
            .await
            .map_err(|e| ChainError::Metadata(format!("upload failed: {e}")))?;
        if !response.ok() {
            return Err(ChainError::Metadata(format!(
                "upload rejected: HTTP {}",
                response.status()
            )));
        }
        let added: AddResponse = response
            .json()
            .await
            .map_err(|e| ChainError::Metadata(format!("malformed add response: {e}")))?;
        Ok(format!("ipfs://{}", added.hash))
    }
}

#[async_trait(?Send)]
impl MetadataStore for GatewayStore {
    async fn upload_file(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        self.add(bytes, filename).await
    }

    async fn upload_json(&self, metadata: &NftMetadata) -> Result<String> {
        let bytes = serde_json::to_vec(metadata)
            .map_err(|e| ChainError::Metadata(format!("metadata serialization failed: {e}")))?;
        self.add(bytes, "metadata.json").await
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ChainError::Metadata(format!("fetch failed: {e}")))?;
        if !response.ok() {
            return Err(ChainError::Metadata(format!(
                "fetch rejected: HTTP {}",
                response.status()
            )));
        }
        response
            .text()
            .await
            .map_err(|e| ChainError::Metadata(format!("fetch body failed: {e}")))
    }
}

/// Read a picked file into memory for upload.
pub async fn read_file(file: &web_sys::File) -> std::result::Result<ImageFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageFile {
        bytes,
        filename: file.name(),
    })
}
