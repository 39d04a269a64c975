//! Injected Wallet Integration via wasm-bindgen
//!
//! JavaScript interop for the injected `window.ethereum` provider: raw
//! JSON-RPC requests (reads, and writes the wallet signs), plus the
//! account-change subscription that keeps the session in sync.

use alloy_primitives::Address;
use async_trait::async_trait;
use js_sys::Function;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use lib_ethereum::error::ChainError;
use lib_ethereum::provider::EthereumProvider;
use lib_ethereum::EthereumClient;

use crate::state::wallet::WalletContext;

#[wasm_bindgen(inline_js = "
export function hasEthereum() {
    return typeof window.ethereum !== 'undefined';
}

export async function ethereumRequest(method, paramsJson) {
    const result = await window.ethereum.request({
        method: method,
        params: JSON.parse(paramsJson),
    });
    return JSON.stringify(result === undefined ? null : result);
}

export function onAccountsChanged(callback) {
    if (window.ethereum && window.ethereum.on) {
        window.ethereum.on('accountsChanged', (accounts) => {
            callback(JSON.stringify(accounts));
        });
    }
}
")]
extern "C" {
    /// Whether an injected wallet provider exists.
    pub fn hasEthereum() -> bool;

    /// Forward a JSON-RPC request to the wallet. Params and result travel
    /// as JSON strings to keep the boundary simple.
    #[wasm_bindgen(catch)]
    async fn ethereumRequest(method: &str, params_json: &str) -> Result<JsValue, JsValue>;

    /// Subscribe to the wallet's account-change notification.
    fn onAccountsChanged(callback: &Function);
}

/// Whether a browser wallet is available at all.
pub fn has_wallet() -> bool {
    hasEthereum()
}

/// JSON-RPC provider backed by the injected browser wallet. Reads go to
/// the wallet's node connection; writes open its signing prompt.
#[derive(Clone, Copy, Default)]
pub struct BrowserProvider;

#[async_trait(?Send)]
impl EthereumProvider for BrowserProvider {
    async fn request(&self, method: &str, params: Value) -> lib_ethereum::error::Result<Value> {
        if !hasEthereum() {
            return Err(ChainError::Provider("no injected wallet found".to_string()));
        }
        let params_json = serde_json::to_string(&params)?;
        let result = ethereumRequest(method, &params_json)
            .await
            .map_err(|e| ChainError::Provider(js_error_message(&e, method)))?;
        let body = result.as_string().unwrap_or_else(|| "null".to_string());
        Ok(serde_json::from_str(&body)?)
    }
}

/// Pull a readable message out of a wallet rejection.
fn js_error_message(value: &JsValue, method: &str) -> String {
    if let Ok(message) = js_sys::Reflect::get(value, &JsValue::from_str("message")) {
        if let Some(message) = message.as_string() {
            return message;
        }
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{method} failed"))
}

/// Connect on app start. Silent on failure: the connect affordance on the
/// home page simply stays available.
pub async fn restore_session(wallet: WalletContext) {
    if !hasEthereum() {
        log::info!("no injected wallet; staying disconnected");
        return;
    }
    wallet.set_connecting();
    match EthereumClient::new(BrowserProvider).request_accounts().await {
        Ok(accounts) => match accounts.first() {
            Some(address) => wallet.set_connected(*address),
            None => wallet.disconnect(),
        },
        Err(err) => {
            log::warn!("wallet session restore failed: {err}");
            wallet.disconnect();
        }
    }
}

/// Explicit connect from the home page button. Failures surface on the
/// connect card.
pub async fn connect(wallet: WalletContext) {
    if !hasEthereum() {
        wallet.set_error("No browser wallet detected".to_string());
        return;
    }
    wallet.set_connecting();
    match EthereumClient::new(BrowserProvider).request_accounts().await {
        Ok(accounts) => match accounts.first() {
            Some(address) => wallet.set_connected(*address),
            None => wallet.disconnect(),
        },
        Err(err) => {
            log::warn!("wallet connection failed: {err}");
            wallet.set_error(err.to_string());
        }
    }
}

/// Follow the wallet's `accountsChanged` notifications: a new first
/// account replaces the session address, an empty list disconnects.
pub fn watch_accounts(wallet: WalletContext) {
    if !hasEthereum() {
        return;
    }
    let callback = Closure::wrap(Box::new(move |accounts_json: String| {
        let accounts: Vec<String> = serde_json::from_str(&accounts_json).unwrap_or_default();
        match accounts.first().and_then(|a| a.parse::<Address>().ok()) {
            Some(address) => {
                log::info!("wallet account changed");
                wallet.set_connected(address);
            }
            None => {
                log::info!("wallet disconnected");
                wallet.disconnect();
            }
        }
    }) as Box<dyn FnMut(String)>);
    onAccountsChanged(callback.as_ref().unchecked_ref());
    // The subscription lives for the whole session.
    callback.forget();
}
