//! Wallet session state.

use alloy_primitives::Address;
use leptos::prelude::*;

/// Wallet connection state machine.
///
/// `Error` only appears from an explicit connect attempt; the silent
/// restore on app start falls back to `Disconnected`.
#[derive(Clone, PartialEq, Eq)]
pub enum WalletState {
    Disconnected,
    Connecting,
    Connected { address: Address },
    Error(String),
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    pub fn address(&self) -> Option<Address> {
        match self {
            WalletState::Connected { address } => Some(*address),
            _ => None,
        }
    }
}

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub wallet: RwSignal<WalletState>,
}

impl WalletContext {
    pub fn new() -> Self {
        Self {
            wallet: RwSignal::new(WalletState::Disconnected),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.with(|state| state.is_connected())
    }

    pub fn address(&self) -> Option<Address> {
        self.wallet.with(|state| state.address())
    }

    pub fn set_connecting(&self) {
        self.wallet.set(WalletState::Connecting);
    }

    pub fn set_connected(&self, address: Address) {
        self.wallet.set(WalletState::Connected { address });
    }

    pub fn set_error(&self, error: String) {
        self.wallet.set(WalletState::Error(error));
    }

    pub fn disconnect(&self) {
        self.wallet.set(WalletState::Disconnected);
    }
}

impl Default for WalletContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_wallet_context() -> WalletContext {
    let context = WalletContext::new();
    provide_context(context);
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
