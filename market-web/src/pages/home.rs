//! Home page: wallet connection.

use leptos::prelude::*;

use crate::services::eth;
use crate::state::wallet::{use_wallet_context, WalletState};
use shared::utils::truncate_address;

#[component]
pub fn HomePage() -> impl IntoView {
    let wallet = use_wallet_context();

    let connect = move |_| {
        leptos::task::spawn_local(async move {
            eth::connect(wallet).await;
        });
    };

    view! {
        <div class="card" style="max-width: 520px; margin: 48px auto;">
            <h1>"MintBay"</h1>
            <p class="subtitle">"Create collections, mint tokens, trade them."</p>

            {move || match wallet.wallet.get() {
                WalletState::Connected { address } => view! {
                    <div>
                        <p class="success">"Wallet connected"</p>
                        <p class="wallet-address">{truncate_address(&address.to_string())}</p>
                        <p class="muted">
                            "Use the navigation above to manage collections, mint tokens or browse the market."
                        </p>
                    </div>
                }.into_any(),
                WalletState::Connecting => view! {
                    <div>
                        <p class="muted">"Waiting for the wallet..."</p>
                    </div>
                }.into_any(),
                WalletState::Error(message) => view! {
                    <div>
                        <p class="error">{message}</p>
                        <button class="btn" on:click=connect>"Connect Wallet"</button>
                    </div>
                }.into_any(),
                WalletState::Disconnected => {
                    if eth::has_wallet() {
                        view! {
                            <div>
                                <button class="btn" on:click=connect>"Connect Wallet"</button>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div>
                                <p class="muted">"No browser wallet detected. Install one to use MintBay."</p>
                            </div>
                        }.into_any()
                    }
                }
            }}
        </div>
    }
}
