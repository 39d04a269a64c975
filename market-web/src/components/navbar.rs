//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::wallet::use_wallet_context;
use shared::utils::truncate_address;

#[component]
pub fn Navbar() -> impl IntoView {
    let wallet = use_wallet_context();

    view! {
        <nav>
            <div class="nav-inner">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">
                        <span class="brand-mint">"Mint"</span><span class="brand-bay">"Bay"</span>
                    </span>
                </A>
                <A href="/collections" attr:class="nav-link">"Collections"</A>
                <A href="/mint" attr:class="nav-link">"Mint"</A>
                <A href="/market" attr:class="nav-link">"Market"</A>
                <span class="nav-wallet">
                    {move || match wallet.address() {
                        Some(address) => truncate_address(&address.to_string()),
                        None => "not connected".to_string(),
                    }}
                </span>
            </div>
        </nav>
    }
}
