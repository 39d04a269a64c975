//! Application shell: router, configuration context and wallet session.

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::Navbar;
use crate::pages::{CollectionsPage, HomePage, MarketplacePage, MintPage};
use crate::services::eth;
use crate::state::wallet::provide_wallet_context;
use crate::utils::constants::chain_config;

#[component]
pub fn App() -> impl IntoView {
    // Deployment configuration, provided once and read by every page.
    provide_context(chain_config());
    let wallet = provide_wallet_context();

    // Ask the wallet for its accounts on mount and follow account changes
    // for the whole session. Both are no-ops without an injected wallet.
    leptos::task::spawn_local(async move {
        eth::restore_session(wallet).await;
    });
    eth::watch_accounts(wallet);

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/collections") view=CollectionsPage/>
                    <Route path=path!("/mint") view=MintPage/>
                    <Route path=path!("/market") view=MarketplacePage/>
                </Routes>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card" style="max-width: 500px; margin: 48px auto; text-align: center;">
            <h1>"404 - Page Not Found"</h1>
            <A href="/">
                <span class="btn" style="margin-top: 20px; display: inline-block;">
                    "Go to Home"
                </span>
            </A>
        </div>
    }
}
