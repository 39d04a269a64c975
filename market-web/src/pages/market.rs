//! Marketplace page: discovery, listing and purchase.
//!
//! The page owns only transient state (the discovery result, the pending
//! price inputs, a status line). Every action re-runs discovery instead of
//! patching state locally, so what is on screen always came from the
//! chain.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use leptos::prelude::*;
use leptos::task::spawn_local;

use lib_ethereum::services::market::parse_price;
use lib_ethereum::types::DiscoveryScope;
use lib_ethereum::ChainConfig;
use shared::dto::{CollectionTokens, TokenView};
use shared::utils::truncate_address;

use crate::services::market_service;
use crate::state::wallet::use_wallet_context;
use crate::utils::format::format_price;

#[component]
pub fn MarketplacePage() -> impl IntoView {
    let wallet = use_wallet_context();
    let config = StoredValue::new(expect_context::<ChainConfig>());

    let (collections, set_collections) = signal(Vec::<CollectionTokens>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(None::<String>);
    let (status, set_status) = signal(None::<String>);
    let (mine_only, set_mine_only) = signal(false);
    // Pending price inputs, token id -> entered text. Cleared on unmount
    // with the rest of the page state.
    let (prices, set_prices) = signal(HashMap::<U256, String>::new());
    let (busy, set_busy) = signal(false);

    let refresh = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            let scope = match (mine_only.get_untracked(), wallet.address()) {
                (true, Some(address)) => DiscoveryScope::OwnedBy(address),
                _ => DiscoveryScope::Everything,
            };
            let service = market_service(&config.get_value());
            match service.discover(scope).await {
                Ok(list) => set_collections.set(list),
                Err(err) => {
                    log::warn!("discovery failed: {err}");
                    set_error.set(Some("Failed to fetch NFTs".to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // Discover on mount, on account change, and when the scope toggles.
    Effect::new(move || {
        wallet.wallet.track();
        mine_only.track();
        refresh();
    });

    let list_token = move |collection: Address, token_id: U256| {
        let Some(address) = wallet.address() else {
            set_status.set(Some("Connect a wallet first".to_string()));
            return;
        };
        let input = prices
            .with_untracked(|all| all.get(&token_id).cloned())
            .unwrap_or_default();
        set_busy.set(true);
        set_status.set(None);
        spawn_local(async move {
            let service = market_service(&config.get_value());
            match service.list_nft(collection, token_id, &input, address).await {
                Ok(_) => {
                    set_status.set(Some(
                        "NFT successfully listed on the marketplace".to_string(),
                    ));
                    set_prices.update(|all| {
                        all.remove(&token_id);
                    });
                    refresh();
                }
                Err(err) => set_status.set(Some(format!("Error listing NFT: {err}"))),
            }
            set_busy.set(false);
        });
    };

    let buy_token = move |collection: Address, token: TokenView| {
        let Some(address) = wallet.address() else {
            set_status.set(Some("Connect a wallet first".to_string()));
            return;
        };
        set_busy.set(true);
        set_status.set(None);
        spawn_local(async move {
            let service = market_service(&config.get_value());
            match service.buy_nft(collection, &token, address).await {
                Ok(_) => {
                    set_status.set(Some("NFT purchased successfully!".to_string()));
                    refresh();
                }
                Err(err) => set_status.set(Some(format!("Error buying NFT: {err}"))),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="page">
            <div class="page-header">
                <h2>"NFT Collections"</h2>
                <label class="toggle">
                    <input
                        type="checkbox"
                        prop:checked=mine_only
                        on:change=move |ev| set_mine_only.set(event_target_checked(&ev))
                    />
                    "My collections only"
                </label>
                <button class="btn" prop:disabled=loading on:click=move |_| refresh()>
                    "Refresh"
                </button>
            </div>

            {move || status.get().map(|message| view! { <p class="status">{message}</p> })}

            {move || {
                if loading.get() {
                    return view! {
                        <div class="center">
                            <div class="spinner"></div>
                        </div>
                    }.into_any();
                }
                if let Some(message) = error.get() {
                    return view! {
                        <div class="center">
                            <p class="error">{message}</p>
                            <button class="btn" on:click=move |_| refresh()>"Try Again"</button>
                        </div>
                    }.into_any();
                }

                let groups = collections.get();
                if groups.iter().all(|group| group.tokens.is_empty()) {
                    return view! {
                        <div class="center">
                            <p class="muted">"No NFTs found in any collection."</p>
                        </div>
                    }.into_any();
                }

                let my_address = wallet.address();
                view! {
                    <div>
                        {groups.into_iter().map(|group| {
                            let collection_address = group.collection.collection_address;
                            view! {
                                <div class="collection-section">
                                    <h3>
                                        {group.collection.name.clone()}
                                        <span class="muted">
                                            " (" {truncate_address(&collection_address.to_string())} ")"
                                        </span>
                                    </h3>
                                    <div class="token-grid">
                                        {group.tokens.into_iter().map(|token| {
                                            token_card(
                                                collection_address,
                                                token,
                                                my_address,
                                                prices,
                                                set_prices,
                                                busy,
                                                list_token,
                                                buy_token,
                                            )
                                        }).collect::<Vec<_>>()}
                                    </div>
                                </div>
                            }
                        }).collect::<Vec<_>>()}
                    </div>
                }.into_any()
            }}
        </div>
    }
}

/// One token card: identity, metadata, and the action matching its state.
///
/// The state machine per token is Unlisted(owner) -> Listed(price, seller)
/// -> Unlisted(buyer); the card only offers the transition the connected
/// account may take.
#[allow(clippy::too_many_arguments)]
fn token_card(
    collection: Address,
    token: TokenView,
    my_address: Option<Address>,
    prices: ReadSignal<HashMap<U256, String>>,
    set_prices: WriteSignal<HashMap<U256, String>>,
    busy: ReadSignal<bool>,
    list_token: impl Fn(Address, U256) + Copy + 'static,
    buy_token: impl Fn(Address, TokenView) + Copy + 'static,
) -> impl IntoView {
    let token_id = token.token_id;
    let owner_is_me = my_address == Some(token.owner);
    let seller_is_me = my_address == Some(token.seller);
    let known_price = token.has_known_price();

    let image = token
        .metadata
        .as_ref()
        .and_then(|metadata| metadata.image.clone());
    let title = token
        .metadata
        .as_ref()
        .map(|metadata| metadata.name.clone())
        .filter(|name| !name.is_empty());

    let can_list = move || {
        prices.with(|all| {
            all.get(&token_id)
                .map(|input| parse_price(input).is_ok())
                .unwrap_or(false)
        })
    };

    let buy_view_token = token.clone();

    view! {
        <div class="token-card">
            {match image {
                Some(src) => view! {
                    <img class="token-image" src=src alt=title.clone().unwrap_or_else(|| "NFT".to_string())/>
                }.into_any(),
                None => view! { <div class="token-image placeholder"></div> }.into_any(),
            }}
            <p class="row-title">
                {title.unwrap_or_else(|| format!("Token #{}", token.token_id))}
            </p>
            <p class="muted">"Token ID: " {token.token_id.to_string()}</p>
            <p class="muted">"Owner: " {truncate_address(&token.owner.to_string())}</p>

            {if owner_is_me && !token.is_listed {
                view! {
                    <div class="list-controls">
                        <input
                            type="number"
                            step="0.001"
                            min="0"
                            placeholder="Price in ETH"
                            prop:value=move || {
                                prices.with(|all| all.get(&token_id).cloned().unwrap_or_default())
                            }
                            on:input=move |ev| set_prices.update(|all| {
                                all.insert(token_id, event_target_value(&ev));
                            })
                        />
                        <button
                            class="btn"
                            prop:disabled=move || busy.get() || !can_list()
                            on:click=move |_| list_token(collection, token_id)
                        >
                            "List"
                        </button>
                    </div>
                }.into_any()
            } else if token.is_listed {
                view! {
                    <div class="buy-controls">
                        <p class="price">
                            {if known_price {
                                format!("Price: {}", format_price(token.price))
                            } else {
                                "Price unavailable".to_string()
                            }}
                        </p>
                        <button
                            class="btn buy"
                            prop:disabled=move || busy.get() || seller_is_me || !known_price
                            on:click=move |_| buy_token(collection, buy_view_token.clone())
                        >
                            "Buy NFT"
                        </button>
                    </div>
                }.into_any()
            } else {
                view! { <div></div> }.into_any()
            }}
        </div>
    }
}
