//! Collections page: the caller's collections plus the create form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use lib_ethereum::ChainConfig;
use shared::dto::CollectionInfo;

use crate::services::collection_service;
use crate::state::wallet::use_wallet_context;
use crate::utils::format::format_created_at;

#[component]
pub fn CollectionsPage() -> impl IntoView {
    let wallet = use_wallet_context();
    let config = StoredValue::new(expect_context::<ChainConfig>());

    let (collections, set_collections) = signal(Vec::<CollectionInfo>::new());
    let (status, set_status) = signal(None::<String>);
    let (name, set_name) = signal(String::new());
    let (symbol, set_symbol) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let load = move || {
        spawn_local(async move {
            let Some(address) = wallet.address() else {
                set_collections.set(Vec::new());
                return;
            };
            let service = collection_service(&config.get_value());
            match service.collections_by_owner(address).await {
                Ok(list) => set_collections.set(list),
                Err(err) => {
                    log::warn!("failed to load collections: {err}");
                    set_status.set(Some(format!("Failed to load collections: {err}")));
                }
            }
        });
    };

    // Re-query on mount and whenever the account changes.
    Effect::new(move || {
        wallet.wallet.track();
        load();
    });

    let create = move |_| {
        let Some(address) = wallet.address() else {
            set_status.set(Some("Connect a wallet first".to_string()));
            return;
        };
        set_busy.set(true);
        set_status.set(None);
        spawn_local(async move {
            let service = collection_service(&config.get_value());
            match service
                .create_collection(&name.get_untracked(), &symbol.get_untracked(), address)
                .await
            {
                Ok(_) => {
                    set_status.set(Some("Collection created successfully!".to_string()));
                    set_name.set(String::new());
                    set_symbol.set(String::new());
                    load();
                }
                Err(err) => set_status.set(Some(format!("Error creating collection: {err}"))),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="page">
            <div class="card">
                <h2>"Create NFT Collection"</h2>
                <input
                    type="text"
                    placeholder="Collection Name"
                    prop:value=name
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Collection Symbol"
                    prop:value=symbol
                    on:input=move |ev| set_symbol.set(event_target_value(&ev))
                />
                <button class="btn" prop:disabled=busy on:click=create>
                    "Create Collection"
                </button>
                {move || status.get().map(|message| view! { <p class="status">{message}</p> })}
            </div>

            <div class="card">
                <h2>"Your Collections"</h2>
                {move || {
                    let list = collections.get();
                    if list.is_empty() {
                        view! { <p class="muted">"No collections yet."</p> }.into_any()
                    } else {
                        view! {
                            <div>
                                {list.into_iter().map(|collection| view! {
                                    <div class="row">
                                        <p class="row-title">
                                            {collection.name.clone()}
                                            " (" {collection.symbol.clone()} ")"
                                        </p>
                                        <p class="muted">
                                            "Address: " {collection.collection_address.to_string()}
                                        </p>
                                        <p class="muted">
                                            "Created " {format_created_at(collection.created_at)}
                                        </p>
                                    </div>
                                }).collect::<Vec<_>>()}
                            </div>
                        }.into_any()
                    }
                }}
            </div>
        </div>
    }
}
