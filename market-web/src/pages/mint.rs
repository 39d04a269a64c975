//! Mint page: pick a collection, describe the token, attach an image.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

use lib_ethereum::types::{ImageFile, MintRequest};
use lib_ethereum::ChainConfig;
use shared::dto::CollectionInfo;

use crate::services::{collection_service, ipfs};
use crate::state::wallet::use_wallet_context;

#[component]
pub fn MintPage() -> impl IntoView {
    let wallet = use_wallet_context();
    let config = StoredValue::new(expect_context::<ChainConfig>());

    let (collections, set_collections) = signal(Vec::<CollectionInfo>::new());
    let (selected, set_selected) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (image, set_image) = signal(None::<ImageFile>);
    let (status, set_status) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    // The select offers only collections the caller owns.
    Effect::new(move || {
        wallet.wallet.track();
        spawn_local(async move {
            let Some(address) = wallet.address() else {
                set_collections.set(Vec::new());
                return;
            };
            let service = collection_service(&config.get_value());
            match service.collections_by_owner(address).await {
                Ok(list) => set_collections.set(list),
                Err(err) => log::warn!("failed to load collections: {err}"),
            }
        });
    });

    let on_file = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            set_image.set(None);
            return;
        };
        spawn_local(async move {
            match ipfs::read_file(&file).await {
                Ok(picked) => set_image.set(Some(picked)),
                Err(err) => {
                    log::warn!("failed to read image file: {err:?}");
                    set_image.set(None);
                }
            }
        });
    };

    let mint = move |_| {
        let Some(address) = wallet.address() else {
            set_status.set(Some("Connect a wallet first".to_string()));
            return;
        };
        let request = MintRequest {
            collection: {
                let value = selected.get_untracked();
                if value.is_empty() {
                    None
                } else {
                    value.parse().ok()
                }
            },
            name: name.get_untracked(),
            description: description.get_untracked(),
            image: image.get_untracked(),
        };
        set_busy.set(true);
        set_status.set(None);
        spawn_local(async move {
            let service = collection_service(&config.get_value());
            match service.mint_nft(request, address).await {
                Ok(_) => set_status.set(Some("NFT minted successfully!".to_string())),
                Err(err) => set_status.set(Some(format!("Error minting NFT: {err}"))),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="card" style="max-width: 520px; margin: 24px auto;">
            <h2>"Mint New NFT"</h2>
            <select
                prop:value=selected
                on:change=move |ev| set_selected.set(event_target_value(&ev))
            >
                <option value="">"Select Collection"</option>
                {move || collections.get().into_iter().map(|collection| {
                    let address = collection.collection_address.to_string();
                    view! {
                        <option value=address.clone()>
                            {collection.name.clone()} " (" {collection.symbol.clone()} ")"
                        </option>
                    }
                }).collect::<Vec<_>>()}
            </select>
            <input
                type="text"
                placeholder="NFT Name"
                prop:value=name
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="NFT Description"
                prop:value=description
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <input type="file" accept="image/*" on:change=on_file />
            <button class="btn" prop:disabled=busy on:click=mint>
                "Mint NFT"
            </button>
            {move || status.get().map(|message| view! { <p class="status">{message}</p> })}
        </div>
    }
}
