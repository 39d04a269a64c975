//! MintBay browser app: a wallet-connected front-end for the NFT
//! marketplace contracts.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod pages;
mod services;
mod state;
pub mod utils;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Readable panics and log output in the browser console.
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("MintBay starting");

    leptos::mount::mount_to_body(|| view! { <App/> });
}
