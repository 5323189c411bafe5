//! Infinity Vault WASM Frontend
//!
//! Browser glue for the staking page: wallet connection, live prices, the
//! asset dropdown, the stake calculator and the activity ledger. Page state
//! and flows live in `iv-vault-core`; this crate binds them to the DOM.

pub mod api;
pub mod dom;
pub mod ethereum;
pub mod events;
pub mod ledger;
pub mod prices;
pub mod selector;
pub mod state;
pub mod wallet_ops;

use iv_vault_core::{Vault, VaultConfig};
use wasm_bindgen::prelude::*;

/// Optional overrides served next to the page.
const CONFIG_URL: &str = "vault-config.json";

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    let config = load_config().await;
    let vault = match state::remembered_asset() {
        Some(id) => Vault::with_asset(config, &id),
        None => Vault::new(config),
    };
    state::install_vault(vault);

    selector::render_menu(&els)?;
    selector::render_current(&els);
    wallet_ops::render_connect(&els);
    wallet_ops::render_balances(&els);
    prices::render_price(&els);
    ledger::render(&els);

    events::bind_events(&els)?;

    prices::sync_prices(&els).await;

    Ok(())
}

async fn load_config() -> VaultConfig {
    let Ok(text) = api::fetch_text(CONFIG_URL).await else {
        return VaultConfig::default();
    };
    match VaultConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            gloo_console::warn!("ignoring vault-config.json:", err.to_string());
            VaultConfig::default()
        }
    }
}
