//! Asset dropdown: menu rendering, open/close and selection.

use crate::dom::{self, Elements};
use crate::prices;
use crate::state;
use iv_vault_core::assets::ASSETS;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Build one `.asset-option` per catalog asset.
pub fn render_menu(els: &Elements) -> Result<(), JsValue> {
    let menu = &els.asset_menu;
    menu.set_inner_html("");

    for asset in ASSETS.iter() {
        let item = dom::create_element("div")?;
        item.set_attribute("class", "asset-option")?;
        item.set_attribute("data-asset", asset.id)?;
        item.set_inner_html(&format!(
            r#"<img src="{}" alt="{}"><span class="asset-option-name">{}</span><span class="asset-option-symbol">{}</span>"#,
            asset.icon, asset.symbol, asset.name, asset.symbol
        ));

        let els2 = els.clone();
        let id = asset.id;
        let cb = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            e.stop_propagation();
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_select(&els3, id).await;
            });
        }) as Box<dyn FnMut(_)>);
        item.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();

        menu.append_child(&item)?;
    }
    Ok(())
}

/// Mirror the current asset into the trigger, the symbol labels and the menu.
pub fn render_current(els: &Elements) {
    let asset = state::with(|s| s.vault.current_asset());
    els.asset_icon.set_src(asset.icon);
    els.asset_icon.set_alt(asset.symbol);
    dom::set_text(&els.asset_name, asset.name);
    for el in &els.symbol_displays {
        dom::set_text(el, asset.symbol);
    }
    for item in dom::query_all(".asset-option") {
        let selected = item.get_attribute("data-asset").as_deref() == Some(asset.id);
        dom::toggle_class(&item, "selected", selected);
    }
}

pub fn render_open(els: &Elements) {
    let open = state::with(|s| s.vault.dropdown_open());
    dom::toggle_class(&els.asset_menu, "open", open);
    dom::toggle_class(&els.asset_arrow, "rotated", open);
}

pub fn on_toggle(els: &Elements) {
    state::with_mut(|s| s.vault.toggle_dropdown());
    render_open(els);
}

/// Any click that reaches the document closes the menu.
pub fn on_outside_click(els: &Elements) {
    if state::with(|s| s.vault.dropdown_open()) {
        state::with_mut(|s| s.vault.close_dropdown());
        render_open(els);
    }
}

pub async fn on_select(els: &Elements, id: &str) {
    if let Err(err) = state::with_mut(|s| s.vault.select_asset(id).map(|_| ())) {
        gloo_console::error!(err.to_string());
        return;
    }
    state::remember_asset(id);

    els.stake_amount.set_value("");
    render_current(els);
    render_open(els);
    prices::render_price(els);

    prices::sync_prices(els).await;
}
