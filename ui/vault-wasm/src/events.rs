//! Event binding.
//!
//! Wires all UI event listeners. Async handlers are spawned via
//! `wasm_bindgen_futures::spawn_local`.

use crate::dom::{self, Elements};
use crate::prices;
use crate::selector;
use crate::state;
use crate::wallet_ops;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach async click handler to an HtmlElement.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Helper: attach sync click handler.
macro_rules! on_click {
    ($el:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::MouseEvent)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    // ── Wallet / contract ──
    on_click_async!(els.connect_btn, els, wallet_ops::on_connect);
    on_click_async!(els.execute_btn, els, wallet_ops::on_stake);
    on_click_async!(els.unstake_btn, els, wallet_ops::on_unstake);
    on_click_async!(els.claim_btn, els, wallet_ops::on_claim);

    // ── Stake input ──
    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let raw = els2.stake_amount.value();
            let usd = state::with_mut(|s| s.vault.update_input(&raw).to_owned());
            dom::set_text(&els2.live_usd, &usd);
        }) as Box<dyn FnMut(_)>);
        els.stake_amount
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    // ── Percentage quick-fill ──
    let allowed = state::with(|s| s.vault.config().quick_fill_percents.clone());
    for btn in &els.pct_buttons {
        let Some(percent) = btn
            .get_attribute("data-pct")
            .and_then(|p| p.trim().parse::<u8>().ok())
            .filter(|p| allowed.contains(p))
        else {
            gloo_console::warn!("ignoring .pct-btn with an unconfigured data-pct");
            continue;
        };
        let els2 = els.clone();
        on_click!(btn, move |_: web_sys::MouseEvent| {
            let raw = state::with_mut(|s| s.vault.quick_fill(percent));
            els2.stake_amount.set_value(&raw);
            prices::render_price(&els2);
        });
    }

    // ── Asset dropdown ──
    {
        let els2 = els.clone();
        on_click!(els.asset_trigger, move |e: web_sys::MouseEvent| {
            e.stop_propagation();
            selector::on_toggle(&els2);
        });
    }
    {
        let els2 = els.clone();
        on_click!(dom::document(), move |_: web_sys::MouseEvent| {
            selector::on_outside_click(&els2);
        });
    }

    Ok(())
}
