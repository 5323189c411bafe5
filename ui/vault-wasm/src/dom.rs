//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a
//! field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, HtmlInputElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(nl) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document().create_element(tag)
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    let _ = window().alert_with_message(message);
}

// ── Elements struct ──

/// All DOM element references used by the vault page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Wallet / actions
    pub connect_btn: HtmlElement,
    pub execute_btn: HtmlElement,
    pub unstake_btn: HtmlElement,
    pub claim_btn: HtmlElement,

    // Stake input
    pub stake_amount: HtmlInputElement,
    pub live_usd: Element,
    pub pct_buttons: Vec<Element>,

    // Asset dropdown
    pub asset_trigger: Element,
    pub asset_menu: Element,
    pub asset_icon: HtmlImageElement,
    pub asset_name: Element,
    pub asset_arrow: Element,
    pub symbol_displays: Vec<Element>,
    pub market_price: Element,

    // Balances
    pub staked_bal: Element,
    pub wallet_bal: Element,

    // Activity ledger
    pub ledger: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_img {
    ($id:expr) => {
        by_id_typed::<HtmlImageElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing img #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            connect_btn: get_html!("connectBtn"),
            execute_btn: get_html!("executeBtn"),
            unstake_btn: get_html!("unstakeBtn"),
            claim_btn: get_html!("claimBtn"),

            stake_amount: get_input!("stakeAmount"),
            live_usd: get_el!("liveUsd"),
            pct_buttons: query_all(".pct-btn"),

            asset_trigger: get_el!("assetTrigger"),
            asset_menu: get_el!("assetMenu"),
            asset_icon: get_img!("assetIcon"),
            asset_name: get_el!("assetName"),
            asset_arrow: get_el!("assetArrow"),
            symbol_displays: query_all(".asset-symbol"),
            market_price: get_el!("marketPrice"),

            staked_bal: get_el!("stakedBal"),
            wallet_bal: get_el!("walletBal"),

            ledger: get_el!("ledger"),
        })
    }
}
