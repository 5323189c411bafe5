//! Price sync and price / USD displays.

use crate::api::HttpPriceSource;
use crate::dom::{self, Elements};
use crate::state;
use iv_vault_core::prices::{self, PriceOrigin};

/// Fetch prices for every asset and apply them unless a newer sync started
/// meanwhile. Failures fall back to the static table without user-visible
/// errors.
pub async fn sync_prices(els: &Elements) {
    let (ticket, config) = state::with_mut(|s| (s.vault.begin_price_sync(), s.vault.config().clone()));

    let outcome = prices::fetch_prices(&HttpPriceSource, &ticket.url, &config).await;
    match &outcome.origin {
        PriceOrigin::Fallback { error } => {
            gloo_console::warn!("price sync fell back to static table:", error.to_string());
        }
        PriceOrigin::Partial { missing } => {
            gloo_console::warn!("price sync missing quotes for", missing.join(","));
        }
        PriceOrigin::Live => {}
    }

    if state::with_mut(|s| s.vault.finish_price_sync(&ticket, outcome)) {
        render_price(els);
    }
}

pub fn render_price(els: &Elements) {
    let (price, usd) = state::with(|s| (s.vault.price_display(), s.vault.usd_display().to_owned()));
    dom::set_text(&els.market_price, &format!("${price}"));
    dom::set_text(&els.live_usd, &usd);
}
