//! HTTP client.
//!
//! Wraps `fetch` (via `gloo-net`) for the price API and static JSON files
//! served next to the page.

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use iv_api_types::SimplePriceResponse;
use iv_vault_core::prices::PriceSource;

async fn get(url: &str) -> Result<Response> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| anyhow!("fetch error: {e}"))?;
    if !resp.ok() {
        bail!("{} {}", resp.status(), resp.status_text());
    }
    Ok(resp)
}

/// Fetch a URL and return the body as a plain string.
pub async fn fetch_text(url: &str) -> Result<String> {
    get(url)
        .await?
        .text()
        .await
        .map_err(|e| anyhow!("text error: {e}"))
}

/// Public simple-price endpoint (`{id: {currency: price}}`).
pub struct HttpPriceSource;

#[async_trait(?Send)]
impl PriceSource for HttpPriceSource {
    async fn fetch(&self, url: &str) -> Result<SimplePriceResponse> {
        get(url)
            .await?
            .json::<SimplePriceResponse>()
            .await
            .map_err(|e| anyhow!("JSON parse error: {e}"))
    }
}
