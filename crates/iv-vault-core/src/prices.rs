//! Price sync: one request for every catalog asset, with a static
//! fallback table for failed or incomplete responses.

use crate::assets;
use crate::config::VaultConfig;
use crate::error::VaultError;
use anyhow::Result;
use async_trait::async_trait;
use iv_api_types::SimplePriceResponse;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Source of `{id: {currency: price}}` quotes.
#[async_trait(?Send)]
pub trait PriceSource {
    async fn fetch(&self, url: &str) -> Result<SimplePriceResponse>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable(HashMap<String, f64>);

impl PriceTable {
    pub fn fallback(config: &VaultConfig) -> Self {
        Self(
            assets::ids()
                .map(|id| (id.to_owned(), config.fallback_price(id)))
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.0.get(id).copied()
    }

}

#[derive(Debug, Clone, PartialEq)]
pub enum PriceOrigin {
    Live,
    /// Live table with these ids taken from the fallback.
    Partial { missing: Vec<String> },
    Fallback { error: VaultError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceOutcome {
    pub table: PriceTable,
    pub origin: PriceOrigin,
}

pub fn price_query_url(config: &VaultConfig) -> String {
    let ids: Vec<&str> = assets::ids().collect();
    format!(
        "{}?ids={}&vs_currencies={}",
        config.price_api_url,
        ids.join(","),
        config.vs_currency
    )
}

/// Build a full table from a fetch result. Any id the response lacks, or
/// quotes as a non-positive / non-finite number, takes its fallback price.
pub fn resolve(response: Result<SimplePriceResponse>, config: &VaultConfig) -> PriceOutcome {
    let response = match response {
        Ok(response) => response,
        Err(err) => {
            let error = VaultError::PriceFetchFailure(format!("{err:#}"));
            warn!(%error, "using fallback table");
            return PriceOutcome {
                table: PriceTable::fallback(config),
                origin: PriceOrigin::Fallback { error },
            };
        }
    };

    let mut missing = Vec::new();
    let table = assets::ids()
        .map(|id| {
            let quoted = response
                .get(id)
                .and_then(|quotes| quotes.get(&config.vs_currency))
                .copied()
                .filter(|price| price.is_finite() && *price > 0.0);
            let price = quoted.unwrap_or_else(|| {
                missing.push(id.to_owned());
                config.fallback_price(id)
            });
            (id.to_owned(), price)
        })
        .collect();

    let origin = if missing.is_empty() {
        PriceOrigin::Live
    } else if missing.len() == assets::ASSETS.len() {
        PriceOrigin::Fallback {
            error: VaultError::PriceFetchFailure("response carried no usable quotes".to_owned()),
        }
    } else {
        warn!(?missing, "price response incomplete");
        PriceOrigin::Partial { missing }
    };
    PriceOutcome {
        table: PriceTable(table),
        origin,
    }
}

pub async fn fetch_prices<S>(source: &S, url: &str, config: &VaultConfig) -> PriceOutcome
where
    S: PriceSource + ?Sized,
{
    debug!(url, "fetching prices");
    resolve(source.fetch(url).await, config)
}

/// Handle for one in-flight sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTicket {
    seq: u64,
    pub url: String,
}

/// Orders concurrent syncs: only the most recently issued ticket may
/// apply its result.
#[derive(Debug, Clone, Default)]
pub struct PriceSync {
    issued: u64,
}

impl PriceSync {
    pub fn begin(&mut self, url: String) -> PriceTicket {
        self.issued += 1;
        PriceTicket {
            seq: self.issued,
            url,
        }
    }

    pub fn is_current(&self, ticket: &PriceTicket) -> bool {
        ticket.seq == self.issued
    }
}
