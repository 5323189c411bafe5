//! Front-end configuration.
//!
//! Every field has a default, so a partial `vault-config.json` only needs
//! to name what it overrides.

use crate::assets;
use iv_contract::{ReceiptPolling, STAKING_CONTRACT_ADDRESS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
pub const DEFAULT_LEDGER_CAPACITY: usize = 200;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),
    #[error("invalid contract address: {0}")]
    ContractAddress(String),
    #[error("ledger capacity must be greater than zero")]
    ZeroLedgerCapacity,
    #[error("quick-fill percentage out of range: {0}")]
    Percent(u8),
    #[error("fallback price missing for {0}")]
    MissingFallback(String),
    #[error("fallback price for {id} is not a positive number: {price}")]
    FallbackPrice { id: String, price: f64 },
    #[error("receipt polling needs at least one poll")]
    ZeroPolls,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VaultConfig {
    pub contract_address: String,
    pub price_api_url: String,
    pub vs_currency: String,
    pub fallback_prices: BTreeMap<String, f64>,
    pub ledger_capacity: usize,
    pub quick_fill_percents: Vec<u8>,
    pub receipt_poll_interval_ms: u32,
    pub receipt_max_polls: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        let polling = ReceiptPolling::default();
        Self {
            contract_address: STAKING_CONTRACT_ADDRESS.to_owned(),
            price_api_url: DEFAULT_PRICE_API_URL.to_owned(),
            vs_currency: "usd".to_owned(),
            fallback_prices: default_fallback_prices(),
            ledger_capacity: DEFAULT_LEDGER_CAPACITY,
            quick_fill_percents: vec![25, 50, 75, 100],
            receipt_poll_interval_ms: polling.interval_ms,
            receipt_max_polls: polling.max_polls,
        }
    }
}

pub fn default_fallback_prices() -> BTreeMap<String, f64> {
    [
        ("binancecoin", 620.0),
        ("tether", 1.0),
        ("ethereum", 3200.0),
        ("solana", 110.0),
        ("tron", 0.12),
    ]
    .into_iter()
    .map(|(id, price)| (id.to_owned(), price))
    .collect()
}

impl VaultConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: VaultConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        iv_contract::abi::parse_address(&self.contract_address)
            .map_err(|_| ConfigError::ContractAddress(self.contract_address.clone()))?;
        if self.ledger_capacity == 0 {
            return Err(ConfigError::ZeroLedgerCapacity);
        }
        if let Some(pct) = self
            .quick_fill_percents
            .iter()
            .find(|p| !(1..=100).contains(*p))
        {
            return Err(ConfigError::Percent(*pct));
        }
        for id in assets::ids() {
            match self.fallback_prices.get(id) {
                None => return Err(ConfigError::MissingFallback(id.to_owned())),
                Some(price) if !price.is_finite() || *price <= 0.0 => {
                    return Err(ConfigError::FallbackPrice {
                        id: id.to_owned(),
                        price: *price,
                    });
                }
                Some(_) => {}
            }
        }
        if self.receipt_max_polls == 0 {
            return Err(ConfigError::ZeroPolls);
        }
        Ok(())
    }

    pub fn receipt_polling(&self) -> ReceiptPolling {
        ReceiptPolling {
            interval_ms: self.receipt_poll_interval_ms,
            max_polls: self.receipt_max_polls,
        }
    }

    pub fn fallback_price(&self, id: &str) -> f64 {
        self.fallback_prices.get(id).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = VaultConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.fallback_price("binancecoin"), 620.0);
        assert_eq!(config.fallback_price("tron"), 0.12);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = VaultConfig::from_json(r#"{"ledgerCapacity": 50, "vsCurrency": "eur"}"#)
            .expect("config should parse");
        assert_eq!(config.ledger_capacity, 50);
        assert_eq!(config.vs_currency, "eur");
        assert_eq!(config.contract_address, STAKING_CONTRACT_ADDRESS);
        assert_eq!(config.quick_fill_percents, vec![25, 50, 75, 100]);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            VaultConfig::from_json(r#"{"contractAddress": "0x12"}"#),
            Err(ConfigError::ContractAddress(_))
        ));
        assert_eq!(
            VaultConfig::from_json(r#"{"ledgerCapacity": 0}"#),
            Err(ConfigError::ZeroLedgerCapacity)
        );
        assert_eq!(
            VaultConfig::from_json(r#"{"quickFillPercents": [25, 150]}"#),
            Err(ConfigError::Percent(150))
        );
        assert_eq!(
            VaultConfig::from_json(r#"{"fallbackPrices": {"tether": 1.0}}"#),
            Err(ConfigError::MissingFallback("binancecoin".to_owned()))
        );
        assert!(matches!(
            VaultConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
