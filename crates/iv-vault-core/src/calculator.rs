//! Stake input and its live USD equivalent.

use iv_units::{ETHER_DECIMALS, format_fixed, format_usd, parse_positive, parse_units};

pub const ZERO_USD: &str = "0.00";

/// A plain decimal that is still non-zero at 18 decimals, as the contract
/// would receive it. Exponent forms and sub-wei dust are rejected.
pub fn stakeable_amount(raw: &str) -> Option<f64> {
    match parse_units(raw, ETHER_DECIMALS) {
        Ok(wei) if wei > 0 => parse_positive(raw),
        _ => None,
    }
}

/// `amount x price` rounded to cents with grouping; anything that is not a
/// stakeable amount, or overflows, shows `0.00`.
pub fn usd_equivalent(raw: &str, price: f64) -> String {
    match stakeable_amount(raw).map(|amount| amount * price) {
        Some(usd) if usd.is_finite() => format_usd(usd),
        _ => ZERO_USD.to_owned(),
    }
}

/// Quick-fill text for `percent` of `balance`, four decimals.
pub fn quick_fill_amount(balance: f64, percent: u8) -> String {
    let balance = if balance.is_finite() && balance > 0.0 { balance } else { 0.0 };
    format_fixed(balance * f64::from(percent) / 100.0, 4)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakeInput {
    raw: String,
    usd: String,
}

impl Default for StakeInput {
    fn default() -> Self {
        Self {
            raw: String::new(),
            usd: ZERO_USD.to_owned(),
        }
    }
}

impl StakeInput {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn usd(&self) -> &str {
        &self.usd
    }

    pub fn set(&mut self, raw: &str, price: f64) -> &str {
        self.raw = raw.to_owned();
        self.recompute(price)
    }

    pub fn recompute(&mut self, price: f64) -> &str {
        self.usd = usd_equivalent(&self.raw, price);
        &self.usd
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
