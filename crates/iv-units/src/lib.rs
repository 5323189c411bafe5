//! Fixed-point unit conversion and display formatting.
//!
//! `parse_units` / `format_units` follow the usual token-unit convention:
//! a human decimal string maps onto an integer scaled by `10^decimals`.
//! Conversions are exact for inputs with at most `decimals` fractional
//! digits; extra digits are truncated toward zero.

/// On-chain amounts of the staking contract use 18 decimals.
pub const ETHER_DECIMALS: u32 = 18;

/// `10^38 < u128::MAX < 10^39`
const MAX_DECIMALS: u32 = 38;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid decimal amount: {0}")]
    InvalidNumber(String),
    #[error("negative amounts are not supported")]
    Negative,
    #[error("amount exceeds the representable range")]
    Overflow,
    #[error("unsupported decimals: {0}")]
    UnsupportedDecimals(u32),
}

fn scale(decimals: u32) -> Result<u128, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals(decimals));
    }
    Ok(10_u128.pow(decimals))
}

fn accumulate(digits: &str) -> Result<u128, UnitsError> {
    let mut value: u128 = 0;
    for byte in digits.bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(byte - b'0')))
            .ok_or(UnitsError::Overflow)?;
    }
    Ok(value)
}

/// Convert a human decimal string into a fixed-point integer.
pub fn parse_units(input: &str, decimals: u32) -> Result<u128, UnitsError> {
    let unit = scale(decimals)?;
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(UnitsError::Negative);
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::InvalidNumber(trimmed.to_owned()));
    }

    let kept = &fraction[..fraction.len().min(decimals as usize)];
    let whole_value = accumulate(whole)?;
    let fraction_value = accumulate(kept)? * 10_u128.pow(decimals - kept.len() as u32);

    whole_value
        .checked_mul(unit)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or(UnitsError::Overflow)
}

/// Convert a fixed-point integer back into its shortest decimal string
/// (always at least one fractional digit, e.g. `1.0`).
pub fn format_units(value: u128, decimals: u32) -> Result<String, UnitsError> {
    let unit = scale(decimals)?;
    if decimals == 0 {
        return Ok(format!("{value}.0"));
    }
    let whole = value / unit;
    let fraction = format!("{:0width$}", value % unit, width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    let fraction = if fraction.is_empty() { "0" } else { fraction };
    Ok(format!("{whole}.{fraction}"))
}

/// Like `format_units` but rounded half-up to exactly `places` fractional digits.
pub fn format_units_rounded(value: u128, decimals: u32, places: u32) -> Result<String, UnitsError> {
    let unit = scale(decimals)?;
    let (units, places) = if places >= decimals {
        (value, decimals)
    } else {
        let step = 10_u128.pow(decimals - places);
        let rem = value % step;
        let mut units = value / step;
        if rem >= step - rem {
            units += 1;
        }
        (units, places)
    };

    let display_unit = unit / 10_u128.pow(decimals - places);
    let whole = units / display_unit;
    if places == 0 {
        return Ok(whole.to_string());
    }
    Ok(format!(
        "{whole}.{:0width$}",
        units % display_unit,
        width = places as usize
    ))
}

/// Parse raw user input as a positive finite amount.
pub fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Fixed number of fractional digits, no grouping (`1.5 -> "1.5000"`).
pub fn format_fixed(value: f64, places: usize) -> String {
    format!("{value:.places$}")
}

/// Fixed number of fractional digits with `,` thousands grouping.
pub fn format_grouped(value: f64, places: usize) -> String {
    let rendered = format!("{:.places$}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((&rendered, ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, ch) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && rendered.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// USD display: two decimals, grouped.
pub fn format_usd(value: f64) -> String {
    format_grouped(value, 2)
}

/// Market price display keeps sub-dollar assets readable.
pub fn format_price(value: f64) -> String {
    if value.abs() >= 1.0 {
        format_grouped(value, 2)
    } else {
        format_grouped(value, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn parses_exact_decimals() {
        assert_eq!(parse_units("2.5", 18), Ok(2 * ONE + ONE / 2));
        assert_eq!(parse_units("0.000000000000000001", 18), Ok(1));
        assert_eq!(parse_units(".5", 18), Ok(ONE / 2));
        assert_eq!(parse_units("7.", 18), Ok(7 * ONE));
        assert_eq!(parse_units(" 42 ", 18), Ok(42 * ONE));
    }

    #[test]
    fn truncates_excess_fraction_toward_zero() {
        assert_eq!(
            parse_units("1.1234567890123456789", 18),
            Ok(1_123_456_789_012_345_678)
        );
        assert_eq!(parse_units("0.0000000000000000009", 18), Ok(0));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_units("", 18), Err(UnitsError::Empty));
        assert_eq!(parse_units("-1", 18), Err(UnitsError::Negative));
        assert!(matches!(parse_units(".", 18), Err(UnitsError::InvalidNumber(_))));
        assert!(matches!(parse_units("1e3", 18), Err(UnitsError::InvalidNumber(_))));
        assert!(matches!(parse_units("1.2.3", 18), Err(UnitsError::InvalidNumber(_))));
        assert!(matches!(parse_units("abc", 18), Err(UnitsError::InvalidNumber(_))));
        assert_eq!(parse_units("1", 39), Err(UnitsError::UnsupportedDecimals(39)));
    }

    #[test]
    fn rejects_values_beyond_u128() {
        assert_eq!(
            parse_units("340282366920938463464", 18),
            Err(UnitsError::Overflow)
        );
        assert_eq!(
            parse_units("999999999999999999999999999999999999999999", 0),
            Err(UnitsError::Overflow)
        );
    }

    #[test]
    fn formats_shortest_decimal() {
        assert_eq!(format_units(ONE, 18).as_deref(), Ok("1.0"));
        assert_eq!(format_units(ONE / 2, 18).as_deref(), Ok("0.5"));
        assert_eq!(format_units(0, 18).as_deref(), Ok("0.0"));
        assert_eq!(format_units(1, 18).as_deref(), Ok("0.000000000000000001"));
        assert_eq!(format_units(15, 0).as_deref(), Ok("15.0"));
    }

    #[test]
    fn parse_then_format_preserves_value() {
        for amount in ["1.0", "2.5", "0.000000000000000001", "123456789.123456789123456789"] {
            let fixed = parse_units(amount, 18).expect("amount should parse");
            assert_eq!(format_units(fixed, 18).expect("format"), amount);
        }
    }

    #[test]
    fn rounds_to_display_places() {
        assert_eq!(
            format_units_rounded(1_234_550_000_000_000_000, 18, 4).as_deref(),
            Ok("1.2346")
        );
        assert_eq!(
            format_units_rounded(1_234_549_999_999_999_999, 18, 4).as_deref(),
            Ok("1.2345")
        );
        assert_eq!(format_units_rounded(0, 18, 4).as_deref(), Ok("0.0000"));
        assert_eq!(
            format_units_rounded(9_999_999_000_000_000_000, 18, 4).as_deref(),
            Ok("10.0000")
        );
        assert_eq!(format_units_rounded(u128::MAX, 18, 0).as_deref(), Ok("340282366920938463463"));
    }

    #[test]
    fn positive_amounts_only() {
        assert_eq!(parse_positive("2.5"), Some(2.5));
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("abc"), None);
        assert_eq!(parse_positive(""), None);
        assert_eq!(parse_positive("inf"), None);
        assert_eq!(parse_positive("NaN"), None);
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_usd(1550.0), "1,550.00");
        assert_eq!(format_usd(1_234_567.891), "1,234,567.89");
        assert_eq!(format_usd(0.0), "0.00");
        assert_eq!(format_usd(999.999), "1,000.00");
        assert_eq!(format_usd(-1234.5), "-1,234.50");
        assert_eq!(format_grouped(1_000_000.0, 0), "1,000,000");
    }

    #[test]
    fn price_display_keeps_cents_for_small_assets() {
        assert_eq!(format_price(620.0), "620.00");
        assert_eq!(format_price(3200.0), "3,200.00");
        assert_eq!(format_price(0.12), "0.1200");
        assert_eq!(format_fixed(1.5, 4), "1.5000");
    }
}
