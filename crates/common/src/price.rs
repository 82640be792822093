//! US dollar price parsing, formatting and format checks
//!
//! Prices are displayed as `$X,XXX.XX`. Parsing signals unparsable text with
//! `None`; formatting refuses non-finite amounts.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Canonical display pattern for a price string
pub const PRICE_PATTERN: &str = r"^\$[0-9,]+\.[0-9]{2}$";

static PRICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PRICE_PATTERN).expect("price pattern is valid"));

/// Longest leading decimal literal: sign, digits, fraction, exponent
static NUMBER_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("number prefix pattern is valid")
});

/// Parse a US-formatted price such as `"$1,299.99"`.
///
/// Every `$` and `,` is stripped before parsing, wherever it appears. Only
/// the leading number counts, so `"$12.99 each"` parses as `12.99`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let number = NUMBER_PREFIX_RE.find(cleaned.trim())?;
    let value = number.as_str().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Format an amount as `$1,299.99`
pub fn format_price(amount: f64) -> Result<String> {
    if !amount.is_finite() {
        return Err(Error::InvalidAmount(amount));
    }

    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    // -0.001 rounds to zero and must not keep its sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    Ok(format!("{sign}${}.{fraction}", group_thousands(integer)))
}

/// Whether `text` (trimmed) looks like `$X,XXX.XX`.
///
/// Comma placement is not checked: `$12,34.56` passes.
pub fn is_valid_price_format(text: &str) -> bool {
    PRICE_RE.is_match(text.trim())
}

/// Expected line total for `quantity` units at `unit_price`
pub fn calculate_total(unit_price: &str, quantity: u32) -> Result<String> {
    let price = parse_price(unit_price)
        .ok_or_else(|| Error::UnparsablePrice(unit_price.to_string()))?;
    format_price(price * f64::from(quantity))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
