use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const COL_SYMBOL: &str = "Stock Symbol";
pub const COL_SECTOR: &str = "Sector";
pub const COL_RECOMMENDATION: &str = "Recommendation";
pub const COL_CONFIDENCE: &str = "Confidence Level (%)";
pub const COL_CURRENT_PRICE: &str = "Current Price (AU$)";
pub const COL_CURRENT_PRICE_FALLBACK: &str = "Current Price";
pub const COL_HIGH_PRICE: &str = "Predicted High Price in a Year";
pub const COL_LOW_PRICE: &str = "Predicted Low Price in a Year";
pub const COL_GENERATED_DATE: &str = "Generated Date";

/// One CSV row keyed by header name. Keys are not guaranteed to be present.
pub type RawRow = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    pub symbol: String,
    pub sector: String,
    pub recommendation: String,
    pub confidence: f64,
    /// False when the confidence column was absent or not a number.
    pub confidence_reported: bool,
    pub current_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub generated_date: Option<String>,
}

/// Turns a raw row into a record. Returns `None` when the symbol is missing or blank.
pub fn normalize(raw: &RawRow) -> Option<StockRecord> {
    let symbol = raw.get(COL_SYMBOL)?.trim();
    if symbol.is_empty() {
        return None;
    }

    let text = |key: &str| raw.get(key).cloned().unwrap_or_default();
    let number = |key: &str| raw.get(key).map(|s| parse_number(s)).unwrap_or(0.0);

    let confidence = raw.get(COL_CONFIDENCE).and_then(|s| parse_leading_f64(s));
    let current_price = match raw.get(COL_CURRENT_PRICE) {
        Some(s) => parse_number(s),
        None => number(COL_CURRENT_PRICE_FALLBACK),
    };

    let generated_date = raw
        .get(COL_GENERATED_DATE)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Some(StockRecord {
        symbol: symbol.to_string(),
        sector: text(COL_SECTOR),
        recommendation: text(COL_RECOMMENDATION),
        confidence: confidence.unwrap_or(0.0),
        confidence_reported: confidence.is_some(),
        current_price,
        high_price: number(COL_HIGH_PRICE),
        low_price: number(COL_LOW_PRICE),
        generated_date,
    })
}

/// Lenient float parse: the longest leading decimal literal wins, anything else is zero.
pub fn parse_number(s: &str) -> f64 {
    parse_leading_f64(s).unwrap_or(0.0)
}

/// Parses the longest decimal prefix of `s` after leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent. Trailing garbage is ignored (`"12.5%"` parses as 12.5). Returns
/// `None` when no digits are found or the value is not finite.
pub fn parse_leading_f64(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when it has at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
