//! Price text normalization.
//!
//! Listing cards show prices as free text such as `"12 500 лв.\n 6 391 EUR"`.
//! [`normalize_price`] reduces that to a canonical `"<amount> <currency>"`
//! string, preferring Bulgarian Lev prices, and never fails: whatever cannot
//! be normalized is handed back whitespace-cleaned.

use regex_lite::{Captures, Regex};
use std::sync::LazyLock;

/// Returned when the price element is missing or empty.
pub const PRICE_UNAVAILABLE: &str = "Price not available";

// Input is whitespace-collapsed before matching, so a single literal space
// stands in for any whitespace run.
static STRUCTURED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:[,. ]\d{3})*)([.,]\d{2})? ?(BGN|EUR|лв\.?)").unwrap()
});

static AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:[,. ]\d{3})*)([.,]\d{2})?").unwrap());

static CURRENCY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"BGN|EUR|лв\.?").unwrap());

/// Normalizes raw price text.
///
/// 1. Whitespace is collapsed; empty input yields [`PRICE_UNAVAILABLE`].
/// 2. An amount directly followed by a currency: the first Lev/BGN match
///    wins, otherwise the first match of any currency.
/// 3. Otherwise the first amount and the first currency found anywhere in
///    the text, even if they are unrelated.
/// 4. Otherwise the cleaned text itself.
pub fn normalize_price(raw: &str) -> String {
    let text = collapse_whitespace(raw);
    if text.is_empty() {
        return PRICE_UNAVAILABLE.to_string();
    }

    if let Some(price) = structured_match(&text) {
        return price;
    }

    if let Some(price) = loose_match(&text) {
        return price;
    }

    text
}

/// Collapses all whitespace runs (including non-breaking spaces) to single spaces and trims.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn structured_match(text: &str) -> Option<String> {
    let matches: Vec<Captures> = STRUCTURED.captures_iter(text).collect();

    let preferred = matches
        .iter()
        .find(|caps| caps.get(3).is_some_and(|c| is_bgn(c.as_str())))
        .or_else(|| matches.first())?;

    let integer = preferred.get(1)?.as_str();
    let fraction = preferred.get(2).map(|m| m.as_str());
    let currency = preferred.get(3)?.as_str();

    Some(format!("{} {}", canonical_amount(integer, fraction), canonical_currency(currency)))
}

fn loose_match(text: &str) -> Option<String> {
    let amount = AMOUNT.captures(text)?;
    let currency = CURRENCY.find(text)?;

    let integer = amount.get(1)?.as_str();
    let fraction = amount.get(2).map(|m| m.as_str());

    Some(format!(
        "{} {}",
        canonical_amount(integer, fraction),
        canonical_currency(currency.as_str())
    ))
}

fn is_bgn(currency: &str) -> bool {
    currency == "BGN" || currency.starts_with("лв")
}

fn canonical_currency(currency: &str) -> &str {
    if currency.starts_with("лв") {
        "BGN"
    } else {
        currency
    }
}

/// Groups thousands with commas; keeps a non-zero two-digit fraction after a period.
fn canonical_amount(integer: &str, fraction: Option<&str>) -> String {
    let mut amount: String =
        integer.chars().map(|c| if c.is_ascii_digit() { c } else { ',' }).collect();

    if let Some(digits) = fraction.and_then(|f| f.get(1..)) {
        if digits.chars().any(|c| c != '0') {
            amount.push('.');
            amount.push_str(digits);
        }
    }

    amount
}
