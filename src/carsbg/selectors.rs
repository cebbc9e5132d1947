//! Marker attributes and CSS selectors for cars.bg result pages.
//!
//! Update this file when cars.bg changes its result card markup.

use regex_lite::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Attribute tagging each result card; its value is the listing id.
pub const LISTING_ATTR: &str = "data-item";

/// Card attribute holding the listing title.
pub const TITLE_ATTR: &str = "title";

/// Attribute on the anchor that links to the full listing.
pub const LINK_ATTR: &str = "list-link";

/// Price heading; it must carry all four class tokens.
pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h6.card__title.mdc-typography.mdc-typography--headline6.price").unwrap()
});

/// Container whose inline style carries the card photo.
pub static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[style*='background-image']").unwrap());

/// Anchor linking to the full listing.
pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[list-link]").unwrap());

/// `url(...)` inside a CSS declaration, optionally quoted.
pub static CSS_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"url\(['"]?([^'")]+)['"]?\)"#).unwrap());
