//! Data models for listings, search requests and per-page search reports.

use crate::carsbg::catalog::{model_codes, Brand};
use serde::{Deserialize, Serialize};

/// Default number of result pages to walk.
pub const DEFAULT_PAGES: u32 = 2;

/// Upper bound on the number of result pages a single search may walk.
pub const MAX_PAGES: u32 = 10;

/// One car-for-sale record extracted from a search-results page.
///
/// Only `id` is guaranteed to be non-empty; every other field degrades to
/// an empty string (or the price sentinel) when its markup is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Value of the card's `data-item` marker attribute
    pub id: String,
    /// Card title attribute
    pub title: String,
    /// Image URL from the card's `background-image` style
    pub image_url: String,
    /// Link to the full listing
    pub link: String,
    /// Canonical price, or [`crate::carsbg::price::PRICE_UNAVAILABLE`]
    pub price: String,
}

/// A search as requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text brand name; `None` searches all brands
    pub brand: Option<String>,
    /// Free-text model name; `None` searches all models
    pub model: Option<String>,
    /// Number of pages to walk, within `1..=MAX_PAGES`
    pub pages: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self { brand: None, model: None, pages: DEFAULT_PAGES }
    }
}

impl SearchRequest {
    /// Creates a request, dropping blank names and clamping the page count.
    pub fn new(brand: Option<&str>, model: Option<&str>, pages: Option<u32>) -> Self {
        Self {
            brand: non_blank(brand),
            model: non_blank(model),
            pages: pages.unwrap_or(DEFAULT_PAGES).clamp(1, MAX_PAGES),
        }
    }

    /// Resolves the brand filter.
    pub fn brand(&self) -> Brand {
        self.brand.as_deref().map(Brand::from_name).unwrap_or_default()
    }

    /// Resolves the model filter codes.
    pub fn model_codes(&self) -> &'static [&'static str] {
        self.model.as_deref().map(model_codes).unwrap_or_default()
    }

    /// Human-readable acknowledgement of what is being searched.
    pub fn describe(&self) -> String {
        let brand = self.brand.as_deref().map(str::to_uppercase);
        let model = self.model.as_deref();

        let mut lines = vec!["Searching for cars...".to_string()];
        lines.push(format!("Brand: {}", brand.as_deref().unwrap_or("All brands")));
        lines.push(format!("Model: {}", model.unwrap_or("All models")));
        lines.push(format!("Max pages: {}", self.pages));
        lines.join("\n")
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}

/// What happened when a single page was requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "detail")]
pub enum PageStatus {
    /// Page produced this many listings
    Listings(usize),
    /// Page parsed but had no listings; treated as the end of results
    Empty,
    /// Page could not be fetched or parsed
    Failed(String),
}

/// Outcome of one page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOutcome {
    pub page: u32,
    pub url: String,
    pub status: PageStatus,
}

impl PageOutcome {
    /// Returns true if the page was fetched and parsed.
    pub fn succeeded(&self) -> bool {
        !matches!(self.status, PageStatus::Failed(_))
    }
}

/// Aggregated result of a multi-page search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchReport {
    /// Listings from every successful page, in page then document order
    pub listings: Vec<Listing>,
    /// One entry per attempted page
    pub pages: Vec<PageOutcome>,
    /// Whether the search stopped because it was cancelled
    pub cancelled: bool,
}

impl SearchReport {
    /// Returns number of listings.
    pub fn count(&self) -> usize {
        self.listings.len()
    }

    /// Returns true if no listings were found.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn attempted_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn succeeded_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.succeeded()).count()
    }

    pub fn failed_pages(&self) -> usize {
        self.attempted_pages() - self.succeeded_pages()
    }

    /// Returns true if some pages failed, so the listings may be incomplete.
    pub fn is_partial(&self) -> bool {
        self.failed_pages() > 0 || self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(page: u32, status: PageStatus) -> PageOutcome {
        PageOutcome { page, url: format!("https://www.cars.bg/carslist.php?page={}", page), status }
    }

    #[test]
    fn test_request_defaults() {
        let request = SearchRequest::default();
        assert_eq!(request.pages, 2);
        assert!(request.brand.is_none());
        assert!(request.model.is_none());
        assert_eq!(request.brand(), Brand::Unknown);
        assert!(request.model_codes().is_empty());
    }

    #[test]
    fn test_request_pages_clamped() {
        assert_eq!(SearchRequest::new(None, None, None).pages, 2);
        assert_eq!(SearchRequest::new(None, None, Some(0)).pages, 1);
        assert_eq!(SearchRequest::new(None, None, Some(5)).pages, 5);
        assert_eq!(SearchRequest::new(None, None, Some(10)).pages, 10);
        assert_eq!(SearchRequest::new(None, None, Some(50)).pages, 10);
    }

    #[test]
    fn test_request_blank_names_dropped() {
        let request = SearchRequest::new(Some("  "), Some(""), None);
        assert!(request.brand.is_none());
        assert!(request.model.is_none());
    }

    #[test]
    fn test_request_resolves_filters() {
        let request = SearchRequest::new(Some("BMW"), Some("5-series"), Some(3));
        assert_eq!(request.brand(), Brand::Bmw);
        assert_eq!(request.model_codes().len(), 12);
    }

    #[test]
    fn test_request_describe() {
        let text = SearchRequest::new(Some("bmw"), Some("x5"), Some(5)).describe();
        assert!(text.contains("Brand: BMW"));
        assert!(text.contains("Model: x5"));
        assert!(text.contains("Max pages: 5"));

        let text = SearchRequest::default().describe();
        assert!(text.contains("All brands"));
        assert!(text.contains("All models"));
    }

    #[test]
    fn test_report_page_counts() {
        let report = SearchReport {
            listings: Vec::new(),
            pages: vec![
                outcome(1, PageStatus::Listings(20)),
                outcome(2, PageStatus::Failed("request failed with status: 500".to_string())),
                outcome(3, PageStatus::Empty),
            ],
            cancelled: false,
        };

        assert_eq!(report.attempted_pages(), 3);
        assert_eq!(report.succeeded_pages(), 2);
        assert_eq!(report.failed_pages(), 1);
        assert!(report.is_partial());
        assert!(report.is_empty());
    }

    #[test]
    fn test_report_complete() {
        let report = SearchReport {
            listings: Vec::new(),
            pages: vec![outcome(1, PageStatus::Empty)],
            cancelled: false,
        };
        assert!(!report.is_partial());
        assert_eq!(report.count(), 0);
    }

    #[test]
    fn test_page_status_serde() {
        let json = serde_json::to_string(&PageStatus::Listings(3)).unwrap();
        assert_eq!(json, r#"{"status":"listings","detail":3}"#);

        let json = serde_json::to_string(&PageStatus::Empty).unwrap();
        assert_eq!(json, r#"{"status":"empty"}"#);
    }
}
