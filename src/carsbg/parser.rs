//! HTML parser for cars.bg search-results pages.
//!
//! A result card is any element carrying a non-empty `data-item` attribute.
//! Cards are found with a depth-first, pre-order walk that does not descend
//! into a card once found, so markup inside a card can never produce a second
//! listing. Card fields are looked up in the card element and its subtree
//! only, first match wins, and a missing field is an empty string rather
//! than an error.

use crate::carsbg::models::Listing;
use crate::carsbg::price::{normalize_price, PRICE_UNAVAILABLE};
use crate::carsbg::selectors::{self, CSS_URL, IMAGE, LINK, PRICE};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Parses a search-results page into listings, in document order.
pub fn parse_listings(html: &str) -> Vec<Listing> {
    let document = Html::parse_document(html);
    let listings = extract_listings(&document);
    debug!("Parsed {} listings", listings.len());
    listings
}

/// Extracts listings from an already parsed document.
pub fn extract_listings(document: &Html) -> Vec<Listing> {
    collect_cards(document.root_element())
}

fn collect_cards(element: ElementRef) -> Vec<Listing> {
    if let Some(listing) = parse_card(element) {
        trace!("Parsed listing: {} - {}", listing.id, listing.title);
        return vec![listing];
    }

    element.children().filter_map(ElementRef::wrap).flat_map(collect_cards).collect()
}

/// Builds a listing from a card element, or `None` if it is not a card.
fn parse_card(element: ElementRef) -> Option<Listing> {
    let id = element.value().attr(selectors::LISTING_ATTR).filter(|id| !id.is_empty())?;
    let title = element.value().attr(selectors::TITLE_ATTR).unwrap_or_default();

    Some(Listing {
        id: id.to_string(),
        title: title.to_string(),
        image_url: find_image_url(element),
        link: find_link(element),
        price: find_price(element),
    })
}

/// The card itself followed by every element below it, in document order.
fn subtree<'a>(card: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    card.descendants().filter_map(ElementRef::wrap)
}

/// Normalized text of the first price heading in the card.
pub fn find_price(card: ElementRef) -> String {
    match subtree(card).find(|e| PRICE.matches(e)) {
        Some(heading) => normalize_price(&heading.text().collect::<String>()),
        None => PRICE_UNAVAILABLE.to_string(),
    }
}

/// URL from the first `background-image` style in the card.
pub fn find_image_url(card: ElementRef) -> String {
    subtree(card)
        .filter(|e| IMAGE.matches(e))
        .filter_map(|e| e.value().attr("style"))
        .find_map(|style| CSS_URL.captures(style).and_then(|caps| caps.get(1)))
        .map(|url| url.as_str().to_string())
        .unwrap_or_default()
}

/// Value of the first non-empty `list-link` anchor in the card.
pub fn find_link(card: ElementRef) -> String {
    subtree(card)
        .filter(|e| LINK.matches(e))
        .filter_map(|e| e.value().attr(selectors::LINK_ATTR))
        .find(|link| !link.is_empty())
        .unwrap_or_default()
        .to_string()
}
