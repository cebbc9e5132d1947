//! Integration tests for the listing parser using fixture files.

use bg_cars::carsbg::parse_listings;
use bg_cars::carsbg::PRICE_UNAVAILABLE;

const SEARCH_FIXTURE: &str = include_str!("fixtures/search_result.html");

#[test]
fn test_parse_search_results() {
    let listings = parse_listings(SEARCH_FIXTURE);

    // Five cards on the page, one of them with an empty data-item
    assert_eq!(listings.len(), 4);

    let ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "6567b1c2a0f6ea1b2c3d4e01",
            "6567b1c2a0f6ea1b2c3d4e02",
            "6567b1c2a0f6ea1b2c3d4e03",
            "6567b1c2a0f6ea1b2c3d4e04",
        ]
    );

    // Full card, Lev price preferred over the EUR subtitle
    let listing = &listings[0];
    assert_eq!(listing.title, "BMW 530 d xDrive Touring");
    assert_eq!(listing.price, "38,900 BGN");
    assert_eq!(listing.link, "https://www.cars.bg/offer/6567b1c2a0f6ea1b2c3d4e01");
    assert_eq!(
        listing.image_url,
        "https://g1-bg.cars.bg/2024-11-20_1/6567b1c2a0f6ea1b2c3d4e01o.jpg"
    );

    // Double-quoted CSS url and a non-breaking space in the price
    let listing = &listings[1];
    assert_eq!(listing.title, "BMW 520 i");
    assert_eq!(listing.price, "12,500 EUR");
    assert_eq!(
        listing.image_url,
        "https://g1-bg.cars.bg/2024-11-18_2/6567b1c2a0f6ea1b2c3d4e02o.jpg"
    );
}

#[test]
fn test_parse_card_without_recognizable_price() {
    let listings = parse_listings(SEARCH_FIXTURE);

    let listing = &listings[2];
    assert_eq!(listing.price, "По договаряне");
    assert!(listing.image_url.is_empty());
    assert!(listing.link.is_empty());
}

#[test]
fn test_parse_bare_card() {
    let listings = parse_listings(SEARCH_FIXTURE);

    let listing = &listings[3];
    assert!(listing.title.is_empty());
    assert!(listing.image_url.is_empty());
    assert!(listing.link.is_empty());
    assert_eq!(listing.price, PRICE_UNAVAILABLE);
}

#[test]
fn test_links_outside_cards_are_ignored() {
    let listings = parse_listings(SEARCH_FIXTURE);
    assert!(listings.iter().all(|l| l.link != "https://www.cars.bg/"));
}

#[test]
fn test_parse_empty_results() {
    let html = r#"
        <html>
        <body>
            <div id="listContainer" class="list-container">
                <p class="no-results">Няма намерени обяви</p>
            </div>
        </body>
        </html>
    "#;

    assert!(parse_listings(html).is_empty());
}

#[test]
fn test_parse_malformed_html() {
    let html = r#"<div data-item="X1" title="Unclosed <b>card"><h6 class="card__title mdc-typography mdc-typography--headline6 price">5 000 лв"#;

    let listings = parse_listings(html);
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].id, "X1");
    assert_eq!(listings[0].price, "5,000 BGN");
}
