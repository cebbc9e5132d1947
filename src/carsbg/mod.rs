//! cars.bg search pipeline: filter lookup, URL building, fetching, parsing
//! and price normalization.

pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod parser;
pub mod price;
pub mod query;
pub mod search;
pub mod selectors;

pub use catalog::{model_codes, Brand};
pub use client::{fetch_listings, CarsClient, PageFetcher};
pub use error::{FetchError, PageError, ParseError, SearchError};
pub use models::{Listing, PageOutcome, PageStatus, SearchReport, SearchRequest};
pub use parser::parse_listings;
pub use price::{normalize_price, PRICE_UNAVAILABLE};
pub use search::{search_cars, spawn_search};
