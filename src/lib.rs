//! bg-cars - search cars.bg listings from the command line
//!
//! Walks the paginated search results, extracts each listing card and
//! normalizes its price text.

pub mod carsbg;
pub mod commands;
pub mod config;
pub mod format;

pub use carsbg::models::{Listing, SearchReport, SearchRequest};
pub use carsbg::Brand;
pub use config::Config;
