//! Brand and model lookup tables for cars.bg search filters.
//!
//! Resolution never fails: unrecognized names mean "no filter".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Car brands with their cars.bg `brandId` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Brand {
    /// No brand filter
    #[default]
    Unknown,
    Bmw,
    Audi,
    Vw,
}

impl Brand {
    /// Resolves free-text user input to a brand, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "bmw" => Brand::Bmw,
            "audi" => Brand::Audi,
            "vw" | "volkswagen" => Brand::Vw,
            _ => Brand::Unknown,
        }
    }

    /// Returns the numeric code cars.bg uses for this brand.
    pub fn code(&self) -> u32 {
        match self {
            Brand::Unknown => 0,
            Brand::Bmw => 10,
            Brand::Audi => 20,
            Brand::Vw => 30,
        }
    }

    /// Returns true for the "no brand filter" value.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Brand::Unknown)
    }

    /// Returns all brands that map to a real filter.
    pub fn all() -> &'static [Brand] {
        &[Brand::Bmw, Brand::Audi, Brand::Vw]
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Brand::Unknown => "all brands",
            Brand::Bmw => "BMW",
            Brand::Audi => "Audi",
            Brand::Vw => "Volkswagen",
        };
        write!(f, "{}", name)
    }
}

const BMW_5_SERIES: &[&str] =
    &["1000003", "122", "123", "124", "125", "126", "127", "128", "129", "130", "131", "132"];

/// Resolves a model name (and its spelling variants) to cars.bg model codes.
///
/// The table is brand-independent. Unknown names return an empty slice.
pub fn model_codes(name: &str) -> &'static [&'static str] {
    match name.trim().to_lowercase().as_str() {
        "5series" | "5-series" | "5" => BMW_5_SERIES,
        _ => &[],
    }
}
