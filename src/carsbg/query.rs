//! Search-results URL construction.

use crate::carsbg::catalog::Brand;

/// Path of the search-results endpoint, relative to the site root.
pub const SEARCH_PATH: &str = "/carslist.php";

/// Builds the search-results URL for one page.
///
/// Brand filter parameters are only set for a known brand. Model codes are
/// appended as repeated `models[]` parameters in the order given.
pub fn search_url(base_url: &str, brand: Brand, page: u32, model_codes: &[&str]) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();

    if !brand.is_unknown() {
        params.push(("subm", "1".to_string()));
        params.push(("add_search", "1".to_string()));
        params.push(("typeoffer", "1".to_string()));
        params.push(("brandId", brand.code().to_string()));
    }

    params.push(("page", page.to_string()));

    for code in model_codes {
        params.push(("models[]", code.to_string()));
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}{}?{}", base_url.trim_end_matches('/'), SEARCH_PATH, query)
}
