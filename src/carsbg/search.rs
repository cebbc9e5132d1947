//! Multi-page search: walks result pages in order and aggregates listings.

use crate::carsbg::client::{fetch_listings, PageFetcher};
use crate::carsbg::error::SearchError;
use crate::carsbg::models::{PageOutcome, PageStatus, SearchReport, SearchRequest, MAX_PAGES};
use crate::carsbg::query::search_url;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Searches pages `1..=request.pages` one at a time.
///
/// A page with no listings ends the search. A page that fails is recorded in
/// the report and the search moves on to the next page. Cancellation stops
/// the search and keeps what was gathered so far.
pub async fn search_cars<F>(
    fetcher: &F,
    request: &SearchRequest,
    cancel: &CancellationToken,
) -> Result<SearchReport, SearchError>
where
    F: PageFetcher + ?Sized,
{
    if request.pages == 0 || request.pages > MAX_PAGES {
        return Err(SearchError::InvalidPageCount { got: request.pages, max: MAX_PAGES });
    }

    let brand = request.brand();
    let models = request.model_codes();
    info!(
        "Starting car search: brand={}, models={}, max_pages={}",
        brand,
        models.len(),
        request.pages
    );

    let mut report = SearchReport::default();

    for page in 1..=request.pages {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }

        let url = search_url(fetcher.base_url(), brand, page, models);
        debug!("Scraping page {}: {}", page, url);

        let status = match fetch_listings(fetcher, &url, cancel).await {
            Ok(listings) if listings.is_empty() => PageStatus::Empty,
            Ok(listings) => {
                let count = listings.len();
                report.listings.extend(listings);
                PageStatus::Listings(count)
            }
            Err(e) if e.is_cancelled() => {
                debug!("Search cancelled while fetching page {}", page);
                report.cancelled = true;
                break;
            }
            Err(e) => {
                warn!("Failed to fetch page {}: {}", page, e);
                PageStatus::Failed(e.to_string())
            }
        };

        let reached_end = status == PageStatus::Empty;
        report.pages.push(PageOutcome { page, url, status });

        if reached_end {
            debug!("No listings on page {}, stopping search", page);
            break;
        }
    }

    info!(
        "Found {} listings ({} of {} pages succeeded)",
        report.count(),
        report.succeeded_pages(),
        report.attempted_pages()
    );

    Ok(report)
}

/// Runs [`search_cars`] as a background task.
pub fn spawn_search<F>(
    fetcher: Arc<F>,
    request: SearchRequest,
    cancel: CancellationToken,
) -> JoinHandle<Result<SearchReport, SearchError>>
where
    F: PageFetcher + 'static,
{
    tokio::spawn(async move { search_cars(fetcher.as_ref(), &request, &cancel).await })
}
