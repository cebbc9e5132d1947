//! Search command implementation.

use crate::carsbg::{spawn_search, CarsClient, PageFetcher, SearchReport, SearchRequest};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Executes a car search.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    ///
    /// `acknowledge` receives the request summary as soon as the search has
    /// been started in the background. Resolving `shutdown` cancels it.
    pub async fn execute(
        &self,
        request: SearchRequest,
        acknowledge: impl FnOnce(&str),
        shutdown: impl Future<Output = ()>,
    ) -> Result<String> {
        let client = CarsClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(Arc::new(client), request, acknowledge, shutdown).await
    }

    /// Executes the search with a provided fetcher (for testing).
    pub async fn execute_with_client<F>(
        &self,
        fetcher: Arc<F>,
        request: SearchRequest,
        acknowledge: impl FnOnce(&str),
        shutdown: impl Future<Output = ()>,
    ) -> Result<String>
    where
        F: PageFetcher + 'static,
    {
        let cancel = CancellationToken::new();
        let ack = request.describe();
        let mut handle = spawn_search(fetcher, request, cancel.clone());
        acknowledge(&ack);

        tokio::pin!(shutdown);
        let joined = tokio::select! {
            joined = &mut handle => joined,
            _ = &mut shutdown => {
                warn!("Cancelling search");
                cancel.cancel();
                handle.await
            }
        };

        let report: SearchReport = joined.context("Search task failed")?.context("Search failed")?;
        info!("Search finished with {} listings", report.count());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_report(&report, self.config.max_results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carsbg::PageError;
    use crate::config::OutputFormat;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock fetcher serving one HTML body per page, then empty pages.
    struct MockFetcher {
        pages: Vec<String>,
        call_count: AtomicU32,
        page_delay: Duration,
    }

    impl MockFetcher {
        fn new(pages: Vec<String>) -> Self {
            Self { pages, call_count: AtomicU32::new(0), page_delay: Duration::ZERO }
        }

        fn call_count(&self) -> u32 {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, PageError> {
            let idx = self.call_count.fetch_add(1, Ordering::SeqCst) as usize;
            tokio::time::sleep(self.page_delay).await;
            Ok(self.pages.get(idx).cloned().unwrap_or_else(|| "<html></html>".to_string()))
        }

        fn base_url(&self) -> &str {
            "https://www.cars.bg"
        }
    }

    fn make_test_config() -> Config {
        Config { max_results: 3, format: OutputFormat::Table, ..Config::default() }
    }

    fn make_search_html(cars: &[(&str, &str, &str)]) -> String {
        let mut html = String::from("<html><body>");
        for (id, title, price) in cars {
            html.push_str(&format!(
                r#"<div data-item="{}" title="{}">
                    <a list-link="https://www.cars.bg/offer/{}"></a>
                    <h6 class="card__title mdc-typography mdc-typography--headline6 price">{}</h6>
                </div>"#,
                id, title, id, price
            ));
        }
        html.push_str("</body></html>");
        html
    }

    fn never() -> impl Future<Output = ()> {
        std::future::pending()
    }

    #[tokio::test]
    async fn test_search_command_basic() {
        let html = make_search_html(&[
            ("C1", "BMW 530d", "25 500 лв."),
            ("C2", "Audi A4", "9 900 EUR"),
        ]);
        let fetcher = Arc::new(MockFetcher::new(vec![html]));
        let cmd = SearchCommand::new(make_test_config());

        let output = cmd
            .execute_with_client(fetcher.clone(), SearchRequest::default(), |_| {}, never())
            .await
            .unwrap();

        assert!(output.contains("Found 2 car(s)"));
        assert!(output.contains("C1"));
        assert!(output.contains("25,500 BGN"));
        assert!(output.contains("9,900 EUR"));
        // Page 2 was empty, so the search stopped there
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_search_command_acknowledges_first() {
        let fetcher = Arc::new(MockFetcher::new(vec![]));
        let cmd = SearchCommand::new(make_test_config());
        let acked = Mutex::new(None);

        let request = SearchRequest::new(Some("bmw"), Some("5series"), Some(4));
        cmd.execute_with_client(
            fetcher,
            request,
            |text| *acked.lock().unwrap() = Some(text.to_string()),
            never(),
        )
        .await
        .unwrap();

        let acked = acked.into_inner().unwrap().unwrap();
        assert!(acked.contains("Brand: BMW"));
        assert!(acked.contains("Max pages: 4"));
    }

    #[tokio::test]
    async fn test_search_command_empty_results() {
        let fetcher = Arc::new(MockFetcher::new(vec!["<html></html>".to_string()]));
        let cmd = SearchCommand::new(make_test_config());

        let output = cmd
            .execute_with_client(fetcher, SearchRequest::default(), |_| {}, never())
            .await
            .unwrap();

        assert!(output.contains("No cars found"));
    }

    #[tokio::test]
    async fn test_search_command_max_results() {
        let html = make_search_html(&[
            ("C1", "One", "1 000 лв."),
            ("C2", "Two", "2 000 лв."),
            ("C3", "Three", "3 000 лв."),
            ("C4", "Four", "4 000 лв."),
        ]);
        let fetcher = Arc::new(MockFetcher::new(vec![html]));
        let cmd = SearchCommand::new(make_test_config());

        let output = cmd
            .execute_with_client(fetcher, SearchRequest::default(), |_| {}, never())
            .await
            .unwrap();

        assert!(output.contains("Found 4 car(s) (showing first 3)"));
        assert!(output.contains("C3"));
        assert!(!output.contains("C4"));
    }

    #[tokio::test]
    async fn test_search_command_json_format() {
        let html = make_search_html(&[("C1", "BMW 530d", "25 500 лв.")]);
        let fetcher = Arc::new(MockFetcher::new(vec![html]));
        let mut config = make_test_config();
        config.format = OutputFormat::Json;
        let cmd = SearchCommand::new(config);

        let output = cmd
            .execute_with_client(fetcher, SearchRequest::default(), |_| {}, never())
            .await
            .unwrap();

        assert!(output.starts_with('{'));
        assert!(output.contains("\"listings\""));
        assert!(output.contains("C1"));
    }

    #[tokio::test]
    async fn test_search_command_shutdown_cancels() {
        let html = make_search_html(&[("C1", "BMW 530d", "25 500 лв.")]);
        let mut fetcher = MockFetcher::new(vec![html.clone(), html.clone(), html]);
        fetcher.page_delay = Duration::from_millis(200);
        let fetcher = Arc::new(fetcher);
        let cmd = SearchCommand::new(make_test_config());

        let request = SearchRequest::new(None, None, Some(10));
        let shutdown = tokio::time::sleep(Duration::from_millis(300));
        let output = cmd.execute_with_client(fetcher.clone(), request, |_| {}, shutdown).await.unwrap();

        assert!(output.contains("(cancelled)"));
        assert!(fetcher.call_count() < 10);
    }
}
