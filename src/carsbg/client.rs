//! HTTP client for cars.bg requests using wreq for TLS fingerprint emulation.

use crate::carsbg::error::{FetchError, PageError, ParseError, SearchError};
use crate::carsbg::models::Listing;
use crate::carsbg::parser::parse_listings;
use crate::config::Config;
use async_trait::async_trait;
use std::borrow::Cow;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for fetching result pages - enables mocking for tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a page and returns its body as HTML text.
    async fn fetch(&self, url: &str) -> Result<String, PageError>;

    /// Returns the site root that search URLs are built against.
    fn base_url(&self) -> &str;
}

/// cars.bg HTTP client with browser impersonation.
pub struct CarsClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl CarsClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let timeout = config.timeout();
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .connect_timeout(timeout);

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|source| SearchError::Proxy { url: proxy_url.clone(), source })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(SearchError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Sends the GET request and reads the whole body.
    async fn get_body(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", "bg-BG,bg;q=0.9,en;q=0.8")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::Body)?;
        Ok(body.to_vec())
    }

    /// Adds a random delay between page requests.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl PageFetcher for CarsClient {
    async fn fetch(&self, url: &str) -> Result<String, PageError> {
        self.delay().await;

        debug!("GET {}", url);

        let body = tokio::time::timeout(self.timeout, self.get_body(url))
            .await
            .map_err(|_| {
                warn!("Request timed out after {:?}: {}", self.timeout, url);
                FetchError::Timeout(self.timeout)
            })??;

        decode_body(&body).map_err(PageError::from)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Decodes a page body as UTF-8 text, replacing invalid sequences.
///
/// A body with a NUL byte is binary, not a page, and is rejected.
fn decode_body(body: &[u8]) -> Result<String, ParseError> {
    if let Some(offset) = body.iter().position(|&b| b == 0) {
        return Err(ParseError { offset });
    }

    let html = String::from_utf8_lossy(body);
    if let Cow::Owned(_) = html {
        warn!("Response body is not valid UTF-8, invalid sequences replaced");
    }
    Ok(html.into_owned())
}

/// Fetches one page and extracts its listings.
///
/// The request is abandoned as soon as `cancel` fires.
pub async fn fetch_listings<F>(
    fetcher: &F,
    url: &str,
    cancel: &CancellationToken,
) -> Result<Vec<Listing>, PageError>
where
    F: PageFetcher + ?Sized,
{
    let html = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(FetchError::Cancelled.into()),
        result = fetcher.fetch(url) => result?,
    };

    Ok(parse_listings(&html))
}
