//! Typed errors for page fetching and searching.
//!
//! Brand/model misses are not errors (they resolve to "no filter") and URL
//! building cannot fail, so neither has a variant here.

use std::time::Duration;
use thiserror::Error;

/// Transport-level failure for a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Request could not be built or sent
    #[error("failed to send request: {0}")]
    Request(#[source] wreq::Error),

    /// Request plus body read exceeded the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Server answered with a non-success status
    #[error("request failed with status: {0}")]
    Status(u16),

    /// Body could not be read to the end
    #[error("failed to read response body: {0}")]
    Body(#[source] wreq::Error),

    /// Cancellation token fired while the request was in flight
    #[error("request cancelled")]
    Cancelled,
}

/// The response body is binary data rather than HTML text.
#[derive(Debug, Error)]
#[error("response body is not HTML text (NUL byte at offset {offset})")]
pub struct ParseError {
    pub offset: usize,
}

/// Why a single page produced no result. Absorbed by the search loop.
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PageError {
    /// Returns true if the page failed because the search was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PageError::Fetch(FetchError::Cancelled))
    }
}

/// Conditions that stop a search before any page is attempted.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("page count must be between 1 and {max}, got {got}")]
    InvalidPageCount { got: u32, max: u32 },

    #[error("invalid proxy {url}: {source}")]
    Proxy {
        url: String,
        #[source]
        source: wreq::Error,
    },

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] wreq::Error),
}
