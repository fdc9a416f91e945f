//! Item-number fetcher.
//!
//! For every URL in a table column the page is downloaded, the configured CSS
//! selector is applied and the text of the first match is written to an
//! output column. Transient failures are retried with a jittered wait;
//! anything that still yields no item number gets the failure marker.

mod fetcher;
mod source;

pub use fetcher::{FetchOutcome, FetchSummary, ItemNumberFetcher, extract_item_number};
pub use source::{HttpPageSource, PageSource};

#[cfg(test)]
pub use source::MockPageSource;

use thiserror::Error;

/// Error type for page retrieval
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent or the body not read
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },
}

/// Result type for page retrieval
pub type Result<T> = std::result::Result<T, FetchError>;
