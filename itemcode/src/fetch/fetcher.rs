//! Retrying item-number lookup and table filling.

use super::PageSource;
use crate::config::FetchConfig;
use crate::spreadsheet::Table;
use crate::{ItemcodeError, Result};
use rand::Rng;
use scraper::{Html, Selector};
use serde::Serialize;
use std::time::Duration;

/// Result of looking up one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The page carried an item number
    Found { item_number: String, attempts: usize },
    /// The page loaded but has no matching element
    NotFound { attempts: usize },
    /// Every attempt failed
    Failed { attempts: usize, error: String },
}

impl FetchOutcome {
    /// Attempts made for this URL.
    pub fn attempts(&self) -> usize {
        match self {
            FetchOutcome::Found { attempts, .. }
            | FetchOutcome::NotFound { attempts }
            | FetchOutcome::Failed { attempts, .. } => *attempts,
        }
    }
}

/// Counts of a table run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchSummary {
    /// Rows in the table
    pub rows: usize,
    /// Rows with an item number
    pub found: usize,
    /// Rows whose page has no item number
    pub not_found: usize,
    /// Rows whose page could not be loaded
    pub failed: usize,
    /// Rows without a URL
    pub skipped: usize,
}

/// Text of the first element matching `selector`, trimmed. Empty text counts
/// as no match.
pub fn extract_item_number(html: &str, selector: &Selector) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Looks up item numbers through a [`PageSource`].
pub struct ItemNumberFetcher<S> {
    source: S,
    selector: Selector,
    config: FetchConfig,
}

impl<S> std::fmt::Debug for ItemNumberFetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemNumberFetcher")
            .field("selector", &self.config.selector)
            .field("max_attempts", &self.config.max_attempts)
            .finish()
    }
}

impl<S: PageSource> ItemNumberFetcher<S> {
    /// Create a fetcher. Fails when the configured selector does not parse.
    pub fn new(source: S, config: FetchConfig) -> Result<Self> {
        let selector = Selector::parse(&config.selector).map_err(|e| {
            ItemcodeError::Fetch(format!("Invalid selector '{}': {}", config.selector, e))
        })?;

        Ok(Self {
            source,
            selector,
            config,
        })
    }

    /// Look up the item number of one page, retrying transient failures.
    pub async fn fetch_item_number(&self, url: &str) -> FetchOutcome {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            match self.source.fetch(url).await {
                Ok(html) => {
                    return match extract_item_number(&html, &self.selector) {
                        Some(item_number) => FetchOutcome::Found {
                            item_number,
                            attempts,
                        },
                        None => {
                            tracing::debug!(url, "No item number element on page");
                            FetchOutcome::NotFound { attempts }
                        }
                    };
                }
                Err(e) => {
                    tracing::warn!(url, attempt = attempts, max_attempts, error = %e, "Fetch failed");
                    if attempts >= max_attempts {
                        return FetchOutcome::Failed {
                            attempts,
                            error: e.to_string(),
                        };
                    }
                    tokio::time::sleep(self.retry_delay()).await;
                }
            }
        }
    }

    /// Cell value written for an outcome.
    pub fn cell_value(&self, outcome: &FetchOutcome) -> String {
        match outcome {
            FetchOutcome::Found { item_number, .. } => item_number.clone(),
            _ => self.config.failure_marker.clone(),
        }
    }

    /// Fill the output column of `table` from its URL column.
    ///
    /// Rows without a URL are left blank. `on_row` is called with the row
    /// index and outcome of every looked-up row.
    pub async fn fill_table<F>(&self, table: &mut Table, mut on_row: F) -> Result<FetchSummary>
    where
        F: FnMut(usize, &FetchOutcome),
    {
        let urls: Vec<String> = table
            .column_values(&self.config.url_column)?
            .into_iter()
            .map(|url| url.trim().to_string())
            .collect();

        let mut summary = FetchSummary {
            rows: urls.len(),
            ..FetchSummary::default()
        };
        let mut values = Vec::with_capacity(urls.len());
        let mut fetched_any = false;

        for (index, url) in urls.iter().enumerate() {
            if url.is_empty() {
                summary.skipped += 1;
                values.push(String::new());
                continue;
            }

            if fetched_any {
                tokio::time::sleep(seconds(self.config.row_pause_secs)).await;
            }
            fetched_any = true;

            let outcome = self.fetch_item_number(url).await;
            match &outcome {
                FetchOutcome::Found { .. } => summary.found += 1,
                FetchOutcome::NotFound { .. } => summary.not_found += 1,
                FetchOutcome::Failed { .. } => summary.failed += 1,
            }
            values.push(self.cell_value(&outcome));
            on_row(index, &outcome);
        }

        table.set_column(&self.config.output_column, values);
        tracing::info!(
            rows = summary.rows,
            found = summary.found,
            not_found = summary.not_found,
            failed = summary.failed,
            "Fetched item numbers"
        );
        Ok(summary)
    }

    fn retry_delay(&self) -> Duration {
        let jitter = if self.config.retry_jitter_secs > 0.0 {
            rand::rng().random_range(0.0..=self.config.retry_jitter_secs)
        } else {
            0.0
        };
        seconds(self.config.retry_wait_secs + jitter)
    }
}

fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}
