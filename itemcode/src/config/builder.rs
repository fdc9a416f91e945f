//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use crate::similarity::SimilarityMetric;
use std::path::{Path, PathBuf};

/// Builder for creating ItemcodeConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: ItemcodeConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: ItemcodeConfig::default(),
        }
    }

    /// Start from an existing configuration, e.g. one produced by `ConfigLoader`.
    pub fn from_config(config: ItemcodeConfig) -> Self {
        Self { config }
    }

    /// Set the directory holding brand models.
    pub fn with_models_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.storage.models_dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the similarity threshold of the lexical matcher.
    pub fn with_similarity_threshold(mut self, threshold: f32) -> Self {
        self.config.extraction.similarity_threshold = threshold;
        self
    }

    /// Set the similarity metric of the lexical matcher.
    pub fn with_similarity_metric(mut self, metric: SimilarityMetric) -> Self {
        self.config.extraction.metric = metric;
        self
    }

    /// Set the number of training epochs.
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.config.training.epochs = epochs;
        self
    }

    /// Set the number of synthetic sentences per code.
    pub fn with_variants_per_code(mut self, variants: usize) -> Self {
        self.config.training.variants_per_code = variants;
        self
    }

    /// Make training reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.training.seed = Some(seed);
        self
    }

    /// Set the column holding known codes.
    pub fn with_code_column(mut self, column: impl Into<String>) -> Self {
        self.config.spreadsheet.code_column = column.into();
        self
    }

    /// Set the column holding product titles.
    pub fn with_title_column(mut self, column: impl Into<String>) -> Self {
        self.config.spreadsheet.title_column = column.into();
        self
    }

    /// Set the column receiving extracted codes.
    pub fn with_output_column(mut self, column: impl Into<String>) -> Self {
        self.config.spreadsheet.output_column = column.into();
        self
    }

    /// Replace the fetcher configuration.
    pub fn with_fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.config.fetch = fetch;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self.config.logging.stdout = false;
        self
    }

    /// Create a configuration for testing.
    ///
    /// Uses a local models directory, a fixed seed, and a fetcher that never sleeps.
    pub fn testing() -> Self {
        let mut builder = Self::new()
            .with_models_dir(PathBuf::from("./test_models"))
            .with_seed(7)
            .with_log_level(LogLevel::Debug);
        builder.config.fetch.retry_wait_secs = 0.0;
        builder.config.fetch.retry_jitter_secs = 0.0;
        builder.config.fetch.row_pause_secs = 0.0;
        builder
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<ItemcodeConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
