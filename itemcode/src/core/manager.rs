//! ItemCode manager
//!
//! This module provides the primary interface of the library. It ties the
//! brand registry, the trainer, the code extractor and the spreadsheet and
//! fetch helpers together behind one configuration.

use crate::brands::{BrandInfo, BrandRegistry, BrandStore};
use crate::config::{ItemcodeConfig, validation};
use crate::entity_extraction::{CodeExtractor, ExtractedCode};
use crate::fetch::{FetchOutcome, FetchSummary, HttpPageSource, ItemNumberFetcher};
use crate::spreadsheet::{self, Table};
use crate::training::{BrandTrainer, EpochReport, TrainingMode, TrainingReport, clean_code_list};
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Counts of a spreadsheet extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    /// Brand whose model was used
    pub brand: String,
    /// Rows processed
    pub rows: usize,
    /// Rows with at least one code
    pub rows_with_codes: usize,
    /// Codes written over all rows
    pub total_codes: usize,
    /// Written spreadsheet, when the result was saved
    pub output_path: Option<PathBuf>,
}

/// Counts of a spreadsheet fetch run.
#[derive(Debug, Clone, Serialize)]
pub struct SheetFetchSummary {
    /// Row counts by outcome
    #[serde(flatten)]
    pub summary: FetchSummary,
    /// Written spreadsheet
    pub output_path: PathBuf,
}

/// The primary interface for training brands and extracting codes.
#[derive(Debug)]
pub struct ItemCodeManager {
    /// Brand directories and the cached brand list
    registry: BrandRegistry,

    /// Extraction with per-brand model cache
    extractor: CodeExtractor,

    /// Configuration for the manager
    config: ItemcodeConfig,
}

impl ItemCodeManager {
    /// Create a manager over the models directory of `config`
    pub fn new(config: ItemcodeConfig) -> Self {
        let store = BrandStore::new(&config.storage.models_dir);
        let registry = BrandRegistry::new(store.clone());
        let extractor = CodeExtractor::new(store, config.extraction.clone());

        Self {
            registry,
            extractor,
            config,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &ItemcodeConfig {
        &self.config
    }

    /// Brand registry
    pub fn registry(&self) -> &BrandRegistry {
        &self.registry
    }

    /// Code extractor
    pub fn extractor(&self) -> &CodeExtractor {
        &self.extractor
    }

    // Training

    /// Train `brand` on `codes`, reporting every finished epoch to `on_epoch`
    pub fn train_brand<F>(
        &self,
        brand: &str,
        codes: &[String],
        mode: TrainingMode,
        on_epoch: F,
    ) -> Result<TrainingReport>
    where
        F: FnMut(&EpochReport),
    {
        let trainer = BrandTrainer::new(self.registry.store(), &self.config.training);
        let result = trainer.train(brand, codes, mode, on_epoch);

        // a failed run may still have replaced files
        self.registry.invalidate();
        self.extractor.invalidate(Some(brand));
        result
    }

    /// Known codes from the code column of a spreadsheet
    pub fn load_codes_from_sheet(&self, path: impl AsRef<Path>) -> Result<Vec<String>> {
        let table = spreadsheet::read_table(path)?;
        let values = table.column_values(&self.config.spreadsheet.code_column)?;
        Ok(clean_code_list(values))
    }

    /// Train `brand` on the code column of a spreadsheet
    pub fn train_from_sheet<F>(
        &self,
        brand: &str,
        path: impl AsRef<Path>,
        mode: TrainingMode,
        on_epoch: F,
    ) -> Result<TrainingReport>
    where
        F: FnMut(&EpochReport),
    {
        let codes = self.load_codes_from_sheet(path)?;
        self.train_brand(brand, &codes, mode, on_epoch)
    }

    // Extraction

    /// Sorted, duplicate-free codes found in `text`
    pub fn extract(&self, brand: &str, text: &str) -> Result<Vec<String>> {
        self.extractor.extract(brand, text)
    }

    /// Codes found in `text` with an explicit similarity threshold
    pub fn extract_with_threshold(
        &self,
        brand: &str,
        text: &str,
        threshold: f32,
    ) -> Result<Vec<String>> {
        self.extractor.extract_with_threshold(brand, text, threshold)
    }

    /// Codes found in `text` with their sources and scores
    pub fn extract_detailed(
        &self,
        brand: &str,
        text: &str,
        threshold: Option<f32>,
    ) -> Result<Vec<ExtractedCode>> {
        let threshold = threshold.unwrap_or(self.config.extraction.similarity_threshold);
        self.extractor
            .extract_detailed_with_threshold(brand, text, threshold)
    }

    /// Append the extracted codes of every title to `table`
    ///
    /// Fails before touching the table when the title column is missing.
    /// `on_row` receives the index of each processed row and the row count.
    pub fn extract_table<F>(
        &self,
        brand: &str,
        table: &mut Table,
        threshold: Option<f32>,
        mut on_row: F,
    ) -> Result<ExtractionSummary>
    where
        F: FnMut(usize, usize),
    {
        let threshold = threshold.unwrap_or(self.config.extraction.similarity_threshold);
        validation::validate_threshold(threshold)?;
        let sheet = &self.config.spreadsheet;

        let titles: Vec<String> = table
            .column_values(&sheet.title_column)?
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut summary = ExtractionSummary {
            brand: brand.trim().to_string(),
            rows: titles.len(),
            rows_with_codes: 0,
            total_codes: 0,
            output_path: None,
        };

        let mut column = Vec::with_capacity(titles.len());
        for (index, title) in titles.iter().enumerate() {
            let codes = self
                .extractor
                .extract_with_threshold(brand, title, threshold)?;
            if !codes.is_empty() {
                summary.rows_with_codes += 1;
                summary.total_codes += codes.len();
            }
            column.push(codes.join(&sheet.separator));
            on_row(index, titles.len());
        }

        table.set_column(&sheet.output_column, column);
        tracing::info!(
            brand = %summary.brand,
            rows = summary.rows,
            rows_with_codes = summary.rows_with_codes,
            "Extracted codes from table"
        );
        Ok(summary)
    }

    /// Read a spreadsheet, extract codes for every title and save the result
    ///
    /// Without `output` the result is written next to the input using the
    /// configured suffix.
    pub fn extract_sheet<F>(
        &self,
        brand: &str,
        input: impl AsRef<Path>,
        output: Option<&Path>,
        threshold: Option<f32>,
        on_row: F,
    ) -> Result<ExtractionSummary>
    where
        F: FnMut(usize, usize),
    {
        let input = input.as_ref();
        let mut table = spreadsheet::read_table(input)?;
        let mut summary = self.extract_table(brand, &mut table, threshold, on_row)?;

        let output = self.output_path(input, output);
        spreadsheet::write_table(&table, &output)?;
        summary.output_path = Some(output);
        Ok(summary)
    }

    // Item numbers

    /// Fetch the item number of every URL in a spreadsheet and save the result
    pub async fn fetch_sheet<F>(
        &self,
        input: impl AsRef<Path>,
        output: Option<&Path>,
        on_row: F,
    ) -> Result<SheetFetchSummary>
    where
        F: FnMut(usize, &FetchOutcome),
    {
        let input = input.as_ref();
        let mut table = spreadsheet::read_table(input)?;

        let source = HttpPageSource::new(&self.config.fetch)?;
        let fetcher = ItemNumberFetcher::new(source, self.config.fetch.clone())?;
        let summary = fetcher.fill_table(&mut table, on_row).await?;

        let output = self.output_path(input, output);
        spreadsheet::write_table(&table, &output)?;
        Ok(SheetFetchSummary {
            summary,
            output_path: output,
        })
    }

    // Brand management

    /// Sorted names of trained brands
    pub fn brands(&self) -> Result<Vec<String>> {
        self.registry.list()
    }

    /// Details of a trained brand
    pub fn brand_info(&self, brand: &str) -> Result<BrandInfo> {
        self.registry.info(brand)
    }

    /// Delete a brand. Returns `false` when it did not exist.
    pub fn delete_brand(&self, brand: &str) -> Result<bool> {
        let deleted = self.registry.delete(brand)?;
        self.extractor.invalidate(Some(brand));
        Ok(deleted)
    }

    fn output_path(&self, input: &Path, output: Option<&Path>) -> PathBuf {
        output.map(Path::to_path_buf).unwrap_or_else(|| {
            spreadsheet::default_output_path(input, &self.config.spreadsheet.output_suffix)
        })
    }
}
