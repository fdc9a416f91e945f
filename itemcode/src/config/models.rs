//! Configuration model definitions.
//!
//! This module contains the configuration structures for all ItemCode components.

use crate::similarity::SimilarityMetric;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for ItemCode.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ItemcodeConfig {
    /// Where brand models live
    pub storage: StorageConfig,

    /// Training data synthesis and epoch loop
    pub training: TrainingConfig,

    /// Extraction and lexical matching
    pub extraction: ExtractionConfig,

    /// Spreadsheet column names and output naming
    pub spreadsheet: SpreadsheetConfig,

    /// Item-number fetcher
    pub fetch: FetchConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Configuration for brand model storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one sub-directory per brand
    pub models_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let models_dir = directories::ProjectDirs::from("org", "itemcode", "itemcode")
            .map(|dirs| dirs.data_dir().join("models"))
            .unwrap_or_else(|| PathBuf::from("./models"));

        Self { models_dir }
    }
}

/// Configuration for training brand models.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Entity label attached to product code spans
    pub label: String,

    /// Synthetic sentences generated per known code
    pub variants_per_code: usize,

    /// Code-free sentences added per synthesized code sentence
    pub negative_ratio: f64,

    /// Passes over the shuffled training data
    pub epochs: usize,

    /// First mini-batch size
    pub batch_start: f64,

    /// Largest mini-batch size
    pub batch_stop: f64,

    /// Growth factor applied to the batch size after every batch
    pub batch_compound: f64,

    /// Seed for template choice and shuffling; random when unset
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            label: "PRODUCT_CODE".to_string(),
            variants_per_code: 10,
            negative_ratio: 0.2,
            epochs: 5,
            batch_start: 4.0,
            batch_stop: 32.0,
            batch_compound: 1.5,
            seed: None,
        }
    }
}

/// Configuration for code extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum similarity (0.0 to 1.0) for a token to match a known code
    pub similarity_threshold: f32,

    /// Similarity function used by the lexical matcher
    pub metric: SimilarityMetric,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.2,
            metric: SimilarityMetric::Ratio,
        }
    }
}

/// Spreadsheet column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadsheetConfig {
    /// Column holding known codes in training spreadsheets
    pub code_column: String,

    /// Column holding product titles in extraction spreadsheets
    pub title_column: String,

    /// Column appended with the extracted codes
    pub output_column: String,

    /// Separator used to join several codes in one cell
    pub separator: String,

    /// Suffix added to the input file stem when no output path is given
    pub output_suffix: String,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            code_column: "品番".to_string(),
            title_column: "商品名".to_string(),
            output_column: "抽出品番".to_string(),
            separator: ", ".to_string(),
            output_suffix: "_抽出結果".to_string(),
        }
    }
}

/// Configuration for the item-number fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Column holding the page URLs
    pub url_column: String,

    /// Column receiving the item numbers
    pub output_column: String,

    /// CSS selector of the element carrying the item number
    pub selector: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts per URL before giving up
    pub max_attempts: usize,

    /// Fixed wait after a failed attempt, in seconds
    pub retry_wait_secs: f64,

    /// Upper bound of the random extra wait after a failed attempt, in seconds
    pub retry_jitter_secs: f64,

    /// Pause between rows, in seconds
    pub row_pause_secs: f64,

    /// Value written when no item number could be obtained
    pub failure_marker: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url_column: "URL".to_string(),
            output_column: "商品番号".to_string(),
            selector: "span.normal_reserve_item_number".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            timeout_secs: 15,
            max_attempts: 3,
            retry_wait_secs: 5.0,
            retry_jitter_secs: 3.0,
            row_pause_secs: 2.0,
            failure_marker: "取得できず".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
