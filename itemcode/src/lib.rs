//! # ItemCode
//!
//! Per-brand product code extraction from free-text product titles.
//!
//! Each brand owns a small trained sequence tagger plus the list of product
//! codes it was trained on. Extraction runs the tagger over a title and
//! reconciles its spans with a lexical similarity scan against the brand's
//! known codes, returning a sorted, duplicate-free set of code strings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use itemcode::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ConfigBuilder::new().with_models_dir("./models").build()?;
//!     let manager = itemcode::init(config)?;
//!
//!     let codes = vec!["AB1234".to_string(), "CD5678".to_string()];
//!     manager.train_brand("nike", &codes, TrainingMode::Fresh, |epoch| {
//!         println!("epoch {} loss {}", epoch.epoch, epoch.loss);
//!     })?;
//!
//!     let found = manager.extract("nike", "NIKE AB1234 AIR FORCE")?;
//!     assert!(found.contains(&"AB1234".to_string()));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **training**: template-based synthesis of labeled sentences and the
//!   epoch loop that fits a brand model
//! - **tagger**: tokenizer, features and the averaged-perceptron BIO tagger
//! - **entity_extraction**: extraction pipeline, lexical matcher and the
//!   reconciliation of both paths
//! - **brands**: per-brand model directories and the cached brand registry
//! - **spreadsheet** / **fetch**: table I/O and the item-number fetcher

pub mod brands;
pub mod config;
pub mod core;
pub mod entity_extraction;
pub mod fetch;
pub mod logging;
pub mod similarity;
pub mod spreadsheet;
pub mod tagger;
pub mod training;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::init;

    pub use crate::config::{
        ConfigBuilder, ConfigLoader, ExtractionConfig, FetchConfig, ItemcodeConfig, LogFormat,
        LogLevel, SpreadsheetConfig, StorageConfig, TrainingConfig,
    };

    pub use crate::core::{ExtractionSummary, ItemCodeManager, SheetFetchSummary};

    pub use crate::brands::{BrandInfo, BrandRegistry, BrandStore};

    pub use crate::entity_extraction::{CodeExtractor, ExtractedCode, MatchSource};

    pub use crate::similarity::SimilarityMetric;

    pub use crate::spreadsheet::Table;

    pub use crate::training::{EpochReport, TrainingMode, TrainingReport};

    pub use crate::{ItemcodeError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for ItemCode operations
#[derive(Debug, thiserror::Error)]
pub enum ItemcodeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Error while training, loading or saving a tagger model
    #[error("Model error: {0}")]
    Model(String),

    /// Brand name that cannot be used as a directory name
    #[error(
        "Invalid brand name '{name}'. Brand names must be non-empty and must not contain path separators"
    )]
    InvalidBrandName { name: String },

    /// No trained model exists for the brand
    #[error("No trained model for brand '{brand}'. Train one first with: itemcode-cli train")]
    BrandNotFound { brand: String },

    /// Training was requested without any usable code
    #[error("The code list is empty. Provide at least one product code to train on")]
    EmptyCodeList,

    /// Spreadsheet could not be read or written
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// A required spreadsheet column is absent
    #[error("The spreadsheet has no '{column}' column")]
    MissingColumn { column: String },

    /// Spreadsheet path with an extension we cannot handle
    #[error("Unsupported spreadsheet format: {path}. Use .xlsx, .xlsm, .xls, .ods or .csv")]
    UnsupportedFormat { path: String },

    /// Item-number fetcher setup error
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for ItemcodeError {
    fn from(err: crate::config::ConfigError) -> Self {
        ItemcodeError::Configuration(err.to_string())
    }
}

impl From<crate::tagger::ModelError> for ItemcodeError {
    fn from(err: crate::tagger::ModelError) -> Self {
        ItemcodeError::Model(err.to_string())
    }
}

/// Result type for ItemCode operations
pub type Result<T> = std::result::Result<T, ItemcodeError>;

/// Initialize ItemCode with the provided configuration
///
/// Creates the models directory if needed and returns an [`core::ItemCodeManager`]
/// that trains, extracts and manages brand models. Logging is not initialized
/// here; call [`logging::init`] and keep the returned guard alive.
///
/// # Examples
///
/// ```rust,no_run
/// use itemcode::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = ConfigBuilder::new().with_models_dir("/tmp/models").build()?;
///     let manager = init(config)?;
///     println!("brands: {:?}", manager.brands()?);
///     Ok(())
/// }
/// ```
pub fn init(config: config::ItemcodeConfig) -> Result<core::ItemCodeManager> {
    std::fs::create_dir_all(&config.storage.models_dir).map_err(|e| {
        ItemcodeError::Configuration(format!(
            "Models directory not accessible: {}: {}",
            config.storage.models_dir.display(),
            e
        ))
    })?;

    tracing::debug!(
        models_dir = %config.storage.models_dir.display(),
        "Initializing ItemCode"
    );

    Ok(core::ItemCodeManager::new(config))
}

/// Initialize ItemCode with configuration loaded from the default files and
/// `ITEMCODE_` environment variables
pub fn init_with_defaults() -> Result<core::ItemCodeManager> {
    let config = config::ConfigLoader::new()
        .load_default_files()
        .load_env()
        .extract()?;
    init(config)
}
