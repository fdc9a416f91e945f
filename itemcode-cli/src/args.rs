//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command category.

use clap::Args;
use std::path::PathBuf;

// Training arguments
#[derive(Args)]
pub struct TrainArgs {
    /// Brand to train
    pub brand: String,

    /// Spreadsheet (.xlsx, .xls, .ods or .csv) whose code column lists the known codes
    #[arg(long, short, conflicts_with = "codes")]
    pub file: Option<PathBuf>,

    /// Known product code (repeatable)
    #[arg(long = "code", short = 'c', required_unless_present = "file")]
    pub codes: Vec<String>,

    /// Training mode (fresh, incremental)
    #[arg(long, short, default_value = "fresh")]
    pub mode: String,

    /// Override the number of training epochs
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Seed for reproducible training
    #[arg(long)]
    pub seed: Option<u64>,

    /// Column holding the codes in the spreadsheet
    #[arg(long)]
    pub code_column: Option<String>,
}

// Extraction arguments
#[derive(Args)]
pub struct ExtractArgs {
    /// Brand whose model is used
    pub brand: String,

    /// Spreadsheet with a title column
    pub input: PathBuf,

    /// Where to write the result (defaults to <input>_抽出結果)
    #[arg(long = "output-file", short = 'f')]
    pub output_file: Option<PathBuf>,

    /// Similarity threshold between 0.0 and 1.0
    #[arg(long, short)]
    pub threshold: Option<f32>,

    /// Column holding the product titles
    #[arg(long)]
    pub title_column: Option<String>,

    /// Column receiving the extracted codes
    #[arg(long)]
    pub output_column: Option<String>,
}

#[derive(Args)]
pub struct ExtractTextArgs {
    /// Brand whose model is used
    pub brand: String,

    /// Product titles to scan
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Similarity threshold between 0.0 and 1.0
    #[arg(long, short)]
    pub threshold: Option<f32>,

    /// Show which path found each code and its similarity score
    #[arg(long, short)]
    pub detailed: bool,
}

// Brand arguments
#[derive(Args)]
pub struct BrandArgs {
    /// Brand name
    pub brand: String,
}

#[derive(Args)]
pub struct DeleteBrandArgs {
    /// Brand name
    pub brand: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}

// Fetch arguments
#[derive(Args)]
pub struct FetchArgs {
    /// Spreadsheet with a URL column
    pub input: PathBuf,

    /// Where to write the result (defaults to <input>_抽出結果)
    #[arg(long = "output-file", short = 'f')]
    pub output_file: Option<PathBuf>,

    /// Column holding the page URLs
    #[arg(long)]
    pub url_column: Option<String>,

    /// CSS selector of the element carrying the item number
    #[arg(long)]
    pub selector: Option<String>,

    /// Attempts per URL
    #[arg(long)]
    pub max_attempts: Option<usize>,
}

// Completions arguments
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
