//! Command enum definitions
//!
//! This module contains the top-level parser and all CLI command enums.

use crate::args::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "itemcode-cli")]
#[command(about = "Train per-brand product code extractors and run them over spreadsheets", long_about = None)]
#[command(version = itemcode::VERSION)]
pub struct Cli {
    /// Configuration file (.toml, .yaml or .json)
    #[arg(long = "config", global = true)]
    pub config_file: Option<PathBuf>,

    /// Directory holding the brand models
    #[arg(long, global = true)]
    pub models_dir: Option<PathBuf>,

    /// Output format (text, json) - use json for tool integration
    #[arg(long, short, default_value = "text", global = true)]
    pub output: String,

    /// Use machine-readable output (alias for --output json)
    #[arg(long, global = true)]
    pub machine: bool,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output format after applying `--machine` and `ITEMCODE_OUTPUT`
    pub fn output_format(&self) -> String {
        if self.machine {
            "json".to_string()
        } else if let Ok(env_output) = std::env::var("ITEMCODE_OUTPUT") {
            env_output
        } else {
            self.output.clone()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Train a brand model from a list of known product codes
    #[command(long_about = r#"
Train the product code model of a brand from its known codes.

Codes come either from the code column (default: 品番) of a spreadsheet or
from repeated --code flags. Every code is embedded in synthetic product
titles which the model is trained on.

Modes:
  fresh        Replace the brand's model and code list (default)
  incremental  Continue training the existing model on the new codes;
               the brand's code list becomes the new codes

Examples:
  itemcode-cli train nike --file nike_codes.xlsx
  itemcode-cli train nike --code AB1234 --code CD5678
  itemcode-cli train nike --file new_codes.csv --mode incremental
"#)]
    Train(TrainArgs),

    /// Extract product codes from the titles of a spreadsheet
    #[command(long_about = r#"
Run a brand's extractor over every title of a spreadsheet and write the
table back with an extra column (default: 抽出品番) holding the codes found,
joined with ", ".

Without --output-file the result is written next to the input as
<name>_抽出結果.xlsx (or .csv for CSV input).

Examples:
  itemcode-cli extract nike products.xlsx
  itemcode-cli extract nike products.csv --threshold 0.6 -f out.csv
"#)]
    Extract(ExtractArgs),

    /// Extract product codes from titles given on the command line
    #[command(
        alias = "text",
        long_about = r#"
Extract product codes from one or more titles given as arguments.

Examples:
  itemcode-cli extract-text nike "NIKE AB1234 AIR FORCE"
  itemcode-cli extract-text nike "NIKE AB1234" --detailed --output json
"#
    )]
    ExtractText(ExtractTextArgs),

    /// Brand model management commands
    #[command(subcommand)]
    Brands(BrandCommands),

    /// Fetch item numbers from the product pages listed in a spreadsheet
    #[command(long_about = r#"
Download every page listed in the URL column of a spreadsheet and write the
item number found by the CSS selector into an extra column (default: 商品番号).

Failed pages are retried with a randomized wait; rows that still fail get
取得できず.

Examples:
  itemcode-cli fetch urls.xlsx
  itemcode-cli fetch urls.csv --selector "span.item_number" -f numbers.csv
"#)]
    Fetch(FetchArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Subcommand)]
pub enum BrandCommands {
    /// List trained brands
    #[command(alias = "ls")]
    List,

    /// Show the details of a trained brand
    #[command(alias = "info")]
    Show(BrandArgs),

    /// Show the known codes of a brand
    Codes(BrandArgs),

    /// Delete a brand with its model and code list
    #[command(alias = "rm")]
    Delete(DeleteBrandArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
}
