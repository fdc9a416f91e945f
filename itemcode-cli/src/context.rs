use crate::commands::Commands;
use itemcode::config::{ConfigBuilder, ConfigLoader};
use itemcode::prelude::*;
use std::path::Path;

pub struct ItemcodeCliContext {
    pub manager: ItemCodeManager,
}

impl ItemcodeCliContext {
    pub fn new(config: ItemcodeConfig) -> itemcode::Result<Self> {
        let manager = itemcode::init(config)?;
        Ok(Self { manager })
    }
}

/// Load the configuration from `config_file` (or the default files) and
/// `ITEMCODE_` environment variables, then apply `models_dir`.
pub fn load_config(
    config_file: Option<&Path>,
    models_dir: Option<&Path>,
) -> itemcode::Result<ItemcodeConfig> {
    let mut loader = ConfigLoader::new();
    match config_file {
        Some(path) => {
            loader.load_file(path)?;
        }
        None => {
            loader.load_default_files();
        }
    }
    let config = loader.load_env().extract()?;

    let mut builder = ConfigBuilder::from_config(config);
    if let Some(dir) = models_dir {
        builder = builder.with_models_dir(dir);
    }
    Ok(builder.build()?)
}

/// Apply the per-command flags that override configuration values.
pub fn apply_overrides(config: ItemcodeConfig, command: &Commands) -> itemcode::Result<ItemcodeConfig> {
    let mut fetch = config.fetch.clone();
    let mut builder = ConfigBuilder::from_config(config);

    match command {
        Commands::Train(args) => {
            if let Some(epochs) = args.epochs {
                builder = builder.with_epochs(epochs);
            }
            if let Some(seed) = args.seed {
                builder = builder.with_seed(seed);
            }
            if let Some(column) = &args.code_column {
                builder = builder.with_code_column(column);
            }
        }
        Commands::Extract(args) => {
            if let Some(column) = &args.title_column {
                builder = builder.with_title_column(column);
            }
            if let Some(column) = &args.output_column {
                builder = builder.with_output_column(column);
            }
        }
        Commands::Fetch(args) => {
            if let Some(column) = &args.url_column {
                fetch.url_column = column.clone();
            }
            if let Some(selector) = &args.selector {
                fetch.selector = selector.clone();
            }
            if let Some(attempts) = args.max_attempts {
                fetch.max_attempts = attempts;
            }
            builder = builder.with_fetch_config(fetch);
        }
        _ => {}
    }

    Ok(builder.build()?)
}
