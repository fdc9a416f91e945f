//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration values.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &ItemcodeConfig) -> Result<(), ConfigError> {
    validate_storage_config(&config.storage)?;
    validate_training_config(&config.training)?;
    validate_extraction_config(&config.extraction)?;
    validate_spreadsheet_config(&config.spreadsheet)?;
    validate_fetch_config(&config.fetch)?;

    Ok(())
}

/// Validate a similarity threshold given on its own, e.g. from a command line flag.
pub fn validate_threshold(threshold: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::ValidationError(format!(
            "Similarity threshold must be between 0.0 and 1.0, got {}",
            threshold
        )));
    }
    Ok(())
}

fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.models_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Models directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_training_config(config: &TrainingConfig) -> Result<(), ConfigError> {
    if config.label.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Training label cannot be empty".to_string(),
        ));
    }
    if config.variants_per_code == 0 {
        return Err(ConfigError::ValidationError(
            "variants_per_code must be greater than 0".to_string(),
        ));
    }
    if !config.negative_ratio.is_finite() || config.negative_ratio < 0.0 {
        return Err(ConfigError::ValidationError(
            "negative_ratio must be a non-negative number".to_string(),
        ));
    }
    if config.epochs == 0 {
        return Err(ConfigError::ValidationError(
            "epochs must be greater than 0".to_string(),
        ));
    }
    if config.batch_start < 1.0 || config.batch_stop < 1.0 {
        return Err(ConfigError::ValidationError(
            "Batch sizes must be at least 1".to_string(),
        ));
    }
    if config.batch_start > config.batch_stop {
        return Err(ConfigError::ValidationError(format!(
            "batch_start ({}) cannot exceed batch_stop ({})",
            config.batch_start, config.batch_stop
        )));
    }
    if config.batch_compound < 1.0 {
        return Err(ConfigError::ValidationError(
            "batch_compound must be at least 1.0".to_string(),
        ));
    }
    Ok(())
}

fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    validate_threshold(config.similarity_threshold)
}

fn validate_spreadsheet_config(config: &SpreadsheetConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("code_column", &config.code_column),
        ("title_column", &config.title_column),
        ("output_column", &config.output_column),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "Spreadsheet {} cannot be empty",
                name
            )));
        }
    }
    Ok(())
}

fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.url_column.trim().is_empty() || config.output_column.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Fetch URL and output columns cannot be empty".to_string(),
        ));
    }
    if config.selector.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Fetch selector cannot be empty".to_string(),
        ));
    }
    if config.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "max_attempts must be greater than 0".to_string(),
        ));
    }
    if config.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "timeout_secs must be greater than 0".to_string(),
        ));
    }
    for (name, value) in [
        ("retry_wait_secs", config.retry_wait_secs),
        ("retry_jitter_secs", config.retry_jitter_secs),
        ("row_pause_secs", config.row_pause_secs),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{} must be a non-negative number",
                name
            )));
        }
    }
    Ok(())
}
