//! Error types for tagger model operations

use std::fmt;
use thiserror::Error;

/// Error type for tagger model operations
#[derive(Debug, Error)]
pub enum ModelError {
    /// Error during model loading
    #[error("Failed to load model: {0}")]
    ModelLoading(String),

    /// Error during model saving
    #[error("Failed to save model: {0}")]
    ModelSaving(String),

    /// Model written by an incompatible version
    #[error("Unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// Error during training
    #[error("Training error: {0}")]
    Training(String),

    /// IO error during model operations
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

impl ModelError {
    /// Create a new model loading error
    pub fn model_loading(msg: impl fmt::Display) -> Self {
        Self::ModelLoading(msg.to_string())
    }

    /// Create a new model saving error
    pub fn model_saving(msg: impl fmt::Display) -> Self {
        Self::ModelSaving(msg.to_string())
    }

    /// Create a new training error
    pub fn training(msg: impl fmt::Display) -> Self {
        Self::Training(msg.to_string())
    }
}

/// Result type for tagger model operations
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let error = ModelError::ModelLoading("truncated file".to_string());
        assert_eq!(error.to_string(), "Failed to load model: truncated file");

        let error = ModelError::UnsupportedVersion {
            found: 9,
            expected: 1,
        };
        assert_eq!(
            error.to_string(),
            "Unsupported model format version 9 (expected 1)"
        );
    }

    #[test]
    fn test_error_factory_methods() {
        assert!(matches!(
            ModelError::model_loading("x"),
            ModelError::ModelLoading(_)
        ));
        assert!(matches!(
            ModelError::model_saving("x"),
            ModelError::ModelSaving(_)
        ));
        assert!(matches!(ModelError::training("x"), ModelError::Training(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let model_error = ModelError::from(io_error);
        assert!(matches!(model_error, ModelError::IO(_)));
    }
}
