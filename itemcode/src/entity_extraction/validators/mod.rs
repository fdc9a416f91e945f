//! Entity validators for the extraction pipelines.

pub mod confidence;
pub mod product_code;

pub use confidence::ConfidenceValidator;
pub use product_code::ProductCodeValidator;
