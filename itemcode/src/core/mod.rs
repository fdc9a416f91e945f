//! Core brand training and extraction functionality

pub mod manager;

pub use manager::{ExtractionSummary, ItemCodeManager, SheetFetchSummary};
