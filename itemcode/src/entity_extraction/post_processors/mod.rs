//! Post-processors for the extraction pipelines.

pub mod deduplicator;

pub use deduplicator::EntityDeduplicator;
