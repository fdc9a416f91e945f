//! Product code extraction from free-text titles.
//!
//! Two extraction paths run over every title: the brand's tagger, and a
//! lexical matcher that compares alphanumeric tokens with the brand's known
//! codes. Each path is an [`EntityExtractionPipeline`] of a raw extractor,
//! validators and post-processors; [`CodeExtractor`] reconciles their output
//! into a sorted, duplicate-free set of codes.

mod types;
mod extractor;
mod lexical;
mod tagger_extractor;
// Generic pipeline architecture
pub mod pipeline;
pub mod validators;
pub mod post_processors;

pub use types::*;
pub use extractor::*;
pub use lexical::*;
pub use tagger_extractor::*;
pub use pipeline::*;
pub use validators::*;
pub use post_processors::*;

/// Shortest token considered a product code.
pub const MIN_CODE_LEN: usize = 4;
