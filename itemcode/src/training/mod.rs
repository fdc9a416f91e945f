//! Brand model training.
//!
//! A code list is turned into labeled sentences by substituting every code
//! into product title templates. The tagger is then fitted over several
//! shuffled epochs with compounding mini-batch sizes, and the model and code
//! list are written to the brand's directory.

mod batching;
mod synthesis;
mod templates;
mod trainer;

pub use batching::{Compounding, compounding, minibatches};
pub use synthesis::{
    clean_code_list, code_occurrences, create_negative_examples, create_training_data,
    negative_count,
};
pub use templates::{PLACEHOLDER, TEMPLATES, render, render_without_code};
pub use trainer::{BrandTrainer, EpochReport, TrainingMode, TrainingReport};
