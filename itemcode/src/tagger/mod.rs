//! Sequence tagger that finds product code spans in titles.
//!
//! Titles are split into script-aware tokens, each token is described by a
//! handful of string features, and an averaged perceptron assigns BIO tags
//! greedily from left to right. Models serialize to a single JSON file.

mod error;
mod features;
mod learner;
mod model;
mod perceptron;
mod tokenizer;
mod types;

pub use error::{ModelError, Result};
pub use features::{token_features, word_shape};
pub use learner::{TaggerTrainer, gold_tags};
pub use model::{MODEL_FORMAT_VERSION, ModelMetadata, TaggerModel, decode_spans};
pub use perceptron::{AveragedPerceptron, TagWeights};
pub use tokenizer::{Token, tokenize};
pub use types::{BioTag, EntityAnnotation, EntitySpan, TrainingExample};
