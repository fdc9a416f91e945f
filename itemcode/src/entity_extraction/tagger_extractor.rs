//! Raw extractor backed by a brand's tagger model.

use super::pipeline::{RawEntity, RawEntityExtractor};
use crate::Result;
use crate::tagger::TaggerModel;
use std::sync::Arc;

/// Runs the tagger and reports every decoded span with confidence 1.0.
#[derive(Debug, Clone)]
pub struct TaggerExtractor {
    model: Arc<TaggerModel>,
}

impl TaggerExtractor {
    /// Create an extractor over a loaded model.
    pub fn new(model: Arc<TaggerModel>) -> Self {
        Self { model }
    }
}

impl RawEntityExtractor for TaggerExtractor {
    fn extract_raw(&self, text: &str) -> Result<Vec<RawEntity>> {
        let entities = self
            .model
            .predict(text)
            .into_iter()
            .map(|span| RawEntity::new(span.text, span.label, span.start, span.end, 1.0))
            .collect::<Vec<_>>();

        tracing::trace!(spans = entities.len(), "Tagger spans");
        Ok(entities)
    }

    fn name(&self) -> &str {
        "tagger"
    }
}
