//! Trained tagger model: inference and JSON persistence.

use super::error::{ModelError, Result};
use super::features::token_features;
use super::perceptron::{TagWeights, best_tag, score_with};
use super::tokenizer::{Token, tokenize};
use super::types::{BioTag, EntitySpan};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Model file format version written by this crate.
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Bookkeeping stored next to the weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// File format version
    pub format_version: u32,
    /// Entity label predicted by the model
    pub label: String,
    /// Epochs run over all training sessions
    pub epochs_trained: usize,
    /// Examples seen in the most recent training session
    pub examples_seen: usize,
    /// Training sessions, counting the initial one
    pub training_runs: u32,
    /// When the model was first trained
    pub created_at: DateTime<Utc>,
    /// When the model was last trained
    pub updated_at: DateTime<Utc>,
}

impl ModelMetadata {
    /// Metadata for a model that has not been trained yet.
    pub fn new(label: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            format_version: MODEL_FORMAT_VERSION,
            label: label.into(),
            epochs_trained: 0,
            examples_seen: 0,
            training_runs: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Averaged-perceptron BIO tagger for a single entity label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggerModel {
    /// Model bookkeeping
    pub metadata: ModelMetadata,
    /// Averaged weights per feature
    pub weights: HashMap<String, TagWeights>,
}

impl TaggerModel {
    /// Create a model from trained weights.
    pub fn new(metadata: ModelMetadata, weights: HashMap<String, TagWeights>) -> Self {
        Self { metadata, weights }
    }

    /// Entity label this model predicts.
    pub fn label(&self) -> &str {
        &self.metadata.label
    }

    /// Predict one tag per token, greedily from left to right.
    ///
    /// An `Inside` tag that does not follow an entity token is read as `Begin`.
    pub fn tag_tokens(&self, tokens: &[Token<'_>]) -> Vec<BioTag> {
        let mut tags = Vec::with_capacity(tokens.len());
        let mut prev = BioTag::Outside;

        for i in 0..tokens.len() {
            let features = token_features(tokens, i, prev);
            let scores = score_with(|name| self.weights.get(name), &features);
            let mut tag = best_tag(&scores);
            if tag == BioTag::Inside && prev == BioTag::Outside {
                tag = BioTag::Begin;
            }
            tags.push(tag);
            prev = tag;
        }

        tags
    }

    /// Find entity spans in `text`.
    pub fn predict(&self, text: &str) -> Vec<EntitySpan> {
        let tokens = tokenize(text);
        let tags = self.tag_tokens(&tokens);
        decode_spans(text, &tokens, &tags, self.label())
    }

    /// Write the model as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_vec(self).map_err(ModelError::model_saving)?;
        std::fs::write(path, json)?;
        tracing::debug!(
            path = %path.display(),
            features = self.weights.len(),
            "Saved tagger model"
        );
        Ok(())
    }

    /// Read a model written by [`TaggerModel::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let model: TaggerModel = serde_json::from_slice(&bytes)
            .map_err(|e| ModelError::model_loading(format!("{}: {}", path.display(), e)))?;

        if model.metadata.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: model.metadata.format_version,
                expected: MODEL_FORMAT_VERSION,
            });
        }

        Ok(model)
    }
}

/// Turn BIO tags back into spans over the source text.
pub fn decode_spans(
    text: &str,
    tokens: &[Token<'_>],
    tags: &[BioTag],
    label: &str,
) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, usize)> = None;

    let close = |open: &mut Option<(usize, usize)>, spans: &mut Vec<EntitySpan>| {
        if let Some((start, end)) = open.take() {
            spans.push(EntitySpan {
                text: text[start..end].to_string(),
                label: label.to_string(),
                start,
                end,
            });
        }
    };

    for (token, tag) in tokens.iter().zip(tags) {
        match tag {
            BioTag::Begin => {
                close(&mut open, &mut spans);
                open = Some((token.start, token.end));
            }
            BioTag::Inside => match open.as_mut() {
                Some((_, end)) => *end = token.end,
                None => open = Some((token.start, token.end)),
            },
            BioTag::Outside => close(&mut open, &mut spans),
        }
    }
    close(&mut open, &mut spans);

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_spans_joins_inside_tokens() {
        let text = "品番 DD1391-100 デニム";
        let tokens = tokenize(text);
        let tags = vec![
            BioTag::Outside,
            BioTag::Begin,
            BioTag::Inside,
            BioTag::Inside,
            BioTag::Outside,
        ];
        let spans = decode_spans(text, &tokens, &tags, "PRODUCT_CODE");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "DD1391-100");
        assert_eq!(&text[spans[0].start..spans[0].end], "DD1391-100");
    }

    #[test]
    fn test_decode_adjacent_begins() {
        let text = "AB1234 CD5678";
        let tokens = tokenize(text);
        let spans = decode_spans(text, &tokens, &[BioTag::Begin, BioTag::Begin], "X");
        let texts: Vec<_> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["AB1234", "CD5678"]);
    }

    #[test]
    fn test_save_load_keeps_predictions() {
        let mut weights = HashMap::new();
        weights.insert("w=ab1234".to_string(), [0.0, 3.0, 0.0]);
        let model = TaggerModel::new(ModelMetadata::new("PRODUCT_CODE"), weights);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        model.save(&path).unwrap();
        let loaded = TaggerModel::load(&path).unwrap();

        let spans = loaded.predict("NIKE AB1234 AIR");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "AB1234");
        assert_eq!(spans[0].label, "PRODUCT_CODE");
    }

    #[test]
    fn test_load_rejects_other_versions() {
        let mut metadata = ModelMetadata::new("PRODUCT_CODE");
        metadata.format_version = MODEL_FORMAT_VERSION + 1;
        let model = TaggerModel::new(metadata, HashMap::new());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        model.save(&path).unwrap();

        assert!(matches!(
            TaggerModel::load(&path),
            Err(ModelError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, b"not json").unwrap();
        assert!(matches!(
            TaggerModel::load(&path),
            Err(ModelError::ModelLoading(_))
        ));
    }
}
