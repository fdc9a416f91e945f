//! Mini-batch training of the tagger.

use super::features::token_features;
use super::model::{ModelMetadata, TaggerModel};
use super::perceptron::AveragedPerceptron;
use super::tokenizer::{Token, tokenize};
use super::types::{BioTag, EntityAnnotation, TrainingExample};
use chrono::Utc;

/// Gold BIO tags for `tokens` from the annotations carrying `label`.
///
/// Annotations whose boundaries fall inside a token cannot be expressed as
/// token tags and are skipped.
pub fn gold_tags(tokens: &[Token<'_>], entities: &[EntityAnnotation], label: &str) -> Vec<BioTag> {
    let mut tags = vec![BioTag::Outside; tokens.len()];

    for entity in entities.iter().filter(|e| e.label == label) {
        let aligned_start = tokens.iter().any(|t| t.start == entity.start);
        let aligned_end = tokens.iter().any(|t| t.end == entity.end);
        if !aligned_start || !aligned_end {
            tracing::trace!(
                start = entity.start,
                end = entity.end,
                "Skipping annotation not aligned to token boundaries"
            );
            continue;
        }

        let mut first = true;
        for (idx, token) in tokens.iter().enumerate() {
            if token.start >= entity.start && token.end <= entity.end {
                tags[idx] = if first { BioTag::Begin } else { BioTag::Inside };
                first = false;
            }
        }
    }

    tags
}

/// Accumulates perceptron updates over mini-batches.
#[derive(Debug)]
pub struct TaggerTrainer {
    perceptron: AveragedPerceptron,
    metadata: ModelMetadata,
    epochs: usize,
}

impl TaggerTrainer {
    /// Start a blank model for `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            perceptron: AveragedPerceptron::new(),
            metadata: ModelMetadata::new(label),
            epochs: 0,
        }
    }

    /// Continue training an existing model.
    pub fn resume(model: &TaggerModel) -> Self {
        Self {
            perceptron: AveragedPerceptron::from_weights(&model.weights),
            metadata: model.metadata.clone(),
            epochs: 0,
        }
    }

    /// Label being trained.
    pub fn label(&self) -> &str {
        &self.metadata.label
    }

    /// Run one pass over a mini-batch, updating after every mis-tagged token.
    /// Returns the number of mis-tagged tokens.
    pub fn train_batch(&mut self, batch: &[TrainingExample]) -> usize {
        let mut mistakes = 0;

        for example in batch {
            let tokens = tokenize(&example.text);
            let truth = gold_tags(&tokens, &example.entities, self.label());
            let mut prev = BioTag::Outside;

            for (i, gold) in truth.iter().enumerate() {
                let features = token_features(&tokens, i, prev);
                let guess = self.perceptron.predict(&features);
                if guess != *gold {
                    mistakes += 1;
                }
                self.perceptron.update(*gold, guess, &features);
                prev = guess;
            }
        }

        mistakes
    }

    /// Record that an epoch finished.
    pub fn end_epoch(&mut self) {
        self.epochs += 1;
    }

    /// Average the weights and produce the model.
    pub fn finish(self, examples_seen: usize) -> TaggerModel {
        let mut metadata = self.metadata;
        metadata.epochs_trained += self.epochs;
        metadata.examples_seen = examples_seen;
        metadata.training_runs += 1;
        metadata.updated_at = Utc::now();

        TaggerModel::new(metadata, self.perceptron.averaged_weights())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(text: &str, code: &str) -> TrainingExample {
        let start = text.find(code).unwrap();
        TrainingExample {
            text: text.to_string(),
            entities: vec![EntityAnnotation {
                start,
                end: start + code.len(),
                label: "PRODUCT_CODE".to_string(),
            }],
        }
    }

    #[test]
    fn test_gold_tags_for_multi_token_code() {
        let ex = example("品番 DD1391-100 デニム", "DD1391-100");
        let tokens = tokenize(&ex.text);
        let tags = gold_tags(&tokens, &ex.entities, "PRODUCT_CODE");
        assert_eq!(
            tags,
            vec![
                BioTag::Outside,
                BioTag::Begin,
                BioTag::Inside,
                BioTag::Inside,
                BioTag::Outside
            ]
        );
    }

    #[test]
    fn test_gold_tags_skip_misaligned_and_foreign_labels() {
        let text = "XAB1234 shoes";
        let tokens = tokenize(text);
        let misaligned = vec![EntityAnnotation {
            start: 1,
            end: 7,
            label: "PRODUCT_CODE".to_string(),
        }];
        assert!(
            gold_tags(&tokens, &misaligned, "PRODUCT_CODE")
                .iter()
                .all(|t| *t == BioTag::Outside)
        );

        let foreign = vec![EntityAnnotation {
            start: 0,
            end: 7,
            label: "BRAND".to_string(),
        }];
        assert!(
            gold_tags(&tokens, &foreign, "PRODUCT_CODE")
                .iter()
                .all(|t| *t == BioTag::Outside)
        );
    }

    #[test]
    fn test_training_learns_codes() {
        let data = vec![
            example("NIKE AB1234 AIR FORCE 1", "AB1234"),
            example("型番 CD5678 スニーカー 靴 送料無料", "CD5678"),
            example("PUMA EF9012 プーマ スポーツシューズ", "EF9012"),
        ];

        let mut trainer = TaggerTrainer::new("PRODUCT_CODE");
        let first = trainer.train_batch(&data);
        trainer.end_epoch();
        for _ in 0..19 {
            trainer.train_batch(&data);
            trainer.end_epoch();
        }
        assert!(first > 0);

        let model = trainer.finish(data.len());
        assert_eq!(model.metadata.training_runs, 1);
        assert_eq!(model.metadata.epochs_trained, 20);
        let spans = model.predict("NIKE AB1234 AIR FORCE 1");
        assert!(spans.iter().any(|s| s.text == "AB1234"));
    }

    #[test]
    fn test_resume_keeps_history() {
        let data = vec![example("NIKE AB1234 AIR FORCE 1", "AB1234")];
        let mut trainer = TaggerTrainer::new("PRODUCT_CODE");
        trainer.train_batch(&data);
        trainer.end_epoch();
        let model = trainer.finish(1);

        let mut resumed = TaggerTrainer::resume(&model);
        resumed.train_batch(&data);
        resumed.end_epoch();
        let model = resumed.finish(1);
        assert_eq!(model.metadata.training_runs, 2);
        assert_eq!(model.metadata.epochs_trained, 2);
    }
}
