//! Epoch loop that fits and persists a brand model.

use super::batching::{compounding, minibatches};
use super::synthesis::{
    clean_code_list, create_negative_examples, create_training_data, negative_count,
};
use crate::brands::BrandStore;
use crate::config::TrainingConfig;
use crate::tagger::{TaggerModel, TaggerTrainer};
use crate::{ItemcodeError, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Whether training starts from scratch or continues the brand's model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingMode {
    /// Discard any existing model and code list
    #[default]
    Fresh,
    /// Continue from the existing model and extend its code list
    Incremental,
}

impl fmt::Display for TrainingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingMode::Fresh => write!(f, "fresh"),
            TrainingMode::Incremental => write!(f, "incremental"),
        }
    }
}

impl FromStr for TrainingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fresh" | "new" => Ok(TrainingMode::Fresh),
            "incremental" | "resume" => Ok(TrainingMode::Incremental),
            _ => Err(format!("Invalid training mode: {}", s)),
        }
    }
}

/// Progress of one finished epoch.
#[derive(Debug, Clone, Serialize)]
pub struct EpochReport {
    /// One-based epoch number
    pub epoch: usize,
    /// Total epochs of this run
    pub epochs: usize,
    /// Mis-tagged tokens during the epoch
    pub loss: usize,
    /// Examples processed per epoch
    pub examples: usize,
}

/// Outcome of a training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    /// Brand name
    pub brand: String,
    /// Requested mode
    pub mode: TrainingMode,
    /// Whether an existing model was continued
    pub resumed: bool,
    /// Codes trained on and persisted as the brand's code list
    pub trained_codes: usize,
    /// Synthesized examples, code-free sentences included
    pub examples: usize,
    /// Epochs run
    pub epochs: usize,
    /// Loss of every epoch, in order
    pub epoch_losses: Vec<usize>,
    /// Loss of the last epoch
    pub final_loss: usize,
    /// Model directory
    pub model_path: PathBuf,
}

/// Trains brand models into a [`BrandStore`].
#[derive(Debug)]
pub struct BrandTrainer<'a> {
    store: &'a BrandStore,
    config: &'a TrainingConfig,
}

impl<'a> BrandTrainer<'a> {
    /// Create a trainer writing into `store`.
    pub fn new(store: &'a BrandStore, config: &'a TrainingConfig) -> Self {
        Self { store, config }
    }

    /// Train `brand` on `codes` and persist the model and code list.
    ///
    /// `on_epoch` is called after every epoch.
    pub fn train<F>(
        &self,
        brand: &str,
        codes: &[String],
        mode: TrainingMode,
        mut on_epoch: F,
    ) -> Result<TrainingReport>
    where
        F: FnMut(&EpochReport),
    {
        let brand = BrandStore::validate_brand_name(brand)?;
        let codes = clean_code_list(codes);
        if codes.is_empty() {
            return Err(ItemcodeError::EmptyCodeList);
        }

        let existing = match mode {
            TrainingMode::Fresh => None,
            TrainingMode::Incremental => {
                let model = self.store.load_model(brand)?;
                if model.is_none() {
                    tracing::info!(brand, "No existing model, training a fresh one");
                }
                model
            }
        };
        let resumed = existing.is_some();

        let mut trainer = match &existing {
            Some(model) => self.resume_trainer(brand, model),
            None => TaggerTrainer::new(self.config.label.clone()),
        };

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut examples = create_training_data(
            &codes,
            self.config.variants_per_code,
            trainer.label(),
            &mut rng,
        );
        let negatives = negative_count(examples.len(), self.config.negative_ratio);
        examples.extend(create_negative_examples(negatives, &mut rng));

        tracing::info!(
            brand,
            mode = %mode,
            resumed,
            codes = codes.len(),
            examples = examples.len(),
            negatives,
            epochs = self.config.epochs,
            "Training brand model"
        );

        let mut epoch_losses = Vec::with_capacity(self.config.epochs);
        for epoch in 1..=self.config.epochs {
            examples.shuffle(&mut rng);
            let sizes = compounding(
                self.config.batch_start,
                self.config.batch_stop,
                self.config.batch_compound,
            );

            let mut loss = 0;
            for batch in minibatches(&examples, sizes) {
                loss += trainer.train_batch(batch);
            }
            trainer.end_epoch();
            epoch_losses.push(loss);

            tracing::debug!(brand, epoch, loss, "Finished epoch");
            on_epoch(&EpochReport {
                epoch,
                epochs: self.config.epochs,
                loss,
                examples: examples.len(),
            });
        }

        let model = trainer.finish(examples.len());
        let model_path = self.store.save_model(brand, &model)?;
        self.store.save_codes(brand, &codes)?;

        tracing::info!(
            brand,
            features = model.weights.len(),
            codes = codes.len(),
            path = %model_path.display(),
            "Saved brand model"
        );

        Ok(TrainingReport {
            brand: brand.to_string(),
            mode,
            resumed,
            trained_codes: codes.len(),
            examples: examples.len(),
            epochs: self.config.epochs,
            final_loss: epoch_losses.last().copied().unwrap_or(0),
            epoch_losses,
            model_path,
        })
    }

    fn resume_trainer(&self, brand: &str, model: &TaggerModel) -> TaggerTrainer {
        if model.label() != self.config.label {
            tracing::warn!(
                brand,
                model_label = model.label(),
                configured_label = %self.config.label,
                "Existing model uses a different label, keeping the model's label"
            );
        }
        TaggerTrainer::resume(model)
    }
}
