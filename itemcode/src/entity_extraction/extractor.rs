//! Per-brand code extraction and reconciliation of both extraction paths.

use super::pipeline::EntityExtractionPipeline;
use super::{
    ConfidenceValidator, EntityDeduplicator, ExtractedCode, ExtractedEntity, LexicalMatcher,
    MATCHED_CODE_KEY, MatchSource, ProductCodeValidator, TaggerExtractor,
};
use crate::Result;
use crate::brands::BrandStore;
use crate::config::{ExtractionConfig, validation};
use crate::tagger::TaggerModel;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

/// A brand's model and code list, loaded once.
#[derive(Debug)]
struct LoadedBrand {
    model: Arc<TaggerModel>,
    codes: Arc<Vec<String>>,
}

/// Extracts product codes for any trained brand.
///
/// Models and code lists are loaded on first use and kept until
/// [`CodeExtractor::invalidate`] is called for the brand.
#[derive(Debug)]
pub struct CodeExtractor {
    store: BrandStore,
    config: ExtractionConfig,
    cache: Mutex<HashMap<String, Arc<LoadedBrand>>>,
}

impl CodeExtractor {
    /// Create an extractor reading models from `store`.
    pub fn new(store: BrandStore, config: ExtractionConfig) -> Self {
        Self {
            store,
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Extraction settings in use.
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Sorted, duplicate-free codes found in `text` at the configured threshold.
    pub fn extract(&self, brand: &str, text: &str) -> Result<Vec<String>> {
        self.extract_with_threshold(brand, text, self.config.similarity_threshold)
    }

    /// Like [`CodeExtractor::extract`] with an explicit similarity threshold.
    pub fn extract_with_threshold(
        &self,
        brand: &str,
        text: &str,
        threshold: f32,
    ) -> Result<Vec<String>> {
        Ok(self
            .extract_detailed_with_threshold(brand, text, threshold)?
            .into_iter()
            .map(|code| code.text)
            .collect())
    }

    /// Codes found in `text` together with the path(s) that found them.
    pub fn extract_detailed(&self, brand: &str, text: &str) -> Result<Vec<ExtractedCode>> {
        self.extract_detailed_with_threshold(brand, text, self.config.similarity_threshold)
    }

    /// Like [`CodeExtractor::extract_detailed`] with an explicit similarity threshold.
    ///
    /// A brand without a trained model yields an empty result.
    pub fn extract_detailed_with_threshold(
        &self,
        brand: &str,
        text: &str,
        threshold: f32,
    ) -> Result<Vec<ExtractedCode>> {
        validation::validate_threshold(threshold)?;

        let Some(loaded) = self.load(brand)? else {
            tracing::warn!(brand, "No trained model for brand, nothing extracted");
            return Ok(Vec::new());
        };

        let ner = self.ner_pipeline(&loaded)?.extract(text)?;
        let lexical = self.lexical_pipeline(&loaded, threshold)?.extract(text)?;
        let codes = reconcile(&ner, &lexical);

        tracing::debug!(
            brand,
            ner = ner.len(),
            lexical = lexical.len(),
            codes = codes.len(),
            "Extracted codes"
        );
        Ok(codes)
    }

    /// Drop the cached model of `brand`, or of every brand when `None`.
    pub fn invalidate(&self, brand: Option<&str>) {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        match brand {
            Some(brand) => {
                cache.remove(brand.trim());
            }
            None => cache.clear(),
        }
    }

    fn load(&self, brand: &str) -> Result<Option<Arc<LoadedBrand>>> {
        let brand = BrandStore::validate_brand_name(brand)?;
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(loaded) = cache.get(brand) {
            return Ok(Some(Arc::clone(loaded)));
        }

        let Some(model) = self.store.load_model(brand)? else {
            return Ok(None);
        };
        let codes = self.store.load_codes(brand)?;
        tracing::debug!(
            brand,
            codes = codes.len(),
            features = model.weights.len(),
            "Loaded brand model"
        );

        let loaded = Arc::new(LoadedBrand {
            model: Arc::new(model),
            codes: Arc::new(codes),
        });
        cache.insert(brand.to_string(), Arc::clone(&loaded));
        Ok(Some(loaded))
    }

    fn ner_pipeline(&self, loaded: &LoadedBrand) -> Result<EntityExtractionPipeline> {
        EntityExtractionPipeline::builder()
            .extractor(Box::new(TaggerExtractor::new(Arc::clone(&loaded.model))))
            .validator(Box::new(ProductCodeValidator::new(loaded.model.label())))
            .post_processor(Box::new(EntityDeduplicator::new()))
            .build()
    }

    fn lexical_pipeline(
        &self,
        loaded: &LoadedBrand,
        threshold: f32,
    ) -> Result<EntityExtractionPipeline> {
        let label = loaded.model.label();
        EntityExtractionPipeline::builder()
            .extractor(Box::new(LexicalMatcher::new(
                Arc::clone(&loaded.codes),
                self.config.metric,
                label,
            )))
            .validator(Box::new(ProductCodeValidator::new(label)))
            .validator(Box::new(ConfidenceValidator::new(threshold)))
            .post_processor(Box::new(EntityDeduplicator::new()))
            .build()
    }
}

/// Union of tagger and lexical entities, sorted by code text.
///
/// A code found by both paths is reported once with both sources. The score
/// and matched code come from the best lexical match of that text.
pub fn reconcile(ner: &[ExtractedEntity], lexical: &[ExtractedEntity]) -> Vec<ExtractedCode> {
    let mut codes: BTreeMap<String, ExtractedCode> = BTreeMap::new();

    let tagged = ner.iter().map(|e| (e, MatchSource::Ner));
    let matched = lexical.iter().map(|e| (e, MatchSource::Similarity));

    for (entity, source) in tagged.chain(matched) {
        let code = codes
            .entry(entity.text.clone())
            .or_insert_with(|| ExtractedCode::new(&entity.text));
        if !code.sources.contains(&source) {
            code.sources.push(source);
        }
        if source == MatchSource::Similarity && code.score.is_none_or(|s| entity.confidence > s) {
            code.score = Some(entity.confidence);
            code.matched_code = entity.metadata.get(MATCHED_CODE_KEY).cloned();
        }
    }

    codes.into_values().collect()
}
