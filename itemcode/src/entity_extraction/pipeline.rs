//! Generic entity extraction pipeline architecture.
//!
//! A pipeline runs one raw extractor, keeps the entities every validator
//! accepts and then hands them through the post-processors in order.

use super::ExtractedEntity;
use crate::{ItemcodeError, Result};
use std::collections::HashMap;

/// Raw entity extracted before validation and post-processing
#[derive(Debug, Clone)]
pub struct RawEntity {
    /// The text content of the entity
    pub text: String,
    /// Entity label
    pub label: String,
    /// Starting byte position in the original text
    pub start_pos: usize,
    /// Ending byte position in the original text
    pub end_pos: usize,
    /// Raw confidence score from the extractor (0.0 to 1.0)
    pub confidence: f32,
    /// Additional metadata from the extractor
    pub metadata: HashMap<String, String>,
}

impl RawEntity {
    /// Create a new raw entity
    pub fn new(
        text: String,
        label: String,
        start_pos: usize,
        end_pos: usize,
        confidence: f32,
    ) -> Self {
        Self {
            text,
            label,
            start_pos,
            end_pos,
            confidence,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the raw entity
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Context provided to validators for making validation decisions
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    /// The original text being processed
    pub original_text: &'a str,
}

impl<'a> ValidationContext<'a> {
    /// Create a new validation context
    pub fn new(original_text: &'a str) -> Self {
        Self { original_text }
    }
}

/// Raw entity extraction from text
pub trait RawEntityExtractor: Send + Sync + std::fmt::Debug {
    /// Extract raw entities from text without validation
    fn extract_raw(&self, text: &str) -> Result<Vec<RawEntity>>;

    /// Get the name of this extractor
    fn name(&self) -> &str;
}

/// Validation of extracted entities
pub trait EntityValidator: Send + Sync + std::fmt::Debug {
    /// Validate a raw entity given the context
    fn validate(&self, entity: &RawEntity, context: &ValidationContext) -> bool;

    /// Get the name of this validator
    fn name(&self) -> &str;
}

/// Post-processing of validated entities
pub trait EntityPostProcessor: Send + Sync + std::fmt::Debug {
    /// Process a list of validated entities
    fn process(&self, entities: Vec<RawEntity>) -> Vec<RawEntity>;

    /// Get the name of this post-processor
    fn name(&self) -> &str;
}

/// Composable entity extraction pipeline
pub struct EntityExtractionPipeline {
    extractor: Box<dyn RawEntityExtractor>,
    validators: Vec<Box<dyn EntityValidator>>,
    post_processors: Vec<Box<dyn EntityPostProcessor>>,
    extractor_name: String,
}

impl std::fmt::Debug for EntityExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityExtractionPipeline")
            .field("extractor", &self.extractor_name)
            .field("validators", &self.validators.len())
            .field("post_processors", &self.post_processors.len())
            .finish()
    }
}

impl EntityExtractionPipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Extract entities using the complete pipeline
    pub fn extract(&self, text: &str) -> Result<Vec<ExtractedEntity>> {
        let raw_entities = self.extractor.extract_raw(text)?;

        if raw_entities.is_empty() {
            return Ok(Vec::new());
        }

        let context = ValidationContext::new(text);
        let validated_entities: Vec<RawEntity> = raw_entities
            .into_iter()
            .filter(|entity| {
                self.validators
                    .iter()
                    .all(|validator| validator.validate(entity, &context))
            })
            .collect();

        let processed_entities = self
            .post_processors
            .iter()
            .fold(validated_entities, |entities, processor| {
                processor.process(entities)
            });

        let final_entities = processed_entities
            .into_iter()
            .map(|raw_entity| ExtractedEntity {
                text: raw_entity.text,
                label: raw_entity.label,
                start_pos: raw_entity.start_pos,
                end_pos: raw_entity.end_pos,
                confidence: raw_entity.confidence,
                extractor_source: self.extractor_name.clone(),
                metadata: raw_entity.metadata,
            })
            .collect();

        Ok(final_entities)
    }
}

/// Builder for creating entity extraction pipelines
pub struct PipelineBuilder {
    extractor: Option<Box<dyn RawEntityExtractor>>,
    validators: Vec<Box<dyn EntityValidator>>,
    post_processors: Vec<Box<dyn EntityPostProcessor>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            extractor: None,
            validators: Vec::new(),
            post_processors: Vec::new(),
        }
    }

    /// Set the entity extractor
    pub fn extractor(mut self, extractor: Box<dyn RawEntityExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Add a validator to the pipeline
    pub fn validator(mut self, validator: Box<dyn EntityValidator>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Add a post-processor to the pipeline
    pub fn post_processor(mut self, post_processor: Box<dyn EntityPostProcessor>) -> Self {
        self.post_processors.push(post_processor);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<EntityExtractionPipeline> {
        let extractor = self
            .extractor
            .ok_or_else(|| ItemcodeError::Other("Pipeline requires an extractor".to_string()))?;

        let extractor_name = extractor.name().to_string();

        Ok(EntityExtractionPipeline {
            extractor,
            validators: self.validators,
            post_processors: self.post_processors,
            extractor_name,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
