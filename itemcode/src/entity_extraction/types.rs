//! Entity and result types for code extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Metadata key holding the known code a lexical match was closest to.
pub const MATCHED_CODE_KEY: &str = "matched_code";

/// An entity produced by an extraction pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedEntity {
    /// The text content of the entity
    pub text: String,
    /// Entity label
    pub label: String,
    /// Starting byte position in the original text
    pub start_pos: usize,
    /// Ending byte position in the original text
    pub end_pos: usize,
    /// Confidence score (0.0 to 1.0)
    pub confidence: f32,
    /// Extractor that produced this entity (e.g. "tagger", "lexical")
    pub extractor_source: String,
    /// Additional metadata about the entity
    pub metadata: HashMap<String, String>,
}

impl ExtractedEntity {
    /// Create a new extracted entity.
    pub fn new(
        text: String,
        label: String,
        start_pos: usize,
        end_pos: usize,
        confidence: f32,
        extractor_source: String,
    ) -> Self {
        Self {
            text,
            label,
            start_pos,
            end_pos,
            confidence,
            extractor_source,
            metadata: HashMap::new(),
        }
    }

    /// Add metadata to the entity.
    pub fn with_metadata(mut self, key: String, value: String) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

/// Extraction path that produced a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Span found by the brand's tagger
    Ner,
    /// Token similar enough to a known code
    Similarity,
}

impl MatchSource {
    /// Short name used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchSource::Ner => "ner",
            MatchSource::Similarity => "similarity",
        }
    }
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A code in the reconciled result, with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedCode {
    /// Code text as it appears in the title
    pub text: String,
    /// Paths that produced the code, in [`MatchSource`] order
    pub sources: Vec<MatchSource>,
    /// Best similarity to a known code, when the lexical path matched
    pub score: Option<f32>,
    /// Known code achieving `score`
    pub matched_code: Option<String>,
}

impl ExtractedCode {
    /// A code with no sources yet.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            sources: Vec::new(),
            score: None,
            matched_code: None,
        }
    }
}
