//! Tags, spans and annotated examples shared by training and inference.

use serde::{Deserialize, Serialize};

/// BIO tag over a single entity label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BioTag {
    /// Outside any entity
    Outside,
    /// First token of an entity
    Begin,
    /// Continuation token of an entity
    Inside,
}

impl BioTag {
    /// All tags, in weight-vector order.
    pub const ALL: [BioTag; 3] = [BioTag::Outside, BioTag::Begin, BioTag::Inside];

    /// Position of this tag in a weight vector.
    pub fn index(self) -> usize {
        match self {
            BioTag::Outside => 0,
            BioTag::Begin => 1,
            BioTag::Inside => 2,
        }
    }

    /// Short form used in feature names.
    pub fn as_str(self) -> &'static str {
        match self {
            BioTag::Outside => "O",
            BioTag::Begin => "B",
            BioTag::Inside => "I",
        }
    }
}

/// A labeled span found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Span text, `&source[start..end]`
    pub text: String,
    /// Entity label
    pub label: String,
    /// Byte offset of the span start
    pub start: usize,
    /// Byte offset of the span end
    pub end: usize,
}

/// Gold annotation of one entity in a training sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    /// Byte offset of the span start
    pub start: usize,
    /// Byte offset of the span end
    pub end: usize,
    /// Entity label
    pub label: String,
}

/// A sentence with its gold entity spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Sentence text
    pub text: String,
    /// Annotated spans, non-overlapping
    pub entities: Vec<EntityAnnotation>,
}

impl TrainingExample {
    /// Text covered by each annotation.
    pub fn entity_texts(&self) -> impl Iterator<Item = &str> {
        self.entities
            .iter()
            .filter_map(|e| self.text.get(e.start..e.end))
    }
}
