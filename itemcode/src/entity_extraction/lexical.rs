//! Lexical matching of title tokens against known codes.

use super::pipeline::{RawEntity, RawEntityExtractor};
use super::{MATCHED_CODE_KEY, MIN_CODE_LEN};
use crate::Result;
use crate::similarity::SimilarityMetric;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    static ref WORD_TOKEN: Regex = Regex::new(r"\b[A-Za-z0-9]+\b").unwrap();
}

/// Alphanumeric word tokens of `text` that are long enough to be codes, with
/// their byte offsets.
pub fn code_candidates(text: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    WORD_TOKEN
        .find_iter(text)
        .filter(|m| m.as_str().len() >= MIN_CODE_LEN)
        .map(|m| (m.start(), m.end(), m.as_str()))
}

/// Scores every candidate token against the known codes.
///
/// Each candidate becomes a raw entity whose confidence is its best
/// similarity; the threshold is applied by a validator downstream. Nothing is
/// produced when there are no known codes.
#[derive(Debug, Clone)]
pub struct LexicalMatcher {
    codes: Arc<Vec<String>>,
    metric: SimilarityMetric,
    label: String,
}

impl LexicalMatcher {
    /// Create a matcher over `codes`, labeling entities with `label`.
    pub fn new(codes: Arc<Vec<String>>, metric: SimilarityMetric, label: impl Into<String>) -> Self {
        Self {
            codes,
            metric,
            label: label.into(),
        }
    }
}

impl RawEntityExtractor for LexicalMatcher {
    fn extract_raw(&self, text: &str) -> Result<Vec<RawEntity>> {
        if self.codes.is_empty() {
            return Ok(Vec::new());
        }

        let mut entities = Vec::new();
        for (start, end, token) in code_candidates(text) {
            let Some((code, score)) = self
                .metric
                .best_match(token, self.codes.iter().map(String::as_str))
            else {
                continue;
            };
            entities.push(
                RawEntity::new(token.to_string(), self.label.clone(), start, end, score)
                    .with_metadata(MATCHED_CODE_KEY.to_string(), code.to_string()),
            );
        }

        Ok(entities)
    }

    fn name(&self) -> &str {
        "lexical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_need_word_boundaries() {
        let tokens: Vec<&str> = code_candidates("NIKE AB1234 AIR Tシャツ CD5678スニーカー GU 12345")
            .map(|(_, _, t)| t)
            .collect();
        // AIR and GU are too short; letters glued to kana have no boundary
        assert_eq!(tokens, vec!["NIKE", "AB1234", "12345"]);
    }

    #[test]
    fn test_scores_against_best_code() {
        let matcher = LexicalMatcher::new(
            Arc::new(vec!["ZZ9999".to_string(), "AB1234".to_string()]),
            SimilarityMetric::Ratio,
            "PRODUCT_CODE",
        );
        let entities = matcher.extract_raw("NIKE AB1234 AIR FORCE").unwrap();
        let exact = entities.iter().find(|e| e.text == "AB1234").unwrap();
        assert_eq!(exact.confidence, 1.0);
        assert_eq!(exact.metadata[MATCHED_CODE_KEY], "AB1234");
        assert_eq!((exact.start_pos, exact.end_pos), (5, 11));
    }

    #[test]
    fn test_empty_corpus_matches_nothing() {
        let matcher = LexicalMatcher::new(Arc::new(Vec::new()), SimilarityMetric::Ratio, "X");
        assert!(matcher.extract_raw("NIKE AB1234").unwrap().is_empty());
    }
}
