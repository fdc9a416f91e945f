//! Normalized string similarity used by the lexical matcher.
//!
//! All metrics return a score in `0.0..=1.0` and score equal strings 1.0.

use serde::{Deserialize, Serialize};
use similar::TextDiff;
use std::fmt;
use std::str::FromStr;

/// Similarity function applied between a title token and a known code.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// `2 * M / T` where `M` is the number of matched characters of a
    /// character diff and `T` the combined length of both strings.
    /// `M` is the longest common subsequence, so the score is never lower
    /// than a greedy longest-block matcher would give.
    #[default]
    Ratio,
    /// `1 - levenshtein / max_len`
    Levenshtein,
    /// Jaro-Winkler similarity
    JaroWinkler,
}

impl SimilarityMetric {
    /// Score two strings with this metric.
    pub fn score(&self, a: &str, b: &str) -> f32 {
        match self {
            SimilarityMetric::Ratio => ratio(a, b),
            SimilarityMetric::Levenshtein => strsim::normalized_levenshtein(a, b) as f32,
            SimilarityMetric::JaroWinkler => strsim::jaro_winkler(a, b) as f32,
        }
    }

    /// Best score of `token` against any of `candidates`, with the candidate that produced it.
    ///
    /// Returns `None` for an empty candidate list.
    pub fn best_match<'a, I>(&self, token: &str, candidates: I) -> Option<(&'a str, f32)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, f32)> = None;
        for candidate in candidates {
            let score = self.score(token, candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
                if score >= 1.0 {
                    break;
                }
            }
        }
        best
    }

    /// Name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::Ratio => "ratio",
            SimilarityMetric::Levenshtein => "levenshtein",
            SimilarityMetric::JaroWinkler => "jaro_winkler",
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SimilarityMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "ratio" => Ok(SimilarityMetric::Ratio),
            "levenshtein" => Ok(SimilarityMetric::Levenshtein),
            "jaro_winkler" | "jarowinkler" => Ok(SimilarityMetric::JaroWinkler),
            _ => Err(format!("Invalid similarity metric: {}", s)),
        }
    }
}

/// Character-level similarity ratio of two strings.
///
/// Matches come from a Myers diff and count the longest common
/// subsequence. Greedy block matchers can find fewer: for `1A21AA` and
/// `1AAA2A` they match 3 characters (0.5) where this matches 4.
pub fn ratio(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_strings_score_one() {
        for metric in [
            SimilarityMetric::Ratio,
            SimilarityMetric::Levenshtein,
            SimilarityMetric::JaroWinkler,
        ] {
            assert_eq!(metric.score("AB1234", "AB1234"), 1.0, "{}", metric);
        }
    }

    #[test]
    fn test_ratio_counts_shared_characters() {
        // 4 shared characters over 6 + 6
        let score = ratio("AB1234", "AB1299");
        assert!((score - 8.0 / 12.0).abs() < 1e-6, "got {}", score);
        assert_eq!(ratio("NIKE", "AB1234"), 0.0);
    }

    #[test]
    fn test_ratio_counts_longest_common_subsequence() {
        // a greedy longest-block matcher stops at 3 matches here
        let score = ratio("1A21AA", "1AAA2A");
        assert!((score - 8.0 / 12.0).abs() < 1e-6, "got {}", score);
    }

    #[test]
    fn test_best_match_picks_highest() {
        let codes = ["ZZ0000", "AB1299", "AB1234"];
        let (code, score) = SimilarityMetric::Ratio
            .best_match("AB1234", codes.iter().copied())
            .unwrap();
        assert_eq!(code, "AB1234");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_best_match_empty_corpus() {
        assert!(
            SimilarityMetric::Ratio
                .best_match("AB1234", std::iter::empty())
                .is_none()
        );
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("ratio".parse::<SimilarityMetric>(), Ok(SimilarityMetric::Ratio));
        assert_eq!(
            "Jaro-Winkler".parse::<SimilarityMetric>(),
            Ok(SimilarityMetric::JaroWinkler)
        );
        assert!("cosine".parse::<SimilarityMetric>().is_err());
    }
}
