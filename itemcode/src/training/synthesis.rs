//! Training sentence synthesis from a code list.

use super::templates::{TEMPLATES, render, render_without_code};
use crate::tagger::{EntityAnnotation, TrainingExample};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;

/// Trim codes, drop blanks and duplicates, keep first-seen order.
pub fn clean_code_list<I, S>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    for code in codes {
        let code = code.as_ref().trim();
        if !code.is_empty() && seen.insert(code.to_string()) {
            cleaned.push(code.to_string());
        }
    }
    cleaned
}

/// Every non-overlapping occurrence of `code` in `text`, left to right.
pub fn code_occurrences(text: &str, code: &str, label: &str) -> Vec<EntityAnnotation> {
    if code.is_empty() {
        return Vec::new();
    }
    text.match_indices(code)
        .map(|(start, matched)| EntityAnnotation {
            start,
            end: start + matched.len(),
            label: label.to_string(),
        })
        .collect()
}

/// Render `variants` sentences per code from randomly chosen templates.
pub fn create_training_data<R>(
    codes: &[String],
    variants: usize,
    label: &str,
    rng: &mut R,
) -> Vec<TrainingExample>
where
    R: Rng + ?Sized,
{
    let mut examples = Vec::with_capacity(codes.len() * variants);

    for code in codes {
        let code = code.trim();
        if code.is_empty() {
            continue;
        }
        for _ in 0..variants {
            let Some(template) = TEMPLATES.choose(rng) else {
                continue;
            };
            let text = render(template, code);
            let entities = code_occurrences(&text, code, label);
            examples.push(TrainingExample { text, entities });
        }
    }

    examples
}

/// Number of code-free sentences added to `positives` code sentences.
pub fn negative_count(positives: usize, ratio: f64) -> usize {
    (positives as f64 * ratio).ceil() as usize
}

/// `count` template titles without any code, so the tagger also sees
/// titles in which every token is outside a code.
pub fn create_negative_examples<R>(count: usize, rng: &mut R) -> Vec<TrainingExample>
where
    R: Rng + ?Sized,
{
    let negative = |template: &str| TrainingExample {
        text: render_without_code(template),
        entities: Vec::new(),
    };

    // distinct templates first, then repeats once all have been used
    let mut examples: Vec<TrainingExample> = TEMPLATES
        .choose_multiple(rng, count.min(TEMPLATES.len()))
        .map(|template| negative(template))
        .collect();
    while examples.len() < count {
        let Some(template) = TEMPLATES.choose(rng) else {
            break;
        };
        examples.push(negative(template));
    }
    examples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::templates::PLACEHOLDER;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_clean_code_list() {
        let cleaned = clean_code_list(["AB1234", " CD5678 ", "", "AB1234", "  "]);
        assert_eq!(cleaned, vec!["AB1234", "CD5678"]);
    }

    #[test]
    fn test_spans_point_at_the_code() {
        let codes = vec!["AB1234".to_string(), "ナイキ001".to_string(), "GU".to_string()];
        let mut rng = StdRng::seed_from_u64(1);
        let examples = create_training_data(&codes, 20, "PRODUCT_CODE", &mut rng);
        assert_eq!(examples.len(), 60);

        for (example, code) in examples.iter().zip(codes.iter().flat_map(|c| [c; 20])) {
            assert!(!example.entities.is_empty(), "{}", example.text);
            for entity in &example.entities {
                assert_eq!(&example.text[entity.start..entity.end], code.as_str());
                assert_eq!(entity.label, "PRODUCT_CODE");
            }
        }
    }

    #[test]
    fn test_repeated_occurrences_are_all_labeled() {
        // "GU {} ..." with code "GU" contains the code twice
        let spans = code_occurrences("GU GU レディース", "GU", "PRODUCT_CODE");
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (0, 2));
        assert_eq!((spans[1].start, spans[1].end), (3, 5));
    }

    #[test]
    fn test_seeded_synthesis_is_reproducible() {
        let codes = vec!["AB1234".to_string()];
        let a = create_training_data(&codes, 10, "X", &mut StdRng::seed_from_u64(9));
        let b = create_training_data(&codes, 10, "X", &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_examples_carry_no_entities() {
        let mut rng = StdRng::seed_from_u64(3);
        let examples = create_negative_examples(20, &mut rng);
        assert_eq!(examples.len(), 20);
        for example in &examples {
            assert!(example.entities.is_empty());
            assert!(!example.text.contains(PLACEHOLDER));
            assert!(!example.text.is_empty());
        }

        let distinct: HashSet<_> = examples.iter().take(TEMPLATES.len()).map(|e| &e.text).collect();
        assert_eq!(distinct.len(), TEMPLATES.len());
    }

    #[test]
    fn test_negative_count_rounds_up() {
        assert_eq!(negative_count(20, 0.2), 4);
        assert_eq!(negative_count(3, 0.2), 1);
        assert_eq!(negative_count(20, 0.0), 0);
    }

    #[test]
    fn test_blank_codes_are_skipped() {
        let codes = vec!["  ".to_string()];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(create_training_data(&codes, 10, "X", &mut rng).is_empty());
    }
}
