//! Integration tests for training and extraction
//!
//! These tests exercise the public API end to end:
//! - Synthesized training sentences label the code they were built from
//! - Trained brands find their codes in product titles
//! - Results are sorted, duplicate-free and ignore short tokens
//! - The similarity threshold only ever narrows the lexical matches

use itemcode::entity_extraction::MatchSource;
use itemcode::prelude::*;
use itemcode::training::{TEMPLATES, create_training_data, render, render_without_code};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

fn trained_manager(dir: &std::path::Path, brand: &str, list: &[&str]) -> ItemCodeManager {
    let config = ConfigBuilder::testing()
        .with_models_dir(dir)
        .build()
        .expect("testing config is valid");
    let manager = itemcode::init(config).expect("Should initialize");
    manager
        .train_brand(brand, &codes(list), TrainingMode::Fresh, |_| {})
        .expect("Should train");
    manager
}

#[test]
fn test_synthesized_spans_cover_the_code() {
    let list = codes(&["AB1234", "X9", "品番99", "A-B-C-1"]);
    let mut rng = StdRng::seed_from_u64(2024);
    let examples = create_training_data(&list, 25, "PRODUCT_CODE", &mut rng);

    for example in &examples {
        assert!(!example.entities.is_empty());
        for entity in &example.entities {
            let span = &example.text[entity.start..entity.end];
            assert!(list.iter().any(|c| c == span), "{:?} in {:?}", span, example.text);
        }
    }
}

#[test]
fn test_documented_example() {
    let dir = tempfile::tempdir().unwrap();
    let manager = trained_manager(dir.path(), "nike", &["AB1234"]);

    let found = manager
        .extract_with_threshold("nike", "NIKE AB1234 AIR FORCE", 0.2)
        .unwrap();
    assert!(found.contains(&"AB1234".to_string()));
}

#[test]
fn test_model_recognizes_trained_codes_in_templates() {
    let dir = tempfile::tempdir().unwrap();
    let trained = ["AB1234", "CD5678", "EF9012", "GH3456"];
    let manager = trained_manager(dir.path(), "nike", &trained);

    let mut recognized = 0;
    let mut total = 0;
    for code in trained {
        for template in TEMPLATES {
            let text = render(template, code);
            let detailed = manager.extract_detailed("nike", &text, Some(1.0)).unwrap();
            total += 1;
            if detailed
                .iter()
                .any(|c| c.text == code && c.sources.contains(&MatchSource::Ner))
            {
                recognized += 1;
            }
        }
    }
    // The tagger must carry most of the work on its own
    assert!(
        recognized * 4 >= total * 3,
        "tagger recognized {} of {}",
        recognized,
        total
    );
}

#[test]
fn test_tagger_leaves_code_free_titles_alone() {
    let dir = tempfile::tempdir().unwrap();
    let trained = ["AB1234", "CD5678", "EF9012", "GH3456"];
    let manager = trained_manager(dir.path(), "nike", &trained);

    let mut titles: Vec<String> = TEMPLATES.iter().map(|t| render_without_code(t)).collect();
    titles.push("Reebok トレーニングシューズ FORCE".to_string());

    let mut flagged = Vec::new();
    for title in &titles {
        let detailed = manager.extract_detailed("nike", title, Some(1.0)).unwrap();
        if detailed.iter().any(|c| c.sources.contains(&MatchSource::Ner)) {
            flagged.push(title.clone());
        }
    }
    // Brand names and descriptors are not codes
    assert!(flagged.len() <= 2, "tagger flagged {:?}", flagged);
}

#[test]
fn test_exact_codes_match_at_any_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let manager = trained_manager(dir.path(), "adidas", &["AB1234", "ZX5000"]);

    for threshold in [0.01, 0.5, 0.99, 1.0] {
        let found = manager
            .extract_with_threshold("adidas", "adidas ZX5000 スーパースター", threshold)
            .unwrap();
        assert!(found.contains(&"ZX5000".to_string()), "threshold {}", threshold);
    }
}

#[test]
fn test_text_without_long_alphanumerics_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let manager = trained_manager(dir.path(), "nike", &["AB1234"]);

    for text in ["", "靴 スニーカー メンズ", "GU 春 夏 AB1", "綿100% Tシャツ"] {
        let found = manager.extract_with_threshold("nike", text, 0.0).unwrap();
        assert!(found.is_empty(), "{:?} -> {:?}", text, found);
    }
}

#[test]
fn test_results_are_sorted_and_unique() {
    let dir = tempfile::tempdir().unwrap();
    let manager = trained_manager(dir.path(), "nike", &["AB1234", "CD5678", "EF9012"]);

    let found = manager
        .extract("nike", "EF9012 NIKE CD5678 AB1234 CD5678 AIR FORCE AB1234")
        .unwrap();
    let mut expected = found.clone();
    expected.sort();
    expected.dedup();
    assert_eq!(found, expected);
    for code in ["AB1234", "CD5678", "EF9012"] {
        assert!(found.contains(&code.to_string()));
    }
}

#[test]
fn test_raising_threshold_never_adds_lexical_matches() {
    let dir = tempfile::tempdir().unwrap();
    let manager = trained_manager(dir.path(), "nike", &["AB1234", "CD5678"]);
    let text = "NIKE AB1235 CD5000 ABCD エアフォース 1234";

    let lexical = |threshold: f32| -> Vec<String> {
        manager
            .extract_detailed("nike", text, Some(threshold))
            .unwrap()
            .into_iter()
            .filter(|c| c.sources.contains(&MatchSource::Similarity))
            .map(|c| c.text)
            .collect()
    };

    let thresholds = [0.0, 0.1, 0.2, 0.4, 0.6, 0.8, 1.0];
    for pair in thresholds.windows(2) {
        let low = lexical(pair[0]);
        let high = lexical(pair[1]);
        assert!(
            high.iter().all(|c| low.contains(c)),
            "{:?} at {} vs {:?} at {}",
            high,
            pair[1],
            low,
            pair[0]
        );
    }
}

#[test]
fn test_unknown_brand_returns_empty() {
    let dir = tempfile::tempdir().unwrap();
    let manager = trained_manager(dir.path(), "nike", &["AB1234"]);
    assert!(manager.extract("puma", "PUMA AB1234").unwrap().is_empty());
}

#[test]
fn test_out_of_range_threshold_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let manager = trained_manager(dir.path(), "nike", &["AB1234"]);
    assert!(matches!(
        manager.extract_with_threshold("nike", "AB1234", 1.01),
        Err(ItemcodeError::Configuration(_))
    ));
}
