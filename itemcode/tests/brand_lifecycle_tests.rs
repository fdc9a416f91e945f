//! Integration tests for the brand lifecycle
//!
//! Training creates a brand, retraining replaces or extends it and deletion
//! removes it from the brand list on the next query.

use itemcode::brands::{CODES_FILE_NAME, MODEL_DIR_NAME, MODEL_FILE_NAME};
use itemcode::prelude::*;

fn manager(dir: &std::path::Path) -> ItemCodeManager {
    let config = ConfigBuilder::testing()
        .with_models_dir(dir)
        .with_epochs(2)
        .build()
        .expect("testing config is valid");
    itemcode::init(config).expect("Should initialize")
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

#[test]
fn test_training_creates_brand_directory() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(dir.path());

    let report = manager
        .train_brand("nike", &codes(&["AB1234"]), TrainingMode::Fresh, |_| {})
        .unwrap();

    let model_dir = dir.path().join("nike").join(MODEL_DIR_NAME);
    assert_eq!(report.model_path, model_dir);
    assert!(model_dir.join(MODEL_FILE_NAME).is_file());
    assert_eq!(
        std::fs::read_to_string(model_dir.join(CODES_FILE_NAME)).unwrap(),
        "AB1234\n"
    );
}

#[test]
fn test_epoch_observer_sees_every_epoch() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(dir.path());

    let mut reports = Vec::new();
    manager
        .train_brand("nike", &codes(&["AB1234", "CD5678"]), TrainingMode::Fresh, |e| {
            reports.push((e.epoch, e.epochs, e.examples))
        })
        .unwrap();
    // 20 code sentences plus 4 code-free ones
    assert_eq!(reports, vec![(1, 2, 24), (2, 2, 24)]);
}

#[test]
fn test_brand_list_tracks_training_and_deletion() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(dir.path());

    for brand in ["puma", "adidas", "nike"] {
        manager
            .train_brand(brand, &codes(&["AB1234"]), TrainingMode::Fresh, |_| {})
            .unwrap();
    }
    assert_eq!(manager.brands().unwrap(), vec!["adidas", "nike", "puma"]);

    assert!(manager.delete_brand("nike").unwrap());
    assert_eq!(manager.brands().unwrap(), vec!["adidas", "puma"]);
    assert!(!dir.path().join("nike").exists());

    // deleting again reports not found rather than failing
    assert!(!manager.delete_brand("nike").unwrap());
}

#[test]
fn test_brand_info_counts_codes() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(dir.path());
    manager
        .train_brand("nike", &codes(&["AB1234", "CD5678"]), TrainingMode::Fresh, |_| {})
        .unwrap();
    manager
        .train_brand("nike", &codes(&["EF9012"]), TrainingMode::Incremental, |_| {})
        .unwrap();

    // the code list is the last run's input, the model keeps its history
    let info = manager.brand_info("nike").unwrap();
    assert_eq!(info.code_count, 1);
    assert_eq!(info.metadata.training_runs, 2);
    assert_eq!(info.metadata.epochs_trained, 4);
    assert!(info.metadata.updated_at >= info.metadata.created_at);
}

#[test]
fn test_invalid_brand_names_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(dir.path());

    for name in ["", "../escape", "a/b"] {
        assert!(matches!(
            manager.train_brand(name, &codes(&["AB1234"]), TrainingMode::Fresh, |_| {}),
            Err(ItemcodeError::InvalidBrandName { .. })
        ));
    }
    assert!(manager.brands().unwrap().is_empty());
}

#[test]
fn test_empty_code_list_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(dir.path());
    assert!(matches!(
        manager.train_brand("nike", &[], TrainingMode::Fresh, |_| {}),
        Err(ItemcodeError::EmptyCodeList)
    ));
}

#[test]
fn test_unreadable_model_surfaces_as_error() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(dir.path());
    manager
        .train_brand("nike", &codes(&["AB1234"]), TrainingMode::Fresh, |_| {})
        .unwrap();

    let model_path = dir.path().join("nike").join(MODEL_DIR_NAME).join(MODEL_FILE_NAME);
    std::fs::write(&model_path, "not a model").unwrap();
    manager.extractor().invalidate(None);

    assert!(matches!(
        manager.extract("nike", "NIKE AB1234"),
        Err(ItemcodeError::Model(_))
    ));
}
