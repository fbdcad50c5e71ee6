// cellatlas-data/src/datasets/train_set_test.rs

use super::*;
use crate::sequence::BatchSequence;
use crate::test_utils::{small_store, train_csv, write_sample};
use tempfile::TempDir;

fn toy_rows() -> Vec<(&'static str, &'static str)> {
    vec![
        ("s0", "0"),
        ("s1", "1 2"),
        ("s2", "0 25"),
        ("s3", "25"),
        ("s4", "27 0"),
        ("s5", "2"),
    ]
}

fn toy_train(dir: &Path) -> TrainSet {
    let store = small_store(dir);
    for (i, (id, _)) in toy_rows().iter().enumerate() {
        write_sample(&store, id, i as u8);
    }
    TrainSet::from_reader(train_csv(&toy_rows()).as_bytes(), store).unwrap()
}

#[test]
fn test_index_and_labels_follow_file_order() {
    let dir = TempDir::new().unwrap();
    let train = toy_train(dir.path());
    assert_eq!(train.len(), 6);
    assert_eq!(train.index()[0], "s0");
    assert_eq!(train.index()[5], "s5");
    assert_eq!(train.labels().shape(), (6, 28));
    assert_eq!(train.labels().positives(1).unwrap(), vec![1, 2]);
    assert_eq!(train.position("s4"), Some(4));
    assert_eq!(train.position("missing"), None);
    assert_eq!(
        train.binarizer().inverse_transform(train.label_row("s4").unwrap()).unwrap(),
        vec![0, 27]
    );
}

#[test]
fn test_empty_target_aborts_construction() {
    let csv = train_csv(&[("a", "0"), ("b", "")]);
    let result = TrainSet::from_reader(csv.as_bytes(), small_store(Path::new("unused")));
    match result {
        Err(CellAtlasError::Parse(msg)) => assert!(msg.contains("row 2"), "{}", msg),
        other => panic!("Expected Parse error, got {:?}", other.map(|t| t.len())),
    }
}

#[test]
fn test_malformed_target_and_duplicate_id() {
    let bad = train_csv(&[("a", "0 x")]);
    assert!(matches!(
        TrainSet::from_reader(bad.as_bytes(), small_store(Path::new("unused"))),
        Err(CellAtlasError::Parse(_))
    ));
    let dup = train_csv(&[("a", "0"), ("a", "1")]);
    assert!(matches!(
        TrainSet::from_reader(dup.as_bytes(), small_store(Path::new("unused"))),
        Err(CellAtlasError::Parse(_))
    ));
}

#[test]
fn test_missing_label_file_is_file_access_error() {
    let dir = TempDir::new().unwrap();
    let result = TrainSet::from_csv(dir.path().join("train.csv"), small_store(dir.path()));
    assert!(matches!(result, Err(CellAtlasError::FileAccess { .. })));
}

#[test]
fn test_any_by_index_and_name_agree() {
    let dir = TempDir::new().unwrap();
    let train = toy_train(dir.path());

    let by_index = train.any(vec![0usize]).unwrap();
    let by_name = train.any("Nucleoplasm").unwrap();
    assert_eq!(by_index, by_name);
    assert_eq!(by_index.indices, vec![0, 2, 4]);
    assert_eq!(by_index.ids, vec!["s0", "s2", "s4"]);
    for row in by_index.labels.rows() {
        assert_eq!(row[0], 1);
    }
}

#[test]
fn test_any_is_or_across_classes() {
    let dir = TempDir::new().unwrap();
    let train = toy_train(dir.path());
    let subset = train.any(vec!["Nucleoli", "Cytosol"]).unwrap();
    assert_eq!(subset.indices, vec![1, 2, 3, 5]);
    assert!(train.any(ClassSelector::Index(3)).unwrap().is_empty());
}

#[test]
fn test_any_rejects_invalid_selector() {
    let dir = TempDir::new().unwrap();
    let train = toy_train(dir.path());
    assert!(matches!(
        train.any(28usize),
        Err(CellAtlasError::InvalidClassSelector(_))
    ));
    assert!(matches!(
        train.any("Not a class"),
        Err(CellAtlasError::InvalidClassSelector(_))
    ));
}

#[test]
fn test_dataset_get() {
    let dir = TempDir::new().unwrap();
    let train = toy_train(dir.path());
    let sample = train.get(1).unwrap();
    assert_eq!(sample.id, "s1");
    assert_eq!(sample.image, train.get_image("s1").unwrap());
    assert_eq!(sample.image.shape(), &[4, 4, 4]);
    assert_eq!(sample.labels, train.labels().row(1).unwrap().to_vec());
    assert!(matches!(
        train.get(6),
        Err(CellAtlasError::IndexOutOfBounds { index: 6, len: 6 })
    ));
}

#[test]
fn test_train_test_split_uses_held_out_fold() {
    let dir = TempDir::new().unwrap();
    let train = toy_train(dir.path());
    let config = SequenceConfig::default().with_batch_size(2);
    let (train_seq, val_seq) = train.train_test_split(0.5, &config).unwrap();

    let mut train_rows = train_seq.indices();
    let mut val_rows = val_seq.indices();
    train_rows.sort_unstable();
    val_rows.sort_unstable();
    assert_eq!(train_rows.len() + val_rows.len(), 6);
    assert!(train_rows.iter().all(|r| !val_rows.contains(r)));
    assert!(!val_rows.is_empty());
    assert!(train_seq.length() >= 1 && val_seq.length() >= 1);
}

#[test]
fn test_train_test_split_rejects_bad_portion() {
    let dir = TempDir::new().unwrap();
    let train = toy_train(dir.path());
    let config = SequenceConfig::default();
    for portion in [0.0, 1.0, 0.3, f64::NAN] {
        assert!(
            matches!(
                train.train_test_split(portion, &config),
                Err(CellAtlasError::InvalidArgument(_))
            ),
            "portion {} should be rejected",
            portion
        );
    }
}
