// cellatlas-data/src/samplers/stratified_kfold_test.rs

use super::*;
use std::collections::HashSet;

/// `n_rows` single-label rows cycling through `n_cols` labels.
fn cyclic_labels(n_rows: usize, n_cols: usize) -> LabelMatrix {
    let rows = (0..n_rows)
        .map(|i| {
            let mut row = vec![0u8; n_cols];
            row[i % n_cols] = 1;
            row
        })
        .collect();
    LabelMatrix::from_rows(rows, n_cols).unwrap()
}

fn fold_members(folds: &[usize], k: usize) -> Vec<usize> {
    (0..folds.len()).filter(|&r| folds[r] == k).collect()
}

#[test]
fn test_new_requires_two_splits() {
    assert!(matches!(
        MultilabelStratifiedKFold::new(1),
        Err(CellAtlasError::InvalidArgument(_))
    ));
    assert_eq!(MultilabelStratifiedKFold::new(2).unwrap().n_splits(), 2);
}

#[test]
fn test_more_splits_than_samples_is_rejected() {
    let kfold = MultilabelStratifiedKFold::new(5).unwrap();
    assert!(matches!(
        kfold.test_folds(&cyclic_labels(4, 2)),
        Err(CellAtlasError::InvalidArgument(_))
    ));
}

#[test]
fn test_every_row_gets_a_valid_fold() {
    let labels = cyclic_labels(23, 4);
    let folds = MultilabelStratifiedKFold::new(3)
        .unwrap()
        .test_folds(&labels)
        .unwrap();
    assert_eq!(folds.len(), 23);
    assert!(folds.iter().all(|&f| f < 3));
}

#[test]
fn test_label_frequencies_are_balanced() {
    // 40 rows, 4 labels with 10 positives each, 5 folds: every fold must
    // receive exactly 2 positives of every label.
    let labels = cyclic_labels(40, 4);
    let folds = MultilabelStratifiedKFold::new(5)
        .unwrap()
        .with_seed(7)
        .test_folds(&labels)
        .unwrap();
    for k in 0..5 {
        let members = fold_members(&folds, k);
        assert_eq!(members.len(), 8, "fold {} size", k);
        let counts = labels.select_rows(&members).unwrap().class_counts();
        assert_eq!(counts, vec![2, 2, 2, 2], "fold {} label counts", k);
    }
}

#[test]
fn test_rare_label_is_spread_first() {
    // Label 1 occurs only three times, always together with the common label 0.
    let mut rows = vec![vec![1u8, 0]; 12];
    for r in [0, 1, 2] {
        rows[r] = vec![1, 1];
    }
    let labels = LabelMatrix::from_rows(rows, 2).unwrap();
    let folds = MultilabelStratifiedKFold::new(3)
        .unwrap()
        .test_folds(&labels)
        .unwrap();
    let rare_folds: HashSet<usize> = [0, 1, 2].iter().map(|&r| folds[r]).collect();
    assert_eq!(rare_folds.len(), 3, "each fold holds one rare sample");
    for k in 0..3 {
        assert_eq!(fold_members(&folds, k).len(), 4);
    }
}

#[test]
fn test_rows_without_labels_are_dealt_evenly() {
    let labels = LabelMatrix::new(vec![0; 6 * 3], 6, 3).unwrap();
    let folds = MultilabelStratifiedKFold::new(3)
        .unwrap()
        .test_folds(&labels)
        .unwrap();
    for k in 0..3 {
        assert_eq!(fold_members(&folds, k).len(), 2);
    }
}

#[test]
fn test_same_seed_same_folds() {
    let labels = cyclic_labels(50, 7);
    let kfold = MultilabelStratifiedKFold::new(4)
        .unwrap()
        .with_shuffle(true)
        .with_seed(42);
    assert_eq!(
        kfold.test_folds(&labels).unwrap(),
        kfold.test_folds(&labels).unwrap()
    );
}

#[test]
fn test_split_train_test_are_complementary() {
    let labels = cyclic_labels(17, 3);
    let splits = MultilabelStratifiedKFold::new(4)
        .unwrap()
        .with_shuffle(true)
        .with_seed(3)
        .split(&labels)
        .unwrap();
    assert_eq!(splits.len(), 4);

    let mut all_test = Vec::new();
    for fold in &splits {
        assert!(fold.test.windows(2).all(|w| w[0] < w[1]), "test ascending");
        assert!(fold.train.windows(2).all(|w| w[0] < w[1]), "train ascending");
        assert_eq!(fold.train.len() + fold.test.len(), 17);
        let test: HashSet<usize> = fold.test.iter().copied().collect();
        assert!(fold.train.iter().all(|r| !test.contains(r)));
        all_test.extend(fold.test.iter().copied());
    }
    all_test.sort_unstable();
    assert_eq!(all_test, (0..17).collect::<Vec<_>>());
}
