// cellatlas-data/src/samplers/stratified_batcher_test.rs

use super::*;
use std::collections::HashSet;

fn labels_with_cycle(n_rows: usize, n_cols: usize) -> LabelMatrix {
    let rows = (0..n_rows)
        .map(|i| {
            let mut row = vec![0u8; n_cols];
            row[i % n_cols] = 1;
            // A second, rarer label on every fifth row.
            if i % 5 == 0 {
                row[(i / 5) % n_cols] = 1;
            }
            row
        })
        .collect();
    LabelMatrix::from_rows(rows, n_cols).unwrap()
}

fn assert_exact_cover(partition: &BatchPartition, indices: &[usize]) {
    let mut seen = HashSet::new();
    for batch in partition.batches() {
        assert!(!batch.is_empty());
        for &i in batch {
            assert!(seen.insert(i), "index {} appears twice", i);
        }
    }
    let expected: HashSet<usize> = indices.iter().copied().collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_n_splits_has_floor_of_two() {
    let batcher = StratifiedBatcher::new(32).unwrap();
    assert_eq!(batcher.n_splits(100), 4);
    assert_eq!(batcher.n_splits(64), 2);
    assert_eq!(batcher.n_splits(40), 2);
    assert_eq!(batcher.n_splits(10), 2);
    assert_eq!(batcher.n_splits(129), 5);
}

#[test]
fn test_zero_batch_size_rejected() {
    assert!(StratifiedBatcher::new(0).is_err());
}

#[test]
fn test_partition_covers_indices_exactly() {
    let labels = labels_with_cycle(100, 28);
    let indices: Vec<usize> = (0..100).collect();
    let partition = StratifiedBatcher::new(32)
        .unwrap()
        .partition(&labels, &indices)
        .unwrap();
    assert_eq!(partition.len(), 4);
    assert_eq!(partition.total_len(), 100);
    assert_exact_cover(&partition, &indices);
    for size in partition.sizes() {
        assert!((20..=30).contains(&size), "batch size {} far from 25", size);
    }
}

#[test]
fn test_partition_maps_back_to_dataset_rows() {
    let labels = labels_with_cycle(60, 6);
    // A fold-like subset: every row not divisible by 3.
    let indices: Vec<usize> = (0..60).filter(|i| i % 3 != 0).collect();
    let partition = StratifiedBatcher::new(8)
        .unwrap()
        .partition(&labels, &indices)
        .unwrap();
    assert_eq!(partition.len(), 5);
    assert_exact_cover(&partition, &indices);
    for batch in partition.batches() {
        assert!(batch.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_small_selection_collapses_to_two_batches() {
    let labels = labels_with_cycle(20, 4);
    let indices: Vec<usize> = (0..10).collect();
    let partition = StratifiedBatcher::new(32)
        .unwrap()
        .partition(&labels, &indices)
        .unwrap();
    assert_eq!(partition.len(), 2);
    assert_exact_cover(&partition, &indices);
}

#[test]
fn test_single_and_empty_selection() {
    let labels = labels_with_cycle(5, 3);
    let batcher = StratifiedBatcher::new(4).unwrap();
    let single = batcher.partition(&labels, &[3]).unwrap();
    assert_eq!(single.batches(), &[vec![3]]);
    assert!(matches!(
        batcher.partition(&labels, &[]),
        Err(CellAtlasError::InvalidArgument(_))
    ));
    assert!(matches!(
        batcher.partition(&labels, &[0, 9]),
        Err(CellAtlasError::IndexOutOfBounds { .. })
    ));
}

#[test]
fn test_partition_is_deterministic_per_seed() {
    let labels = labels_with_cycle(90, 9);
    let indices: Vec<usize> = (0..90).collect();
    let batcher = StratifiedBatcher::new(10).unwrap().with_seed(11);
    assert_eq!(
        batcher.partition(&labels, &indices).unwrap(),
        batcher.partition(&labels, &indices).unwrap()
    );
}

#[test]
fn test_n_batches_matches_partition() {
    let labels = labels_with_cycle(100, 28);
    let batcher = StratifiedBatcher::new(32).unwrap();
    assert_eq!(batcher.n_batches(0), 0);
    assert_eq!(batcher.n_batches(1), 1);
    assert_eq!(batcher.n_batches(10), 2);
    for n in [1, 10, 100] {
        let indices: Vec<usize> = (0..n).collect();
        let partition = batcher.partition(&labels, &indices).unwrap();
        assert_eq!(partition.len(), batcher.n_batches(n), "n = {}", n);
    }
}
