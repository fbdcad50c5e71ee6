// cellatlas-data/src/samplers/stratified_batcher.rs

use super::partition::BatchPartition;
use super::stratified_kfold::MultilabelStratifiedKFold;
use super::traits::Sampler;
use cellatlas_core::{CellAtlasError, LabelMatrix, Result};
use log::{debug, warn};

/// Partitions a subset of dataset rows into label-balanced batches.
///
/// The held-out fold of each split of a multi-label stratified k-fold with
/// `ceil(n / batch_size)` splits (at least 2) becomes one batch, so every
/// batch carries roughly the same mix of classes as the whole subset. Batch
/// sizes are approximately, not exactly, `batch_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StratifiedBatcher {
    batch_size: usize,
    seed: u64,
}

impl StratifiedBatcher {
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(CellAtlasError::InvalidArgument(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(StratifiedBatcher {
            batch_size,
            seed: 0,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of k-fold splits used for `n_samples` rows.
    pub fn n_splits(&self, n_samples: usize) -> usize {
        n_samples.div_ceil(self.batch_size).max(2)
    }
}

impl Sampler for StratifiedBatcher {
    /// Partitions `indices` (rows of `labels`) into stratified batches.
    ///
    /// Batches hold row indices of `labels`, ascending within each batch.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if `indices` is empty.
    /// * `IndexOutOfBounds` if an index is not a row of `labels`.
    fn partition(&self, labels: &LabelMatrix, indices: &[usize]) -> Result<BatchPartition> {
        let n_samples = indices.len();
        if n_samples == 0 {
            return Err(CellAtlasError::InvalidArgument(
                "cannot batch an empty selection".to_string(),
            ));
        }
        let subset = labels.select_rows(indices)?;
        if n_samples == 1 {
            warn!("Single sample selected; producing one batch without stratification");
            return BatchPartition::new(vec![indices.to_vec()]);
        }

        let n_splits = self.n_splits(n_samples);
        if n_samples.div_ceil(self.batch_size) < 2 {
            warn!(
                "{} samples with batch size {}: using the 2-split floor",
                n_samples, self.batch_size
            );
        }

        let folds = MultilabelStratifiedKFold::new(n_splits)?
            .with_seed(self.seed)
            .test_folds(&subset)?;

        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); n_splits];
        for (pos, &fold) in folds.iter().enumerate() {
            groups[fold].push(indices[pos]);
        }
        let before = groups.len();
        groups.retain(|g| !g.is_empty());
        if groups.len() < before {
            warn!("Dropped {} empty folds from the batch partition", before - groups.len());
        }
        for group in &mut groups {
            group.sort_unstable();
        }

        let partition = BatchPartition::new(groups)?;
        debug!(
            "Stratified {} samples into {} batches (sizes {}..={})",
            n_samples,
            partition.len(),
            partition.sizes().iter().min().copied().unwrap_or(0),
            partition.sizes().iter().max().copied().unwrap_or(0)
        );
        Ok(partition)
    }

    fn n_batches(&self, n_samples: usize) -> usize {
        match n_samples {
            0 | 1 => n_samples,
            n => self.n_splits(n),
        }
    }
}

#[cfg(test)]
#[path = "stratified_batcher_test.rs"]
mod tests;
