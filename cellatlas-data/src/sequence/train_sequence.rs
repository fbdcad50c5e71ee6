// cellatlas-data/src/sequence/train_sequence.rs

use super::traits::BatchSequence;
use crate::augment::Augmentation;
use crate::config::SequenceConfig;
use crate::datasets::TrainSet;
use crate::samplers::{BatchPartition, Sampler, StratifiedBatcher};
use cellatlas_core::{LabelMatrix, Result, Tensor};
use log::{debug, info};

/// A materialized train batch.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainBatch {
    /// Rows of the train set in this batch, ascending.
    pub indices: Vec<usize>,
    pub ids: Vec<String>,
    /// `(n, rows, cols, 4)` images with values in `[0, 1]`.
    pub images: Tensor,
    /// `(n, 28)` label rows, aligned with `images`.
    pub labels: LabelMatrix,
}

/// Label-stratified batches over a subset of a [`TrainSet`].
///
/// The batch partition is computed once in [`TrainSequence::new`] and never
/// reshuffled.
#[derive(Debug, Clone)]
pub struct TrainSequence<'a> {
    train: &'a TrainSet,
    partition: BatchPartition,
    augmentation: Augmentation,
    seed: u64,
}

impl<'a> TrainSequence<'a> {
    /// # Errors
    ///
    /// * `InvalidArgument` for an invalid `config` or an empty `indices`.
    /// * `IndexOutOfBounds` if an index is not a row of `train`.
    pub fn new(train: &'a TrainSet, indices: &[usize], config: &SequenceConfig) -> Result<Self> {
        config.validate()?;
        let partition = StratifiedBatcher::new(config.batch_size)?
            .with_seed(config.seed)
            .partition(train.labels(), indices)?;
        info!(
            "Train sequence: {} samples in {} batches (target batch size {})",
            indices.len(),
            partition.len(),
            config.batch_size
        );
        Ok(TrainSequence {
            train,
            partition,
            augmentation: Augmentation::new(config.augmentation)?,
            seed: config.seed,
        })
    }

    pub fn partition(&self) -> &BatchPartition {
        &self.partition
    }

    /// All train-set rows covered by this sequence, in batch order.
    pub fn indices(&self) -> Vec<usize> {
        self.partition.indices()
    }

    /// Label rows of batch `index` without loading any image.
    pub fn labels(&self, index: usize) -> Result<LabelMatrix> {
        self.train.labels().select_rows(self.partition.batch(index)?)
    }
}

impl BatchSequence for TrainSequence<'_> {
    type Batch = TrainBatch;

    fn length(&self) -> usize {
        self.partition.len()
    }

    fn get(&self, index: usize) -> Result<TrainBatch> {
        let rows = self.partition.batch(index)?;
        let ids = rows
            .iter()
            .map(|&row| self.train.id(row).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;
        let mut images = self.train.get_images(&ids)?;
        let labels = self.train.labels().select_rows(rows)?;

        if self.augmentation.is_enabled() {
            let mut rng = Augmentation::batch_rng(self.seed, index);
            self.augmentation.apply(&mut images, &mut rng)?;
        }
        debug!("Materialized train batch {} ({} samples)", index, rows.len());

        Ok(TrainBatch {
            indices: rows.to_vec(),
            ids,
            images,
            labels,
        })
    }
}

#[cfg(test)]
#[path = "train_sequence_test.rs"]
mod tests;
