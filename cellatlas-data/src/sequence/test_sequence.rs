// cellatlas-data/src/sequence/test_sequence.rs

use super::traits::BatchSequence;
use crate::datasets::TestSet;
use crate::samplers::{BatchPartition, SequentialSampler};
use cellatlas_core::{Result, Tensor};
use log::debug;

/// Contiguous, in-order image batches over a [`TestSet`].
///
/// `length() == ceil(n / batch_size)`; batch sizes differ by at most one.
#[derive(Debug, Clone)]
pub struct TestSequence<'a> {
    test: &'a TestSet,
    partition: BatchPartition,
}

impl<'a> TestSequence<'a> {
    pub fn new(test: &'a TestSet, batch_size: usize) -> Result<Self> {
        let rows: Vec<usize> = (0..test.index().len()).collect();
        let partition = SequentialSampler::new(batch_size)?.partition_indices(&rows)?;
        Ok(TestSequence { test, partition })
    }

    pub fn partition(&self) -> &BatchPartition {
        &self.partition
    }

    /// Ids of batch `index`, aligned with the rows of its image tensor.
    pub fn batch_ids(&self, index: usize) -> Result<Vec<&'a str>> {
        let index_ids = self.test.index();
        Ok(self
            .partition
            .batch(index)?
            .iter()
            .map(|&row| index_ids[row].as_str())
            .collect())
    }
}

impl BatchSequence for TestSequence<'_> {
    type Batch = Tensor;

    fn length(&self) -> usize {
        self.partition.len()
    }

    fn get(&self, index: usize) -> Result<Tensor> {
        let ids = self.batch_ids(index)?;
        debug!("Materializing test batch {} ({} samples)", index, ids.len());
        self.test.get_images(&ids)
    }
}

#[cfg(test)]
#[path = "test_sequence_test.rs"]
mod tests;
