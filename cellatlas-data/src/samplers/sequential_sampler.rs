// cellatlas-data/src/samplers/sequential_sampler.rs

use super::partition::BatchPartition;
use super::traits::Sampler;
use cellatlas_core::{CellAtlasError, LabelMatrix, Result};

/// Splits indices into contiguous batches, always in the same order.
///
/// Produces `ceil(n / batch_size)` batches whose sizes differ by at most one:
/// the first `n % k` batches hold one extra index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequentialSampler {
    batch_size: usize,
}

impl SequentialSampler {
    /// Creates a new `SequentialSampler`.
    pub fn new(batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(CellAtlasError::InvalidArgument(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(SequentialSampler { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Splits `indices` in order, without looking at any labels.
    pub fn partition_indices(&self, indices: &[usize]) -> Result<BatchPartition> {
        let n = indices.len();
        let k = self.n_batches(n);
        let mut batches = Vec::with_capacity(k);
        let mut start = 0;
        for b in 0..k {
            let size = n / k + usize::from(b < n % k);
            batches.push(indices[start..start + size].to_vec());
            start += size;
        }
        BatchPartition::new(batches)
    }
}

impl Sampler for SequentialSampler {
    fn partition(&self, labels: &LabelMatrix, indices: &[usize]) -> Result<BatchPartition> {
        if let Some(&index) = indices.iter().find(|&&i| i >= labels.n_rows()) {
            return Err(CellAtlasError::IndexOutOfBounds {
                index,
                len: labels.n_rows(),
            });
        }
        self.partition_indices(indices)
    }

    fn n_batches(&self, n_samples: usize) -> usize {
        n_samples.div_ceil(self.batch_size)
    }
}

#[cfg(test)]
#[path = "sequential_sampler_test.rs"]
mod tests;
