// cellatlas-data/src/samplers/traits.rs

use super::partition::BatchPartition;
use cellatlas_core::{LabelMatrix, Result};
use std::fmt::Debug;

/// Groups rows of a dataset into the batches of a sequence.
///
/// Sequences build their [`BatchPartition`] once through a sampler and never
/// ask again, so an implementation only has to be deterministic for its own
/// configuration (batch size, seed).
pub trait Sampler: Debug + Send + Sync {
    /// Partitions `indices`, rows of `labels`, into batches.
    ///
    /// Samplers that ignore labels still check that every index is a row of
    /// `labels`.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if an index is not a row of `labels`, or a
    /// sampler-specific `InvalidArgument`.
    fn partition(&self, labels: &LabelMatrix, indices: &[usize]) -> Result<BatchPartition>;

    /// Number of batches produced for `n_samples` rows.
    ///
    /// An upper bound for samplers that may drop empty groups.
    fn n_batches(&self, n_samples: usize) -> usize;
}
