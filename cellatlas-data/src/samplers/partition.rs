// cellatlas-data/src/samplers/partition.rs

use cellatlas_core::{CellAtlasError, Result};
use std::collections::HashSet;

/// An ordered sequence of disjoint, non-empty groups of dataset row indices.
///
/// Fixed once built: batch count and membership never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPartition {
    batches: Vec<Vec<usize>>,
}

impl BatchPartition {
    /// # Errors
    ///
    /// Returns `CellAtlasError::InvalidArgument` if a batch is empty or an
    /// index appears more than once.
    pub fn new(batches: Vec<Vec<usize>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (b, batch) in batches.iter().enumerate() {
            if batch.is_empty() {
                return Err(CellAtlasError::InvalidArgument(format!(
                    "batch {} is empty",
                    b
                )));
            }
            for &i in batch {
                if !seen.insert(i) {
                    return Err(CellAtlasError::InvalidArgument(format!(
                        "index {} appears in more than one batch",
                        i
                    )));
                }
            }
        }
        Ok(BatchPartition { batches })
    }

    /// Number of batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    pub fn batch(&self, index: usize) -> Result<&[usize]> {
        self.batches
            .get(index)
            .map(Vec::as_slice)
            .ok_or(CellAtlasError::IndexOutOfBounds {
                index,
                len: self.batches.len(),
            })
    }

    pub fn batches(&self) -> &[Vec<usize>] {
        &self.batches
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.batches.iter().map(Vec::len).collect()
    }

    /// Total number of indices across all batches.
    pub fn total_len(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    /// All indices in batch order.
    pub fn indices(&self) -> Vec<usize> {
        self.batches.iter().flatten().copied().collect()
    }
}
