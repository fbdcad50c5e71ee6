// cellatlas-data/src/sequence/traits.rs

use cellatlas_core::Result;

/// A finite, indexable sequence of batches.
///
/// Unlike a one-shot stream, any batch can be requested at any time and in
/// any order; requesting the same index twice yields equal batches as long
/// as the files on disk do not change.
pub trait BatchSequence {
    /// The type of a materialized batch.
    type Batch;

    /// Number of batches.
    fn length(&self) -> usize;

    /// Materializes batch `index`.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::IndexOutOfBounds` if `index >= self.length()`,
    /// or the first error hit while loading the batch's images.
    fn get(&self, index: usize) -> Result<Self::Batch>;

    fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Iterates over all batches in order. The sequence is borrowed, not
    /// consumed, so iteration can be restarted.
    fn iter(&self) -> BatchIter<'_, Self>
    where
        Self: Sized,
    {
        BatchIter {
            sequence: self,
            next: 0,
        }
    }
}

/// In-order iterator over a [`BatchSequence`].
///
/// Yields `Some(Err(e))` for a batch that fails to load and carries on with
/// the next index on the following call.
#[derive(Debug)]
pub struct BatchIter<'s, S> {
    sequence: &'s S,
    next: usize,
}

impl<S: BatchSequence> Iterator for BatchIter<'_, S> {
    type Item = Result<S::Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.sequence.length() {
            return None;
        }
        let batch = self.sequence.get(self.next);
        self.next += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sequence.length().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<S: BatchSequence> ExactSizeIterator for BatchIter<'_, S> {}
