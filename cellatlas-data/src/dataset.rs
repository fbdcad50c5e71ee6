// cellatlas-data/src/dataset.rs

use cellatlas_core::Result;

/// Represents a dataset whose samples can be accessed by position.
///
/// Positions follow the load order of the dataset's index file. Each item
/// materializes the sample's image from disk, so `get` is fallible.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    ///
    /// This type must be `Send` and `'static` so items can be handed to
    /// another thread by the caller.
    type Item: Send + 'static;

    /// Returns the item at the given position.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::IndexOutOfBounds` if `index >= self.len()`, or
    /// a file access error if the sample's images cannot be loaded.
    fn get(&self, index: usize) -> Result<Self::Item>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
