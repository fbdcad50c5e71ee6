// cellatlas-data/src/datasets/test_set.rs

use super::records::{ensure_unique_ids, read_records, IdRecord};
use crate::config::AtlasPaths;
use crate::dataset::Dataset;
use crate::image_store::ImageStore;
use crate::sequence::TestSequence;
use cellatlas_core::{CellAtlasError, Result, Tensor};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The unlabelled split to predict: only sample ids and images.
#[derive(Debug, Clone)]
pub struct TestSet {
    store: ImageStore,
    index: Vec<String>,
}

impl TestSet {
    /// Loads `sample_submission.csv` and the `test/` image directory below `paths`.
    pub fn open(paths: &AtlasPaths) -> Result<Self> {
        Self::from_csv(
            paths.sample_submission_csv(),
            ImageStore::new(paths.test_dir()),
        )
    }

    pub fn from_csv(index_csv: impl AsRef<Path>, store: ImageStore) -> Result<Self> {
        let path = index_csv.as_ref();
        let file = File::open(path).map_err(|e| CellAtlasError::file_access(path, e))?;
        let test = Self::from_reader(file, store)?;
        info!("Loaded {} test samples from {:?}", test.index.len(), path);
        Ok(test)
    }

    pub fn from_reader<R: Read>(reader: R, store: ImageStore) -> Result<Self> {
        let records: Vec<IdRecord> = read_records(reader)?;
        Self::from_ids(records.into_iter().map(|r| r.id).collect(), store)
    }

    pub fn from_ids(index: Vec<String>, store: ImageStore) -> Result<Self> {
        ensure_unique_ids(index.iter().map(String::as_str))?;
        Ok(TestSet { store, index })
    }

    /// Sample ids in load order.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn image_store(&self) -> &ImageStore {
        &self.store
    }

    pub fn get_image(&self, id: &str) -> Result<Tensor> {
        self.store.get_image(id)
    }

    pub fn get_images<S: AsRef<str>>(&self, ids: &[S]) -> Result<Tensor> {
        self.store.get_images(ids)
    }

    /// Sequential batches of `batch_size` (the last ones possibly one smaller)
    /// over the whole index.
    pub fn get_generator(&self, batch_size: usize) -> Result<TestSequence<'_>> {
        TestSequence::new(self, batch_size)
    }
}

impl Dataset for TestSet {
    type Item = Tensor;

    fn get(&self, index: usize) -> Result<Self::Item> {
        let id = self.index.get(index).ok_or(CellAtlasError::IndexOutOfBounds {
            index,
            len: self.index.len(),
        })?;
        self.store.get_image(id)
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
#[path = "test_set_test.rs"]
mod tests;
