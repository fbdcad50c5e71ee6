// cellatlas-data/src/datasets/train_set.rs

use super::records::{ensure_unique_ids, read_records, TargetRecord};
use crate::config::{AtlasPaths, SequenceConfig};
use crate::dataset::Dataset;
use crate::image_store::ImageStore;
use crate::samplers::MultilabelStratifiedKFold;
use crate::sequence::TrainSequence;
use cellatlas_core::{
    CellAtlasError, ClassSelector, ClassVocabulary, LabelMatrix, MultiLabelBinarizer, Result,
    Tensor, N_CLASSES,
};
use log::info;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One labelled sample.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSample {
    pub id: String,
    /// `(rows, cols, 4)` image with values in `[0, 1]`.
    pub image: Tensor,
    /// Indicator row over the class vocabulary.
    pub labels: Vec<u8>,
}

/// Rows of the label table selected by [`TrainSet::any`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSubset {
    /// Row positions in the train set, ascending.
    pub indices: Vec<usize>,
    pub ids: Vec<String>,
    pub labels: LabelMatrix,
}

impl LabelSubset {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// The labelled training split: sample index, label matrix and image store.
///
/// Built once from the label file and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TrainSet {
    store: ImageStore,
    index: Vec<String>,
    positions: HashMap<String, usize>,
    labels: LabelMatrix,
    binarizer: MultiLabelBinarizer,
}

impl TrainSet {
    /// Loads `train.csv` and the `train/` image directory below `paths`.
    pub fn open(paths: &AtlasPaths) -> Result<Self> {
        Self::from_csv(paths.train_csv(), ImageStore::new(paths.train_dir()))
    }

    /// Loads the `Id,Target` label file at `label_csv`.
    pub fn from_csv(label_csv: impl AsRef<Path>, store: ImageStore) -> Result<Self> {
        let path = label_csv.as_ref();
        let file = File::open(path).map_err(|e| CellAtlasError::file_access(path, e))?;
        let train = Self::from_reader(file, store)?;
        info!("Loaded {} train samples from {:?}", train.index.len(), path);
        Ok(train)
    }

    pub fn from_reader<R: Read>(reader: R, store: ImageStore) -> Result<Self> {
        Self::from_records(read_records(reader)?, store)
    }

    /// Builds the train set from parsed label records.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::Parse` for a duplicate or empty id, or for an
    /// empty or malformed target. Nothing is built on error.
    pub fn from_records(records: Vec<TargetRecord>, store: ImageStore) -> Result<Self> {
        ensure_unique_ids(records.iter().map(|r| r.id.as_str()))?;

        let binarizer = MultiLabelBinarizer::new(ClassVocabulary::new());
        let rows = records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                binarizer
                    .transform_target(&record.target)
                    .map_err(|e| match e {
                        CellAtlasError::Parse(msg) => CellAtlasError::Parse(format!(
                            "row {} (Id {}): {}",
                            row + 1,
                            record.id,
                            msg
                        )),
                        other => other,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        let labels = LabelMatrix::from_rows(rows, N_CLASSES)?;

        let index: Vec<String> = records.into_iter().map(|r| r.id).collect();
        let positions = index
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        Ok(TrainSet {
            store,
            index,
            positions,
            labels,
            binarizer,
        })
    }

    /// Sample ids in load order.
    pub fn index(&self) -> &[String] {
        &self.index
    }

    /// The full label matrix, one row per entry of `index()`.
    pub fn labels(&self) -> &LabelMatrix {
        &self.labels
    }

    pub fn binarizer(&self) -> &MultiLabelBinarizer {
        &self.binarizer
    }

    pub fn vocabulary(&self) -> &ClassVocabulary {
        self.binarizer.vocabulary()
    }

    pub fn image_store(&self) -> &ImageStore {
        &self.store
    }

    /// Id of the sample at row `row`.
    pub fn id(&self, row: usize) -> Result<&str> {
        self.index
            .get(row)
            .map(String::as_str)
            .ok_or(CellAtlasError::IndexOutOfBounds {
                index: row,
                len: self.index.len(),
            })
    }

    /// Row of the sample called `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Indicator row of the sample called `id`.
    pub fn label_row(&self, id: &str) -> Option<&[u8]> {
        self.position(id).and_then(|row| self.labels.row(row).ok())
    }

    pub fn get_image(&self, id: &str) -> Result<Tensor> {
        self.store.get_image(id)
    }

    pub fn get_images<S: AsRef<str>>(&self, ids: &[S]) -> Result<Tensor> {
        self.store.get_images(ids)
    }

    /// Samples carrying at least one of the selected classes.
    ///
    /// ```ignore
    /// let by_index = train.any(0usize)?;
    /// let by_name = train.any("Nucleoplasm")?;
    /// assert_eq!(by_index, by_name);
    /// ```
    pub fn any(&self, classes: impl Into<ClassSelector>) -> Result<LabelSubset> {
        let columns = classes.into().resolve(self.vocabulary())?;
        let mask = self.labels.any_mask(&columns)?;
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, selected)| **selected)
            .map(|(row, _)| row)
            .collect();
        let ids = indices.iter().map(|&row| self.index[row].clone()).collect();
        let labels = self.labels.select_rows(&indices)?;
        Ok(LabelSubset {
            indices,
            ids,
            labels,
        })
    }

    /// Stratified batch sequence over the given rows.
    pub fn sequence(&self, indices: &[usize], config: &SequenceConfig) -> Result<TrainSequence<'_>> {
        TrainSequence::new(self, indices, config)
    }

    /// Splits the rows into a training and a validation sequence.
    ///
    /// A multi-label stratified k-fold with `floor(1 / (1 - train_portion))`
    /// splits is run over the whole label matrix; its first held-out fold
    /// becomes the validation rows and the remaining rows the training rows.
    /// The validation sequence never augments.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `train_portion` is not in `(0, 1)` or yields fewer
    /// than 2 splits (portions below 0.5), or if there are fewer samples than
    /// splits.
    pub fn train_test_split(
        &self,
        train_portion: f64,
        config: &SequenceConfig,
    ) -> Result<(TrainSequence<'_>, TrainSequence<'_>)> {
        if !(train_portion > 0.0 && train_portion < 1.0) {
            return Err(CellAtlasError::InvalidArgument(format!(
                "train_portion {} not in (0, 1)",
                train_portion
            )));
        }
        let n_splits = (1.0 / (1.0 - train_portion)).floor() as usize;
        let folds = MultilabelStratifiedKFold::new(n_splits)?
            .with_seed(config.seed)
            .test_folds(&self.labels)?;
        let (val_rows, train_rows): (Vec<usize>, Vec<usize>) =
            (0..folds.len()).partition(|&row| folds[row] == 0);
        info!(
            "Split {} samples into {} train / {} validation ({} folds)",
            folds.len(),
            train_rows.len(),
            val_rows.len(),
            n_splits
        );

        let val_config = config.with_augmentation(Default::default());
        let train = TrainSequence::new(self, &train_rows, config)?;
        let validation = TrainSequence::new(self, &val_rows, &val_config)?;
        Ok((train, validation))
    }
}

impl Dataset for TrainSet {
    type Item = TrainSample;

    fn get(&self, index: usize) -> Result<Self::Item> {
        let id = self.id(index)?;
        Ok(TrainSample {
            id: id.to_string(),
            image: self.store.get_image(id)?,
            labels: self.labels.row(index)?.to_vec(),
        })
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}

#[cfg(test)]
#[path = "train_set_test.rs"]
mod tests;
