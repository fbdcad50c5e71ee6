// cellatlas-data/src/lib.rs
//
// Dataset access for the cell-image classification task.
//
// Maps sample ids to band images, binarizes targets, and serves
// label-stratified mini-batches to a training loop:
//
//   TrainSet / TestSet   -- index + labels + ImageStore
//   StratifiedBatcher    -- fixed, label-balanced batch partition
//   TrainSequence / TestSequence -- indexable, restartable batch sequences

pub mod augment;
pub mod config;
pub mod dataset;
pub mod datasets;
pub mod image_store;
pub mod samplers;
pub mod sequence;

pub use augment::Augmentation;
pub use config::{AtlasPaths, AugmentationConfig, SequenceConfig};
pub use dataset::Dataset;
pub use datasets::{LabelSubset, TestSet, TrainSample, TrainSet};
pub use image_store::ImageStore;
pub use samplers::{
    BatchPartition, MultilabelStratifiedKFold, Sampler, SequentialSampler, StratifiedBatcher,
};
pub use sequence::{BatchSequence, TestSequence, TrainBatch, TrainSequence};

pub use cellatlas_core::{CellAtlasError, Channel, ClassSelector, LabelMatrix, Result, Tensor};

#[cfg(test)]
pub(crate) mod test_utils;
