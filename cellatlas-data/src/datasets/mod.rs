// cellatlas-data/src/datasets/mod.rs

pub mod records;
pub mod test_set;
pub mod train_set;

pub use test_set::TestSet;
pub use train_set::{LabelSubset, TrainSample, TrainSet};
