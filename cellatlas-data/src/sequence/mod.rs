// cellatlas-data/src/sequence/mod.rs

pub mod test_sequence;
pub mod traits;
pub mod train_sequence;

pub use test_sequence::TestSequence;
pub use traits::{BatchIter, BatchSequence};
pub use train_sequence::{TrainBatch, TrainSequence};
