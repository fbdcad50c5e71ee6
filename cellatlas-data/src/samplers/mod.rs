// cellatlas-data/src/samplers/mod.rs

pub mod partition;
pub mod sequential_sampler;
pub mod stratified_batcher;
pub mod stratified_kfold;
pub mod traits;

pub use partition::BatchPartition;
pub use sequential_sampler::SequentialSampler;
pub use stratified_batcher::StratifiedBatcher;
pub use stratified_kfold::{Fold, MultilabelStratifiedKFold};
pub use traits::Sampler;
