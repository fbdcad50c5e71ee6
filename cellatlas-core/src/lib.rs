// cellatlas-core/src/lib.rs
//
// Core building blocks of the CellAtlas dataset layer.
//
// `cellatlas-data` builds the image store, datasets and batch sequences on
// top of the types declared here.

pub mod channel;
pub mod error;
pub mod labels;
pub mod tensor;

pub use channel::{Channel, IMAGE_COLS, IMAGE_ROWS, N_CHANNELS};
pub use error::{CellAtlasError, Result};
pub use labels::{
    ClassSelector, ClassVocabulary, LabelMatrix, MultiLabelBinarizer, CLASS_NAMES, N_CLASSES,
};
pub use tensor::Tensor;
