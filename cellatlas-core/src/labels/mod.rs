// cellatlas-core/src/labels/mod.rs

pub mod binarizer;
pub mod matrix;
pub mod selector;
pub mod vocabulary;

pub use binarizer::MultiLabelBinarizer;
pub use matrix::LabelMatrix;
pub use selector::ClassSelector;
pub use vocabulary::{ClassVocabulary, CLASS_NAMES, N_CLASSES};
