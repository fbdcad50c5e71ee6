// cellatlas-core/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for the CellAtlas dataset layer.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum CellAtlasError {
    #[error("File access error for {path:?}: {message}")]
    FileAccess { path: PathBuf, message: String },

    #[error("Unexpected image size for {path:?}: expected {expected:?} (rows, cols), got {actual:?}")]
    ImageShape {
        path: PathBuf,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid class selector: {0}")]
    InvalidClassSelector(String),

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Cannot stack an empty list of tensors")]
    EmptyTensorList,
}

impl CellAtlasError {
    /// Builds a `FileAccess` error from any displayable source error.
    pub fn file_access(path: impl Into<PathBuf>, source: impl std::fmt::Display) -> Self {
        CellAtlasError::FileAccess {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

/// Result alias used across the CellAtlas crates.
pub type Result<T> = std::result::Result<T, CellAtlasError>;
