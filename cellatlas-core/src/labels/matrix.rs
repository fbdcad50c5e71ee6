// cellatlas-core/src/labels/matrix.rs

use crate::error::{CellAtlasError, Result};
use crate::tensor::Tensor;

/// A dense 0/1 multi-label indicator matrix.
///
/// Rows are samples in dataset load order and columns are classes in
/// vocabulary order. The column count is fixed at construction; every
/// derived matrix (`select_rows`) keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMatrix {
    data: Vec<u8>,
    n_rows: usize,
    n_cols: usize,
}

impl LabelMatrix {
    /// Creates a label matrix from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// * `TensorCreationError` if `data.len() != n_rows * n_cols`.
    /// * `InvalidArgument` if a cell is neither 0 nor 1.
    pub fn new(data: Vec<u8>, n_rows: usize, n_cols: usize) -> Result<Self> {
        if data.len() != n_rows * n_cols {
            return Err(CellAtlasError::TensorCreationError {
                data_len: data.len(),
                shape: vec![n_rows, n_cols],
            });
        }
        if let Some(pos) = data.iter().position(|&v| v > 1) {
            return Err(CellAtlasError::InvalidArgument(format!(
                "label cell ({}, {}) is {}, expected 0 or 1",
                pos / n_cols,
                pos % n_cols,
                data[pos]
            )));
        }
        Ok(LabelMatrix {
            data,
            n_rows,
            n_cols,
        })
    }

    /// Builds a matrix from indicator rows that must all be `n_cols` wide.
    pub fn from_rows(rows: Vec<Vec<u8>>, n_cols: usize) -> Result<Self> {
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(CellAtlasError::ShapeMismatch {
                    expected: vec![n_cols],
                    actual: vec![row.len()],
                    operation: format!("LabelMatrix::from_rows (row {})", i),
                });
            }
            data.extend(row);
        }
        LabelMatrix::new(data, n_rows, n_cols)
    }

    /// A matrix with no rows.
    pub fn empty(n_cols: usize) -> Self {
        LabelMatrix {
            data: Vec::new(),
            n_rows: 0,
            n_cols,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, index: usize) -> Result<&[u8]> {
        if index >= self.n_rows {
            return Err(CellAtlasError::IndexOutOfBounds {
                index,
                len: self.n_rows,
            });
        }
        Ok(&self.data[index * self.n_cols..(index + 1) * self.n_cols])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.n_cols.max(1)).take(self.n_rows)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<u8> {
        if col >= self.n_cols {
            return Err(CellAtlasError::IndexOutOfBounds {
                index: col,
                len: self.n_cols,
            });
        }
        Ok(self.row(row)?[col])
    }

    pub fn column(&self, col: usize) -> Result<Vec<u8>> {
        if col >= self.n_cols {
            return Err(CellAtlasError::IndexOutOfBounds {
                index: col,
                len: self.n_cols,
            });
        }
        Ok(self.rows().map(|row| row[col]).collect())
    }

    /// Ascending column indices set to 1 in row `index`.
    pub fn positives(&self, index: usize) -> Result<Vec<usize>> {
        Ok(self
            .row(index)?
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1)
            .map(|(c, _)| c)
            .collect())
    }

    /// Number of positive rows per column.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_cols];
        for row in self.rows() {
            for (count, &v) in counts.iter_mut().zip(row) {
                *count += v as usize;
            }
        }
        counts
    }

    /// Gathers the given rows, in the given order, into a new matrix.
    pub fn select_rows(&self, indices: &[usize]) -> Result<LabelMatrix> {
        let mut data = Vec::with_capacity(indices.len() * self.n_cols);
        for &i in indices {
            data.extend_from_slice(self.row(i)?);
        }
        Ok(LabelMatrix {
            data,
            n_rows: indices.len(),
            n_cols: self.n_cols,
        })
    }

    /// Row mask that is `true` where at least one of `cols` equals 1.
    pub fn any_mask(&self, cols: &[usize]) -> Result<Vec<bool>> {
        if let Some(&bad) = cols.iter().find(|&&c| c >= self.n_cols) {
            return Err(CellAtlasError::IndexOutOfBounds {
                index: bad,
                len: self.n_cols,
            });
        }
        Ok(self
            .rows()
            .map(|row| cols.iter().any(|&c| row[c] == 1))
            .collect())
    }

    /// Converts to an `f32` tensor of shape `(n_rows, n_cols)`.
    pub fn to_tensor(&self) -> Result<Tensor> {
        let data = self.data.iter().map(|&v| v as f32).collect();
        Tensor::new(data, vec![self.n_rows, self.n_cols])
    }
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod tests;
