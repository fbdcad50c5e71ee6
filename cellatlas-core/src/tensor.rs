// cellatlas-core/src/tensor.rs

use crate::error::{CellAtlasError, Result};

/// Calculates the strides for a given shape.
/// Strides represent the number of elements to skip in the flattened data array
/// to move one step along each dimension.
///
/// Example:
/// shape = [2, 3] -> strides = [3, 1]
/// shape = [2, 2, 2] -> strides = [4, 2, 1]
pub fn calculate_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let rank = shape.len();
    let mut strides = vec![1; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// A dense, row-major, CPU `f32` tensor.
///
/// Images are laid out as `(rows, cols, channels)` and batches as
/// `(batch, rows, cols, channels)`, so the channel axis is always the
/// innermost one.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f32>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl Tensor {
    /// Creates a new tensor from a flat data buffer and a shape.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::TensorCreationError` if `data.len()` does not
    /// match the number of elements implied by `shape`.
    pub fn new(data: Vec<f32>, shape: Vec<usize>) -> Result<Self> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(CellAtlasError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        let strides = calculate_strides(&shape);
        Ok(Tensor {
            data,
            shape,
            strides,
        })
    }

    /// Creates a tensor filled with zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        let numel = shape.iter().product();
        Tensor {
            data: vec![0.0; numel],
            shape: shape.to_vec(),
            strides: calculate_strides(shape),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Flat, row-major view of the underlying data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Returns the element at a multi-dimensional index.
    pub fn at(&self, index: &[usize]) -> Result<f32> {
        if index.len() != self.rank() {
            return Err(CellAtlasError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: index.to_vec(),
                operation: "Tensor::at".to_string(),
            });
        }
        let mut offset = 0;
        for (axis, (&i, &dim)) in index.iter().zip(self.shape.iter()).enumerate() {
            if i >= dim {
                return Err(CellAtlasError::IndexOutOfBounds { index: i, len: dim });
            }
            offset += i * self.strides[axis];
        }
        Ok(self.data[offset])
    }

    /// Returns the `index`-th sub-tensor along the leading axis, dropping that axis.
    ///
    /// For a batch of shape `(n, rows, cols, channels)` this yields one image of
    /// shape `(rows, cols, channels)`.
    pub fn index_axis0(&self, index: usize) -> Result<Tensor> {
        let Some((&len, inner_shape)) = self.shape.split_first() else {
            return Err(CellAtlasError::InvalidArgument(
                "index_axis0 on a scalar tensor".to_string(),
            ));
        };
        if index >= len {
            return Err(CellAtlasError::IndexOutOfBounds { index, len });
        }
        let chunk: usize = inner_shape.iter().product();
        let start = index * chunk;
        Tensor::new(self.data[start..start + chunk].to_vec(), inner_shape.to_vec())
    }

    /// Stacks tensors of identical shape along a new axis `dim`.
    ///
    /// `stack(&[a, b], 0)` with `a`, `b` of shape `[r, c]` gives `[2, r, c]`;
    /// `stack(&[a, b], 2)` gives `[r, c, 2]`.
    ///
    /// # Errors
    ///
    /// * `EmptyTensorList` if `tensors` is empty.
    /// * `ShapeMismatch` if the tensors do not all share the same shape.
    /// * `InvalidArgument` if `dim` is greater than the input rank.
    pub fn stack(tensors: &[Tensor], dim: usize) -> Result<Tensor> {
        let first = tensors.first().ok_or(CellAtlasError::EmptyTensorList)?;
        let rank = first.rank();
        if dim > rank {
            return Err(CellAtlasError::InvalidArgument(format!(
                "stack dimension {} out of range for rank {}",
                dim, rank
            )));
        }
        for t in tensors.iter().skip(1) {
            if t.shape != first.shape {
                return Err(CellAtlasError::ShapeMismatch {
                    expected: first.shape.clone(),
                    actual: t.shape.clone(),
                    operation: "Tensor::stack".to_string(),
                });
            }
        }

        let outer: usize = first.shape[..dim].iter().product();
        let inner: usize = first.shape[dim..].iter().product();
        let mut data = Vec::with_capacity(first.numel() * tensors.len());
        for o in 0..outer {
            for t in tensors {
                data.extend_from_slice(&t.data[o * inner..(o + 1) * inner]);
            }
        }

        let mut shape = first.shape.clone();
        shape.insert(dim, tensors.len());
        Tensor::new(data, shape)
    }
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
