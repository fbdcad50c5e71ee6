// cellatlas-data/src/augment.rs
//
// Random flips for train batches.
//
// Operates on materialized batches in (n, rows, cols, channels) layout. Each
// sample is flipped independently. Disabled unless the sequence config
// enables a stage.

use crate::config::AugmentationConfig;
use cellatlas_core::{CellAtlasError, Result, Tensor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Augmentation {
    config: AugmentationConfig,
}

impl Augmentation {
    pub fn new(config: AugmentationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Augmentation { config })
    }

    pub fn config(&self) -> &AugmentationConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// RNG for batch `batch_index`, fixed by the sequence seed so that
    /// re-reading a batch repeats the same flips.
    pub fn batch_rng(seed: u64, batch_index: usize) -> StdRng {
        let mix = (batch_index as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        StdRng::seed_from_u64(seed ^ mix)
    }

    /// Applies the enabled flips to every sample of `batch` in place.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::ShapeMismatch` if `batch` is not rank 4.
    pub fn apply<R: Rng>(&self, batch: &mut Tensor, rng: &mut R) -> Result<()> {
        let (n, rows, cols, channels) = match *batch.shape() {
            [n, rows, cols, channels] => (n, rows, cols, channels),
            _ => {
                return Err(CellAtlasError::ShapeMismatch {
                    expected: vec![0, 0, 0, 0],
                    actual: batch.shape().to_vec(),
                    operation: "Augmentation::apply (expected rank 4)".to_string(),
                })
            }
        };
        let per_sample = rows * cols * channels;
        if per_sample == 0 {
            return Ok(());
        }
        let data = batch.data_mut();
        for sample in data.chunks_exact_mut(per_sample).take(n) {
            if self.config.horizontal_flip && rng.gen::<f64>() < self.config.p {
                flip_horizontal(sample, rows, cols, channels);
            }
            if self.config.vertical_flip && rng.gen::<f64>() < self.config.p {
                flip_vertical(sample, rows, cols, channels);
            }
        }
        Ok(())
    }
}

/// Mirrors an image left to right.
fn flip_horizontal(img: &mut [f32], rows: usize, cols: usize, channels: usize) {
    for r in 0..rows {
        for c in 0..cols / 2 {
            let left = (r * cols + c) * channels;
            let right = (r * cols + (cols - 1 - c)) * channels;
            for ch in 0..channels {
                img.swap(left + ch, right + ch);
            }
        }
    }
}

/// Mirrors an image top to bottom.
fn flip_vertical(img: &mut [f32], rows: usize, cols: usize, channels: usize) {
    let row_len = cols * channels;
    for r in 0..rows / 2 {
        let (top, bottom) = img.split_at_mut((rows - 1 - r) * row_len);
        top[r * row_len..(r + 1) * row_len].swap_with_slice(&mut bottom[..row_len]);
    }
}
