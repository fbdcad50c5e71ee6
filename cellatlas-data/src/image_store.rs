// cellatlas-data/src/image_store.rs
//! # ImageStore
//!
//! Resolves `(sample id, channel)` pairs to band images on disk and assembles
//! them into normalized multi-band tensors.
//!
//! Every sample is stored as four single-band 8-bit PNG files named
//! `{id}_{color}.png`, one per [`Channel`]. [`ImageStore::get_image`] stacks
//! them on the innermost axis in channel order and scales pixel values from
//! `0..=255` to `[0, 1]`.

use cellatlas_core::{CellAtlasError, Channel, Result, Tensor, IMAGE_COLS, IMAGE_ROWS, N_CHANNELS};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};

/// Read-only access to a directory of band images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStore {
    root: PathBuf,
    rows: usize,
    cols: usize,
}

impl ImageStore {
    /// Creates a store for `IMAGE_ROWS x IMAGE_COLS` images below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ImageStore {
            root: root.into(),
            rows: IMAGE_ROWS,
            cols: IMAGE_COLS,
        }
    }

    /// Overrides the expected band size. Band images of any other size are
    /// rejected on load.
    pub fn with_image_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Shape of a single image tensor: `(rows, cols, channels)`.
    pub fn image_shape(&self) -> [usize; 3] {
        [self.rows, self.cols, N_CHANNELS]
    }

    /// Path of the band image for `id` and `channel`.
    pub fn path(&self, id: &str, channel: Channel) -> PathBuf {
        self.root.join(format!("{}_{}.png", id, channel.color()))
    }

    /// Like [`ImageStore::path`] but takes a raw channel index in `0..4`.
    pub fn path_for_index(&self, id: &str, channel_ix: usize) -> Result<PathBuf> {
        Ok(self.path(id, Channel::from_index(channel_ix)?))
    }

    /// Loads the 4-band image of sample `id` as a `(rows, cols, 4)` tensor with
    /// values in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// * `FileAccess` if a band is missing, cannot be decoded, or is not a
    ///   single-band 8-bit image.
    /// * `ImageShape` if a band does not have the expected size.
    pub fn get_image(&self, id: &str) -> Result<Tensor> {
        let mut bands = Vec::with_capacity(N_CHANNELS);
        for channel in Channel::ALL {
            bands.push(self.load_band(&self.path(id, channel))?);
        }

        let pixels = self.rows * self.cols;
        let mut data = Vec::with_capacity(pixels * N_CHANNELS);
        for p in 0..pixels {
            for band in &bands {
                data.push(band[p] as f32 / 255.0);
            }
        }
        Tensor::new(data, self.image_shape().to_vec())
    }

    /// Loads several samples into a `(ids.len(), rows, cols, 4)` batch tensor,
    /// in the order given.
    ///
    /// Fails as a whole on the first sample that cannot be loaded.
    pub fn get_images<S: AsRef<str>>(&self, ids: &[S]) -> Result<Tensor> {
        let per_image = self.rows * self.cols * N_CHANNELS;
        let mut data = Vec::with_capacity(ids.len() * per_image);
        for id in ids {
            data.extend(self.get_image(id.as_ref())?.into_data());
        }
        let mut shape = vec![ids.len()];
        shape.extend(self.image_shape());
        Tensor::new(data, shape)
    }

    fn load_band(&self, path: &Path) -> Result<Vec<u8>> {
        let img = image::open(path).map_err(|e| CellAtlasError::file_access(path, e))?;
        let (width, height) = img.dimensions();
        let actual = (height, width);
        let expected = (self.rows as u32, self.cols as u32);
        if actual != expected {
            return Err(CellAtlasError::ImageShape {
                path: path.to_path_buf(),
                expected,
                actual,
            });
        }
        match img {
            DynamicImage::ImageLuma8(buf) => Ok(buf.into_raw()),
            other => Err(CellAtlasError::FileAccess {
                path: path.to_path_buf(),
                message: format!(
                    "expected a single-band 8-bit image, got {:?}",
                    other.color()
                ),
            }),
        }
    }
}

#[cfg(test)]
#[path = "image_store_test.rs"]
mod tests;
