// cellatlas-data/src/config.rs

use cellatlas_core::{CellAtlasError, Result};
use std::path::{Path, PathBuf};

/// Environment variable holding the dataset root directory.
pub const DATA_DIR_ENV: &str = "CELLATLAS_DATA_DIR";
/// Root used when `CELLATLAS_DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Locations of the dataset files below a root directory.
///
/// Expected layout:
///
/// ```text
/// root/
///   train/{id}_{color}.png
///   test/{id}_{color}.png
///   train.csv
///   sample_submission.csv
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtlasPaths {
    root: PathBuf,
}

impl AtlasPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        AtlasPaths { root: root.into() }
    }

    /// Reads the root from `CELLATLAS_DATA_DIR`, falling back to `./data`.
    pub fn from_env() -> Self {
        let root = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        log::debug!("Using dataset root {:?}", root);
        AtlasPaths { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn train_dir(&self) -> PathBuf {
        self.root.join("train")
    }

    pub fn test_dir(&self) -> PathBuf {
        self.root.join("test")
    }

    pub fn train_csv(&self) -> PathBuf {
        self.root.join("train.csv")
    }

    pub fn sample_submission_csv(&self) -> PathBuf {
        self.root.join("sample_submission.csv")
    }
}

impl Default for AtlasPaths {
    fn default() -> Self {
        AtlasPaths::new(DEFAULT_DATA_DIR)
    }
}

/// Optional random flips applied to materialized train batches.
///
/// All stages are off by default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugmentationConfig {
    pub horizontal_flip: bool,
    pub vertical_flip: bool,
    /// Probability of applying each enabled flip to a sample.
    pub p: f64,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            horizontal_flip: false,
            vertical_flip: false,
            p: 0.5,
        }
    }
}

impl AugmentationConfig {
    /// Both flips enabled with probability 0.5.
    pub fn flips() -> Self {
        Self {
            horizontal_flip: true,
            vertical_flip: true,
            p: 0.5,
        }
    }

    pub fn horizontal_flip(mut self, yes: bool) -> Self {
        self.horizontal_flip = yes;
        self
    }

    pub fn vertical_flip(mut self, yes: bool) -> Self {
        self.vertical_flip = yes;
        self
    }

    pub fn probability(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.horizontal_flip || self.vertical_flip
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.p) {
            return Err(CellAtlasError::InvalidArgument(format!(
                "flip probability {} not in [0, 1]",
                self.p
            )));
        }
        Ok(())
    }
}

/// Configuration of a train batch sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceConfig {
    /// Target batch size; actual stratified batches are approximately this size.
    pub batch_size: usize,
    pub augmentation: AugmentationConfig,
    /// Seed for stratification tie-breaking and augmentation.
    pub seed: u64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            augmentation: AugmentationConfig::default(),
            seed: 0,
        }
    }
}

impl SequenceConfig {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_augmentation(mut self, augmentation: AugmentationConfig) -> Self {
        self.augmentation = augmentation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(CellAtlasError::InvalidArgument(
                "batch_size must be at least 1".to_string(),
            ));
        }
        self.augmentation.validate()
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
