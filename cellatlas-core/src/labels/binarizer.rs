// cellatlas-core/src/labels/binarizer.rs

use super::vocabulary::ClassVocabulary;
use crate::error::{CellAtlasError, Result};
use log::debug;

/// Converts variable-length sets of class indices into fixed-width 0/1
/// indicator rows over the class vocabulary, and back.
///
/// Unlike a binarizer fitted on observed data, the column order is fixed by
/// the vocabulary, so train and test rows always share the same columns even
/// when some class never occurs in a given label file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiLabelBinarizer {
    vocabulary: ClassVocabulary,
}

impl MultiLabelBinarizer {
    pub fn new(vocabulary: ClassVocabulary) -> Self {
        MultiLabelBinarizer { vocabulary }
    }

    pub fn vocabulary(&self) -> &ClassVocabulary {
        &self.vocabulary
    }

    pub fn n_classes(&self) -> usize {
        self.vocabulary.len()
    }

    /// Parses a raw target string such as `"0 5 27"` into class indices.
    ///
    /// Tokens may be separated by any run of whitespace, so `"0  5"` and
    /// `"0\t5"` both parse as `[0, 5]`. Indices are returned sorted and
    /// deduplicated: `"0 0"` is `[0]`.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::Parse` if the string is empty, contains a
    /// token that is not an integer, or an index outside the vocabulary.
    pub fn parse_target(&self, target: &str) -> Result<Vec<usize>> {
        let mut classes = Vec::new();
        for token in target.split_whitespace() {
            let class: usize = token.parse().map_err(|_| {
                CellAtlasError::Parse(format!(
                    "invalid class index '{}' in target '{}'",
                    token, target
                ))
            })?;
            if !self.vocabulary.contains_index(class) {
                return Err(CellAtlasError::Parse(format!(
                    "class index {} out of range [0, {}) in target '{}'",
                    class,
                    self.n_classes(),
                    target
                )));
            }
            classes.push(class);
        }
        if classes.is_empty() {
            return Err(CellAtlasError::Parse(
                "empty target: every sample needs at least one location label".to_string(),
            ));
        }
        classes.sort_unstable();
        let n_tokens = classes.len();
        classes.dedup();
        if classes.len() < n_tokens {
            debug!("Dropped repeated class indices in target '{}'", target);
        }
        Ok(classes)
    }

    /// Binarizes a set of class indices into an indicator row.
    pub fn transform(&self, classes: &[usize]) -> Result<Vec<u8>> {
        let mut row = vec![0u8; self.n_classes()];
        for &class in classes {
            let cell = row.get_mut(class).ok_or(CellAtlasError::IndexOutOfBounds {
                index: class,
                len: self.vocabulary.len(),
            })?;
            *cell = 1;
        }
        Ok(row)
    }

    /// Parses and binarizes a raw target string in one step.
    pub fn transform_target(&self, target: &str) -> Result<Vec<u8>> {
        let classes = self.parse_target(target)?;
        self.transform(&classes)
    }

    /// Recovers the ascending positive class indices of an indicator row.
    pub fn inverse_transform(&self, row: &[u8]) -> Result<Vec<usize>> {
        if row.len() != self.n_classes() {
            return Err(CellAtlasError::ShapeMismatch {
                expected: vec![self.n_classes()],
                actual: vec![row.len()],
                operation: "MultiLabelBinarizer::inverse_transform".to_string(),
            });
        }
        Ok(row
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(i, _)| i)
            .collect())
    }

    /// Class names of the positive entries of an indicator row.
    pub fn class_names(&self, row: &[u8]) -> Result<Vec<&'static str>> {
        Ok(self
            .inverse_transform(row)?
            .into_iter()
            .filter_map(|i| self.vocabulary.name(i))
            .collect())
    }
}

#[cfg(test)]
#[path = "binarizer_test.rs"]
mod tests;
