// cellatlas-core/src/labels/selector.rs

use super::vocabulary::ClassVocabulary;
use crate::error::{CellAtlasError, Result};

/// Selects one or more classes, by column index or by class name.
///
/// Resolved once into a list of column positions before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassSelector {
    Index(usize),
    Indices(Vec<usize>),
    Name(String),
    Names(Vec<String>),
}

impl ClassSelector {
    /// Resolves the selector into column positions of `vocabulary`.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::InvalidClassSelector` for an out-of-range index,
    /// an unknown class name, or an empty list.
    pub fn resolve(&self, vocabulary: &ClassVocabulary) -> Result<Vec<usize>> {
        let columns = match self {
            ClassSelector::Index(i) => vec![check_index(*i, vocabulary)?],
            ClassSelector::Indices(indices) => indices
                .iter()
                .map(|&i| check_index(i, vocabulary))
                .collect::<Result<Vec<_>>>()?,
            ClassSelector::Name(name) => vec![lookup_name(name, vocabulary)?],
            ClassSelector::Names(names) => names
                .iter()
                .map(|n| lookup_name(n, vocabulary))
                .collect::<Result<Vec<_>>>()?,
        };
        if columns.is_empty() {
            return Err(CellAtlasError::InvalidClassSelector(
                "selector names no classes".to_string(),
            ));
        }
        Ok(columns)
    }
}

fn check_index(index: usize, vocabulary: &ClassVocabulary) -> Result<usize> {
    if vocabulary.contains_index(index) {
        Ok(index)
    } else {
        Err(CellAtlasError::InvalidClassSelector(format!(
            "class index {} out of range [0, {})",
            index,
            vocabulary.len()
        )))
    }
}

fn lookup_name(name: &str, vocabulary: &ClassVocabulary) -> Result<usize> {
    vocabulary
        .index_of(name)
        .ok_or_else(|| CellAtlasError::InvalidClassSelector(format!("unknown class '{}'", name)))
}

impl From<usize> for ClassSelector {
    fn from(index: usize) -> Self {
        ClassSelector::Index(index)
    }
}

impl From<Vec<usize>> for ClassSelector {
    fn from(indices: Vec<usize>) -> Self {
        ClassSelector::Indices(indices)
    }
}

impl From<&[usize]> for ClassSelector {
    fn from(indices: &[usize]) -> Self {
        ClassSelector::Indices(indices.to_vec())
    }
}

impl From<&str> for ClassSelector {
    fn from(name: &str) -> Self {
        ClassSelector::Name(name.to_string())
    }
}

impl From<String> for ClassSelector {
    fn from(name: String) -> Self {
        ClassSelector::Name(name)
    }
}

impl From<Vec<String>> for ClassSelector {
    fn from(names: Vec<String>) -> Self {
        ClassSelector::Names(names)
    }
}

impl From<Vec<&str>> for ClassSelector {
    fn from(names: Vec<&str>) -> Self {
        ClassSelector::Names(names.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_index_and_name_agree() {
        let vocab = ClassVocabulary::new();
        assert_eq!(ClassSelector::from(0usize).resolve(&vocab).unwrap(), vec![0]);
        assert_eq!(
            ClassSelector::from("Nucleoplasm").resolve(&vocab).unwrap(),
            vec![0]
        );
        assert_eq!(
            ClassSelector::from(vec!["Nucleoli", "Rods & rings"])
                .resolve(&vocab)
                .unwrap(),
            vec![2, 27]
        );
        assert_eq!(
            ClassSelector::from(vec![3usize, 1]).resolve(&vocab).unwrap(),
            vec![3, 1]
        );
    }

    #[test]
    fn test_resolve_rejects_invalid_selectors() {
        let vocab = ClassVocabulary::new();
        for selector in [
            ClassSelector::Index(28),
            ClassSelector::Indices(vec![1, 99]),
            ClassSelector::Indices(vec![]),
            ClassSelector::Name("Cytoplasm".to_string()),
            ClassSelector::Names(vec![]),
        ] {
            assert!(
                matches!(
                    selector.resolve(&vocab),
                    Err(CellAtlasError::InvalidClassSelector(_))
                ),
                "{:?} should be rejected",
                selector
            );
        }
    }
}
