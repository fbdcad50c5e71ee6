// cellatlas-core/src/labels/vocabulary.rs

/// Number of subcellular location classes.
pub const N_CLASSES: usize = 28;

/// Subcellular locations a protein of interest can reside in.
///
/// The position of a name in this array is its class index and the column
/// of that class in every label matrix.
pub const CLASS_NAMES: [&str; N_CLASSES] = [
    "Nucleoplasm",
    "Nuclear membrane",
    "Nucleoli",
    "Nucleoli fibrillar center",
    "Nuclear speckles",
    "Nuclear bodies",
    "Endoplasmic reticulum",
    "Golgi apparatus",
    "Peroxisomes",
    "Endosomes",
    "Lysosomes",
    "Intermediate filaments",
    "Actin filaments",
    "Focal adhesion sites",
    "Microtubules",
    "Microtubule ends",
    "Cytokinetic bridge",
    "Mitotic spindle",
    "Microtubule organizing center",
    "Centrosome",
    "Lipid droplets",
    "Plasma membrane",
    "Cell junctions",
    "Mitochondria",
    "Aggresome",
    "Cytosol",
    "Cytoplasmic bodies",
    "Rods & rings",
];

/// The fixed, ordered class vocabulary.
///
/// Immutable by construction: every `ClassVocabulary` value refers to the
/// same `CLASS_NAMES` table, so column order can never drift between the
/// train and test label contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassVocabulary;

impl ClassVocabulary {
    pub fn new() -> Self {
        ClassVocabulary
    }

    pub fn len(&self) -> usize {
        N_CLASSES
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn names(&self) -> &'static [&'static str] {
        &CLASS_NAMES
    }

    /// Class name at column `index`, if any.
    pub fn name(&self, index: usize) -> Option<&'static str> {
        CLASS_NAMES.get(index).copied()
    }

    /// Column of the class called `name` (exact match).
    pub fn index_of(&self, name: &str) -> Option<usize> {
        CLASS_NAMES.iter().position(|&n| n == name)
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < N_CLASSES
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> {
        CLASS_NAMES.iter().copied().enumerate()
    }
}
