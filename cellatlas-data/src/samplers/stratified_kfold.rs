// cellatlas-data/src/samplers/stratified_kfold.rs
//! # Multi-label stratified k-fold
//!
//! Iterative stratification: folds are filled label by label, starting with
//! the label that has the fewest remaining positive samples, so that rare
//! labels are spread across folds before common ones use up the room.
//!
//! Each fold starts with a demand of `n / k` samples and, for every label,
//! `count(label) / k` positives. A sample of the chosen label goes to the
//! fold with the largest remaining demand for that label; ties go to the
//! fold with the largest remaining overall demand, then to a random fold.
//! Placing a sample decrements the fold's demand for every label the sample
//! carries. Samples left without any positive label are dealt to the folds
//! with the largest remaining overall demand.

use cellatlas_core::{CellAtlasError, LabelMatrix, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// One split of a k-fold: row indices used for training and held out.
///
/// Both lists are ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// K-fold splitter that balances every label's positive frequency across folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultilabelStratifiedKFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl MultilabelStratifiedKFold {
    /// # Errors
    ///
    /// Returns `CellAtlasError::InvalidArgument` if `n_splits < 2`.
    pub fn new(n_splits: usize) -> Result<Self> {
        if n_splits < 2 {
            return Err(CellAtlasError::InvalidArgument(format!(
                "k-fold requires at least 2 splits, got {}",
                n_splits
            )));
        }
        Ok(MultilabelStratifiedKFold {
            n_splits,
            shuffle: false,
            seed: 0,
        })
    }

    /// Shuffle rows before stratifying.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Seed for the shuffle and for random tie-breaking.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Assigns every row of `labels` to a fold in `0..n_splits`.
    ///
    /// Deterministic for a given seed.
    ///
    /// # Errors
    ///
    /// Returns `CellAtlasError::InvalidArgument` if there are fewer rows than
    /// splits.
    pub fn test_folds(&self, labels: &LabelMatrix) -> Result<Vec<usize>> {
        let n_samples = labels.n_rows();
        if self.n_splits > n_samples {
            return Err(CellAtlasError::InvalidArgument(format!(
                "cannot have n_splits={} greater than the number of samples {}",
                self.n_splits, n_samples
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut order: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            order.shuffle(&mut rng);
        }

        let by_position = iterative_stratification(labels, &order, self.n_splits, &mut rng)?;
        let mut folds = vec![0; n_samples];
        for (pos, &row) in order.iter().enumerate() {
            folds[row] = by_position[pos];
        }
        Ok(folds)
    }

    /// Splits `labels` into `n_splits` folds, in fold order.
    pub fn split(&self, labels: &LabelMatrix) -> Result<Vec<Fold>> {
        let folds = self.test_folds(labels)?;
        Ok((0..self.n_splits)
            .map(|k| {
                let (test, train): (Vec<usize>, Vec<usize>) =
                    (0..folds.len()).partition(|&row| folds[row] == k);
                Fold { train, test }
            })
            .collect())
    }
}

/// Returns the fold of each position of `order`.
fn iterative_stratification(
    labels: &LabelMatrix,
    order: &[usize],
    n_splits: usize,
    rng: &mut StdRng,
) -> Result<Vec<usize>> {
    let n_samples = order.len();
    let ratio = 1.0 / n_splits as f64;

    // Positive labels of each position, looked up once.
    let positives: Vec<Vec<usize>> = order
        .iter()
        .map(|&row| labels.positives(row))
        .collect::<Result<_>>()?;

    let mut remaining = labels.class_counts();
    let mut fold_demand = vec![ratio * n_samples as f64; n_splits];
    let mut label_demand: Vec<Vec<f64>> = (0..n_splits)
        .map(|_| remaining.iter().map(|&c| c as f64 * ratio).collect())
        .collect();

    let mut assigned: Vec<Option<usize>> = vec![None; n_samples];
    let mut unassigned = n_samples;

    while unassigned > 0 {
        let fewest = remaining.iter().copied().filter(|&c| c > 0).min();
        let Some(fewest) = fewest else {
            // Only samples without positive labels are left.
            for pos in 0..n_samples {
                if assigned[pos].is_some() {
                    continue;
                }
                let candidates = argmax(&fold_demand, 0..n_splits);
                let fold = pick(&candidates, rng);
                assigned[pos] = Some(fold);
                fold_demand[fold] -= 1.0;
            }
            break;
        };

        let label_candidates: Vec<usize> = (0..remaining.len())
            .filter(|&l| remaining[l] == fewest)
            .collect();
        let label = pick(&label_candidates, rng);

        for pos in 0..n_samples {
            if assigned[pos].is_some() || !positives[pos].contains(&label) {
                continue;
            }
            let demand_for_label: Vec<f64> = label_demand.iter().map(|d| d[label]).collect();
            let mut candidates = argmax(&demand_for_label, 0..n_splits);
            if candidates.len() > 1 {
                let overall: Vec<f64> = candidates.iter().map(|&f| fold_demand[f]).collect();
                candidates = argmax(&overall, 0..candidates.len())
                    .into_iter()
                    .map(|i| candidates[i])
                    .collect();
            }
            let fold = pick(&candidates, rng);

            assigned[pos] = Some(fold);
            unassigned -= 1;
            fold_demand[fold] -= 1.0;
            for &l in &positives[pos] {
                label_demand[fold][l] -= 1.0;
                remaining[l] -= 1;
            }
        }
    }

    Ok(assigned.into_iter().map(|f| f.unwrap_or(0)).collect())
}

/// Positions in `range` holding the maximum of `values`.
fn argmax(values: &[f64], range: std::ops::Range<usize>) -> Vec<usize> {
    let max = range
        .clone()
        .map(|i| values[i])
        .fold(f64::NEG_INFINITY, f64::max);
    range.filter(|&i| values[i] == max).collect()
}

/// Picks one candidate, drawing from `rng` only when there is a tie.
fn pick(candidates: &[usize], rng: &mut StdRng) -> usize {
    match candidates.len() {
        1 => candidates[0],
        n => candidates[rng.gen_range(0..n)],
    }
}

#[cfg(test)]
#[path = "stratified_kfold_test.rs"]
mod tests;
