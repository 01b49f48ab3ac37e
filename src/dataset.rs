use ndarray::ArrayView1;
use rand::Rng;

use crate::config::ShuffleStrategy;
use crate::error::{ClassifierError, Result};
use crate::preprocessing::LabelVocabulary;
use crate::{Matrix, Vector};

/// Feature rows paired with normalized targets. Row `i` of `features` always
/// belongs to `targets[i]`; the only mutation is a paired swap.
#[derive(Clone, Debug)]
pub struct Dataset {
    features: Matrix,
    targets: Vector,
}

impl Dataset {
    pub fn new(features: Matrix, targets: Vector) -> Result<Self> {
        if features.nrows() != targets.len() {
            return Err(ClassifierError::mismatch(
                "number of targets",
                features.nrows(),
                targets.len(),
            ));
        }
        if features.nrows() == 0 {
            return Err(ClassifierError::InvalidInput("dataset is empty".to_string()));
        }
        if features.ncols() == 0 {
            return Err(ClassifierError::InvalidInput(
                "feature vectors must have at least one dimension".to_string(),
            ));
        }
        if features.iter().any(|v| !v.is_finite()) {
            return Err(ClassifierError::InvalidInput(
                "features must be finite".to_string(),
            ));
        }
        if let Some(t) = targets.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(ClassifierError::InvalidInput(format!(
                "targets must lie in [0, 1], got {}",
                t
            )));
        }

        Ok(Self { features, targets })
    }

    /// Builds a dataset from raw feature rows, checking every row has the
    /// width of the first one.
    pub fn from_rows(rows: &[Vec<f64>], targets: Vector) -> Result<Self> {
        let n_features = rows.first().map(Vec::len).unwrap_or(0);
        let mut flat = Vec::with_capacity(rows.len() * n_features);
        for row in rows {
            if row.len() != n_features {
                return Err(ClassifierError::mismatch(
                    "feature vector",
                    n_features,
                    row.len(),
                ));
            }
            flat.extend_from_slice(row);
        }
        let features = Matrix::from_shape_vec((rows.len(), n_features), flat)
            .map_err(|e| ClassifierError::InvalidInput(e.to_string()))?;
        Self::new(features, targets)
    }

    pub fn from_labels<S: AsRef<str>>(
        features: Matrix,
        labels: &[S],
        vocabulary: &LabelVocabulary,
    ) -> Result<Self> {
        let targets = labels
            .iter()
            .map(|label| vocabulary.encode(label.as_ref()))
            .collect::<Result<Vec<f64>>>()?;
        Self::new(features, Vector::from(targets))
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    pub fn features(&self) -> &Matrix {
        &self.features
    }

    pub fn targets(&self) -> &Vector {
        &self.targets
    }

    pub fn sample(&self, i: usize) -> (ArrayView1<'_, f64>, f64) {
        (self.features.row(i), self.targets[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, f64)> + '_ {
        self.features.rows().into_iter().zip(self.targets.iter().copied())
    }

    pub fn into_parts(self) -> (Matrix, Vector) {
        (self.features, self.targets)
    }

    /// Single pass over `0..N`, swapping each index with a random partner.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, strategy: ShuffleStrategy, rng: &mut R) {
        let n = self.n_samples();
        for i in 0..n {
            let j = match strategy {
                ShuffleStrategy::SwapAny => rng.gen_range(0..n),
                ShuffleStrategy::FisherYates => rng.gen_range(i..n),
            };
            self.swap(i, j);
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for k in 0..self.features.ncols() {
            self.features.swap((i, k), (j, k));
        }
        self.targets.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn sorted_pairs(dataset: &Dataset) -> Vec<(f64, Vec<f64>)> {
        let mut pairs: Vec<(f64, Vec<f64>)> = dataset
            .iter()
            .map(|(row, target)| (target, row.to_vec()))
            .collect();
        pairs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        pairs
    }

    #[test]
    fn test_dataset_creation() {
        let features = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let targets = array![0.0, 0.5, 0.5];

        let dataset = Dataset::new(features, targets).unwrap();
        assert_eq!(dataset.n_samples(), 3);
        assert_eq!(dataset.n_features(), 2);
        let (row, target) = dataset.sample(1);
        assert_eq!(row.to_vec(), vec![3.0, 4.0]);
        assert!((target - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_dimension_mismatch() {
        let features = array![[1.0, 2.0], [3.0, 4.0]];
        let targets = array![0.0, 0.5, 0.5];
        assert!(matches!(
            Dataset::new(features, targets),
            Err(ClassifierError::DimensionMismatch { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn test_ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Dataset::from_rows(&rows, array![0.0, 0.5]),
            Err(ClassifierError::DimensionMismatch { expected: 2, found: 1, .. })
        ));
    }

    #[test]
    fn test_empty_dataset() {
        let features = Matrix::zeros((0, 3));
        let targets = Vector::zeros(0);
        assert!(matches!(
            Dataset::new(features, targets),
            Err(ClassifierError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_targets_out_of_range() {
        let features = array![[1.0], [2.0]];
        assert!(Dataset::new(features, array![0.0, 1.5]).is_err());
    }

    #[test]
    fn test_from_labels() {
        let vocabulary = LabelVocabulary::build(&["x", "y"]);
        let features = array![[1.0], [2.0], [3.0]];
        let dataset =
            Dataset::from_labels(features.clone(), &["y", "x", "y"], &vocabulary).unwrap();
        assert_eq!(dataset.targets(), &array![0.5, 0.0, 0.5]);
        assert!(Dataset::from_labels(features, &["y", "x", "z"], &vocabulary).is_err());
    }

    #[test]
    fn test_shuffle_preserves_pairs() {
        let features = array![
            [1.0, 10.0],
            [2.0, 20.0],
            [3.0, 30.0],
            [4.0, 40.0],
            [5.0, 50.0],
            [6.0, 60.0]
        ];
        let targets = array![0.0, 0.25, 0.5, 0.75, 0.0, 0.25];
        let original = Dataset::new(features, targets).unwrap();

        for strategy in [ShuffleStrategy::SwapAny, ShuffleStrategy::FisherYates] {
            for seed in 0..20 {
                let mut shuffled = original.clone();
                shuffled.shuffle(strategy, &mut StdRng::seed_from_u64(seed));
                assert_eq!(sorted_pairs(&shuffled), sorted_pairs(&original));
                for (row, target) in shuffled.iter() {
                    let position = original
                        .iter()
                        .position(|(r, _)| r == row)
                        .unwrap();
                    assert!((original.targets()[position] - target).abs() < 1e-12);
                }
            }
        }
    }

    fn first_column(dataset: &Dataset) -> Vec<f64> {
        dataset.features().column(0).to_vec()
    }

    #[test]
    fn test_swap_any_draws_from_whole_range() {
        // An all-zero source makes every draw the lower bound of its range.
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let targets = array![0.0, 0.25, 0.5, 0.75];
        let mut dataset = Dataset::new(features, targets).unwrap();
        dataset.shuffle(ShuffleStrategy::SwapAny, &mut StepRng::new(0, 0));

        // j = 0 for every i: later rows are swapped back into the visited slot 0.
        assert_eq!(first_column(&dataset), vec![3.0, 0.0, 1.0, 2.0]);
        assert_eq!(dataset.targets(), &array![0.75, 0.0, 0.25, 0.5]);
    }

    #[test]
    fn test_fisher_yates_draws_from_remaining_range() {
        let features = array![[0.0], [1.0], [2.0], [3.0]];
        let targets = array![0.0, 0.25, 0.5, 0.75];
        let mut dataset = Dataset::new(features, targets).unwrap();
        dataset.shuffle(ShuffleStrategy::FisherYates, &mut StepRng::new(0, 0));

        // j = i for every i: nothing moves.
        assert_eq!(first_column(&dataset), vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(dataset.targets(), &array![0.0, 0.25, 0.5, 0.75]);
    }

    fn seeded_permutation(n: usize, strategy: ShuffleStrategy, seed: u64) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..n).collect();
        for i in 0..n {
            let low = match strategy {
                ShuffleStrategy::SwapAny => 0,
                ShuffleStrategy::FisherYates => i,
            };
            order.swap(i, rng.gen_range(low..n));
        }
        order
    }

    #[test]
    fn test_shuffle_follows_seeded_draws() {
        let n = 9;
        let features = Matrix::from_shape_fn((n, 1), |(i, _)| i as f64);
        let targets = Vector::from_shape_fn(n, |i| i as f64 / n as f64);
        for strategy in [ShuffleStrategy::SwapAny, ShuffleStrategy::FisherYates] {
            for seed in 0..10 {
                let mut dataset = Dataset::new(features.clone(), targets.clone()).unwrap();
                dataset.shuffle(strategy, &mut StdRng::seed_from_u64(seed));

                let expected = seeded_permutation(n, strategy, seed);
                let rows: Vec<usize> = first_column(&dataset).iter().map(|&v| v as usize).collect();
                assert_eq!(rows, expected, "{:?} seed {}", strategy, seed);
            }
        }
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let features = Matrix::from_shape_fn((10, 2), |(i, j)| (i * 2 + j) as f64);
        let targets = Vector::from_shape_fn(10, |i| (i % 4) as f64 / 4.0);
        let mut a = Dataset::new(features.clone(), targets.clone()).unwrap();
        let mut b = Dataset::new(features, targets).unwrap();
        a.shuffle(ShuffleStrategy::SwapAny, &mut StdRng::seed_from_u64(3));
        b.shuffle(ShuffleStrategy::SwapAny, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.features(), b.features());
        assert_eq!(a.targets(), b.targets());
    }

    #[test]
    fn test_shuffle_single_sample() {
        let mut dataset = Dataset::new(array![[7.0, 8.0]], array![0.0]).unwrap();
        dataset.shuffle(ShuffleStrategy::SwapAny, &mut StdRng::seed_from_u64(1));
        assert_eq!(dataset.features(), &array![[7.0, 8.0]]);
    }
}
