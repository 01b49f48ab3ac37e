use ndarray::{ArrayView1, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;

use super::decision::bucketize;
use crate::config::{TrainConfig, UpdateRule, WeightInit};
use crate::dataset::Dataset;
use crate::error::{ClassifierError, Result};
use crate::metrics::{bucket_accuracy, mean_squared_error};
use crate::{Matrix, Vector};

const MIN_PROBABILITY: f64 = f64::MIN_POSITIVE;
const MAX_PROBABILITY: f64 = 1.0 - f64::EPSILON / 2.0;

/// Logistic link, kept strictly inside `(0, 1)` for finite input.
pub fn sigmoid(z: f64) -> f64 {
    (1.0 / (1.0 + (-z).exp())).clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

/// Draws `n_weights` initial weights.
pub fn initialize_weights<R: Rng + ?Sized>(
    n_weights: usize,
    init: WeightInit,
    rng: &mut R,
) -> Vector {
    let bound = match init {
        WeightInit::HalfDimension => n_weights as f64 / 4.0,
        WeightInit::Symmetric(h) => h,
        WeightInit::Zeros => 0.0,
    };
    if bound <= 0.0 {
        return Vector::zeros(n_weights);
    }
    Vector::random_using(n_weights, Uniform::new_inclusive(-bound, bound), rng)
}

/// Single-output logistic model fitted to scalar targets in `[0, 1]`.
///
/// Training runs a fixed number of epochs; each epoch visits every example in
/// stored order and applies one gradient step per example:
///
/// ```text
/// p     = sigmoid(w · x)
/// scale = learning_rate * (t - p) * p * (1 - p)
/// w    += scale * x
/// ```
#[derive(Clone, Debug)]
pub struct LogisticRegression {
    pub coefficients: Option<Vector>,
    pub intercept: Option<f64>,
    fit_intercept: bool,
    learning_rate: f64,
    epochs: usize,
    update_rule: UpdateRule,
    weight_init: WeightInit,
    log_every: usize,
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self::from_config(&TrainConfig::default())
    }

    pub fn with_params(learning_rate: f64, epochs: usize, fit_intercept: bool) -> Self {
        Self {
            learning_rate,
            epochs,
            fit_intercept,
            ..Self::new()
        }
    }

    pub fn from_config(config: &TrainConfig) -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept: config.fit_intercept,
            learning_rate: config.learning_rate,
            epochs: config.epochs,
            update_rule: config.update_rule,
            weight_init: config.weight_init,
            log_every: config.log_every,
        }
    }

    pub fn update_rule(mut self, update_rule: UpdateRule) -> Self {
        self.update_rule = update_rule;
        self
    }

    pub fn weight_init(mut self, weight_init: WeightInit) -> Self {
        self.weight_init = weight_init;
        self
    }

    pub fn log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }

    /// Number of weights actually trained: the feature count, plus one when
    /// an intercept is fitted.
    pub fn n_weights(&self, n_features: usize) -> usize {
        n_features + usize::from(self.fit_intercept)
    }

    pub fn fit<R: Rng + ?Sized>(&mut self, dataset: &Dataset, rng: &mut R) -> Result<()> {
        let n_weights = self.n_weights(dataset.n_features());
        let initial = initialize_weights(n_weights, self.weight_init, rng);
        self.fit_from(dataset, initial)
    }

    /// Trains from the given initial weights instead of drawing them. With an
    /// intercept, `initial[0]` is the intercept and the rest are coefficients.
    pub fn fit_from(&mut self, dataset: &Dataset, initial: Vector) -> Result<()> {
        self.validate_params()?;
        let expected = self.n_weights(dataset.n_features());
        if initial.len() != expected {
            return Err(ClassifierError::mismatch(
                "initial weights",
                expected,
                initial.len(),
            ));
        }

        log::info!(
            "Training on {} samples with {} features for {} epochs (learning rate {}, {:?} update)",
            dataset.n_samples(),
            dataset.n_features(),
            self.epochs,
            self.learning_rate,
            self.update_rule
        );

        let weights = if self.fit_intercept {
            let x = Self::with_intercept_column(dataset.features());
            self.gradient_ascent(&x, dataset.targets(), initial)
        } else {
            self.gradient_ascent(dataset.features(), dataset.targets(), initial)
        };

        if weights.iter().any(|w| !w.is_finite()) {
            log::warn!("Training produced non-finite weights: {:?}", weights);
            return Err(ClassifierError::InvalidInput(format!(
                "training diverged to non-finite weights (learning rate {})",
                self.learning_rate
            )));
        }

        if self.fit_intercept {
            self.intercept = Some(weights[0]);
            self.coefficients = Some(weights.slice(s![1..]).to_owned());
        } else {
            self.intercept = Some(0.0);
            self.coefficients = Some(weights);
        }
        Ok(())
    }

    pub fn predict_proba(&self, x: &Matrix) -> Result<Vector> {
        let coeffs = self.coefficients.as_ref().ok_or(ClassifierError::NotFitted)?;
        let intercept = self.intercept.unwrap_or(0.0);

        if x.ncols() != coeffs.len() {
            return Err(ClassifierError::mismatch(
                "number of features",
                coeffs.len(),
                x.ncols(),
            ));
        }

        let linear_combination = x.dot(coeffs) + intercept;
        Ok(linear_combination.mapv(sigmoid))
    }

    pub fn predict_one(&self, features: ArrayView1<'_, f64>) -> Result<f64> {
        let coeffs = self.coefficients.as_ref().ok_or(ClassifierError::NotFitted)?;
        if features.len() != coeffs.len() {
            return Err(ClassifierError::mismatch(
                "number of features",
                coeffs.len(),
                features.len(),
            ));
        }
        Ok(sigmoid(features.dot(coeffs) + self.intercept.unwrap_or(0.0)))
    }

    /// Bucketed class index per row; may fall outside `0..n_classes`.
    pub fn predict(&self, x: &Matrix, n_classes: usize) -> Result<Vec<i64>> {
        let probabilities = self.predict_proba(x)?;
        Ok(probabilities
            .iter()
            .map(|&p| bucketize(p, n_classes))
            .collect())
    }

    pub fn score(&self, dataset: &Dataset, n_classes: usize) -> Result<f64> {
        let probabilities = self.predict_proba(dataset.features())?;
        bucket_accuracy(&probabilities, dataset.targets(), n_classes)
    }

    fn validate_params(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ClassifierError::InvalidInput(format!(
                "learning rate must be a positive finite number, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }

    fn with_intercept_column(x: &Matrix) -> Matrix {
        let mut x_with_intercept = Matrix::ones((x.nrows(), x.ncols() + 1));
        x_with_intercept.slice_mut(s![.., 1..]).assign(x);
        x_with_intercept
    }

    fn gradient_ascent(&self, x: &Matrix, y: &Vector, mut weights: Vector) -> Vector {
        let repeats = match self.update_rule {
            UpdateRule::Once => 1,
            UpdateRule::PerDimension => x.ncols(),
        };

        for epoch in 0..self.epochs {
            for (row, &target) in x.rows().into_iter().zip(y.iter()) {
                let prediction = sigmoid(row.dot(&weights));
                let error = target - prediction;
                let scale = self.learning_rate * error * prediction * (1.0 - prediction);
                for _ in 0..repeats {
                    weights.scaled_add(scale, &row);
                }
            }

            if self.log_every > 0
                && (epoch + 1) % self.log_every == 0
                && log::log_enabled!(log::Level::Debug)
            {
                let predictions = x.dot(&weights).mapv(sigmoid);
                if let Ok(mse) = mean_squared_error(y, &predictions) {
                    log::debug!("epoch {}: mean squared error {:.6}", epoch + 1, mse);
                }
            }
        }

        weights
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}
