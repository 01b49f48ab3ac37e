use rand::Rng;

use crate::config::TrainConfig;
use crate::dataset::Dataset;
use crate::error::{ClassifierError, Result};
use crate::linear_model::{LogisticRegression, bucketize};
use crate::metrics::class_accuracy;
use crate::preprocessing::{LabelEncoder, LabelVocabulary};
use crate::{Matrix, Vector};

/// Outcome of one train-then-evaluate run.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub coefficients: Vector,
    pub intercept: f64,
    pub vocabulary: LabelVocabulary,
    /// Dataset in evaluation (shuffled) order.
    pub dataset: Dataset,
    pub scores: Vector,
    pub predicted: Vec<i64>,
    pub actual: Vec<i64>,
    pub accuracy: f64,
}

impl Evaluation {
    pub fn accuracy_percent(&self) -> f64 {
        self.accuracy * 100.0
    }

    pub fn n_classes(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Encodes `labels`, fits a model on `features`, shuffles the pairs and
/// scores bucketed predictions against bucketed targets.
pub fn evaluate<S, R>(
    features: &Matrix,
    labels: &[S],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Evaluation>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    config.validate()?;
    if labels.is_empty() || features.nrows() == 0 {
        return Err(ClassifierError::InvalidInput("dataset is empty".to_string()));
    }
    if features.nrows() != labels.len() {
        return Err(ClassifierError::mismatch("number of labels", features.nrows(), labels.len()));
    }

    let mut encoder = LabelEncoder::new();
    let targets = encoder.fit_transform(labels)?;
    let vocabulary = encoder
        .into_vocabulary()
        .ok_or(ClassifierError::NotFitted)?;
    let n_classes = vocabulary.len();
    log::info!("{} samples across {} classes", labels.len(), n_classes);

    let mut dataset = Dataset::new(features.clone(), targets)?;

    let mut model = LogisticRegression::from_config(config);
    model.fit(&dataset, rng)?;

    dataset.shuffle(config.shuffle, rng);

    let scores = model.predict_proba(dataset.features())?;
    let predicted: Vec<i64> = scores.iter().map(|&s| bucketize(s, n_classes)).collect();
    let actual: Vec<i64> = dataset
        .targets()
        .iter()
        .map(|&t| bucketize(t, n_classes))
        .collect();
    let accuracy = class_accuracy(&predicted, &actual, n_classes)?;
    log::info!("Accuracy: {:.6}%", accuracy * 100.0);

    let coefficients = model.coefficients.take().ok_or(ClassifierError::NotFitted)?;
    let intercept = model.intercept.unwrap_or(0.0);

    Ok(Evaluation {
        coefficients,
        intercept,
        vocabulary,
        dataset,
        scores,
        predicted,
        actual,
        accuracy,
    })
}
