use crate::Vector;
use crate::error::{ClassifierError, Result};
use crate::linear_model::{bucketize, class_index};

pub fn mean_squared_error(y_true: &Vector, y_pred: &Vector) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(ClassifierError::mismatch("y_pred", y_true.len(), y_pred.len()));
    }

    let diff = y_true - y_pred;
    diff.mapv(|x| x * x)
        .mean()
        .ok_or_else(|| ClassifierError::InvalidInput("no samples to score".to_string()))
}

/// Fraction of samples whose bucketed score equals their bucketed target.
/// Buckets outside `0..n_classes` never match.
pub fn bucket_accuracy(scores: &Vector, targets: &Vector, n_classes: usize) -> Result<f64> {
    if scores.len() != targets.len() {
        return Err(ClassifierError::mismatch("scores", targets.len(), scores.len()));
    }
    let predicted: Vec<i64> = scores.iter().map(|&s| bucketize(s, n_classes)).collect();
    let actual: Vec<i64> = targets.iter().map(|&t| bucketize(t, n_classes)).collect();
    class_accuracy(&predicted, &actual, n_classes)
}

/// Accuracy over already bucketed class indices.
pub fn class_accuracy(predicted: &[i64], actual: &[i64], n_classes: usize) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(ClassifierError::mismatch("predictions", actual.len(), predicted.len()));
    }
    if predicted.is_empty() {
        return Err(ClassifierError::InvalidInput("no samples to score".to_string()));
    }

    let correct = predicted
        .iter()
        .zip(actual.iter())
        .filter(|&(&p, &a)| p == a && class_index(p, n_classes).is_some())
        .count();
    Ok(correct as f64 / predicted.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mean_squared_error() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.0, 2.0, 3.0];

        let mse = mean_squared_error(&y_true, &y_pred).unwrap();
        assert!((mse - 0.0).abs() < 1e-10);

        let mse = mean_squared_error(&array![0.0, 0.0], &array![1.0, 3.0]).unwrap();
        assert!((mse - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_squared_error_mismatch() {
        assert!(mean_squared_error(&array![1.0], &array![1.0, 2.0]).is_err());
        assert!(mean_squared_error(&Vector::zeros(0), &Vector::zeros(0)).is_err());
    }

    #[test]
    fn test_bucket_accuracy() {
        let targets = array![0.0, 0.0, 0.5, 0.5];
        let scores = array![0.1, 0.6, 0.55, 0.3];

        let accuracy = bucket_accuracy(&scores, &targets, 2).unwrap();
        assert!((accuracy - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_buckets_never_match() {
        assert!((class_accuracy(&[3, -1, 1], &[3, -1, 1], 2).unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_input_checks() {
        assert!(bucket_accuracy(&array![0.1], &array![0.0, 0.5], 2).is_err());
        assert!(class_accuracy(&[], &[], 2).is_err());
    }
}
