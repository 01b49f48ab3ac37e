use plotly::common::{Marker, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};

use crate::Matrix;
use crate::error::{ClassifierError, Result};
use crate::linear_model::class_index;
use crate::preprocessing::LabelVocabulary;

const UNASSIGNED: &str = "unassigned";

/// First two feature dimensions of every sample, grouped by predicted class.
/// The extra trailing group holds samples whose bucket is not a valid class.
pub fn group_by_class(
    features: &Matrix,
    predicted: &[i64],
    n_classes: usize,
) -> Result<Vec<(Vec<f64>, Vec<f64>)>> {
    if features.ncols() < 2 {
        return Err(ClassifierError::InvalidInput(format!(
            "scatter plot needs at least two feature dimensions, got {}",
            features.ncols()
        )));
    }
    if features.nrows() != predicted.len() {
        return Err(ClassifierError::mismatch(
            "predicted classes",
            features.nrows(),
            predicted.len(),
        ));
    }

    let mut groups = vec![(Vec::new(), Vec::new()); n_classes + 1];
    for (row, &bucket) in features.rows().into_iter().zip(predicted.iter()) {
        let group = class_index(bucket, n_classes).unwrap_or(n_classes);
        groups[group].0.push(row[0]);
        groups[group].1.push(row[1]);
    }
    Ok(groups)
}

/// Scatter of the first two feature dimensions, one marker trace per
/// predicted class.
pub fn scatter_plot(
    features: &Matrix,
    predicted: &[i64],
    vocabulary: &LabelVocabulary,
    title: &str,
) -> Result<Plot> {
    let groups = group_by_class(features, predicted, vocabulary.len())?;

    let mut plot = Plot::new();
    for (code, (xs, ys)) in groups.into_iter().enumerate() {
        if xs.is_empty() {
            continue;
        }
        let name = vocabulary.label(code).unwrap_or(UNASSIGNED).to_string();
        let trace = Scatter::new(xs, ys)
            .mode(Mode::Markers)
            .marker(Marker::new().size(8))
            .name(name);
        plot.add_trace(trace);
    }

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("feature 0"))
        .y_axis(Axis::new().title("feature 1"));
    plot.set_layout(layout);

    Ok(plot)
}
