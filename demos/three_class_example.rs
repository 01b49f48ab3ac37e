use ndarray::array;
use scalar_logit::report::group_by_class;
use scalar_logit::{TrainConfig, WeightInit, evaluate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Three-class scalar logistic example ===\n");

    // Two features: a constant-ish offset and a measurement that grows with the class
    let features = array![
        [1.0, 0.5],
        [1.1, 1.0],
        [0.9, 3.0],
        [1.0, 3.5],
        [1.0, 6.0],
        [1.2, 6.5]
    ];
    let labels = ["small", "small", "medium", "medium", "large", "large"];

    let config = TrainConfig::default()
        .learning_rate(0.5)
        .epochs(5000)
        .fit_intercept(true)
        .weight_init(WeightInit::Zeros)
        .seed(7);
    let mut rng = config.rng();
    let evaluation = evaluate(&features, &labels, &config, &mut rng)?;

    println!("Classes: {:?}", evaluation.vocabulary.labels());
    println!("Coefficients: {:?}", evaluation.coefficients);
    println!("Intercept: {:.4}", evaluation.intercept);

    println!("\nPredictions vs Actual (evaluation order):");
    for (i, ((row, _), (&predicted, &actual))) in evaluation
        .dataset
        .iter()
        .zip(evaluation.predicted.iter().zip(evaluation.actual.iter()))
        .enumerate()
    {
        println!(
            "Sample {}: features={:?}, score={:.3}, predicted={}, actual={}",
            i + 1,
            row.to_vec(),
            evaluation.scores[i],
            predicted,
            actual
        );
    }

    let groups = group_by_class(
        evaluation.dataset.features(),
        &evaluation.predicted,
        evaluation.n_classes(),
    )?;
    for (code, (xs, _)) in groups.iter().enumerate() {
        let name = evaluation.vocabulary.label(code).unwrap_or("unassigned");
        println!("{}: {} points", name, xs.len());
    }

    println!("\nAccuracy: {:.6}%", evaluation.accuracy_percent());
    Ok(())
}
