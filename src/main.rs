use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use scalar_logit::io::load_records;
use scalar_logit::report::scatter_plot;
use scalar_logit::{ShuffleStrategy, TrainConfig, UpdateRule, WeightInit, evaluate};

fn cli() -> Command {
    Command::new("scalar-logit")
        .version(clap::crate_version!())
        .about("Train a scalar-target logistic classifier and report its accuracy")
        .arg(
            Arg::new("rate")
                .long("rate")
                .help("Learning rate")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.01"),
        )
        .arg(
            Arg::new("epochs")
                .long("epochs")
                .help("Number of epochs")
                .value_parser(clap::value_parser!(usize))
                .default_value("5000"),
        )
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .help("Delimited file with feature columns followed by a label column")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .default_value("iris.csv"),
        )
        .arg(
            Arg::new("plot")
                .short('p')
                .long("plot")
                .help("HTML file the prediction scatter plot is written to")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath)
                .default_value("iris_predict.html"),
        )
        .arg(
            Arg::new("no_plot")
                .long("no-plot")
                .help("Skip writing the scatter plot")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for weight initialisation and shuffling")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("intercept")
                .long("intercept")
                .help("Fit an intercept term alongside the feature weights")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("update_rule")
                .long("update-rule")
                .help("Gradient step application: once | per-dimension")
                .default_value("once"),
        )
        .arg(
            Arg::new("init")
                .long("init")
                .help("Initial weights: half-dimension | zeros | <bound>")
                .default_value("half-dimension"),
        )
        .arg(
            Arg::new("shuffle")
                .long("shuffle")
                .help("Evaluation shuffle: swap-any | fisher-yates")
                .default_value("swap-any"),
        )
}

fn parse_option<T>(matches: &ArgMatches, id: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw = matches
        .get_one::<String>(id)
        .with_context(|| format!("missing value for {}", id))?;
    raw.parse::<T>().map_err(anyhow::Error::msg)
}

fn config_from_matches(matches: &ArgMatches) -> Result<TrainConfig> {
    let mut config = TrainConfig::default()
        .learning_rate(*matches.get_one::<f64>("rate").context("missing rate")?)
        .epochs(*matches.get_one::<usize>("epochs").context("missing epochs")?)
        .fit_intercept(matches.get_flag("intercept"))
        .update_rule(parse_option::<UpdateRule>(matches, "update_rule")?)
        .weight_init(parse_option::<WeightInit>(matches, "init")?)
        .shuffle(parse_option::<ShuffleStrategy>(matches, "shuffle")?);
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config = config.seed(*seed);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(
            env_logger::Env::default().filter_or("SCALAR_LOGIT_LOG", "error,scalar_logit=info"),
        )
        .init();

    let matches = cli().get_matches();
    let config = config_from_matches(&matches)?;

    let data_path = matches
        .get_one::<PathBuf>("data")
        .context("missing data path")?;
    let records = load_records(data_path)
        .with_context(|| format!("Failed to load records from {:?}", data_path))?;
    if records.is_empty() {
        bail!("no usable records in {:?}", data_path);
    }

    let mut rng = config.rng();
    let evaluation = evaluate(&records.features, &records.labels, &config, &mut rng)?;
    log::debug!(
        "coefficients {:?}, intercept {}",
        evaluation.coefficients,
        evaluation.intercept
    );

    if evaluation.dataset.n_features() < 2 {
        log::warn!("Skipping scatter plot: needs at least two feature dimensions");
    } else if !matches.get_flag("no_plot") {
        let plot_path = matches
            .get_one::<PathBuf>("plot")
            .context("missing plot path")?;
        let plot = scatter_plot(
            evaluation.dataset.features(),
            &evaluation.predicted,
            &evaluation.vocabulary,
            "Predicted classes over the first two features",
        )?;
        plot.write_html(plot_path);
        log::info!("Wrote scatter plot to {:?}", plot_path);
    }

    println!("{:.6}%", evaluation.accuracy_percent());
    Ok(())
}
