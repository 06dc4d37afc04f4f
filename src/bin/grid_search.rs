//! Grid search over hidden units and epochs on the monthly sunspots series
//!
//! Usage: cargo run --release --bin grid_search -- --data monthly-sunspots.csv

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use sunspot_rnn::data::{load_csv, values, SeriesClient, SUNSPOTS_URL};
use sunspot_rnn::model::{Activation, Activations};
use sunspot_rnn::{GridSearch, GridSearchConfig, MetricScale};

#[derive(Parser, Debug)]
#[command(author, version, about = "RNN hyperparameter grid search for a monthly series")]
struct Args {
    /// Local CSV file; downloaded from --url when omitted
    #[arg(short, long)]
    data: Option<String>,

    /// CSV endpoint used when no local file is given
    #[arg(long, default_value = SUNSPOTS_URL)]
    url: String,

    /// Index of the value column
    #[arg(long, default_value = "1")]
    column: usize,

    /// Time steps per window
    #[arg(short, long, default_value = "12")]
    window: usize,

    /// Candidate hidden unit counts
    #[arg(long, value_delimiter = ',', default_value = "3,4,5")]
    units: Vec<usize>,

    /// Candidate epoch counts
    #[arg(long, value_delimiter = ',', default_value = "3,4,5,10")]
    epochs: Vec<usize>,

    #[arg(long, default_value = "1")]
    batch_size: usize,

    #[arg(long, default_value = "0.001")]
    learning_rate: f64,

    /// Share of the series used for training
    #[arg(long, default_value = "0.8")]
    split: f64,

    /// Recurrent layer activation
    #[arg(long, default_value = "tanh")]
    hidden_activation: Activation,

    /// Output layer activation
    #[arg(long, default_value = "tanh")]
    output_activation: Activation,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Train grid cells in parallel
    #[arg(long)]
    parallel: bool,

    /// Report metrics on the scaled [0, 1] values
    #[arg(long)]
    scaled_metrics: bool,

    /// Show a progress bar per fit
    #[arg(long)]
    progress: bool,

    /// Write every trial and the final metrics as JSON
    #[arg(long)]
    report: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let observations = match &args.data {
        Some(path) => {
            println!("Loading data from {}...", path);
            load_csv(path, args.column)?
        }
        None => {
            println!("Downloading data from {}...", args.url);
            SeriesClient::with_url(args.url.as_str()).fetch(args.column).await?
        }
    };
    let series = values(&observations);
    println!("Loaded {} observations", series.len());

    let mut config = GridSearchConfig::new()
        .with_window_size(args.window)
        .with_units(args.units.clone())
        .with_epochs(args.epochs.clone())
        .with_batch_size(args.batch_size)
        .with_learning_rate(args.learning_rate)
        .with_split_ratio(args.split)
        .with_activations(Activations::new(args.hidden_activation, args.output_activation))
        .with_metric_scale(if args.scaled_metrics {
            MetricScale::Scaled
        } else {
            MetricScale::Original
        })
        .parallel(args.parallel)
        .with_progress(args.progress);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    println!(
        "\nSearching {} combinations (window {}, batch {})...\n",
        config.combinations().len(),
        config.window_size,
        config.batch_size
    );

    let search = GridSearch::new(config)?;
    let report = search.run(&series)?;

    println!("{:<8} {:<8} {:>12}", "units", "epochs", "test MAPE");
    for trial in &report.trials {
        match (trial.mape, &trial.error) {
            (Some(mape), _) => println!(
                "{:<8} {:<8} {:>11.4}%",
                trial.params.units, trial.params.epochs, mape
            ),
            (None, Some(err)) => println!(
                "{:<8} {:<8} failed: {}",
                trial.params.units, trial.params.epochs, err
            ),
            (None, None) => {}
        }
    }

    let (mae, mape, mse, rmse) = report.as_tuple();
    println!("\n=== Best Hyperparameters ===");
    println!("Units:  {}", report.best.params.units);
    println!("Epochs: {}", report.best.params.epochs);
    println!("\n=== Test Metrics ===");
    println!("MAE:  {:.4}", mae);
    println!("MAPE: {:.4}%", mape);
    println!("MSE:  {:.4}", mse);
    println!("RMSE: {:.4}", rmse);

    if let Some(path) = &args.report {
        let document = json!({
            "config": search.config(),
            "train_len": report.train_len,
            "test_len": report.test_len,
            "best": {
                "params": report.best.params,
                "mape": report.best.mape,
                "loss_history": report.best.model.loss_history,
            },
            "metrics": report.metrics,
            "trials": report.trials,
        });
        std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
        println!("\nReport saved to {}", path);
    }

    Ok(())
}
