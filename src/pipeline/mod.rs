//! # Training and model selection
//!
//! - [`Trainer`]: scaler fit, windowing and regressor fit on a training prefix
//! - [`Evaluator`]: MAPE or the full metric bundle on a test suffix
//! - [`GridSearch`]: one train/evaluate pass per (units, epochs) cell
//!
//! ```rust,no_run
//! use sunspot_rnn::config::GridSearchConfig;
//! use sunspot_rnn::pipeline::GridSearch;
//!
//! let series: Vec<f64> = (0..400).map(|i| 80.0 + 60.0 * (i as f64 / 20.0).sin()).collect();
//! let search = GridSearch::new(GridSearchConfig::default().with_seed(42)).unwrap();
//! let report = search.run(&series).unwrap();
//!
//! let (mae, mape, mse, rmse) = report.as_tuple();
//! println!("{} -> {:.3} {:.3}% {:.3} {:.3}", report.best.params, mae, mape, mse, rmse);
//! ```

mod evaluator;
mod grid_search;
mod trainer;

pub use evaluator::Evaluator;
pub use grid_search::{BestTrial, GridSearch, GridSearchReport, TrialRecord};
pub use trainer::{Trainer, TrainerConfig, TrialTrainer};
