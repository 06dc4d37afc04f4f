//! # Sunspot RNN
//!
//! Forecasting a monthly scalar series (sunspot counts) with a small
//! recurrent network, choosing hidden units and training epochs by grid
//! search on a chronological train/test split.
//!
//! ## Modules
//!
//! - `data` - CSV loading and download of the observation series
//! - `preprocessing` - Split, min-max scaling and windowing
//! - `model` - Recurrent layer, dense output and the sequence regressor
//! - `pipeline` - Trainer, evaluator and grid search
//! - `utils` - Error metrics
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sunspot_rnn::data::{values, SeriesClient, DEFAULT_VALUE_COLUMN};
//! use sunspot_rnn::{GridSearch, GridSearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 1. Monthly observations
//!     let observations = SeriesClient::new().fetch(DEFAULT_VALUE_COLUMN).await?;
//!     let series = values(&observations);
//!
//!     // 2. Search units x epochs on an 80/20 split
//!     let search = GridSearch::new(GridSearchConfig::default())?;
//!     let report = search.run(&series)?;
//!
//!     // 3. Metrics of the best model
//!     let (mae, mape, mse, rmse) = report.as_tuple();
//!     println!("{}: mae={} mape={} mse={} rmse={}", report.best.params, mae, mape, mse, rmse);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod preprocessing;
pub mod utils;

pub use config::{GridSearchConfig, HyperParams, MetricScale};
pub use error::{ForecastError, Result};
pub use model::{Forecaster, RegressorConfig, SequenceRegressor};
pub use pipeline::{Evaluator, GridSearch, GridSearchReport, Trainer, TrainerConfig};
pub use preprocessing::{chronological_split, window, MinMaxScaler, WindowedDataset};
pub use utils::MetricBundle;
