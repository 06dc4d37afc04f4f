//! # Data preparation
//!
//! Turning a raw scalar series into training material for the recurrent
//! regressor:
//! - Chronological train/test split
//! - Min-max scaling fitted on the training part only
//! - Block windowing into (input, target) rows
//!
//! ```rust
//! use sunspot_rnn::preprocessing::{chronological_split, window, MinMaxScaler};
//!
//! let series: Vec<f64> = (1..=100).map(|v| v as f64).collect();
//! let (train, _test) = chronological_split(&series, 0.8).unwrap();
//!
//! let scaler = MinMaxScaler::fit(train).unwrap();
//! let dataset = window(&scaler.transform(train), 12);
//!
//! assert_eq!(dataset.len(), 6); // floor(79 / 12)
//! ```

mod scaler;
mod split;
mod window;

pub use scaler::MinMaxScaler;
pub use split::chronological_split;
pub use window::{row_count, window, WindowedDataset};
