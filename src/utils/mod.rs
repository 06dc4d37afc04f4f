//! # Utilities
//!
//! Error metrics for evaluating forecasts.

mod metrics;

pub use metrics::{mae, mape, mse, rmse, MetricBundle};
