//! Error types for the forecasting pipeline

use thiserror::Error;

use crate::data::DataError;

/// Errors raised while preparing data, training or evaluating a model
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("window size {window} cannot form a window over {len} observations")]
    InvalidWindowSize { window: usize, len: usize },

    #[error("sequence is empty")]
    EmptySequence,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("training loss became non-finite at epoch {epoch}")]
    NonFiniteLoss { epoch: usize },

    #[error("no hyperparameter combination produced a comparable score")]
    NoViableTrial,

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ForecastError>;
