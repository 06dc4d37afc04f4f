//! Fits a regressor on the scaled, windowed training prefix

use crate::config::{GridSearchConfig, HyperParams};
use crate::error::{ForecastError, Result};
use crate::model::{Activations, Forecaster, OptimizerKind, RegressorConfig, SequenceRegressor};
use crate::preprocessing::{window, MinMaxScaler};
use log::debug;

/// Settings shared by every fit; only units and epochs vary per trial
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    pub window_size: usize,
    pub dense_units: usize,
    pub activations: Activations,
    pub batch_size: usize,
    pub learning_rate: f64,
    pub optimizer: OptimizerKind,
    pub show_progress: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            window_size: 12,
            dense_units: 1,
            activations: Activations::default(),
            batch_size: 1,
            learning_rate: 0.001,
            optimizer: OptimizerKind::Adam,
            show_progress: false,
        }
    }
}

impl TrainerConfig {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            ..Self::default()
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_activations(mut self, activations: Activations) -> Self {
        self.activations = activations;
        self
    }

    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    fn regressor_config(&self, units: usize) -> RegressorConfig {
        RegressorConfig::new(self.window_size, units)
            .with_dense_units(self.dense_units)
            .with_activations(self.activations)
            .with_learning_rate(self.learning_rate)
            .with_optimizer(self.optimizer)
    }
}

impl From<&GridSearchConfig> for TrainerConfig {
    fn from(config: &GridSearchConfig) -> Self {
        Self {
            window_size: config.window_size,
            dense_units: config.dense_units,
            activations: config.activations,
            batch_size: config.batch_size,
            learning_rate: config.learning_rate,
            optimizer: config.optimizer,
            show_progress: config.show_progress,
        }
    }
}

/// Something the grid search can fit once per hyperparameter cell
pub trait TrialTrainer {
    type Model: Forecaster;

    /// Fits a fresh model on `train`, returning it with the scaler fitted
    /// on the same data.
    fn fit(
        &self,
        train: &[f64],
        params: HyperParams,
        seed: Option<u64>,
    ) -> Result<(Self::Model, MinMaxScaler)>;
}

/// Scales, windows and fits in one call
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Fits a new regressor with `units` hidden neurons for `epochs` passes.
    ///
    /// The returned scaler carries the training statistics and must be the
    /// one used to evaluate the model.
    pub fn train(
        &self,
        train_sequence: &[f64],
        units: usize,
        epochs: usize,
        seed: Option<u64>,
    ) -> Result<(SequenceRegressor, MinMaxScaler)> {
        let window_size = self.config.window_size;
        if window_size == 0 {
            return Err(ForecastError::InvalidWindowSize {
                window: window_size,
                len: train_sequence.len(),
            });
        }

        let scaler = MinMaxScaler::fit(train_sequence)?;
        let scaled = scaler.transform(train_sequence);
        let dataset = window(&scaled, window_size);
        if dataset.is_empty() {
            return Err(ForecastError::InvalidWindowSize {
                window: window_size,
                len: train_sequence.len(),
            });
        }

        debug!(
            "fitting units={} epochs={} on {} windows",
            units,
            epochs,
            dataset.len()
        );

        let mut model = SequenceRegressor::new(self.config.regressor_config(units), seed)?
            .with_progress(self.config.show_progress);
        model.fit(&dataset, epochs, self.config.batch_size)?;

        Ok((model, scaler))
    }
}

impl TrialTrainer for Trainer {
    type Model = SequenceRegressor;

    fn fit(
        &self,
        train: &[f64],
        params: HyperParams,
        seed: Option<u64>,
    ) -> Result<(SequenceRegressor, MinMaxScaler)> {
        self.train(train, params.units, params.epochs, seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<f64> {
        (0..80).map(|i| 50.0 + 30.0 * (i as f64 * 0.3).sin()).collect()
    }

    #[test]
    fn test_train_returns_training_scaler() {
        let data = series();
        let trainer = Trainer::new(TrainerConfig::new(6));
        let (model, scaler) = trainer.train(&data, 3, 2, Some(11)).unwrap();

        let expected = MinMaxScaler::fit(&data).unwrap();
        assert_eq!(scaler, expected);
        assert_eq!(model.config.units, 3);
        assert_eq!(model.config.dense_units, 1);
        assert_eq!(model.loss_history.len(), 2);
    }

    #[test]
    fn test_seeded_trainer_is_deterministic() {
        let data = series();
        let trainer = Trainer::new(TrainerConfig::new(6).with_batch_size(4));
        let (a, _) = trainer.train(&data, 4, 3, Some(5)).unwrap();
        let (b, _) = trainer.train(&data, 4, 3, Some(5)).unwrap();

        assert_eq!(a.loss_history, b.loss_history);
    }

    #[test]
    fn test_short_sequence_is_invalid_window() {
        let trainer = Trainer::new(TrainerConfig::new(12));
        let err = trainer.train(&[1.0; 12], 3, 1, Some(0)).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::InvalidWindowSize { window: 12, len: 12 }
        ));
    }

    #[test]
    fn test_zero_window_is_invalid() {
        let trainer = Trainer::new(TrainerConfig::new(0));
        assert!(matches!(
            trainer.train(&series(), 3, 1, Some(0)),
            Err(ForecastError::InvalidWindowSize { window: 0, .. })
        ));
    }

    #[test]
    fn test_empty_training_sequence() {
        let trainer = Trainer::default();
        assert!(matches!(
            trainer.train(&[], 3, 1, Some(0)),
            Err(ForecastError::EmptySequence)
        ));
    }

    #[test]
    fn test_config_from_grid() {
        let grid = GridSearchConfig::new().with_window_size(6).with_batch_size(8);
        let config = TrainerConfig::from(&grid);
        assert_eq!(config.window_size, 6);
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.learning_rate, grid.learning_rate);
    }
}
