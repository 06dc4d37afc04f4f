//! Exhaustive search over (units, epochs)
//!
//! Every cell trains on the same chronological prefix and is scored by MAPE
//! on the suffix. The winner is the first cell with the strictly lowest
//! score; its model and scaler are re-scored with the full metric bundle.

use super::evaluator::Evaluator;
use super::trainer::{Trainer, TrainerConfig, TrialTrainer};
use crate::config::{GridSearchConfig, HyperParams};
use crate::error::{ForecastError, Result};
use crate::preprocessing::{chronological_split, row_count, MinMaxScaler};
use crate::utils::MetricBundle;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of one grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// Enumeration index, units outer and epochs inner
    pub index: usize,
    pub params: HyperParams,
    /// Test MAPE, absent when the trial failed
    pub mape: Option<f64>,
    pub error: Option<String>,
}

/// The winning cell together with what it fitted
#[derive(Debug, Clone)]
pub struct BestTrial<M> {
    pub index: usize,
    pub params: HyperParams,
    pub mape: f64,
    pub model: M,
    pub scaler: MinMaxScaler,
}

/// Result of a full grid search
#[derive(Debug, Clone)]
pub struct GridSearchReport<M> {
    pub best: BestTrial<M>,
    /// Full metrics of the best model on the test suffix
    pub metrics: MetricBundle,
    /// Every cell in enumeration order
    pub trials: Vec<TrialRecord>,
    pub train_len: usize,
    pub test_len: usize,
}

impl<M> GridSearchReport<M> {
    /// `(mae, mape, mse, rmse)` of the best model
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        self.metrics.as_tuple()
    }

    /// Number of cells that failed
    pub fn failed(&self) -> usize {
        self.trials.iter().filter(|t| t.error.is_some()).count()
    }
}

type TrialOutcome<M> = (usize, HyperParams, Result<(M, MinMaxScaler, f64)>);

/// Grid search controller
pub struct GridSearch<T = Trainer> {
    config: GridSearchConfig,
    trainer: T,
    evaluator: Evaluator,
}

impl GridSearch<Trainer> {
    /// Controller fitting [`SequenceRegressor`](crate::model::SequenceRegressor)s
    pub fn new(config: GridSearchConfig) -> Result<Self> {
        let trainer = Trainer::new(TrainerConfig::from(&config));
        Self::with_trainer(config, trainer)
    }
}

impl<T> GridSearch<T>
where
    T: TrialTrainer + Sync,
    T::Model: Send,
{
    /// Controller using a custom trainer for every cell
    pub fn with_trainer(config: GridSearchConfig, trainer: T) -> Result<Self> {
        config.validate()?;
        let evaluator = Evaluator::new(config.window_size).with_scale(config.metric_scale);
        Ok(Self {
            config,
            trainer,
            evaluator,
        })
    }

    pub fn config(&self) -> &GridSearchConfig {
        &self.config
    }

    fn run_trial(
        &self,
        index: usize,
        total: usize,
        params: HyperParams,
        train: &[f64],
        test: &[f64],
    ) -> Result<(T::Model, MinMaxScaler, f64)> {
        info!("[{}/{}] training {}", index + 1, total, params);
        let (model, scaler) = self.trainer.fit(train, params, self.config.cell_seed(index))?;
        let mape = self.evaluator.evaluate(&model, test, &scaler)?;
        info!("[{}/{}] {} test MAPE {:.4}", index + 1, total, params, mape);
        Ok((model, scaler, mape))
    }

    /// Runs every cell on `series` and re-scores the winner.
    ///
    /// A split part too short for one window is rejected before any
    /// training. Failing cells are logged, recorded and skipped; the search
    /// then fails only when no cell yields a finite-comparable MAPE.
    pub fn run(&self, series: &[f64]) -> Result<GridSearchReport<T::Model>> {
        let (train, test) = chronological_split(series, self.config.split_ratio)?;
        let window = self.config.window_size;
        for part in [train, test] {
            if row_count(part.len(), window) == 0 {
                return Err(ForecastError::InvalidWindowSize {
                    window,
                    len: part.len(),
                });
            }
        }
        let combinations = self.config.combinations();
        let total = combinations.len();

        info!(
            "grid search over {} combinations ({} train / {} test values)",
            total,
            train.len(),
            test.len()
        );

        let outcomes: Vec<TrialOutcome<T::Model>> = if self.config.parallel {
            combinations
                .par_iter()
                .enumerate()
                .map(|(i, &p)| (i, p, self.run_trial(i, total, p, train, test)))
                .collect()
        } else {
            combinations
                .iter()
                .enumerate()
                .map(|(i, &p)| (i, p, self.run_trial(i, total, p, train, test)))
                .collect()
        };

        // Reduced in enumeration order so ties keep the first cell
        let mut best: Option<BestTrial<T::Model>> = None;
        let mut trials = Vec::with_capacity(total);

        for (index, params, outcome) in outcomes {
            match outcome {
                Ok((model, scaler, mape)) => {
                    trials.push(TrialRecord {
                        index,
                        params,
                        mape: Some(mape),
                        error: None,
                    });
                    let best_mape = best.as_ref().map_or(f64::INFINITY, |b| b.mape);
                    if mape < best_mape {
                        best = Some(BestTrial {
                            index,
                            params,
                            mape,
                            model,
                            scaler,
                        });
                    }
                }
                Err(e) => {
                    warn!("skipping {}: {}", params, e);
                    trials.push(TrialRecord {
                        index,
                        params,
                        mape: None,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let best = best.ok_or(ForecastError::NoViableTrial)?;
        info!("best: {} with MAPE {:.4}", best.params, best.mape);

        let metrics = self.evaluator.evaluate_full(&best.model, test, &best.scaler)?;

        Ok(GridSearchReport {
            best,
            metrics,
            trials,
            train_len: train.len(),
            test_len: test.len(),
        })
    }
}
