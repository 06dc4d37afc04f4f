//! Grid search configuration

use crate::error::{ForecastError, Result};
use crate::model::{Activations, OptimizerKind};
use serde::{Deserialize, Serialize};

/// Units in which evaluation metrics are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricScale {
    /// Predictions and targets are mapped back through the scaler first
    #[default]
    Original,
    /// Metrics are computed in the [0, 1] scaled space
    Scaled,
}

/// One point of the search grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperParams {
    pub units: usize,
    pub epochs: usize,
}

impl std::fmt::Display for HyperParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "units={} epochs={}", self.units, self.epochs)
    }
}

/// Everything the grid search controller needs besides the series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSearchConfig {
    /// Time steps per input window
    pub window_size: usize,
    /// Candidate hidden unit counts (outer loop)
    pub units_candidates: Vec<usize>,
    /// Candidate epoch counts (inner loop)
    pub epoch_candidates: Vec<usize>,
    /// Windows per weight update
    pub batch_size: usize,
    /// Output layer neurons
    pub dense_units: usize,
    /// Recurrent and output activations
    pub activations: Activations,
    /// Share of the series used for training
    pub split_ratio: f64,
    pub learning_rate: f64,
    pub optimizer: OptimizerKind,
    pub metric_scale: MetricScale,
    /// Base seed; cell `i` uses `seed + i`
    pub seed: Option<u64>,
    /// Run grid cells on the rayon pool
    pub parallel: bool,
    /// Show a progress bar for every fit
    pub show_progress: bool,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            window_size: 12,
            units_candidates: vec![3, 4, 5],
            epoch_candidates: vec![3, 4, 5, 10],
            batch_size: 1,
            dense_units: 1,
            activations: Activations::default(),
            split_ratio: 0.8,
            learning_rate: 0.001,
            optimizer: OptimizerKind::Adam,
            metric_scale: MetricScale::Original,
            seed: None,
            parallel: false,
            show_progress: false,
        }
    }
}

impl GridSearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_units(mut self, units: Vec<usize>) -> Self {
        self.units_candidates = units;
        self
    }

    pub fn with_epochs(mut self, epochs: Vec<usize>) -> Self {
        self.epoch_candidates = epochs;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_activations(mut self, activations: Activations) -> Self {
        self.activations = activations;
        self
    }

    pub fn with_split_ratio(mut self, ratio: f64) -> Self {
        self.split_ratio = ratio;
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

    pub fn with_metric_scale(mut self, scale: MetricScale) -> Self {
        self.metric_scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Every (units, epochs) pair, units outer and epochs inner
    pub fn combinations(&self) -> Vec<HyperParams> {
        self.units_candidates
            .iter()
            .flat_map(|&units| {
                self.epoch_candidates
                    .iter()
                    .map(move |&epochs| HyperParams { units, epochs })
            })
            .collect()
    }

    /// Seed for the grid cell at `index`
    pub fn cell_seed(&self, index: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(index as u64))
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(ForecastError::InvalidConfig("window size must be positive".to_string()));
        }
        if self.units_candidates.is_empty() || self.epoch_candidates.is_empty() {
            return Err(ForecastError::InvalidConfig(
                "candidate lists must not be empty".to_string(),
            ));
        }
        if self.units_candidates.contains(&0) {
            return Err(ForecastError::InvalidConfig("unit counts must be positive".to_string()));
        }
        if self.epoch_candidates.contains(&0) {
            return Err(ForecastError::InvalidConfig("epoch counts must be positive".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ForecastError::InvalidConfig("batch size must be positive".to_string()));
        }
        if self.dense_units == 0 {
            return Err(ForecastError::InvalidConfig("dense units must be positive".to_string()));
        }
        if !(self.split_ratio > 0.0 && self.split_ratio < 1.0) {
            return Err(ForecastError::InvalidConfig(format!(
                "split ratio must lie in (0, 1), got {}",
                self.split_ratio
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ForecastError::InvalidConfig(format!(
                "learning rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridSearchConfig::default();
        assert_eq!(config.window_size, 12);
        assert_eq!(config.units_candidates, vec![3, 4, 5]);
        assert_eq!(config.epoch_candidates, vec![3, 4, 5, 10]);
        assert_eq!(config.batch_size, 1);
        assert_eq!(config.split_ratio, 0.8);
        assert_eq!(config.metric_scale, MetricScale::Original);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_combination_order() {
        let config = GridSearchConfig::new().with_units(vec![3, 4]).with_epochs(vec![5, 10]);
        let combos: Vec<(usize, usize)> =
            config.combinations().iter().map(|p| (p.units, p.epochs)).collect();
        assert_eq!(combos, vec![(3, 5), (3, 10), (4, 5), (4, 10)]);
    }

    #[test]
    fn test_default_grid_size() {
        assert_eq!(GridSearchConfig::default().combinations().len(), 12);
    }

    #[test]
    fn test_cell_seed() {
        assert_eq!(GridSearchConfig::new().cell_seed(3), None);
        let config = GridSearchConfig::new().with_seed(u64::MAX);
        assert_eq!(config.cell_seed(0), Some(u64::MAX));
        assert_eq!(config.cell_seed(1), Some(0));
    }

    #[test]
    fn test_validation() {
        assert!(GridSearchConfig::new().with_window_size(0).validate().is_err());
        assert!(GridSearchConfig::new().with_units(vec![]).validate().is_err());
        assert!(GridSearchConfig::new().with_epochs(vec![3, 0]).validate().is_err());
        assert!(GridSearchConfig::new().with_batch_size(0).validate().is_err());
        assert!(GridSearchConfig::new().with_split_ratio(1.2).validate().is_err());
        assert!(GridSearchConfig::new().with_learning_rate(-1.0).validate().is_err());
    }

    #[test]
    fn test_zero_window_message() {
        let err = GridSearchConfig::new().with_window_size(0).validate().unwrap_err();
        assert!(matches!(err, ForecastError::InvalidConfig(_)));
        assert_eq!(err.to_string(), "invalid configuration: window size must be positive");
    }

    #[test]
    fn test_json_round_trip() {
        let config = GridSearchConfig::new().with_seed(7).with_metric_scale(MetricScale::Scaled);
        let json = serde_json::to_string(&config).unwrap();
        let restored: GridSearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
