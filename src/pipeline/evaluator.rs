//! Scores a fitted model on the held-out suffix

use crate::config::MetricScale;
use crate::error::{ForecastError, Result};
use crate::model::Forecaster;
use crate::preprocessing::{window, MinMaxScaler};
use crate::utils::{mape, MetricBundle};
use ndarray::Array1;

/// Windows test data with the training scaler and compares forecasts
/// against targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluator {
    window_size: usize,
    scale: MetricScale,
}

impl Evaluator {
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            scale: MetricScale::default(),
        }
    }

    pub fn with_scale(mut self, scale: MetricScale) -> Self {
        self.scale = scale;
        self
    }

    /// Targets and forecasts for every full window of `test`
    fn targets_and_forecasts<M: Forecaster + ?Sized>(
        &self,
        model: &M,
        test: &[f64],
        scaler: &MinMaxScaler,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        let scaled = scaler.transform(test);
        let dataset = window(&scaled, self.window_size);
        if dataset.is_empty() {
            return Err(ForecastError::InvalidWindowSize {
                window: self.window_size,
                len: test.len(),
            });
        }

        let forecasts = model.forecast(&dataset.inputs)?;
        if forecasts.len() != dataset.len() {
            return Err(ForecastError::ShapeMismatch {
                expected: format!("{} forecasts", dataset.len()),
                actual: format!("{} forecasts", forecasts.len()),
            });
        }

        Ok(match self.scale {
            MetricScale::Scaled => (dataset.targets, forecasts),
            MetricScale::Original => (
                scaler.inverse_transform(&dataset.targets),
                scaler.inverse_transform(&forecasts),
            ),
        })
    }

    /// Mean absolute percentage error on `test`
    pub fn evaluate<M: Forecaster + ?Sized>(
        &self,
        model: &M,
        test: &[f64],
        scaler: &MinMaxScaler,
    ) -> Result<f64> {
        let (y_true, y_pred) = self.targets_and_forecasts(model, test, scaler)?;
        Ok(mape(&y_true, &y_pred))
    }

    /// MAE, MAPE, MSE and RMSE on `test` from a single forward pass
    pub fn evaluate_full<M: Forecaster + ?Sized>(
        &self,
        model: &M,
        test: &[f64],
        scaler: &MinMaxScaler,
    ) -> Result<MetricBundle> {
        let (y_true, y_pred) = self.targets_and_forecasts(model, test, scaler)?;
        Ok(MetricBundle::calculate(&y_true, &y_pred))
    }
}
