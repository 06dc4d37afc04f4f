//! Regression error metrics

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Mean Squared Error
pub fn mse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let diff = y_true - y_pred;
    diff.mapv(|x| x * x).mean().unwrap_or(0.0)
}

/// Root Mean Squared Error
pub fn rmse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    mse(y_true, y_pred).sqrt()
}

/// Mean Absolute Error
pub fn mae(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let diff = y_true - y_pred;
    diff.mapv(f64::abs).mean().unwrap_or(0.0)
}

/// Mean Absolute Percentage Error, in percent.
///
/// Not guarded against zero true values: those yield `inf` (or `NaN` when
/// the prediction is also zero).
pub fn mape(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let ratios = (y_true - y_pred) / y_true;
    ratios.mapv(f64::abs).mean().unwrap_or(0.0) * 100.0
}

/// MAE, MAPE, MSE and RMSE of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    pub mae: f64,
    pub mape: f64,
    pub mse: f64,
    pub rmse: f64,
}

impl MetricBundle {
    pub fn calculate(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        let mse = mse(y_true, y_pred);
        Self {
            mae: mae(y_true, y_pred),
            mape: mape(y_true, y_pred),
            mse,
            rmse: mse.sqrt(),
        }
    }

    /// `(mae, mape, mse, rmse)`
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.mae, self.mape, self.mse, self.rmse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_mse() {
        let y_true = array![1.0, 2.0, 3.0];
        let y_pred = array![1.1, 2.0, 2.9];

        assert_relative_eq!(mse(&y_true, &y_pred), 0.006666666666666667, epsilon = 1e-10);
    }

    #[test]
    fn test_mae() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![2.0, 2.0, 1.0, 4.0];
        assert_relative_eq!(mae(&y_true, &y_pred), 0.75);
    }

    #[test]
    fn test_mape() {
        let y_true = array![100.0, 50.0];
        let y_pred = array![90.0, 55.0];
        // (10% + 10%) / 2
        assert_relative_eq!(mape(&y_true, &y_pred), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn test_mape_zero_truth_propagates() {
        assert!(mape(&array![0.0, 1.0], &array![0.5, 1.0]).is_infinite());
        assert!(mape(&array![0.0], &array![0.0]).is_nan());
    }

    #[test]
    fn test_bundle_consistency() {
        let y_true = array![3.0, -0.5, 2.0, 7.0];
        let y_pred = array![2.5, 0.0, 2.0, 8.0];
        let bundle = MetricBundle::calculate(&y_true, &y_pred);

        assert_relative_eq!(bundle.rmse, bundle.mse.sqrt());
        assert_relative_eq!(bundle.mse, 0.375);
        assert_relative_eq!(bundle.mae, 0.5);

        let (mae, mape, mse, rmse) = bundle.as_tuple();
        assert_eq!((mae, mape, mse, rmse), (bundle.mae, bundle.mape, bundle.mse, bundle.rmse));
    }
}
