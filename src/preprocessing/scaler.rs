//! Min-max scaling fitted on the training sequence

use crate::error::{ForecastError, Result};
use log::warn;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Min-max scaler onto [0, 1].
///
/// Built only by [`MinMaxScaler::fit`]; the fitted bounds never change.
/// Values outside the fitted range map outside [0, 1] and are not clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
    range: f64,
}

impl MinMaxScaler {
    /// Fits the bounds of `sequence`.
    ///
    /// A constant sequence gets a unit range, so its values all map to 0.0.
    pub fn fit(sequence: &[f64]) -> Result<Self> {
        if sequence.is_empty() {
            return Err(ForecastError::EmptySequence);
        }

        let min = sequence.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = sequence.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        let mut range = max - min;
        if range == 0.0 {
            warn!("constant training sequence ({}), scaling with unit range", min);
            range = 1.0;
        }

        Ok(Self { min, max, range })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// True when the fitted sequence was constant
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    pub fn transform_value(&self, value: f64) -> f64 {
        (value - self.min) / self.range
    }

    pub fn inverse_value(&self, scaled: f64) -> f64 {
        scaled * self.range + self.min
    }

    /// Scales every value with the fitted bounds
    pub fn transform(&self, sequence: &[f64]) -> Vec<f64> {
        sequence.iter().map(|&v| self.transform_value(v)).collect()
    }

    /// Maps scaled values back to original units
    pub fn inverse_transform(&self, scaled: &Array1<f64>) -> Array1<f64> {
        scaled.mapv(|v| self.inverse_value(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bounds_map_exactly() {
        let data = vec![58.0, 62.6, 70.0, 55.7, 85.0, 83.5, 94.8];
        let scaler = MinMaxScaler::fit(&data).unwrap();

        assert_eq!(scaler.transform_value(55.7), 0.0);
        assert_eq!(scaler.transform_value(94.8), 1.0);
        assert!(scaler.transform(&data).iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_round_trip() {
        let data: Vec<f64> = (0..30).map(|i| 10.0 + (i as f64 * 0.7).cos() * 40.0).collect();
        let scaler = MinMaxScaler::fit(&data).unwrap();

        let scaled = Array1::from(scaler.transform(&data));
        let restored = scaler.inverse_transform(&scaled);

        for (a, b) in data.iter().zip(restored.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_test_data_not_clamped() {
        let scaler = MinMaxScaler::fit(&[0.0, 10.0]).unwrap();
        assert_relative_eq!(scaler.transform_value(15.0), 1.5);
        assert_relative_eq!(scaler.transform_value(-5.0), -0.5);
    }

    #[test]
    fn test_constant_sequence() {
        let scaler = MinMaxScaler::fit(&[4.0, 4.0, 4.0]).unwrap();

        assert!(scaler.is_degenerate());
        assert_eq!(scaler.transform(&[4.0, 4.0]), vec![0.0, 0.0]);
        assert_eq!(scaler.inverse_value(0.0), 4.0);
    }

    #[test]
    fn test_empty_sequence() {
        assert!(matches!(
            MinMaxScaler::fit(&[]),
            Err(ForecastError::EmptySequence)
        ));
    }
}
