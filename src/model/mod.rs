//! # Recurrent forecasting model
//!
//! A single recurrent layer followed by a dense output layer, trained with
//! backpropagation through time.
//!
//! ## Example
//!
//! ```rust
//! use sunspot_rnn::model::{Forecaster, RegressorConfig, SequenceRegressor};
//! use sunspot_rnn::preprocessing::window;
//!
//! let series: Vec<f64> = (0..60).map(|i| (i as f64 * 0.2).sin() * 0.5 + 0.5).collect();
//! let data = window(&series, 12);
//!
//! let mut model = SequenceRegressor::new(RegressorConfig::new(12, 4), Some(7)).unwrap();
//! model.fit(&data, 5, 1).unwrap();
//!
//! let forecast = model.forecast(&data.inputs).unwrap();
//! assert_eq!(forecast.len(), data.len());
//! ```

mod activation;
mod dense;
mod optimizer;
mod recurrent;
mod regressor;

pub use activation::{Activation, Activations};
pub use dense::{DenseGradients, DenseLayer};
pub use optimizer::{Adam, Optimizer, OptimizerKind, SGD};
pub use recurrent::{RecurrentGradients, RecurrentLayer, RecurrentTrace};
pub use regressor::{RegressorConfig, SequenceRegressor};

use crate::error::Result;
use ndarray::{Array1, Array2, Array3};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

/// A fitted model producing one forecast per input window
pub trait Forecaster {
    /// `inputs` is [rows, window, 1]; returns [rows]
    fn forecast(&self, inputs: &Array3<f64>) -> Result<Array1<f64>>;
}

/// Glorot/Xavier uniform initialisation for a [rows, cols] kernel
pub(crate) fn glorot_uniform<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Array2<f64> {
    let limit = (6.0 / (rows + cols) as f64).sqrt();
    Array2::random_using((rows, cols), Uniform::new(-limit, limit), rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_glorot_limits() {
        let mut rng = StdRng::seed_from_u64(0);
        let w = glorot_uniform(5, 1, &mut rng);
        let limit = (6.0f64 / 6.0).sqrt();

        assert_eq!(w.dim(), (5, 1));
        assert!(w.iter().all(|&v| v.abs() <= limit));
    }
}
