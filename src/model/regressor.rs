//! Recurrent sequence regressor
//!
//! One recurrent layer reads a window of scalars step by step; its final
//! hidden state feeds a dense output layer that produces the forecast.
//! Trained with mean squared error and backpropagation through time.

use super::activation::Activations;
use super::dense::{DenseGradients, DenseLayer};
use super::optimizer::{Optimizer, OptimizerKind};
use super::recurrent::{RecurrentGradients, RecurrentLayer};
use super::Forecaster;
use crate::error::{ForecastError, Result};
use crate::preprocessing::WindowedDataset;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use ndarray::{Array1, Array2, Array3, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar features per time step
const INPUT_SIZE: usize = 1;

/// Architecture and optimisation settings of one regressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressorConfig {
    /// Time steps per input window
    pub window_size: usize,
    /// Hidden units of the recurrent layer
    pub units: usize,
    /// Neurons of the output layer
    pub dense_units: usize,
    /// Recurrent and output activations
    pub activations: Activations,
    pub learning_rate: f64,
    pub optimizer: OptimizerKind,
}

impl RegressorConfig {
    pub fn new(window_size: usize, units: usize) -> Self {
        Self {
            window_size,
            units,
            dense_units: 1,
            activations: Activations::default(),
            learning_rate: 0.001,
            optimizer: OptimizerKind::Adam,
        }
    }

    pub fn with_dense_units(mut self, dense_units: usize) -> Self {
        self.dense_units = dense_units;
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

    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(ForecastError::InvalidConfig("window size must be positive".to_string()));
        }
        if self.units == 0 || self.dense_units == 0 {
            return Err(ForecastError::InvalidConfig(
                "layers need at least one unit".to_string(),
            ));
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

/// Optimizer state per parameter group
struct ParameterOptimizers {
    /// W_ih and b_h
    input: Box<dyn Optimizer>,
    /// W_hh
    recurrent: Box<dyn Optimizer>,
    /// Output weights and biases
    output: Box<dyn Optimizer>,
}

impl ParameterOptimizers {
    fn new(kind: OptimizerKind, learning_rate: f64) -> Self {
        let template = kind.build(learning_rate);
        Self {
            input: template.clone_box(),
            recurrent: template.clone_box(),
            output: template,
        }
    }
}

/// Recurrent regressor mapping a window of past values to the next value
pub struct SequenceRegressor {
    pub config: RegressorConfig,
    recurrent: RecurrentLayer,
    output: DenseLayer,
    optimizers: ParameterOptimizers,
    rng: StdRng,
    show_progress: bool,
    /// Mean training loss per epoch
    pub loss_history: Vec<f64>,
}

impl SequenceRegressor {
    /// Builds a freshly initialised regressor.
    ///
    /// `seed` fixes weight initialisation and the per-epoch sample order.
    /// Without one the generator is seeded from OS entropy and runs are not
    /// reproducible.
    pub fn new(config: RegressorConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let recurrent = RecurrentLayer::new(
            INPUT_SIZE,
            config.units,
            config.activations.hidden,
            &mut rng,
        );
        let output = DenseLayer::new(
            config.units,
            config.dense_units,
            config.activations.output,
            &mut rng,
        );
        let optimizers = ParameterOptimizers::new(config.optimizer, config.learning_rate);

        Ok(Self {
            config,
            recurrent,
            output,
            optimizers,
            rng,
            show_progress: false,
            loss_history: Vec::new(),
        })
    }

    /// Shows an epoch progress bar during [`fit`](Self::fit)
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Get total number of parameters
    pub fn num_parameters(&self) -> usize {
        self.recurrent.num_parameters() + self.output.num_parameters()
    }

    fn check_inputs(&self, inputs: &Array3<f64>) -> Result<()> {
        let shape = inputs.shape();
        if shape[1] != self.config.window_size || shape[2] != INPUT_SIZE {
            return Err(ForecastError::ShapeMismatch {
                expected: format!("[rows, {}, {}]", self.config.window_size, INPUT_SIZE),
                actual: format!("{:?}", shape),
            });
        }
        Ok(())
    }

    /// Forward pass over every window [rows, window, 1] -> [rows, dense_units]
    pub fn predict(&self, inputs: &Array3<f64>) -> Result<Array2<f64>> {
        self.check_inputs(inputs)?;

        let rows = inputs.shape()[0];
        let mut outputs = Array2::zeros((rows, self.config.dense_units));

        for (b, window) in inputs.axis_iter(Axis(0)).enumerate() {
            let hidden = self.recurrent.last_state(window);
            outputs.row_mut(b).assign(&self.output.forward(&hidden));
        }

        Ok(outputs)
    }

    /// Mean squared error over a dataset
    pub fn loss(&self, data: &WindowedDataset) -> Result<f64> {
        let predictions = self.predict(&data.inputs)?;
        let mut total = 0.0;
        for (row, &target) in predictions.rows().into_iter().zip(data.targets.iter()) {
            total += row.iter().map(|&y| (y - target).powi(2)).sum::<f64>();
        }
        Ok(total / predictions.len().max(1) as f64)
    }

    /// Gradient step on one mini-batch; returns the batch loss
    fn train_batch(&mut self, data: &WindowedDataset, batch: &[usize]) -> f64 {
        let mut rec_grads = RecurrentGradients::zeros(&self.recurrent);
        let mut out_grads = DenseGradients::zeros(&self.output);
        let n = (batch.len() * self.config.dense_units) as f64;
        let mut loss = 0.0;

        for &idx in batch {
            let trace = self.recurrent.forward(data.inputs.index_axis(Axis(0), idx));
            let hidden = trace.final_state();
            let pre = self.output.pre_activation(hidden);
            let error = self.output.activation.forward(&pre) - data.targets[idx];

            loss += error.mapv(|e| e * e).sum();

            let d_out = &error * 2.0;
            let d_hidden = self.output.backward(hidden, &pre, &d_out, &mut out_grads);
            self.recurrent.backward(&trace, &d_hidden, &mut rec_grads);
        }

        rec_grads.scale(1.0 / n);
        out_grads.scale(1.0 / n);

        let opt = &mut self.optimizers;
        opt.input.update_weights(&mut self.recurrent.w_ih, &rec_grads.w_ih);
        opt.input.update_biases(&mut self.recurrent.b_h, &rec_grads.b_h);
        opt.recurrent.update_weights(&mut self.recurrent.w_hh, &rec_grads.w_hh);
        opt.output.update_weights(&mut self.output.weights, &out_grads.weights);
        opt.output.update_biases(&mut self.output.biases, &out_grads.biases);

        loss / n
    }

    /// Trains for `epochs` passes over `data`.
    ///
    /// Windows are visited in a fresh random order each epoch and weights
    /// are updated after every `batch_size` windows.
    pub fn fit(&mut self, data: &WindowedDataset, epochs: usize, batch_size: usize) -> Result<()> {
        self.check_inputs(&data.inputs)?;
        if data.is_empty() {
            return Err(ForecastError::ShapeMismatch {
                expected: "at least one window".to_string(),
                actual: "0 rows".to_string(),
            });
        }
        if batch_size == 0 {
            return Err(ForecastError::InvalidConfig("batch size must be positive".to_string()));
        }

        let n_samples = data.len();
        let mut order: Vec<usize> = (0..n_samples).collect();

        let pb = if self.show_progress {
            ProgressBar::new(epochs as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) Loss: {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }

        for epoch in 0..epochs {
            order.shuffle(&mut self.rng);

            let mut epoch_loss = 0.0;
            for batch in order.chunks(batch_size) {
                epoch_loss += self.train_batch(data, batch) * batch.len() as f64;
            }

            let avg_loss = epoch_loss / n_samples as f64;
            if !avg_loss.is_finite() {
                pb.abandon();
                return Err(ForecastError::NonFiniteLoss { epoch: epoch + 1 });
            }
            self.loss_history.push(avg_loss);
            debug!("epoch {}/{}: loss = {:.6}", epoch + 1, epochs, avg_loss);

            pb.set_message(format!("{:.6}", avg_loss));
            pb.inc(1);
        }

        pb.finish_with_message("training complete");
        Ok(())
    }
}

impl Forecaster for SequenceRegressor {
    fn forecast(&self, inputs: &Array3<f64>) -> Result<Array1<f64>> {
        Ok(self.predict(inputs)?.column(0).to_owned())
    }
}

impl fmt::Debug for SequenceRegressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceRegressor")
            .field("config", &self.config)
            .field("parameters", &self.num_parameters())
            .field("epochs_trained", &self.loss_history.len())
            .finish()
    }
}
