//! Dense (Fully Connected) Output Layer
//!
//! output = activation(weights * input + bias)

use super::activation::Activation;
use super::glorot_uniform;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Dense layer with weights, biases, and activation function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weight matrix [output_size, input_size]
    pub weights: Array2<f64>,
    /// Bias vector [output_size]
    pub biases: Array1<f64>,
    pub activation: Activation,
}

/// Gradients of the dense layer parameters
#[derive(Debug, Clone)]
pub struct DenseGradients {
    pub weights: Array2<f64>,
    pub biases: Array1<f64>,
}

impl DenseGradients {
    pub fn zeros(layer: &DenseLayer) -> Self {
        Self {
            weights: Array2::zeros(layer.weights.dim()),
            biases: Array1::zeros(layer.biases.len()),
        }
    }

    pub fn scale(&mut self, factor: f64) {
        self.weights *= factor;
        self.biases *= factor;
    }
}

impl DenseLayer {
    /// Create a new dense layer with Xavier initialization
    pub fn new<R: Rng>(input_size: usize, output_size: usize, activation: Activation, rng: &mut R) -> Self {
        Self {
            weights: glorot_uniform(output_size, input_size, rng),
            biases: Array1::zeros(output_size),
            activation,
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.ncols()
    }

    pub fn output_size(&self) -> usize {
        self.weights.nrows()
    }

    /// Pre-activation for one input vector
    pub fn pre_activation(&self, input: &Array1<f64>) -> Array1<f64> {
        self.weights.dot(input) + &self.biases
    }

    pub fn forward(&self, input: &Array1<f64>) -> Array1<f64> {
        self.activation.forward(&self.pre_activation(input))
    }

    /// Backward pass for one sample.
    ///
    /// Accumulates parameter gradients into `grads` and returns the
    /// gradient w.r.t. the layer input.
    pub fn backward(
        &self,
        input: &Array1<f64>,
        pre_activation: &Array1<f64>,
        output_gradient: &Array1<f64>,
        grads: &mut DenseGradients,
    ) -> Array1<f64> {
        let delta = output_gradient * &self.activation.backward(pre_activation);

        for i in 0..self.output_size() {
            for j in 0..self.input_size() {
                grads.weights[[i, j]] += delta[i] * input[j];
            }
        }
        grads.biases += &delta;

        self.weights.t().dot(&delta)
    }

    /// Get number of parameters
    pub fn num_parameters(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}
