//! Simple (Elman) recurrent layer
//!
//! `h_t = f(W_ih * x_t + W_hh * h_{t-1} + b_h)` with `h_0 = 0`. Only the
//! final hidden state leaves the layer.

use super::activation::Activation;
use super::glorot_uniform;
use ndarray::{Array1, Array2, ArrayView2};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Recurrent layer weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrentLayer {
    /// Size of one time step input
    pub input_size: usize,
    /// Number of hidden units
    pub units: usize,
    /// Hidden activation
    pub activation: Activation,

    pub(crate) w_ih: Array2<f64>, // [units, input_size]
    pub(crate) w_hh: Array2<f64>, // [units, units]
    pub(crate) b_h: Array1<f64>,  // [units]
}

/// Values cached by [`RecurrentLayer::forward`] for backpropagation through time
#[derive(Debug, Clone)]
pub struct RecurrentTrace {
    inputs: Array2<f64>,
    /// Pre-activations a_1..a_T
    pre_activations: Vec<Array1<f64>>,
    /// Hidden states h_0..h_T
    states: Vec<Array1<f64>>,
}

impl RecurrentTrace {
    /// Hidden state after the last step
    pub fn final_state(&self) -> &Array1<f64> {
        // states always holds h_0
        &self.states[self.states.len() - 1]
    }
}

/// Gradients of the recurrent layer parameters
#[derive(Debug, Clone)]
pub struct RecurrentGradients {
    pub w_ih: Array2<f64>,
    pub w_hh: Array2<f64>,
    pub b_h: Array1<f64>,
}

impl RecurrentGradients {
    pub fn zeros(layer: &RecurrentLayer) -> Self {
        Self {
            w_ih: Array2::zeros(layer.w_ih.dim()),
            w_hh: Array2::zeros(layer.w_hh.dim()),
            b_h: Array1::zeros(layer.units),
        }
    }

    pub fn scale(&mut self, factor: f64) {
        self.w_ih *= factor;
        self.w_hh *= factor;
        self.b_h *= factor;
    }
}

impl RecurrentLayer {
    /// Creates a layer with Glorot-uniform kernels and zero bias
    pub fn new<R: Rng>(input_size: usize, units: usize, activation: Activation, rng: &mut R) -> Self {
        Self {
            input_size,
            units,
            activation,
            w_ih: glorot_uniform(units, input_size, rng),
            w_hh: glorot_uniform(units, units, rng),
            b_h: Array1::zeros(units),
        }
    }

    /// Runs the layer over one sequence [steps, input_size]
    pub fn forward(&self, inputs: ArrayView2<f64>) -> RecurrentTrace {
        let steps = inputs.nrows();
        let mut pre_activations = Vec::with_capacity(steps);
        let mut states = Vec::with_capacity(steps + 1);
        states.push(Array1::zeros(self.units));

        for x_t in inputs.rows() {
            let h_prev = &states[states.len() - 1];
            let a_t = self.w_ih.dot(&x_t) + self.w_hh.dot(h_prev) + &self.b_h;
            let h_t = self.activation.forward(&a_t);
            pre_activations.push(a_t);
            states.push(h_t);
        }

        RecurrentTrace {
            inputs: inputs.to_owned(),
            pre_activations,
            states,
        }
    }

    /// Final hidden state only
    pub fn last_state(&self, inputs: ArrayView2<f64>) -> Array1<f64> {
        let mut h = Array1::zeros(self.units);
        for x_t in inputs.rows() {
            let a_t = self.w_ih.dot(&x_t) + self.w_hh.dot(&h) + &self.b_h;
            h = self.activation.forward(&a_t);
        }
        h
    }

    /// Backpropagation through time.
    ///
    /// `d_final` is the loss gradient w.r.t. the final hidden state; the
    /// parameter gradients are added into `grads`.
    pub fn backward(&self, trace: &RecurrentTrace, d_final: &Array1<f64>, grads: &mut RecurrentGradients) {
        let mut dh = d_final.clone();

        for t in (0..trace.pre_activations.len()).rev() {
            let da = &dh * &self.activation.backward(&trace.pre_activations[t]);
            let x_t = trace.inputs.row(t);
            let h_prev = &trace.states[t];

            for i in 0..self.units {
                for j in 0..self.input_size {
                    grads.w_ih[[i, j]] += da[i] * x_t[j];
                }
                for j in 0..self.units {
                    grads.w_hh[[i, j]] += da[i] * h_prev[j];
                }
            }
            grads.b_h += &da;

            dh = self.w_hh.t().dot(&da);
        }
    }

    /// Number of trainable parameters
    pub fn num_parameters(&self) -> usize {
        self.w_ih.len() + self.w_hh.len() + self.b_h.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn layer(units: usize) -> RecurrentLayer {
        let mut rng = StdRng::seed_from_u64(7);
        RecurrentLayer::new(1, units, Activation::Tanh, &mut rng)
    }

    #[test]
    fn test_shapes() {
        let layer = layer(4);
        assert_eq!(layer.w_ih.dim(), (4, 1));
        assert_eq!(layer.w_hh.dim(), (4, 4));
        assert_eq!(layer.num_parameters(), 4 + 16 + 4);
    }

    #[test]
    fn test_forward_keeps_every_state() {
        let layer = layer(3);
        let inputs = Array2::from_shape_vec((5, 1), vec![0.1, 0.2, 0.3, 0.4, 0.5]).unwrap();
        let trace = layer.forward(inputs.view());

        assert_eq!(trace.states.len(), 6);
        assert_eq!(trace.pre_activations.len(), 5);
        assert_eq!(trace.final_state(), &layer.last_state(inputs.view()));
    }

    #[test]
    fn test_zero_input_zero_state() {
        let layer = layer(3);
        let h = layer.last_state(Array2::zeros((4, 1)).view());
        assert!(h.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_backward_matches_finite_differences() {
        let layer = layer(3);
        let inputs = Array2::from_shape_vec((4, 1), vec![0.3, -0.1, 0.8, 0.5]).unwrap();
        // loss = sum(h_T * c) for a fixed c, so dL/dh_T = c
        let c = Array1::from_vec(vec![0.7, -1.2, 0.4]);
        let loss = |l: &RecurrentLayer| l.last_state(inputs.view()).dot(&c);

        let trace = layer.forward(inputs.view());
        let mut grads = RecurrentGradients::zeros(&layer);
        layer.backward(&trace, &c, &mut grads);

        let eps = 1e-6;
        for i in 0..3 {
            for j in 0..3 {
                let mut plus = layer.clone();
                plus.w_hh[[i, j]] += eps;
                let mut minus = layer.clone();
                minus.w_hh[[i, j]] -= eps;
                let numeric = (loss(&plus) - loss(&minus)) / (2.0 * eps);
                assert_relative_eq!(grads.w_hh[[i, j]], numeric, epsilon = 1e-7);
            }

            let mut plus = layer.clone();
            plus.w_ih[[i, 0]] += eps;
            let mut minus = layer.clone();
            minus.w_ih[[i, 0]] -= eps;
            let numeric = (loss(&plus) - loss(&minus)) / (2.0 * eps);
            assert_relative_eq!(grads.w_ih[[i, 0]], numeric, epsilon = 1e-7);

            let mut plus = layer.clone();
            plus.b_h[i] += eps;
            let mut minus = layer.clone();
            minus.b_h[i] -= eps;
            let numeric = (loss(&plus) - loss(&minus)) / (2.0 * eps);
            assert_relative_eq!(grads.b_h[i], numeric, epsilon = 1e-7);
        }
    }
}
