//! Optimization Algorithms
//!
//! Gradient-based weight updates for the regressor:
//! - SGD (Stochastic Gradient Descent), optionally with momentum
//! - Adam (Adaptive Moment Estimation)
//!
//! One optimizer instance owns the state for one weight matrix and at most
//! one bias vector.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Optimizer trait for weight updates
pub trait Optimizer: Send + Sync {
    /// Update weights given gradients
    fn update_weights(&mut self, weights: &mut Array2<f64>, gradients: &Array2<f64>);

    /// Update biases given gradients
    fn update_biases(&mut self, biases: &mut Array1<f64>, gradients: &Array1<f64>);

    /// Clone the optimizer for each parameter group
    fn clone_box(&self) -> Box<dyn Optimizer>;
}

/// Optimizer selection for a training run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    #[default]
    Adam,
    Sgd { momentum: f64 },
}

impl OptimizerKind {
    pub fn build(self, learning_rate: f64) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Adam => Box::new(Adam::new(learning_rate)),
            OptimizerKind::Sgd { momentum } => {
                Box::new(SGD::new(learning_rate).with_momentum(momentum))
            }
        }
    }
}

/// Stochastic Gradient Descent with optional momentum
#[derive(Clone, Serialize, Deserialize)]
pub struct SGD {
    pub learning_rate: f64,
    pub momentum: f64,
    #[serde(skip)]
    velocity_w: Option<Array2<f64>>,
    #[serde(skip)]
    velocity_b: Option<Array1<f64>>,
}

impl SGD {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            momentum: 0.0,
            velocity_w: None,
            velocity_b: None,
        }
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }
}

impl Optimizer for SGD {
    fn update_weights(&mut self, weights: &mut Array2<f64>, gradients: &Array2<f64>) {
        if self.momentum > 0.0 {
            let v = self.velocity_w.get_or_insert_with(|| Array2::zeros(weights.dim()));
            *v = &*v * self.momentum - gradients * self.learning_rate;
            *weights += &*v;
        } else {
            weights.scaled_add(-self.learning_rate, gradients);
        }
    }

    fn update_biases(&mut self, biases: &mut Array1<f64>, gradients: &Array1<f64>) {
        if self.momentum > 0.0 {
            let v = self.velocity_b.get_or_insert_with(|| Array1::zeros(biases.len()));
            *v = &*v * self.momentum - gradients * self.learning_rate;
            *biases += &*v;
        } else {
            biases.scaled_add(-self.learning_rate, gradients);
        }
    }

    fn clone_box(&self) -> Box<dyn Optimizer> {
        Box::new(self.clone())
    }
}

/// Adam optimizer (Adaptive Moment Estimation)
#[derive(Clone, Serialize, Deserialize)]
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    // Step counters are kept per tensor so bias correction stays exact
    // when only one of the two tensors is updated.
    #[serde(skip)]
    t_w: i32,
    #[serde(skip)]
    t_b: i32,
    #[serde(skip)]
    m_w: Option<Array2<f64>>,
    #[serde(skip)]
    v_w: Option<Array2<f64>>,
    #[serde(skip)]
    m_b: Option<Array1<f64>>,
    #[serde(skip)]
    v_b: Option<Array1<f64>>,
}

impl Adam {
    pub fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            t_w: 0,
            t_b: 0,
            m_w: None,
            v_w: None,
            m_b: None,
            v_b: None,
        }
    }

    fn step_size(&self, t: i32) -> (f64, f64) {
        (1.0 - self.beta1.powi(t), 1.0 - self.beta2.powi(t))
    }
}

impl Optimizer for Adam {
    fn update_weights(&mut self, weights: &mut Array2<f64>, gradients: &Array2<f64>) {
        self.t_w += 1;
        let (c1, c2) = self.step_size(self.t_w);
        let (beta1, beta2, lr, eps) = (self.beta1, self.beta2, self.learning_rate, self.epsilon);

        let m = self.m_w.get_or_insert_with(|| Array2::zeros(weights.dim()));
        let v = self.v_w.get_or_insert_with(|| Array2::zeros(weights.dim()));

        *m = &*m * beta1 + gradients * (1.0 - beta1);
        *v = &*v * beta2 + &(gradients * gradients) * (1.0 - beta2);

        let m_hat = &*m / c1;
        let v_hat = &*v / c2;

        *weights -= &(&m_hat * lr / &(v_hat.mapv(f64::sqrt) + eps));
    }

    fn update_biases(&mut self, biases: &mut Array1<f64>, gradients: &Array1<f64>) {
        self.t_b += 1;
        let (c1, c2) = self.step_size(self.t_b);
        let (beta1, beta2, lr, eps) = (self.beta1, self.beta2, self.learning_rate, self.epsilon);

        let m = self.m_b.get_or_insert_with(|| Array1::zeros(biases.len()));
        let v = self.v_b.get_or_insert_with(|| Array1::zeros(biases.len()));

        *m = &*m * beta1 + gradients * (1.0 - beta1);
        *v = &*v * beta2 + &(gradients * gradients) * (1.0 - beta2);

        let m_hat = &*m / c1;
        let v_hat = &*v / c2;

        *biases -= &(&m_hat * lr / &(v_hat.mapv(f64::sqrt) + eps));
    }

    fn clone_box(&self) -> Box<dyn Optimizer> {
        Box::new(self.clone())
    }
}
