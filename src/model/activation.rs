//! Activation Functions
//!
//! Element-wise activations and their derivatives for backpropagation.
//! Derivatives are taken with respect to the pre-activation value.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Types of activation functions available
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Hyperbolic tangent
    #[default]
    Tanh,
    /// Sigmoid: 1 / (1 + exp(-x))
    Sigmoid,
    /// Rectified Linear Unit: max(0, x)
    ReLU,
    /// Linear (identity): x
    Linear,
}

impl Activation {
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::ReLU => x.max(0.0),
            Activation::Linear => x,
        }
    }

    pub fn derivative(self, x: f64) -> f64 {
        match self {
            Activation::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            Activation::Sigmoid => {
                let s = self.apply(x);
                s * (1.0 - s)
            }
            Activation::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activation::Linear => 1.0,
        }
    }

    /// Apply to a vector of pre-activations
    pub fn forward(self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| self.apply(v))
    }

    /// Derivative for a vector of pre-activations
    pub fn backward(self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| self.derivative(v))
    }
}

impl std::str::FromStr for Activation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tanh" => Ok(Activation::Tanh),
            "sigmoid" => Ok(Activation::Sigmoid),
            "relu" => Ok(Activation::ReLU),
            "linear" | "identity" => Ok(Activation::Linear),
            other => Err(format!("unknown activation '{}'", other)),
        }
    }
}

/// Activation pair for the recurrent and the output layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Activations {
    pub hidden: Activation,
    pub output: Activation,
}

impl Activations {
    pub fn new(hidden: Activation, output: Activation) -> Self {
        Self { hidden, output }
    }
}
