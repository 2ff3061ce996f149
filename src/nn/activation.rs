//! Scalar activation functions and their derivatives.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NetworkError;

/// Activation applied to hidden-layer units.
///
/// The output layer is always a linear head and bypasses this entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationType {
    /// Rectified Linear Unit: max(0, x)
    ReLU,
    /// Sigmoid: 1 / (1 + exp(-x))
    Sigmoid,
    /// Swish: x * sigmoid(x)
    Swish,
}

impl ActivationType {
    /// Apply the activation to a pre-activation sum.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            ActivationType::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            ActivationType::Sigmoid => sigmoid(x),
            ActivationType::Swish => x * sigmoid(x),
        }
    }

    /// Derivative used during backpropagation.
    ///
    /// `y` is the unit's post-activation output, not its pre-activation sum,
    /// and the formulas below are applied to it directly. For sigmoid and
    /// swish this is not the textbook chain rule, but it is the update rule
    /// the training dynamics are defined by.
    pub fn derivative(self, y: f64) -> f64 {
        match self {
            ActivationType::ReLU => {
                if y > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationType::Sigmoid => {
                let s = sigmoid(y);
                s * (1.0 - s)
            }
            ActivationType::Swish => {
                let s = sigmoid(y);
                s + y * s * (1.0 - s)
            }
        }
    }
}

impl FromStr for ActivationType {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relu" => Ok(ActivationType::ReLU),
            "sigmoid" => Ok(ActivationType::Sigmoid),
            "swish" => Ok(ActivationType::Swish),
            other => Err(NetworkError::UnknownActivation(other.to_string())),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
