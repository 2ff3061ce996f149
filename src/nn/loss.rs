//! Loss functions over (target, output) vector pairs.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::activation::ActivationType;

/// Threshold between the quadratic and linear regions of the Huber loss.
pub const HUBER_DELTA: f64 = 1.0;

/// Aggregate losses reported during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossFunction {
    /// Mean squared error
    MeanSquaredError,
    /// Binary cross-entropy; assumes outputs lie in (0, 1)
    CrossEntropy,
    /// Huber loss with delta = 1.0
    Huber,
}

impl LossFunction {
    /// The loss reported for a given activation family: Huber for the
    /// unbounded relu/swish heads, cross-entropy for sigmoid.
    pub fn for_activation(activation: ActivationType) -> Self {
        match activation {
            ActivationType::ReLU | ActivationType::Swish => LossFunction::Huber,
            ActivationType::Sigmoid => LossFunction::CrossEntropy,
        }
    }

    /// Mean cost over the units of one (target, output) pair.
    pub fn compute(self, target: &Array1<f64>, output: &Array1<f64>) -> f64 {
        let n = target.len() as f64;
        match self {
            LossFunction::MeanSquaredError => {
                target
                    .iter()
                    .zip(output)
                    .map(|(&t, &o)| (t - o).powi(2))
                    .sum::<f64>()
                    / n
            }
            LossFunction::CrossEntropy => {
                // Outputs outside (0, 1) propagate as a non-finite loss.
                let total: f64 = target
                    .iter()
                    .zip(output)
                    .map(|(&t, &o)| t * o.ln() + (1.0 - t) * (1.0 - o).ln())
                    .sum();
                -total / n
            }
            LossFunction::Huber => {
                target
                    .iter()
                    .zip(output)
                    .map(|(&t, &o)| {
                        let error = t - o;
                        if error.abs() <= HUBER_DELTA {
                            0.5 * error * error
                        } else {
                            HUBER_DELTA * error.abs() - 0.5 * HUBER_DELTA
                        }
                    })
                    .sum::<f64>()
                    / n
            }
        }
    }
}

/// Per-unit gradient seed for the output layer.
///
/// Returns the raw error inside the quadratic region (including
/// |error| = delta) and clips to +/-delta outside it. This seeds
/// backpropagation for every activation kind, even when the reported
/// aggregate loss is cross-entropy.
pub fn huber_derivative(target: f64, output: f64) -> f64 {
    let error = target - output;
    if error.abs() <= HUBER_DELTA {
        error
    } else if error > 0.0 {
        HUBER_DELTA
    } else {
        -HUBER_DELTA
    }
}
