//! Errors raised at construction and at the pass boundaries.

use thiserror::Error;

/// Failures of network construction, the forward pass, and training.
///
/// Configuration variants are fatal and raised before any weight memory is
/// allocated; shape variants are fatal per call and raised before any weight
/// is mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The topology listed no hidden layers.
    #[error("network requires at least one hidden layer")]
    EmptyHiddenLayers,

    /// A layer was declared with zero units.
    #[error("{which} layer width must be positive")]
    ZeroLayerWidth { which: &'static str },

    /// An activation name outside {relu, sigmoid, swish}.
    #[error("unknown activation kind: {0}")]
    UnknownActivation(String),

    /// Input vector length does not match the input layer.
    #[error("input length {got} does not match network input size {expected}")]
    InputSizeMismatch { expected: usize, got: usize },

    /// Target vector length does not match the output layer.
    #[error("target length {got} does not match network output size {expected}")]
    TargetSizeMismatch { expected: usize, got: usize },
}
