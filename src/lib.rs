//! # feedforward-nn
//!
//! A hand-written feedforward neural network with manual forward propagation,
//! manual backpropagation, and a configurable activation/loss combination.
//! Hidden layers apply one of relu, sigmoid, or swish; the output layer is
//! always a linear regression head. Training is per-example stochastic
//! descent in input order, seeded by the Huber loss gradient.
//!
//! ## Example
//!
//! ```
//! use feedforward_nn::{ActivationType, Network, TrainOptions, TrainingExample};
//!
//! let examples = vec![
//!     TrainingExample::new(vec![0.0], vec![0.0]),
//!     TrainingExample::new(vec![0.5], vec![0.5]),
//!     TrainingExample::new(vec![1.0], vec![1.0]),
//! ];
//!
//! let mut network = Network::new(1, &[4], 1, ActivationType::ReLU)?;
//! let options = TrainOptions { learning_rate: 0.01, epochs: 200, log_every: 0 };
//! let report = network.train(&examples, &options)?;
//! assert_eq!(report.epoch_losses.len(), 200);
//!
//! let prediction = network.predict(&ndarray::array![0.25])?;
//! assert_eq!(prediction.len(), 1);
//! # Ok::<(), feedforward_nn::NetworkError>(())
//! ```

pub mod error;
pub mod nn;

pub use error::NetworkError;
pub use nn::{
    huber_derivative, ActivationType, DenseLayer, ForwardTrace, LossFunction, Network,
    NetworkConfig, TrainOptions, TrainingExample, TrainingReport,
};

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, NetworkError>;
