//! Feedforward network building blocks:
//! - Scalar activation functions and their derivatives
//! - Dense layers, one weight matrix and bias vector per transition
//! - Loss functions and the Huber gradient seed
//! - The network itself: forward pass, backpropagation, training loop

mod activation;
mod layer;
mod loss;
mod network;

pub use activation::ActivationType;
pub use layer::DenseLayer;
pub use loss::{huber_derivative, LossFunction, HUBER_DELTA};
pub use network::{
    ForwardTrace, Network, NetworkConfig, TrainOptions, TrainingExample, TrainingReport,
};
