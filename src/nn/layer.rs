//! Dense layer: one weight matrix and one bias vector per layer transition.

use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

/// Weights and biases for one layer transition.
///
/// The weight matrix has shape `(input_size, output_size)`: rows indexed by
/// the source layer's units, columns by the destination layer's units.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub weights: Array2<f64>,
    pub biases: Array1<f64>,
}

impl DenseLayer {
    /// Create a layer with variance-scaled random weights and zero biases.
    ///
    /// Weights draw from `U(0, 1) * sqrt(2 / (rows + cols))`, small positive
    /// values that keep early activations away from saturation.
    pub fn new(input_size: usize, output_size: usize) -> Self {
        let scale = (2.0 / (input_size + output_size) as f64).sqrt();
        let weights = Array2::random((input_size, output_size), Uniform::new(0.0, scale));
        let biases = Array1::zeros(output_size);
        Self { weights, biases }
    }

    /// Weighted sum for one example: `input . weights + biases`.
    ///
    /// Activation is the caller's concern; the output layer uses this sum
    /// directly as its linear head.
    pub fn affine(&self, input: &Array1<f64>) -> Array1<f64> {
        let mut z = input.dot(&self.weights);
        z += &self.biases;
        z
    }

    pub fn input_size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn output_size(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of trainable parameters.
    pub fn num_parameters(&self) -> usize {
        self.weights.len() + self.biases.len()
    }
}
