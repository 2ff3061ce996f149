//! Feedforward network: construction, forward pass, backpropagation, training.

use std::time::{Duration, Instant};

use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::Result;

use super::activation::ActivationType;
use super::layer::DenseLayer;
use super::loss::{huber_derivative, LossFunction};

/// Network shape and activation selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_layers: Vec<usize>,
    pub output_size: usize,
    pub activation: ActivationType,
}

impl NetworkConfig {
    fn validate(&self) -> Result<()> {
        if self.hidden_layers.is_empty() {
            return Err(NetworkError::EmptyHiddenLayers);
        }
        if self.input_size == 0 {
            return Err(NetworkError::ZeroLayerWidth { which: "input" });
        }
        if self.hidden_layers.contains(&0) {
            return Err(NetworkError::ZeroLayerWidth { which: "hidden" });
        }
        if self.output_size == 0 {
            return Err(NetworkError::ZeroLayerWidth { which: "output" });
        }
        Ok(())
    }
}

/// One training example: an input feature vector and its target vector.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub input: Array1<f64>,
    pub output: Array1<f64>,
}

impl TrainingExample {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Self {
        Self {
            input: Array1::from(input),
            output: Array1::from(output),
        }
    }
}

/// Training hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainOptions {
    /// Step size for the per-example weight update. Must be positive.
    pub learning_rate: f64,
    /// Number of full passes over the training set.
    pub epochs: usize,
    /// Print the mean loss after every `log_every`-th epoch; 0 keeps
    /// training silent.
    pub log_every: usize,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1000,
            log_every: 0,
        }
    }
}

/// Per-epoch mean losses and the total wall-clock training time.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub epoch_losses: Vec<f64>,
    pub duration: Duration,
}

/// Layer-by-layer record of one forward pass.
///
/// `layer_inputs[i]` is the vector fed into transition `i` and
/// `layer_outputs[i]` the vector it produced: post-activation for hidden
/// layers, the raw affine sum for the output layer. A trace belongs to a
/// single forward/backward pair; build a fresh one per example.
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    layer_inputs: Vec<Array1<f64>>,
    layer_outputs: Vec<Array1<f64>>,
}

impl ForwardTrace {
    /// The network output recorded by the forward pass.
    pub fn output(&self) -> &Array1<f64> {
        self.layer_outputs
            .last()
            .expect("trace holds at least the output layer")
    }

    /// Consume the trace, keeping only the network output.
    pub fn into_output(mut self) -> Array1<f64> {
        self.layer_outputs
            .pop()
            .expect("trace holds at least the output layer")
    }
}

/// A feedforward neural network with a linear output head.
#[derive(Debug, Clone)]
pub struct Network {
    layer_sizes: Vec<usize>,
    activation: ActivationType,
    pub layers: Vec<DenseLayer>,
}

impl Network {
    /// Build a network from explicit sizes: `input_size` units in, the given
    /// hidden widths (at least one), `output_size` units out.
    pub fn new(
        input_size: usize,
        hidden_layers: &[usize],
        output_size: usize,
        activation: ActivationType,
    ) -> Result<Self> {
        Self::from_config(&NetworkConfig {
            input_size,
            hidden_layers: hidden_layers.to_vec(),
            output_size,
            activation,
        })
    }

    /// Build a network from a configuration, validating it before any weight
    /// memory is allocated.
    pub fn from_config(config: &NetworkConfig) -> Result<Self> {
        config.validate()?;

        let mut layer_sizes = Vec::with_capacity(config.hidden_layers.len() + 2);
        layer_sizes.push(config.input_size);
        layer_sizes.extend_from_slice(&config.hidden_layers);
        layer_sizes.push(config.output_size);

        let layers = layer_sizes
            .windows(2)
            .map(|pair| DenseLayer::new(pair[0], pair[1]))
            .collect();

        Ok(Self {
            layer_sizes,
            activation: config.activation,
            layers,
        })
    }

    pub fn input_size(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    pub fn activation(&self) -> ActivationType {
        self.activation
    }

    /// Total trainable parameter count.
    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(|l| l.num_parameters()).sum()
    }

    /// Feed one input vector through the network.
    ///
    /// Returns the trace of every layer transition; `ForwardTrace::output`
    /// holds the prediction. The input length is checked before any work.
    pub fn forward(&self, input: &Array1<f64>) -> Result<ForwardTrace> {
        if input.len() != self.input_size() {
            return Err(NetworkError::InputSizeMismatch {
                expected: self.input_size(),
                got: input.len(),
            });
        }

        let act = self.activation;
        let mut layer_inputs = Vec::with_capacity(self.layers.len());
        let mut layer_outputs = Vec::with_capacity(self.layers.len());
        let mut current = input.clone();

        let (output_layer, hidden_layers) = self
            .layers
            .split_last()
            .expect("network has at least two layer transitions");

        for layer in hidden_layers {
            let activated = layer.affine(&current).mapv(|z| act.apply(z));
            layer_inputs.push(current);
            current = activated.clone();
            layer_outputs.push(activated);
        }

        // Linear head: the affine sum is the prediction.
        let output = output_layer.affine(&current);
        layer_inputs.push(current);
        layer_outputs.push(output);

        Ok(ForwardTrace {
            layer_inputs,
            layer_outputs,
        })
    }

    /// Run inference, returning just the output vector.
    pub fn predict(&self, input: &Array1<f64>) -> Result<Array1<f64>> {
        Ok(self.forward(input)?.into_output())
    }

    /// Propagate the error for one example back through the network and
    /// apply the weight and bias updates in place.
    ///
    /// The gradient seed is always the Huber derivative, whichever aggregate
    /// loss the training loop reports. Hidden deltas take the activation
    /// derivative at each unit's post-activation output, and updates are
    /// additive: the seed `target - output` already points the step downhill.
    pub fn backward(
        &mut self,
        trace: &ForwardTrace,
        target: &Array1<f64>,
        learning_rate: f64,
    ) -> Result<()> {
        if target.len() != self.output_size() {
            return Err(NetworkError::TargetSizeMismatch {
                expected: self.output_size(),
                got: target.len(),
            });
        }

        let act = self.activation;
        let transitions = self.layers.len();
        let output = trace.output();

        let mut deltas = vec![Array1::zeros(0); transitions];
        deltas[transitions - 1] =
            Array1::from_shape_fn(target.len(), |i| huber_derivative(target[i], output[i]));

        // Hidden deltas, last hidden layer back to the first: fold the next
        // layer's deltas through its weight rows, then scale by the
        // activation derivative at the unit's output.
        for i in (0..transitions - 1).rev() {
            let propagated = self.layers[i + 1].weights.dot(&deltas[i + 1]);
            let derivative = trace.layer_outputs[i].mapv(|y| act.derivative(y));
            deltas[i] = propagated * derivative;
        }

        // weights[i][j][k] += lr * delta[i][k] * input[i][j]
        // biases[i][j]     += lr * delta[i][j]
        for (i, layer) in self.layers.iter_mut().enumerate() {
            let input_col = trace.layer_inputs[i].view().insert_axis(Axis(1));
            let delta_row = deltas[i].view().insert_axis(Axis(0));
            layer
                .weights
                .scaled_add(learning_rate, &input_col.dot(&delta_row));
            layer.biases.scaled_add(learning_rate, &deltas[i]);
        }

        Ok(())
    }

    /// Train over `examples` for a fixed number of epochs.
    ///
    /// Examples are visited in input order with no shuffling between epochs,
    /// and weights update after every example. Every example's shape is
    /// checked before the first update so a malformed set cannot leave the
    /// network partially trained. The reported per-epoch loss follows the
    /// activation family and is diagnostic only; it does not feed the
    /// gradient.
    pub fn train(
        &mut self,
        examples: &[TrainingExample],
        options: &TrainOptions,
    ) -> Result<TrainingReport> {
        for example in examples {
            if example.input.len() != self.input_size() {
                return Err(NetworkError::InputSizeMismatch {
                    expected: self.input_size(),
                    got: example.input.len(),
                });
            }
            if example.output.len() != self.output_size() {
                return Err(NetworkError::TargetSizeMismatch {
                    expected: self.output_size(),
                    got: example.output.len(),
                });
            }
        }

        let reported = LossFunction::for_activation(self.activation);
        let started = Instant::now();
        let mut epoch_losses = Vec::with_capacity(options.epochs);

        for epoch in 0..options.epochs {
            let mut total_loss = 0.0;
            for example in examples {
                let trace = self.forward(&example.input)?;
                total_loss += reported.compute(&example.output, trace.output());
                self.backward(&trace, &example.output, options.learning_rate)?;
            }

            let mean_loss = total_loss / examples.len() as f64;
            epoch_losses.push(mean_loss);

            log::debug!("epoch {}: mean loss {:.8}", epoch + 1, mean_loss);
            if options.log_every > 0 && (epoch + 1) % options.log_every == 0 {
                println!("Epoch {}, loss = {:.8}", epoch + 1, mean_loss);
            }
        }

        let duration = started.elapsed();
        if options.log_every > 0 {
            println!("Training took {:.3} seconds", duration.as_secs_f64());
        }

        Ok(TrainingReport {
            epoch_losses,
            duration,
        })
    }

    /// Print a console summary of the topology.
    pub fn summary(&self) {
        println!(
            "Feedforward network: {:?} hidden activation, linear head",
            self.activation
        );
        for (i, layer) in self.layers.iter().enumerate() {
            println!(
                "  layer {}: {} -> {}, params: {}",
                i + 1,
                layer.input_size(),
                layer.output_size(),
                layer.num_parameters()
            );
        }
        println!("  total parameters: {}", self.num_parameters());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn fixed_network() -> Network {
        let mut network = Network::new(2, &[2], 1, ActivationType::ReLU).unwrap();
        network.layers[0].weights = array![[0.1, 0.2], [0.3, 0.4]];
        network.layers[0].biases = array![0.0, 0.1];
        network.layers[1].weights = array![[0.5], [0.6]];
        network.layers[1].biases = array![0.05];
        network
    }

    #[test]
    fn one_weight_matrix_per_transition() {
        let network = Network::new(3, &[5, 4], 2, ActivationType::Swish).unwrap();
        assert_eq!(network.layers.len(), 3);
        assert_eq!(network.layers[0].weights.dim(), (3, 5));
        assert_eq!(network.layers[1].weights.dim(), (5, 4));
        assert_eq!(network.layers[2].weights.dim(), (4, 2));
        assert_eq!(network.layers[2].biases.len(), 2);
    }

    #[test]
    fn forward_output_length_matches_output_size() {
        let network = Network::new(3, &[4], 2, ActivationType::Sigmoid).unwrap();
        let trace = network.forward(&array![0.1, 0.2, 0.3]).unwrap();
        assert_eq!(trace.output().len(), 2);
    }

    #[test]
    fn forward_is_deterministic_for_fixed_weights() {
        let network = fixed_network();
        let a = network.predict(&array![1.0, -1.0]).unwrap();
        let b = network.predict(&array![1.0, -1.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn forward_computes_the_linear_head_by_hand() {
        let network = fixed_network();
        // hidden: relu([1*0.1 + 2*0.3, 1*0.2 + 2*0.4 + 0.1]) = [0.7, 1.1]
        // output: 0.7*0.5 + 1.1*0.6 + 0.05 = 1.06
        let out = network.predict(&array![1.0, 2.0]).unwrap();
        assert_relative_eq!(out[0], 1.06, epsilon = 1e-12);
    }

    #[test]
    fn mismatched_input_is_rejected() {
        let network = fixed_network();
        let err = network.forward(&array![1.0]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::InputSizeMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn mismatched_target_leaves_weights_untouched() {
        let mut network = fixed_network();
        let trace = network.forward(&array![1.0, 2.0]).unwrap();
        let weights_before = network.layers[0].weights.clone();

        let err = network.backward(&trace, &array![1.0, 2.0], 0.1).unwrap_err();
        assert_eq!(
            err,
            NetworkError::TargetSizeMismatch {
                expected: 1,
                got: 2
            }
        );
        assert_eq!(network.layers[0].weights, weights_before);
    }

    #[test]
    fn zero_input_unit_keeps_its_outgoing_weights() {
        let mut network = fixed_network();
        let trace = network.forward(&array![0.0, 2.0]).unwrap();
        let before = network.layers[0].weights.clone();

        network.backward(&trace, &array![5.0], 0.1).unwrap();

        // Row 0 feeds from the zeroed input unit: lr * delta * 0.
        assert_eq!(network.layers[0].weights.row(0), before.row(0));
        assert_ne!(network.layers[0].weights.row(1), before.row(1));
    }

    #[test]
    fn update_direction_reduces_the_error() {
        let mut network = fixed_network();
        let input = array![1.0, 2.0];
        let target = array![2.0];

        let before = network.predict(&input).unwrap()[0];
        let trace = network.forward(&input).unwrap();
        network.backward(&trace, &target, 0.05).unwrap();
        let after = network.predict(&input).unwrap()[0];

        assert!((target[0] - after).abs() < (target[0] - before).abs());
    }

    #[test]
    fn train_rejects_malformed_examples_before_updating() {
        let mut network = fixed_network();
        let weights_before = network.layers[0].weights.clone();
        let examples = vec![
            TrainingExample::new(vec![1.0, 2.0], vec![1.0]),
            TrainingExample::new(vec![1.0], vec![1.0]),
        ];

        let err = network
            .train(&examples, &TrainOptions::default())
            .unwrap_err();
        assert_eq!(
            err,
            NetworkError::InputSizeMismatch {
                expected: 2,
                got: 1
            }
        );
        assert_eq!(network.layers[0].weights, weights_before);
    }

    #[test]
    fn config_deserializes_lowercase_activation() {
        let config: NetworkConfig = serde_json::from_str(
            r#"{"input_size":2,"hidden_layers":[3],"output_size":1,"activation":"swish"}"#,
        )
        .unwrap();
        assert_eq!(config.activation, ActivationType::Swish);
        assert!(Network::from_config(&config).is_ok());
    }
}
