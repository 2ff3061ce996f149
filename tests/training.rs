//! End-to-end training behavior.

use feedforward_nn::{ActivationType, Network, NetworkError, TrainOptions, TrainingExample};
use ndarray::array;

#[test]
fn one_epoch_of_training_moves_the_weights() {
    let mut network = Network::new(1, &[2], 1, ActivationType::ReLU).unwrap();
    let before = network.predict(&array![1.0]).unwrap();

    let examples = vec![TrainingExample::new(vec![1.0], vec![1.0])];
    let options = TrainOptions {
        learning_rate: 0.1,
        epochs: 1,
        log_every: 0,
    };
    network.train(&examples, &options).unwrap();

    let after = network.predict(&array![1.0]).unwrap();
    assert_ne!(before, after);
}

#[test]
fn identity_mapping_loss_decreases_monotonically() {
    let mut network = Network::new(1, &[4], 1, ActivationType::ReLU).unwrap();
    let examples: Vec<TrainingExample> = (0..10)
        .map(|i| {
            let v = i as f64 / 10.0;
            TrainingExample::new(vec![v], vec![v])
        })
        .collect();

    let options = TrainOptions {
        learning_rate: 0.01,
        epochs: 50,
        log_every: 0,
    };
    let report = network.train(&examples, &options).unwrap();

    assert_eq!(report.epoch_losses.len(), 50);
    for pair in report.epoch_losses.windows(2) {
        assert!(
            pair[1] <= pair[0] + 1e-6,
            "loss rose from {} to {}",
            pair[0],
            pair[1]
        );
    }
    assert!(report.epoch_losses.last().unwrap() < report.epoch_losses.first().unwrap());
}

#[test]
fn empty_hidden_layers_is_a_configuration_error() {
    let err = Network::new(3, &[], 1, ActivationType::Sigmoid).unwrap_err();
    assert_eq!(err, NetworkError::EmptyHiddenLayers);
}

#[test]
fn zero_width_layers_are_configuration_errors() {
    assert!(Network::new(0, &[2], 1, ActivationType::ReLU).is_err());
    assert!(Network::new(3, &[0], 1, ActivationType::ReLU).is_err());
    assert!(Network::new(3, &[2], 0, ActivationType::ReLU).is_err());
}

#[test]
fn unknown_activation_kind_is_rejected_at_parse_time() {
    assert!(matches!(
        "tanh".parse::<ActivationType>(),
        Err(NetworkError::UnknownActivation(_))
    ));
}

#[test]
fn epoch_count_is_exact() {
    let mut network = Network::new(1, &[2], 1, ActivationType::Swish).unwrap();
    let examples = vec![TrainingExample::new(vec![0.5], vec![0.5])];
    let options = TrainOptions {
        learning_rate: 0.001,
        epochs: 7,
        log_every: 0,
    };
    let report = network.train(&examples, &options).unwrap();
    assert_eq!(report.epoch_losses.len(), 7);
}
