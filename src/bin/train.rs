//! Train a feedforward network on a synthetic next-value regression task.
//!
//! Usage: cargo run --bin train -- --epochs 500 --lr 0.005 --hidden 16,8

use anyhow::Result;
use feedforward_nn::{
    ActivationType, LossFunction, Network, NetworkConfig, TrainOptions, TrainingExample,
};
use rand::Rng;
use std::env;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<String> = None;
    let mut window = 8usize;
    let mut samples = 400usize;
    let mut hidden: Vec<usize> = vec![16, 8];
    let mut activation = ActivationType::ReLU;
    let mut options = TrainOptions {
        learning_rate: 0.005,
        epochs: 500,
        log_every: 50,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                config_path = args.get(i + 1).cloned();
                i += 2;
            }
            "--window" | "-w" => {
                window = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(window);
                i += 2;
            }
            "--samples" | "-s" => {
                samples = args.get(i + 1).and_then(|s| s.parse().ok()).unwrap_or(samples);
                i += 2;
            }
            "--hidden" => {
                if let Some(spec) = args.get(i + 1) {
                    hidden = spec.split(',').filter_map(|s| s.parse().ok()).collect();
                }
                i += 2;
            }
            "--activation" | "-a" => {
                if let Some(name) = args.get(i + 1) {
                    activation = name.parse()?;
                }
                i += 2;
            }
            "--epochs" | "-e" => {
                options.epochs = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(options.epochs);
                i += 2;
            }
            "--lr" => {
                options.learning_rate = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(options.learning_rate);
                i += 2;
            }
            "--log-every" => {
                options.log_every = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(options.log_every);
                i += 2;
            }
            "--help" => {
                print_help();
                return Ok(());
            }
            _ => {
                i += 1;
            }
        }
    }

    let config: NetworkConfig = if let Some(path) = &config_path {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file))?
    } else {
        NetworkConfig {
            input_size: window,
            hidden_layers: hidden,
            output_size: 1,
            activation,
        }
    };

    println!("═══════════════════════════════════════════════════════");
    println!("       Feedforward Network Training (synthetic)");
    println!("═══════════════════════════════════════════════════════");
    println!();

    println!("Generating {} points of synthetic series...", samples);
    let series = synthetic_series(samples);
    let examples = window_examples(&series, config.input_size);
    println!(
        "Built {} sliding-window examples (window = {})",
        examples.len(),
        config.input_size
    );

    let split = (examples.len() as f64 * 0.8) as usize;
    let (train_set, test_set) = examples.split_at(split);

    let mut network = Network::from_config(&config)?;
    network.summary();

    println!();
    println!(
        "Training for {} epochs at learning rate {}...",
        options.epochs, options.learning_rate
    );
    let report = network.train(train_set, &options)?;

    let reported = LossFunction::for_activation(config.activation);
    let mut test_loss = 0.0;
    for example in test_set {
        let prediction = network.predict(&example.input)?;
        test_loss += reported.compute(&example.output, &prediction);
    }
    test_loss /= test_set.len() as f64;

    println!();
    println!(
        "Final training loss: {:.8}",
        report.epoch_losses.last().copied().unwrap_or(f64::NAN)
    );
    println!("Held-out loss:       {:.8}", test_loss);
    println!(
        "Training time:       {:.3} seconds",
        report.duration.as_secs_f64()
    );

    Ok(())
}

/// Noisy damped sine with a slow upward drift.
fn synthetic_series(len: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|t| {
            let t = t as f64;
            0.5 + 0.4 * (t / 12.0).sin() + 0.001 * t + rng.gen_range(-0.02..0.02)
        })
        .collect()
}

/// Turn a series into (lag window -> next value) pairs.
fn window_examples(series: &[f64], window: usize) -> Vec<TrainingExample> {
    series
        .windows(window + 1)
        .map(|w| TrainingExample::new(w[..window].to_vec(), vec![w[window]]))
        .collect()
}

fn print_help() {
    println!("Train a feedforward network on a synthetic regression series");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin train -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>       Network config JSON (overrides the flags below)");
    println!("    -w, --window <N>          Lag-window width / input size (default: 8)");
    println!("    -s, --samples <N>         Length of the synthetic series (default: 400)");
    println!("        --hidden <A,B,..>     Hidden layer widths (default: 16,8)");
    println!("    -a, --activation <KIND>   relu | sigmoid | swish (default: relu)");
    println!("    -e, --epochs <N>          Training epochs (default: 500)");
    println!("        --lr <RATE>           Learning rate (default: 0.005)");
    println!("        --log-every <N>       Epoch report cadence, 0 = silent (default: 50)");
    println!("        --help                Print help information");
}
