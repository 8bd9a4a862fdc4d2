//! Perceptron command-line front end.
//!
//! `train` fits weights on a labelled dataset and writes them to a weights file.
//! `test` classifies a dataset with saved weights and writes an `Actual`/`Classified` report.

use assocnet::checkpoint::{load_perceptron, save_weights};
use assocnet::data::load_dataset;
use assocnet::recall::classify_all;
use assocnet::report::{format_classification, write_report};
use assocnet::training::train_perceptron_with_rng;
use assocnet::{evaluate, LabelTable, TrainingConfig, WeightInit, WeightStore};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perceptron", about = "Train and test a bipolar Perceptron classifier")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train on a dataset and save the weights
    Train(TrainArgs),
    /// Classify a dataset with saved weights
    Test(TestArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Training dataset
    #[arg(long)]
    data: PathBuf,

    /// Output weights file
    #[arg(long)]
    weights: PathBuf,

    /// JSON training configuration; flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from all-zero weights
    #[arg(long, conflicts_with = "random_init")]
    zero_init: bool,

    /// Start from weights drawn from [-0.5, 0.5)
    #[arg(long)]
    random_init: bool,

    /// Upper bound on training epochs
    #[arg(long)]
    max_epochs: Option<usize>,

    /// Learning rate in (0, 1]
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Dead-zone threshold
    #[arg(long)]
    theta: Option<f64>,

    /// Smallest weight delta that is applied
    #[arg(long)]
    weight_change_threshold: Option<f64>,

    /// Seed for random initial weights
    #[arg(long)]
    seed: Option<u64>,

    /// Append a JSONL summary of the run to this file
    #[arg(long)]
    metrics_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TestArgs {
    /// Trained weights file
    #[arg(long)]
    weights: PathBuf,

    /// Dataset to classify
    #[arg(long)]
    data: PathBuf,

    /// Results file
    #[arg(long)]
    output: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Train(args) => train(args),
        Command::Test(args) => test(args),
    };
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn training_config(args: &TrainArgs) -> Result<TrainingConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => TrainingConfig::from_json_file(path)?,
        None => TrainingConfig::default(),
    };
    if args.zero_init {
        config.init = WeightInit::Zero;
    }
    if args.random_init {
        config.init = WeightInit::Random;
    }
    if let Some(max_epochs) = args.max_epochs {
        config.max_epochs = max_epochs;
    }
    if let Some(learning_rate) = args.learning_rate {
        config.learning_rate = learning_rate;
    }
    if let Some(theta) = args.theta {
        config.theta = theta;
    }
    if let Some(threshold) = args.weight_change_threshold {
        config.weight_change_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn train(args: TrainArgs) -> Result<(), Box<dyn Error>> {
    let config = training_config(&args)?;
    let dataset = load_dataset(&args.data)?;
    dataset.validate()?;

    eprintln!("Perceptron Training");
    eprintln!("  Data: {} ({} samples, {}x{})", args.data.display(), dataset.len(), dataset.rows, dataset.columns);
    eprintln!("  Init: {:?}", config.init);
    eprintln!("  Learning rate: {}, Theta: {}", config.learning_rate, config.theta);
    eprintln!("  Weight change threshold: {}", config.weight_change_threshold);
    eprintln!("  Max epochs: {}", config.max_epochs);
    eprintln!();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let outcome = train_perceptron_with_rng(&dataset.samples, &config, &mut rng)?;
    let elapsed = start.elapsed().as_secs_f64();

    if outcome.converged {
        eprintln!("Training converged after {} epochs ({elapsed:.2}s)", outcome.epochs);
    } else {
        eprintln!("Training reached max epochs ({}) before converging", config.max_epochs);
    }

    let metrics = evaluate(&outcome.weights, &dataset.samples)?;
    eprintln!(
        "  Training accuracy: {}/{} ({:.2}%)",
        metrics.correct,
        metrics.total,
        metrics.accuracy * 100.0
    );

    let store = WeightStore::from(outcome.weights);
    save_weights(&store, &args.weights)?;
    eprintln!(
        "Saved {} weights ({} -> {}) to {}",
        store.kind(),
        store.input_dim(),
        store.output_dim(),
        args.weights.display()
    );

    if let Some(path) = &args.metrics_file {
        let event = serde_json::json!({
            "type": "train",
            "data": args.data.display().to_string(),
            "epochs": outcome.epochs,
            "converged": outcome.converged,
            "accuracy": metrics.accuracy,
            "correct": metrics.correct,
            "total": metrics.total,
            "learning_rate": config.learning_rate,
            "theta": config.theta,
            "weight_change_threshold": config.weight_change_threshold,
            "elapsed_secs": elapsed,
        });
        append_jsonl(path, &event)?;
    }
    Ok(())
}

fn test(args: TestArgs) -> Result<(), Box<dyn Error>> {
    let weights = load_perceptron(&args.weights)?;
    let dataset = load_dataset(&args.data)?;

    let table = {
        let from_data = LabelTable::from_samples(&dataset.samples);
        if from_data.is_empty() {
            LabelTable::letters()
        } else {
            from_data
        }
    };

    let labels: Vec<String> = table.iter().map(|(label, _)| label.to_string()).collect();
    eprintln!("Labels: {}", labels.join(" "));

    let outputs = classify_all(&weights, &dataset.samples)?;
    let blocks: Vec<String> = dataset
        .samples
        .iter()
        .zip(outputs.iter())
        .map(|(sample, output)| format_classification(sample, output.view(), &table))
        .collect();
    write_report(&args.output, &blocks.join("\n"))?;

    let metrics = evaluate(&weights, &dataset.samples)?;
    if metrics.total > 0 {
        eprintln!(
            "Accuracy: {}/{} ({:.2}%)",
            metrics.correct,
            metrics.total,
            metrics.accuracy * 100.0
        );
    }
    eprintln!("Results saved to {}", args.output.display());
    Ok(())
}

fn append_jsonl(path: &Path, event: &serde_json::Value) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{event}")?;
    Ok(())
}
