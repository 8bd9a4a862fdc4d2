//! Hopfield memory command-line front end.
//!
//! `train` stores every pattern of a dataset in a new weight matrix.
//! `test` relaxes each pattern of a (possibly noisy) dataset and writes the
//! input and recalled grids side by side.

use assocnet::checkpoint::{load_hopfield, save_weights};
use assocnet::data::load_dataset;
use assocnet::report::{format_recall, write_report};
use assocnet::utils::hamming_distance;
use assocnet::{recall, train_hopfield, RecallConfig, WeightStore};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hopfield", about = "Store and recall bipolar patterns with a Hopfield memory")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a dataset's patterns and save the weight matrix
    Train(TrainArgs),
    /// Recall every pattern of a dataset
    Test(TestArgs),
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Patterns to store
    #[arg(long)]
    data: PathBuf,

    /// Output weights file
    #[arg(long)]
    weights: PathBuf,
}

#[derive(Args, Debug)]
struct TestArgs {
    /// Trained weights file
    #[arg(long)]
    weights: PathBuf,

    /// Patterns to recall
    #[arg(long)]
    data: PathBuf,

    /// Results file
    #[arg(long)]
    output: PathBuf,

    /// Seed for the node visiting order
    #[arg(long)]
    seed: Option<u64>,

    /// Sweep cap per pattern (default: 10 per node)
    #[arg(long)]
    max_sweeps: Option<usize>,
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

fn train(args: TrainArgs) -> Result<(), Box<dyn Error>> {
    let dataset = load_dataset(&args.data)?;
    let memory = train_hopfield(&dataset.samples)?;

    eprintln!("Hopfield Training");
    eprintln!("  Patterns: {} ({}x{})", dataset.len(), dataset.rows, dataset.columns);
    eprintln!("  Nodes: {}, nominal capacity: {}", memory.nodes(), memory.capacity());

    let store = WeightStore::from(memory);
    save_weights(&store, &args.weights)?;
    eprintln!("Saved {} weights to {}", store.kind(), args.weights.display());
    Ok(())
}

fn test(args: TestArgs) -> Result<(), Box<dyn Error>> {
    let memory = load_hopfield(&args.weights)?;
    let dataset = load_dataset(&args.data)?;

    let config = match args.max_sweeps {
        Some(max_sweeps) => RecallConfig { max_sweeps },
        None => RecallConfig::for_nodes(memory.nodes()),
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut blocks = Vec::with_capacity(dataset.len());
    let mut settled = 0;
    for (idx, sample) in dataset.samples.iter().enumerate() {
        let input = sample.input().view();
        let outcome = recall(&memory, input, &config, &mut rng)?;
        let flipped = hamming_distance(input, outcome.pattern.view())?;
        eprintln!(
            "  Pattern {}: {} sweeps, {} node(s) changed, energy {:.1}{}",
            idx + 1,
            outcome.sweeps,
            flipped,
            outcome.energy,
            if outcome.converged { "" } else { " (not converged)" }
        );
        if outcome.converged {
            settled += 1;
        }
        blocks.push(format_recall(input, &outcome, dataset.rows, dataset.columns)?);
    }

    write_report(&args.output, &blocks.join("\n"))?;
    eprintln!("{settled}/{} patterns settled", dataset.len());
    eprintln!("Results saved to {}", args.output.display());
    Ok(())
}
