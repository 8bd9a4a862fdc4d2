//! End-to-end tests: dataset file → training → weights file → recall → report.

use assocnet::checkpoint::{load_hopfield, load_perceptron, save_hopfield, save_perceptron};
use assocnet::data::load_dataset;
use assocnet::recall::classify_all;
use assocnet::report::{format_classification, format_recall, write_report};
use assocnet::{
    evaluate, recall, train_hopfield, train_perceptron, LabelTable, RecallConfig, TrainingConfig,
};
use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;

const PERCEPTRON_DATA: &str = "\
2\t\t// rows
2\t\t// columns
2\t\t// output dimension
2\t\t// samples

1 1
-1 -1
1 -1
X

-1 -1
1 1
-1 1
Y
";

const HOPFIELD_DATA: &str = "\
3
3
1

1 -1 1
-1 1 -1
1 -1 1
";

const HOPFIELD_NOISY: &str = "\
3
3
1

1 -1 1
-1 -1 -1
1 -1 1
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("assocnet_it_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_perceptron_pipeline() {
    let dir = scratch_dir("perceptron");
    let data_path = dir.join("train.txt");
    fs::write(&data_path, PERCEPTRON_DATA).unwrap();

    let dataset = load_dataset(&data_path).unwrap();
    dataset.validate().unwrap();
    let outcome = train_perceptron(&dataset.samples, &TrainingConfig::default()).unwrap();
    assert!(outcome.converged);

    let weights_path = dir.join("weights").join("perceptron.txt");
    save_perceptron(&outcome.weights, &weights_path).unwrap();
    let loaded = load_perceptron(&weights_path).unwrap();
    assert_eq!(loaded, outcome.weights);

    let metrics = evaluate(&loaded, &dataset.samples).unwrap();
    assert_eq!(metrics.correct, 2);

    let table = LabelTable::from_samples(&dataset.samples);
    let outputs = classify_all(&loaded, &dataset.samples).unwrap();
    let blocks: Vec<String> = dataset
        .samples
        .iter()
        .zip(outputs.iter())
        .map(|(s, o)| format_classification(s, o.view(), &table))
        .collect();
    let report = blocks.join("\n");
    assert_eq!(
        report,
        "Actual:\nX\n1 -1\nClassified:\nX\n1 -1\n\nActual:\nY\n-1 1\nClassified:\nY\n-1 1\n"
    );

    let report_path = dir.join("results.txt");
    write_report(&report_path, &report).unwrap();
    assert_eq!(fs::read_to_string(&report_path).unwrap(), report);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_hopfield_pipeline() {
    let dir = scratch_dir("hopfield");
    let data_path = dir.join("patterns.txt");
    let noisy_path = dir.join("noisy.txt");
    fs::write(&data_path, HOPFIELD_DATA).unwrap();
    fs::write(&noisy_path, HOPFIELD_NOISY).unwrap();

    let dataset = load_dataset(&data_path).unwrap();
    let memory = train_hopfield(&dataset.samples).unwrap();

    let weights_path = dir.join("hopfield.txt");
    save_hopfield(&memory, &weights_path).unwrap();
    let loaded = load_hopfield(&weights_path).unwrap();
    assert_eq!(loaded, memory);

    let noisy = load_dataset(&noisy_path).unwrap();
    let input = noisy.samples[0].input().view();
    let mut rng = StdRng::seed_from_u64(2024);
    let outcome = recall(&loaded, input, &RecallConfig::for_nodes(9), &mut rng).unwrap();
    assert!(outcome.converged);
    assert_eq!(outcome.pattern, array![1i8, -1, 1, -1, 1, -1, 1, -1, 1]);

    let text = format_recall(input, &outcome, noisy.rows, noisy.columns).unwrap();
    assert_eq!(text, "Input:\nO O\n   \nO O\nRecalled:\nO O\n O \nO O\n");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_loaded_weights_reject_wrong_input() {
    let dir = scratch_dir("mismatch");
    let weights_path = dir.join("w.txt");
    fs::write(&weights_path, "3\n1\n0\n\n1\n1\n1\n\n0\n").unwrap();

    let weights = load_perceptron(&weights_path).unwrap();
    assert_eq!(weights.input_dim(), 3);

    let data_path = dir.join("d.txt");
    fs::write(&data_path, "1\n2\n1\n1\n\n1 1\n1\n").unwrap();
    let dataset = load_dataset(&data_path).unwrap();
    assert!(classify_all(&weights, &dataset.samples).is_err());

    let _ = fs::remove_dir_all(&dir);
}
