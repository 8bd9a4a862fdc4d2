//! Training loops, convergence checks, and metrics.
//!
//! - [`perceptron`]: online delta-rule learning, epoch by epoch until no weight moves
//! - [`hopfield`]: single-pass Hebbian accumulation

pub mod hopfield;
pub mod perceptron;

pub use hopfield::{store_patterns, train_hopfield};
pub use perceptron::{apply_delta_rule, train_perceptron, train_perceptron_with_rng};

use crate::core::{NetResult, PerceptronWeights};
use crate::data::Sample;
use crate::recall::classify;

/// Result of a Perceptron training run.
///
/// Non-convergence is not an error: the weights are still valid and can be
/// persisted, `converged` just records that `max_epochs` ran out first.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    pub weights: PerceptronWeights,
    /// Epochs executed, including the final quiet one when converged
    pub epochs: usize,
    pub converged: bool,
}

/// Classification metrics over a labelled sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Samples whose output vector equals the target exactly
    pub correct: usize,
    /// Samples that carried a target
    pub total: usize,
    /// `correct / total`, 0 when nothing was scored
    pub accuracy: f32,
}

/// Score trained weights against the targets of `samples`.
///
/// Samples without a target are skipped.
///
/// # Errors
/// `ShapeMismatch` if a sample does not fit the weights.
pub fn evaluate(weights: &PerceptronWeights, samples: &[Sample]) -> NetResult<Metrics> {
    let mut correct = 0;
    let mut total = 0;
    for sample in samples {
        let Some(target) = sample.target() else {
            continue;
        };
        let output = classify(weights, sample.input().view())?;
        total += 1;
        if output == *target {
            correct += 1;
        }
    }
    let accuracy = if total > 0 {
        correct as f32 / total as f32
    } else {
        0.0
    };
    Ok(Metrics {
        correct,
        total,
        accuracy,
    })
}
