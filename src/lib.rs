//! # assocnet
//!
//! Two classical associative-pattern engines for small bitmap-like bipolar vectors.
//!
//! ## Overview
//!
//! - A supervised **Perceptron classifier**: single layer, bias term, delta-rule
//!   learning and a dead-zone threshold activation.
//! - An unsupervised **Hopfield memory**: Hebbian outer-product learning and
//!   asynchronous relaxation to a stable attractor.
//!
//! Both consume flattened `±1` grids ([`Sample`]) and produce weight stores that
//! can be persisted with [`checkpoint`] and reloaded for recall.
//!
//! ## Structure
//!
//! - [`core`]: Errors, activations, weight stores
//! - [`data`]: Samples, dataset parsing, label tables
//! - [`training`]: Perceptron and Hopfield trainers, metrics
//! - [`recall`]: Classification and asynchronous relaxation
//! - [`checkpoint`]: Weight file formats
//! - [`report`]: Result formatting
//! - [`utils`]: Bipolar vector helpers

pub mod checkpoint;
pub mod core;
pub mod data;
pub mod recall;
pub mod report;
pub mod training;
pub mod utils;

pub use core::{
    Activation, DeadZone, HoldOnZero, HopfieldWeights, NetError, NetResult, PerceptronWeights,
    WeightInit, WeightStore,
};
pub use data::{Classification, Dataset, LabelTable, Sample};
pub use recall::{classify, recall, RecallOutcome, RecallState};
pub use training::{evaluate, train_hopfield, train_perceptron, Metrics, TrainOutcome};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Perceptron training configuration.
///
/// Used by [`train_perceptron`]; read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Delta-rule learning rate, in (0, 1]
    pub learning_rate: f64,
    /// Dead-zone activation threshold
    pub theta: f64,
    /// A weight delta is applied only if it exceeds this value
    pub weight_change_threshold: f64,
    /// Upper bound on training epochs
    pub max_epochs: usize,
    /// Starting weights
    pub init: WeightInit,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1.0,
            theta: 0.0,
            weight_change_threshold: 0.0001,
            max_epochs: 1000,
            init: WeightInit::Zero,
        }
    }
}

impl TrainingConfig {
    /// Check value ranges.
    ///
    /// # Errors
    /// `InvalidConfig` describing the first out-of-range field.
    pub fn validate(&self) -> NetResult<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(NetError::InvalidConfig(format!(
                "learning rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        if !self.theta.is_finite() {
            return Err(NetError::InvalidConfig(format!(
                "theta must be finite, got {}",
                self.theta
            )));
        }
        if !(self.weight_change_threshold > 0.0 && self.weight_change_threshold.is_finite()) {
            return Err(NetError::InvalidConfig(format!(
                "weight change threshold must be positive, got {}",
                self.weight_change_threshold
            )));
        }
        if self.max_epochs == 0 {
            return Err(NetError::InvalidConfig(
                "max epochs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    /// `Io` if the file cannot be read, `InvalidConfig` if it is not valid JSON
    /// or fails [`TrainingConfig::validate`].
    pub fn from_json_file(path: &Path) -> NetResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json).map_err(|e| {
            NetError::InvalidConfig(format!("failed to parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }
}

/// Hopfield recall configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecallConfig {
    /// Sweeps allowed before relaxation gives up and reports non-convergence
    pub max_sweeps: usize,
}

impl RecallConfig {
    /// Sweeps allowed per node when no explicit cap is given.
    pub const SWEEPS_PER_NODE: usize = 10;

    /// Default cap for a network of `n` nodes: `10 * n` sweeps.
    pub fn for_nodes(n: usize) -> Self {
        Self {
            max_sweeps: (Self::SWEEPS_PER_NODE * n).max(1),
        }
    }
}
