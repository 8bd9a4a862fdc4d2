//! Core building blocks shared by both networks.
//!
//! This module provides:
//! - The crate error type ([`NetError`]) and result alias
//! - Ternary activation functions (dead-zone and hold-on-zero)
//! - Weight stores for the Perceptron and the Hopfield memory
//!
//! ## Activation
//!
//! Both networks squash a net input into a bipolar decision, but they disagree on
//! what happens exactly at the boundary:
//! ```text
//! perceptron:  f(y_in; θ)      = +1 if y_in > θ, -1 if y_in < θ, 0 otherwise
//! hopfield:    f(y_in; y_prev) = +1 if y_in > 0, -1 if y_in < 0, y_prev otherwise
//! ```

pub mod weights;

pub use weights::{HopfieldWeights, PerceptronWeights, WeightInit, WeightStore};

use ndarray::Array1;
use thiserror::Error;

/// Error type for network operations.
#[derive(Debug, Error)]
pub enum NetError {
    /// Vector or matrix dimensions disagree
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    /// Invalid training or recall configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// A component outside {+1, -1} where a bipolar value is required
    #[error("Value {value} at position {index} is not bipolar (expected 1 or -1)")]
    NotBipolar { index: usize, value: i64 },
    /// Supervised training was handed a sample without a target vector
    #[error("Sample {0} has no target vector")]
    MissingTarget(usize),
    /// Training requires at least one sample
    #[error("Dataset is empty")]
    EmptyDataset,
    /// Malformed dataset or weights text
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
    /// Underlying file system failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetResult<T> = Result<T, NetError>;

impl NetError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        NetError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Ternary activation function.
///
/// `prev` is the unit's current output. Implementations decide whether it matters.
pub trait Activation {
    /// Map a net input to `+1`, `-1` or the boundary value.
    fn apply(&self, y_in: f64, prev: i8) -> i8;

    /// Name for debugging
    fn name(&self) -> &'static str;
}

/// Dead-zone threshold activation used by the Perceptron.
///
/// Exact equality with `theta` yields `0`, a genuine third state rather than a
/// fallback. The previous output is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeadZone {
    pub theta: f64,
}

impl DeadZone {
    pub fn new(theta: f64) -> Self {
        Self { theta }
    }

    /// Apply the activation to every component of a net-input vector.
    pub fn apply_all(&self, y_in: &Array1<f64>) -> Array1<i8> {
        y_in.mapv(|v| self.apply(v, 0))
    }
}

impl Activation for DeadZone {
    fn apply(&self, y_in: f64, _prev: i8) -> i8 {
        if y_in > self.theta {
            1
        } else if y_in < self.theta {
            -1
        } else {
            0
        }
    }

    fn name(&self) -> &'static str {
        "dead-zone"
    }
}

/// Sign activation that holds the previous output on a zero net input.
///
/// This is the Hopfield update law: a unit with no net drive keeps its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoldOnZero;

impl Activation for HoldOnZero {
    fn apply(&self, y_in: f64, prev: i8) -> i8 {
        if y_in > 0.0 {
            1
        } else if y_in < 0.0 {
            -1
        } else {
            prev
        }
    }

    fn name(&self) -> &'static str {
        "hold-on-zero"
    }
}
