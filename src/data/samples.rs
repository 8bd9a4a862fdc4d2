//! Bipolar samples and the parsed dataset that carries them.

use ndarray::Array1;

use crate::core::{NetError, NetResult};
use crate::utils::check_bipolar;

/// One flattened grid pattern with an optional supervised target.
///
/// Immutable once built: constructors validate that every component is `±1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    input: Array1<i8>,
    target: Option<Array1<i8>>,
    label: Option<char>,
}

impl Sample {
    /// Build an unlabelled sample.
    ///
    /// # Errors
    /// `NotBipolar` if any input component is not `±1`.
    pub fn new(input: Array1<i8>) -> NetResult<Self> {
        check_bipolar(input.view())?;
        Ok(Self {
            input,
            target: None,
            label: None,
        })
    }

    /// Convenience constructor from a plain vector.
    pub fn from_vec(input: Vec<i8>) -> NetResult<Self> {
        Self::new(Array1::from_vec(input))
    }

    /// Attach the target output vector.
    ///
    /// # Errors
    /// `NotBipolar` if any target component is not `±1`.
    pub fn with_target(mut self, target: Array1<i8>) -> NetResult<Self> {
        check_bipolar(target.view())?;
        self.target = Some(target);
        Ok(self)
    }

    /// Attach the symbolic label.
    #[must_use]
    pub fn with_label(mut self, label: char) -> Self {
        self.label = Some(label);
        self
    }

    pub fn input(&self) -> &Array1<i8> {
        &self.input
    }

    pub fn target(&self) -> Option<&Array1<i8>> {
        self.target.as_ref()
    }

    pub fn label(&self) -> Option<char> {
        self.label
    }

    pub fn input_dim(&self) -> usize {
        self.input.len()
    }
}

/// Result of parsing one dataset file.
///
/// Grid dimensions travel with the samples so nothing has to remember them
/// between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Grid rows per sample
    pub rows: usize,
    /// Grid columns per sample
    pub columns: usize,
    /// Length of target vectors, if the file declares them
    pub output_dim: Option<usize>,
    pub samples: Vec<Sample>,
}

impl Dataset {
    /// Flattened input length (`rows * columns`).
    pub fn input_dim(&self) -> usize {
        self.rows * self.columns
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Check that every sample matches the declared dimensions.
    ///
    /// # Errors
    /// `ShapeMismatch` naming the first sample that disagrees.
    pub fn validate(&self) -> NetResult<()> {
        for (idx, sample) in self.samples.iter().enumerate() {
            if sample.input_dim() != self.input_dim() {
                return Err(NetError::ShapeMismatch(format!(
                    "sample {idx} has {} inputs, expected {}x{} = {}",
                    sample.input_dim(),
                    self.rows,
                    self.columns,
                    self.input_dim()
                )));
            }
            if let (Some(dim), Some(target)) = (self.output_dim, sample.target()) {
                if target.len() != dim {
                    return Err(NetError::ShapeMismatch(format!(
                        "sample {idx} has {} outputs, expected {dim}",
                        target.len()
                    )));
                }
            }
        }
        Ok(())
    }
}
