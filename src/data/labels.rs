//! Symbolic labels for Perceptron output vectors.
//!
//! A [`LabelTable`] is an ordered list of `(label, code)` pairs. Resolution is an
//! exact linear search: an output vector that matches no code is
//! [`Classification::Undecided`], there is no nearest-code fallback.

use ndarray::{Array1, ArrayView1};
use std::fmt;

use super::samples::Sample;

/// Letters of the default seven-class table, in code order.
const DEFAULT_LETTERS: &[char] = &['A', 'B', 'C', 'D', 'E', 'J', 'K'];

/// Outcome of resolving an output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Label(char),
    Undecided,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Label(c) => write!(f, "{c}"),
            Classification::Undecided => write!(f, "Undecided"),
        }
    }
}

/// Ordered label → bipolar code associations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelTable {
    entries: Vec<(char, Array1<i8>)>,
}

impl LabelTable {
    pub fn new(entries: Vec<(char, Array1<i8>)>) -> Self {
        Self { entries }
    }

    /// One-hot bipolar codes: label `k` gets `+1` at position `k`, `-1` elsewhere.
    pub fn one_hot(labels: &[char]) -> Self {
        let n = labels.len();
        let entries = labels
            .iter()
            .enumerate()
            .map(|(k, &label)| {
                (
                    label,
                    Array1::from_shape_fn(n, |i| if i == k { 1 } else { -1 }),
                )
            })
            .collect();
        Self { entries }
    }

    /// The seven-letter table `A B C D E J K`.
    pub fn letters() -> Self {
        Self::one_hot(DEFAULT_LETTERS)
    }

    /// Table built from labelled samples, first occurrence of each label wins.
    ///
    /// Samples missing either a label or a target are skipped.
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut entries: Vec<(char, Array1<i8>)> = Vec::new();
        for sample in samples {
            if let (Some(label), Some(target)) = (sample.label(), sample.target()) {
                if !entries.iter().any(|(known, _)| *known == label) {
                    entries.push((label, target.clone()));
                }
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Code registered for `label`.
    pub fn code(&self, label: char) -> Option<&Array1<i8>> {
        self.entries
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, code)| code)
    }

    /// Resolve an output vector to the first label whose code matches exactly.
    pub fn resolve(&self, output: ArrayView1<'_, i8>) -> Classification {
        self.entries
            .iter()
            .find(|(_, code)| code.len() == output.len() && code.iter().eq(output.iter()))
            .map_or(Classification::Undecided, |(label, _)| {
                Classification::Label(*label)
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &(char, Array1<i8>)> {
        self.entries.iter()
    }
}
