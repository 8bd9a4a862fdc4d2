//! Recall with trained weights.
//!
//! - Perceptron: one-shot classification through the dead-zone activation
//! - Hopfield: asynchronous relaxation to a fixed point, see [`hopfield`]

pub mod hopfield;

pub use hopfield::{recall, RecallOutcome, RecallState};

use ndarray::{Array1, ArrayView1};

use crate::core::{DeadZone, NetResult, PerceptronWeights};
use crate::data::Sample;

/// Classify one input vector.
///
/// Each output node is `+1`, `-1`, or `0` when its net input lands exactly on theta.
///
/// # Errors
/// `ShapeMismatch` if the input length differs from the weights' input dimension.
pub fn classify(weights: &PerceptronWeights, input: ArrayView1<'_, i8>) -> NetResult<Array1<i8>> {
    let y_in = weights.net_inputs(input)?;
    Ok(DeadZone::new(weights.theta).apply_all(&y_in))
}

/// Classify every sample, in order.
pub fn classify_all(weights: &PerceptronWeights, samples: &[Sample]) -> NetResult<Vec<Array1<i8>>> {
    samples
        .iter()
        .map(|sample| classify(weights, sample.input().view()))
        .collect()
}
