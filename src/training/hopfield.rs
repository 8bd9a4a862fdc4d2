//! Hebbian training for the Hopfield memory.
//!
//! One pass, no epochs, no learning rate:
//! ```text
//! W = Σ_s x_s x_sᵀ   with W[i][i] held at 0
//! ```

use crate::core::{HopfieldWeights, NetError, NetResult};
use crate::data::Sample;

/// Build a fresh memory holding every sample's input pattern.
///
/// # Errors
/// `EmptyDataset` without samples, `ShapeMismatch` if pattern lengths differ.
pub fn train_hopfield(samples: &[Sample]) -> NetResult<HopfieldWeights> {
    let first = samples.first().ok_or(NetError::EmptyDataset)?;
    let mut memory = HopfieldWeights::zeros(first.input_dim());
    store_patterns(&mut memory, samples)?;
    Ok(memory)
}

/// Add more patterns to an existing memory.
///
/// Dimensions are checked for every sample before anything is accumulated, so a
/// failed call leaves `memory` unchanged. Storing a pattern again strengthens it.
pub fn store_patterns(memory: &mut HopfieldWeights, samples: &[Sample]) -> NetResult<()> {
    if let Some((idx, sample)) = samples
        .iter()
        .enumerate()
        .find(|(_, s)| s.input_dim() != memory.nodes())
    {
        return Err(NetError::ShapeMismatch(format!(
            "sample {idx} has {} values but the memory has {} nodes",
            sample.input_dim(),
            memory.nodes()
        )));
    }

    for sample in samples {
        memory.learn(sample.input().view())?;
    }

    if memory.exceeds_capacity(samples.len()) {
        log::warn!(
            "Stored {} patterns in a {}-node memory (nominal capacity {}); recall may produce spurious states",
            samples.len(),
            memory.nodes(),
            memory.capacity()
        );
    }
    Ok(())
}
