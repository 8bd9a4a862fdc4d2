//! Asynchronous Hopfield relaxation.
//!
//! # Algorithm
//!
//! ```text
//! x = y = input
//! loop:
//!     order = fresh random permutation of 0..N
//!     y = x
//!     for i in order:
//!         y_in = x[i] + Σ_j y[j] · W[j][i]      (latest y, updates visible at once)
//!         y[i] = f(y_in; y[i])                   (hold on zero)
//!     if nothing changed: converged, y is the recalled pattern
//!     x = y
//! ```
//!
//! Relaxation stops early at [`RecallConfig::max_sweeps`] and reports the state it
//! reached as not converged.

use ndarray::{Array1, ArrayView1};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::{Activation, HoldOnZero, HopfieldWeights, NetError, NetResult};
use crate::utils::check_bipolar;
use crate::RecallConfig;

/// Per-sample working state of one relaxation.
#[derive(Debug, Clone)]
pub struct RecallState {
    /// State at the start of the current sweep
    pub x: Array1<i8>,
    /// State under update
    pub y: Array1<i8>,
    /// Node order of the last sweep
    pub node_order: Vec<usize>,
    pub converged: bool,
    /// Sweeps completed so far
    pub sweeps: usize,
}

impl RecallState {
    pub fn new(input: ArrayView1<'_, i8>) -> Self {
        Self {
            x: input.to_owned(),
            y: input.to_owned(),
            node_order: (0..input.len()).collect(),
            converged: false,
            sweeps: 0,
        }
    }

    /// One sweep in a freshly shuffled node order.
    ///
    /// Returns `true` if any node changed.
    pub fn sweep<R: Rng + ?Sized>(&mut self, weights: &HopfieldWeights, rng: &mut R) -> NetResult<bool> {
        let mut order = std::mem::take(&mut self.node_order);
        order.shuffle(rng);
        let changed = self.sweep_in_order(weights, &order);
        self.node_order = order;
        changed
    }

    /// One sweep visiting nodes in the given order.
    ///
    /// # Errors
    /// `ShapeMismatch` if the weights do not match the state, or if `order`
    /// names a node that does not exist.
    pub fn sweep_in_order(&mut self, weights: &HopfieldWeights, order: &[usize]) -> NetResult<bool> {
        let n = self.x.len();
        if weights.nodes() != n {
            return Err(NetError::ShapeMismatch(format!(
                "state has {n} nodes but the memory has {}",
                weights.nodes()
            )));
        }
        if let Some(&bad) = order.iter().find(|&&i| i >= n) {
            return Err(NetError::ShapeMismatch(format!(
                "node {bad} out of range for {n} nodes"
            )));
        }

        let w = weights.matrix();
        let activation = HoldOnZero;
        self.y.assign(&self.x);

        let mut changed = false;
        for &i in order {
            let mut y_in = i64::from(self.x[i]);
            for j in 0..n {
                y_in += i64::from(self.y[j]) * i64::from(w[[j, i]]);
            }
            let next = activation.apply(y_in as f64, self.y[i]);
            if next != self.y[i] {
                self.y[i] = next;
                changed = true;
            }
        }

        self.sweeps += 1;
        if changed {
            self.x.assign(&self.y);
        } else {
            self.converged = true;
        }
        Ok(changed)
    }
}

/// Final state of a relaxation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecallOutcome {
    /// Recalled (or best-effort) pattern
    pub pattern: Array1<i8>,
    /// Sweeps executed, including the final quiet one when converged
    pub sweeps: usize,
    pub converged: bool,
    /// Hopfield energy of `pattern`
    pub energy: f64,
}

/// Relax `input` against the memory until no node changes.
///
/// `rng` supplies the per-sweep node permutations; a seeded generator makes
/// recall reproducible.
///
/// # Errors
/// - `ShapeMismatch` if the input length differs from the node count
/// - `NotBipolar` if the input has components other than `±1`
/// - `InvalidConfig` if `config.max_sweeps` is 0
pub fn recall<R: Rng + ?Sized>(
    weights: &HopfieldWeights,
    input: ArrayView1<'_, i8>,
    config: &RecallConfig,
    rng: &mut R,
) -> NetResult<RecallOutcome> {
    if input.len() != weights.nodes() {
        return Err(NetError::ShapeMismatch(format!(
            "input has {} values but the memory has {} nodes",
            input.len(),
            weights.nodes()
        )));
    }
    check_bipolar(input)?;
    if config.max_sweeps == 0 {
        return Err(NetError::InvalidConfig(
            "max sweeps must be at least 1".to_string(),
        ));
    }

    let mut state = RecallState::new(input);
    while !state.converged && state.sweeps < config.max_sweeps {
        state.sweep(weights, rng)?;
    }

    if state.converged {
        log::debug!("Recall settled after {} sweeps", state.sweeps);
    } else {
        log::warn!(
            "Recall did not settle within {} sweeps; returning the last state",
            config.max_sweeps
        );
    }

    let energy = weights.energy(state.y.view())?;
    Ok(RecallOutcome {
        pattern: state.y,
        sweeps: state.sweeps,
        converged: state.converged,
        energy,
    })
}
