//! Weight stores for both network kinds.
//!
//! The two models keep deliberately different numeric shapes:
//! - [`PerceptronWeights`]: real-valued `(n_in, n_out)` matrix plus a bias per output
//!   and the theta threshold the weights were trained against
//! - [`HopfieldWeights`]: square integer `(n, n)` matrix with a zero diagonal, built
//!   from exact sums of `±1` products
//!
//! [`WeightStore`] tags them when a caller needs to hold either.

use ndarray::{Array1, Array2, ArrayView1};
use ndarray_rand::RandomExt;
use rand::distributions::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{NetError, NetResult};
use crate::utils::check_bipolar;

/// How Perceptron weights and biases start out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightInit {
    /// Every weight and bias is 0
    Zero,
    /// Every weight and bias is drawn uniformly from [-0.5, 0.5)
    Random,
}

/// Trained (or in-training) single-layer Perceptron weights.
///
/// `w[[i, o]]` connects input node `i` to output node `o`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptronWeights {
    /// Weight matrix, shape `(n_in, n_out)`
    pub w: Array2<f64>,
    /// Bias weights, shape `(n_out)`
    pub b: Array1<f64>,
    /// Dead-zone threshold carried from training to classification
    pub theta: f64,
}

impl PerceptronWeights {
    /// All-zero weights and biases.
    pub fn zeros(n_in: usize, n_out: usize, theta: f64) -> Self {
        Self {
            w: Array2::zeros((n_in, n_out)),
            b: Array1::zeros(n_out),
            theta,
        }
    }

    /// Weights and biases drawn uniformly from [-0.5, 0.5) using `rng`.
    pub fn random_using<R: Rng + ?Sized>(n_in: usize, n_out: usize, theta: f64, rng: &mut R) -> Self {
        let b = Array1::random_using(n_out, Uniform::new(-0.5, 0.5), rng);
        let w = Array2::random_using((n_in, n_out), Uniform::new(-0.5, 0.5), rng);
        Self { w, b, theta }
    }

    /// Initialise according to `init`.
    pub fn init_using<R: Rng + ?Sized>(
        init: WeightInit,
        n_in: usize,
        n_out: usize,
        theta: f64,
        rng: &mut R,
    ) -> Self {
        match init {
            WeightInit::Zero => Self::zeros(n_in, n_out, theta),
            WeightInit::Random => Self::random_using(n_in, n_out, theta, rng),
        }
    }

    /// Assemble weights from loaded parts, checking that the shapes agree.
    pub fn from_parts(w: Array2<f64>, b: Array1<f64>, theta: f64) -> NetResult<Self> {
        if w.ncols() != b.len() {
            return Err(NetError::ShapeMismatch(format!(
                "weight matrix has {} output columns but bias has {} entries",
                w.ncols(),
                b.len()
            )));
        }
        Ok(Self { w, b, theta })
    }

    /// Number of input nodes.
    pub fn input_dim(&self) -> usize {
        self.w.nrows()
    }

    /// Number of output nodes.
    pub fn output_dim(&self) -> usize {
        self.w.ncols()
    }

    /// Net input of output node `o`: `b[o] + Σ_i input[i] · w[i][o]`.
    ///
    /// Accumulates in input order so boundary cases land exactly where a
    /// sequential sum puts them. Callers check the input length first.
    pub(crate) fn net_input(&self, input: ArrayView1<'_, i8>, o: usize) -> f64 {
        let mut y_in = self.b[o];
        for (x, w) in input.iter().zip(self.w.column(o).iter()) {
            y_in += f64::from(*x) * w;
        }
        y_in
    }

    /// Net inputs for every output node.
    pub fn net_inputs(&self, input: ArrayView1<'_, i8>) -> NetResult<Array1<f64>> {
        self.check_input(input)?;
        Ok(Array1::from_shape_fn(self.output_dim(), |o| {
            self.net_input(input, o)
        }))
    }

    pub(crate) fn check_input(&self, input: ArrayView1<'_, i8>) -> NetResult<()> {
        if input.len() != self.input_dim() {
            return Err(NetError::ShapeMismatch(format!(
                "input has {} values but the network expects {}",
                input.len(),
                self.input_dim()
            )));
        }
        Ok(())
    }
}

/// Hebbian weight matrix of a discrete Hopfield network.
///
/// Invariants: square, diagonal exactly 0. Entries are only changed through
/// [`HopfieldWeights::learn`], so a store built by training is also symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HopfieldWeights {
    w: Array2<i32>,
}

impl HopfieldWeights {
    /// Empty memory with `n` nodes.
    pub fn zeros(n: usize) -> Self {
        Self {
            w: Array2::zeros((n, n)),
        }
    }

    /// Wrap a loaded matrix. Rejects non-square matrices and self-connections.
    pub fn from_matrix(w: Array2<i32>) -> NetResult<Self> {
        if w.nrows() != w.ncols() {
            return Err(NetError::ShapeMismatch(format!(
                "Hopfield matrix must be square, got {}x{}",
                w.nrows(),
                w.ncols()
            )));
        }
        if let Some(i) = (0..w.nrows()).find(|&i| w[[i, i]] != 0) {
            return Err(NetError::InvalidConfig(format!(
                "Hopfield matrix has self-connection w[{i}][{i}] = {}",
                w[[i, i]]
            )));
        }
        let weights = Self { w };
        if !weights.is_symmetric() {
            log::warn!("Loaded Hopfield matrix is not symmetric; recall may not settle");
        }
        Ok(weights)
    }

    /// Number of nodes.
    pub fn nodes(&self) -> usize {
        self.w.nrows()
    }

    /// Read-only view of the matrix.
    pub fn matrix(&self) -> &Array2<i32> {
        &self.w
    }

    /// Accumulate the outer product of `pattern` with itself, skipping the diagonal.
    ///
    /// Storing the same pattern twice doubles its contribution.
    pub fn learn(&mut self, pattern: ArrayView1<'_, i8>) -> NetResult<()> {
        let n = self.nodes();
        if pattern.len() != n {
            return Err(NetError::ShapeMismatch(format!(
                "pattern has {} values but the memory has {} nodes",
                pattern.len(),
                n
            )));
        }
        check_bipolar(pattern)?;

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    self.w[[i, j]] += i32::from(pattern[i]) * i32::from(pattern[j]);
                }
            }
        }
        Ok(())
    }

    /// `w[i][j] == w[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        let n = self.nodes();
        (0..n).all(|i| (i + 1..n).all(|j| self.w[[i, j]] == self.w[[j, i]]))
    }

    /// Hopfield energy of a state: `E = -½ Σ_ij w_ij y_i y_j`.
    ///
    /// Stored patterns sit in local minima.
    ///
    /// # Errors
    /// `ShapeMismatch` if the state length differs from the node count.
    pub fn energy(&self, state: ArrayView1<'_, i8>) -> NetResult<f64> {
        if state.len() != self.nodes() {
            return Err(NetError::ShapeMismatch(format!(
                "state has {} values but the memory has {} nodes",
                state.len(),
                self.nodes()
            )));
        }
        let mut sum = 0i64;
        for ((i, j), w) in self.w.indexed_iter() {
            sum += i64::from(*w) * i64::from(state[i]) * i64::from(state[j]);
        }
        Ok(-0.5 * sum as f64)
    }

    /// Rough number of random patterns the memory can hold reliably (0.138 N).
    pub fn capacity(&self) -> usize {
        (0.138 * self.nodes() as f64) as usize
    }

    /// True if `patterns` is more than the memory can hold. A single pattern
    /// always fits, even in memories too small to have a nominal capacity.
    pub(crate) fn exceeds_capacity(&self, patterns: usize) -> bool {
        patterns > self.capacity().max(1)
    }
}

/// Either kind of trained weights.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightStore {
    Perceptron(PerceptronWeights),
    Hopfield(HopfieldWeights),
}

impl WeightStore {
    /// Number of input nodes the store expects.
    pub fn input_dim(&self) -> usize {
        match self {
            WeightStore::Perceptron(p) => p.input_dim(),
            WeightStore::Hopfield(h) => h.nodes(),
        }
    }

    /// Number of output nodes the store produces.
    pub fn output_dim(&self) -> usize {
        match self {
            WeightStore::Perceptron(p) => p.output_dim(),
            WeightStore::Hopfield(h) => h.nodes(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            WeightStore::Perceptron(_) => "perceptron",
            WeightStore::Hopfield(_) => "hopfield",
        }
    }
}

impl From<PerceptronWeights> for WeightStore {
    fn from(weights: PerceptronWeights) -> Self {
        WeightStore::Perceptron(weights)
    }
}

impl From<HopfieldWeights> for WeightStore {
    fn from(weights: HopfieldWeights) -> Self {
        WeightStore::Hopfield(weights)
    }
}
