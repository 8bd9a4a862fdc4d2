//! Online delta-rule training for the single-layer Perceptron.
//!
//! # Algorithm
//!
//! ```text
//! repeat (at most max_epochs):
//!     for each sample, for each output node o:
//!         y_in  = b[o] + Σ_i x[i] · w[i][o]
//!         y_out = f(y_in; θ)
//!         if y_out != t[o]:
//!             Δw[i][o] = α · t[o] · x[i]   applied only if Δ > weight_change_threshold
//!             Δb[o]    = α · t[o]          same guard
//! until an epoch applies no update
//! ```
//!
//! The guard is one-sided: it compares the signed delta, not its magnitude.
//! With a positive threshold, negative deltas are never applied.

use ndarray::ArrayView1;
use rand::Rng;

use super::TrainOutcome;
use crate::core::{Activation, DeadZone, NetError, NetResult, PerceptronWeights};
use crate::data::Sample;
use crate::TrainingConfig;

/// Input and output dimensions shared by every sample.
fn sample_dims(samples: &[Sample]) -> NetResult<(usize, usize)> {
    let first = samples.first().ok_or(NetError::EmptyDataset)?;
    let n_in = first.input_dim();
    let n_out = first.target().ok_or(NetError::MissingTarget(0))?.len();

    for (idx, sample) in samples.iter().enumerate() {
        let target = sample.target().ok_or(NetError::MissingTarget(idx))?;
        if sample.input_dim() != n_in || target.len() != n_out {
            return Err(NetError::ShapeMismatch(format!(
                "sample {idx} is {} -> {}, expected {n_in} -> {n_out}",
                sample.input_dim(),
                target.len()
            )));
        }
    }
    if n_in == 0 || n_out == 0 {
        return Err(NetError::ShapeMismatch(
            "samples must have at least one input and one output".to_string(),
        ));
    }
    Ok((n_in, n_out))
}

/// Apply the guarded delta rule to output node `o`.
///
/// Returns `true` if at least one weight or the bias moved.
///
/// # Errors
/// `ShapeMismatch` if the input length differs from the weights' input
/// dimension or `o` is not an output node. Nothing is updated in that case.
pub fn apply_delta_rule(
    weights: &mut PerceptronWeights,
    input: ArrayView1<'_, i8>,
    target: i8,
    o: usize,
    config: &TrainingConfig,
) -> NetResult<bool> {
    weights.check_input(input)?;
    if o >= weights.output_dim() {
        return Err(NetError::ShapeMismatch(format!(
            "output node {o} out of range for {} outputs",
            weights.output_dim()
        )));
    }

    let mut changed = false;
    let rate_target = config.learning_rate * f64::from(target);

    for (i, &x) in input.iter().enumerate() {
        let delta = rate_target * f64::from(x);
        if delta > config.weight_change_threshold {
            weights.w[[i, o]] += delta;
            changed = true;
        }
    }

    if rate_target > config.weight_change_threshold {
        weights.b[o] += rate_target;
        changed = true;
    }

    Ok(changed)
}

/// Train a Perceptron, drawing random initial weights from the thread RNG.
///
/// See [`train_perceptron_with_rng`].
pub fn train_perceptron(samples: &[Sample], config: &TrainingConfig) -> NetResult<TrainOutcome> {
    train_perceptron_with_rng(samples, config, &mut rand::thread_rng())
}

/// Train a Perceptron on `samples`.
///
/// `rng` is only consulted for [`crate::WeightInit::Random`].
///
/// # Errors
/// - `InvalidConfig` if `config` fails validation
/// - `EmptyDataset`, `MissingTarget` or `ShapeMismatch` for unusable samples
pub fn train_perceptron_with_rng<R: Rng + ?Sized>(
    samples: &[Sample],
    config: &TrainingConfig,
    rng: &mut R,
) -> NetResult<TrainOutcome> {
    config.validate()?;
    let (n_in, n_out) = sample_dims(samples)?;

    let mut weights = PerceptronWeights::init_using(config.init, n_in, n_out, config.theta, rng);
    let activation = DeadZone::new(config.theta);

    let mut epochs = 0;
    let mut converged = false;
    while !converged && epochs < config.max_epochs {
        epochs += 1;
        let mut updates = 0usize;

        for sample in samples {
            let input = sample.input().view();
            let Some(target) = sample.target() else {
                continue;
            };
            for o in 0..n_out {
                let y_out = activation.apply(weights.net_input(input, o), 0);
                if y_out != target[o] && apply_delta_rule(&mut weights, input, target[o], o, config)? {
                    updates += 1;
                }
            }
        }

        log::debug!("epoch {epochs}: {updates} node updates");
        converged = updates == 0;
    }

    if converged {
        log::debug!("Training converged after {epochs} epochs");
    } else {
        log::warn!(
            "Training reached max epochs ({}) before converging",
            config.max_epochs
        );
    }

    Ok(TrainOutcome {
        weights,
        epochs,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recall::classify;
    use crate::WeightInit;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(learning_rate: f64, weight_change_threshold: f64) -> TrainingConfig {
        TrainingConfig {
            learning_rate,
            theta: 0.0,
            weight_change_threshold,
            max_epochs: 100,
            init: WeightInit::Zero,
        }
    }

    fn sample(input: Vec<i8>, target: Vec<i8>) -> Sample {
        Sample::from_vec(input)
            .unwrap()
            .with_target(ndarray::Array1::from_vec(target))
            .unwrap()
    }

    #[test]
    fn test_separable_pair_converges() {
        let samples = vec![sample(vec![1, 1], vec![1]), sample(vec![-1, -1], vec![-1])];
        let outcome = train_perceptron(&samples, &config(0.5, 0.0001)).unwrap();

        assert!(outcome.converged);
        assert_eq!(outcome.epochs, 2);
        assert_abs_diff_eq!(outcome.weights.w[[0, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(outcome.weights.w[[1, 0]], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(outcome.weights.b[0], 0.5, epsilon = 1e-12);

        for s in &samples {
            let out = classify(&outcome.weights, s.input().view()).unwrap();
            assert_eq!(Some(&out), s.target());
        }
    }

    #[test]
    fn test_negative_delta_is_never_applied() {
        let mut weights = PerceptronWeights::zeros(2, 1, 0.0);
        let input = array![1i8, -1];
        let fired =
            apply_delta_rule(&mut weights, input.view(), -1, 0, &config(0.5, 0.0001)).unwrap();

        // Δ = -0.5 for input 0 and the bias: far past the threshold in magnitude,
        // but the signed comparison drops it. Input 1 gets Δ = +0.5.
        assert!(fired);
        assert_eq!(weights.w[[0, 0]], 0.0);
        assert_eq!(weights.w[[1, 0]], 0.5);
        assert_eq!(weights.b[0], 0.0);
    }

    #[test]
    fn test_small_positive_delta_dropped() {
        let mut weights = PerceptronWeights::zeros(2, 1, 0.0);
        let fired = apply_delta_rule(
            &mut weights,
            array![1i8, 1].view(),
            1,
            0,
            &config(0.5, 0.6),
        )
        .unwrap();
        assert!(!fired);
        assert_eq!(weights, PerceptronWeights::zeros(2, 1, 0.0));
    }

    #[test]
    fn test_delta_rule_rejects_bad_dimensions() {
        let cfg = config(1.0, 0.0001);
        let mut weights = PerceptronWeights::zeros(2, 1, 0.0);

        let long = apply_delta_rule(&mut weights, array![1i8, 1, 1].view(), 1, 0, &cfg);
        assert!(matches!(long, Err(NetError::ShapeMismatch(_))));

        let short = apply_delta_rule(&mut weights, array![1i8].view(), 1, 0, &cfg);
        assert!(matches!(short, Err(NetError::ShapeMismatch(_))));

        let bad_node = apply_delta_rule(&mut weights, array![1i8, 1].view(), 1, 1, &cfg);
        assert!(matches!(bad_node, Err(NetError::ShapeMismatch(_))));

        assert_eq!(weights, PerceptronWeights::zeros(2, 1, 0.0));
    }

    #[test]
    fn test_only_target_column_changes() {
        let mut weights = PerceptronWeights::zeros(2, 3, 0.0);
        apply_delta_rule(&mut weights, array![1i8, 1].view(), 1, 1, &config(1.0, 0.0001)).unwrap();
        assert_eq!(weights.w.column(0).sum(), 0.0);
        assert_eq!(weights.w.column(1).sum(), 2.0);
        assert_eq!(weights.w.column(2).sum(), 0.0);
        assert_eq!(weights.b, array![0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_contradictory_samples_hit_max_epochs() {
        let samples = vec![sample(vec![1, -1], vec![1]), sample(vec![1, -1], vec![-1])];
        let cfg = TrainingConfig {
            max_epochs: 10,
            ..config(1.0, 0.0001)
        };
        let outcome = train_perceptron(&samples, &cfg).unwrap();
        assert!(!outcome.converged);
        assert_eq!(outcome.epochs, 10);
    }

    #[test]
    fn test_random_init_is_reproducible() {
        let samples = vec![sample(vec![1, 1, -1], vec![1, -1]), sample(vec![-1, 1, 1], vec![-1, 1])];
        let cfg = TrainingConfig {
            init: WeightInit::Random,
            ..config(0.5, 0.0001)
        };
        let a = train_perceptron_with_rng(&samples, &cfg, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = train_perceptron_with_rng(&samples, &cfg, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a.weights, b.weights);
        assert_eq!(a.epochs, b.epochs);
    }

    #[test]
    fn test_rejects_bad_samples() {
        let cfg = config(0.5, 0.0001);
        assert!(matches!(train_perceptron(&[], &cfg), Err(NetError::EmptyDataset)));

        let unlabelled = vec![Sample::from_vec(vec![1, 1]).unwrap()];
        assert!(matches!(
            train_perceptron(&unlabelled, &cfg),
            Err(NetError::MissingTarget(0))
        ));

        let ragged = vec![sample(vec![1, 1], vec![1]), sample(vec![1, 1, 1], vec![1])];
        assert!(matches!(
            train_perceptron(&ragged, &cfg),
            Err(NetError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_rejects_bad_config() {
        let samples = vec![sample(vec![1, 1], vec![1])];
        let cfg = config(0.0, 0.0001);
        assert!(matches!(
            train_perceptron(&samples, &cfg),
            Err(NetError::InvalidConfig(_))
        ));
    }
}
