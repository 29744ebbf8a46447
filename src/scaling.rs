//! Manipulates the probabilities of onlookers working on different sources.
//!
//! During the onlooker phase, each onlooker bee picks a food source with
//! likelihood proportionate to a weight derived from the source's fitness.
//! The fitnesses are gathered as a slice, a
//! [`ScalingFunction`](type.ScalingFunction.html) turns them into weights, and
//! a source is chosen with probability:
//!
//! <center>P(*i*) = *scaled*<sub>*i*</sub>
//! / ∑<sub>*j* = 1 … N</sub> *scaled*<sub>*j*</sub></center>
//!
//! Fitness here is an objective value being minimized, so every scaling
//! function must give *lower* fitness a *higher* weight. By default,
//! [inverse](fn.inverse.html) scaling with `ε = 1e-6` is used.
//!
//! # Examples
//!
//! Users may also supply custom scaling functions. This one exaggerates
//! differences between good and bad sources:
//!
//! ```
//! use swarmopt::scaling::ScalingFunction;
//!
//! let cubed: Box<ScalingFunction> = Box::new(|fitnesses: &[f64]| {
//!     fitnesses.iter().map(|f| (1.0 / (1.0 + f.abs())).powi(3)).collect()
//! });
//! assert_eq!(cubed(&[0.0, 1.0]), vec![1.0, 0.125]);
//! ```
//!
//! Weights that do not form a distribution (a negative or non-finite weight,
//! or a total that is not positive) cannot drive a roulette wheel. The hive
//! then picks onlookers' sources uniformly for that phase and logs a warning.
//! Inverse scaling over negative fitnesses is the usual way to get there;
//! [rank](fn.rank.html) scaling never does.

use rand::Rng;

/// Transforms a set of fitnesses into weights for onlookers' random choices.
pub type ScalingFunction = dyn Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static;

/// Default guard added to fitnesses before inverting them.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Chooses sources in inverse proportion to their fitness.
///
/// scaled<sub>*i*</sub> = 1 / (fitness<sub>*i*</sub> + ε)
///
/// `epsilon` keeps a zero fitness from dividing by zero.
pub fn inverse(epsilon: f64) -> Box<ScalingFunction> {
    Box::new(move |fitnesses: &[f64]| fitnesses.iter().map(|f| 1.0 / (f + epsilon)).collect())
}

/// Chooses better sources polynomially more often.
///
/// scaled<sub>*i*</sub> = (1 / (fitness<sub>*i*</sub> + ε))<sup>*k*</sup>
pub fn inverse_power(epsilon: f64, k: f64) -> Box<ScalingFunction> {
    Box::new(move |fitnesses: &[f64]| {
        fitnesses
            .iter()
            .map(|f| (1.0 / (f + epsilon)).powf(k))
            .collect()
    })
}

/// Chooses sources according to their rank.
///
/// Rather than use the fitness directly, this formula ranks the N sources
/// 1 to N, from the worst (highest fitness) to the best, then chooses in
/// proportion to the value of the rank. So, the source with rank 6 will be
/// chosen twice as often as the source with rank 3. Because only the order
/// of the fitnesses matters, this works for objectives that go negative.
///
/// scaled<sub>*i*</sub> = rank<sub>*i*</sub>
pub fn rank() -> Box<ScalingFunction> {
    power_rank(1.0)
}

/// Chooses sources according to their rank, raised to a certain power.
///
/// This scaling formula was proposed by Yudong Zhang et al for the
/// Fitness-Scaling Chaotic ABC in the 2013 volume of *Mathematical Problems
/// in Engineering*. Conceptually, it composes power and
/// [rank](fn.rank.html) scaling.
///
/// scaled<sub>*i*</sub> = rank<sub>*i*</sub><sup>*k*</sup>
pub fn power_rank(k: f64) -> Box<ScalingFunction> {
    Box::new(move |fitnesses: &[f64]| {
        // Worst first, so that the worst source ends up with rank 1.
        let mut order = (0..fitnesses.len()).collect::<Vec<_>>();
        order.sort_by(|&a, &b| fitnesses[b].total_cmp(&fitnesses[a]));

        let mut ranks = vec![0.0; fitnesses.len()];
        for (rank_minus_one, &index) in order.iter().enumerate() {
            ranks[index] = ((rank_minus_one + 1) as f64).powf(k);
        }
        ranks
    })
}

/// Roulette wheel over a fixed set of weights.
pub(crate) struct Roulette {
    running_totals: Vec<f64>,
}

impl Roulette {
    /// Returns `None` when the weights are not a usable distribution.
    pub(crate) fn new(weights: &[f64]) -> Option<Roulette> {
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }
        let running_totals = weights
            .iter()
            .scan(0.0, |total, weight| {
                *total += *weight;
                Some(*total)
            })
            .collect::<Vec<f64>>();

        match running_totals.last() {
            Some(total) if total.is_finite() && *total > 0.0 => Some(Roulette { running_totals }),
            _ => None,
        }
    }

    pub(crate) fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let last = self.running_totals.len() - 1;
        let choice_point = rng.gen::<f64>() * self.running_totals[last];
        self.running_totals
            .iter()
            .position(|total| *total > choice_point)
            .unwrap_or(last)
    }
}
