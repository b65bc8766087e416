use std::collections::VecDeque;

use log::trace;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::model::trigram_model::Distribution;

/// Source of uniform draws in `[0, 1)`.
///
/// Spinning only consumes randomness through this trait, so tests can
/// supply fixed draws without touching any global random state.
pub trait RandomSource {
	fn next_unit(&mut self) -> f64;
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(R);

impl<R: Rng> RngSource<R> {
	pub fn new(rng: R) -> Self {
		Self(rng)
	}
}

impl RngSource<ThreadRng> {
	/// Thread-local generator, seeded by the OS.
	pub fn thread() -> Self {
		Self(rand::rng())
	}
}

impl RngSource<StdRng> {
	/// Reproducible generator.
	pub fn seeded(seed: u64) -> Self {
		Self(StdRng::seed_from_u64(seed))
	}
}

impl<R: Rng> RandomSource for RngSource<R> {
	fn next_unit(&mut self) -> f64 {
		self.0.random::<f64>()
	}
}

/// [`RandomSource`] replaying a fixed sequence of draws.
///
/// Once the sequence is exhausted the last draw is repeated (`0.0` if the
/// sequence was empty).
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
	draws: VecDeque<f64>,
	last: f64,
}

impl ScriptedSource {
	pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
		Self { draws: draws.into_iter().collect(), last: 0.0 }
	}

	/// Always yields `value`.
	pub fn constant(value: f64) -> Self {
		Self { draws: VecDeque::new(), last: value }
	}

	/// Draws not consumed yet.
	pub fn remaining(&self) -> usize {
		self.draws.len()
	}
}

impl RandomSource for ScriptedSource {
	fn next_unit(&mut self) -> f64 {
		if let Some(draw) = self.draws.pop_front() {
			self.last = draw;
		}
		self.last
	}
}

/// Draws one token from a [`Distribution`].
#[derive(Debug, Default, Clone, Copy)]
pub struct WeightedSampler;

impl WeightedSampler {
	pub fn new() -> Self {
		Self
	}

	/// Samples a candidate proportionally to its probability.
	///
	/// A single draw `u` is taken; candidates are walked in stored order
	/// while accumulating their probabilities, and the first one whose
	/// cumulative sum exceeds `u` is returned.
	///
	/// Returns `None` only for an empty distribution.
	///
	/// # Notes
	/// Rounding can leave the final cumulative sum slightly below `1.0`, so
	/// a draw close to `1.0` may exceed it. In that case the first candidate
	/// is returned instead of failing.
	pub fn sample<'d, R: RandomSource + ?Sized>(&self, distribution: &'d Distribution, rng: &mut R) -> Option<&'d str> {
		if distribution.is_empty() {
			return None;
		}

		let u = rng.next_unit();
		let mut cumulative = 0.0;
		for (token, probability) in distribution.iter() {
			cumulative += probability;
			if u < cumulative {
				return Some(token);
			}
		}

		trace!("Cumulative probability {cumulative} did not exceed draw {u}, falling back to first candidate");
		distribution.first()
	}
}
