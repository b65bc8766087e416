use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Context of a trigram: the tokens on each side of the middle token.
///
/// Two keys are equal iff both tokens match exactly (case-sensitive).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrigramKey {
	first: String,
	third: String,
}

impl TrigramKey {
	pub fn new(first: impl Into<String>, third: impl Into<String>) -> Self {
		Self { first: first.into(), third: third.into() }
	}

	pub fn first(&self) -> &str {
		&self.first
	}

	pub fn third(&self) -> &str {
		&self.third
	}
}

/// Probability distribution over the middle token of a trigram context.
///
/// # Invariants
/// - Every probability is in `(0, 1]`
/// - Probabilities sum to `1.0` (within floating-point tolerance)
/// - Candidates are stored sorted by token, which fixes the order the
///   sampler walks them in
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Distribution {
	candidates: Vec<(String, f64)>,
}

/// Returned for contexts never seen during training.
static EMPTY_DISTRIBUTION: Distribution = Distribution::empty();

impl Distribution {
	pub const fn empty() -> Self {
		Self { candidates: Vec::new() }
	}

	/// Normalizes raw occurrence counts into probabilities.
	///
	/// Zero counts are dropped. An empty (or all-zero) map yields an
	/// empty distribution.
	pub fn from_counts(counts: &HashMap<String, usize>) -> Self {
		let total: usize = counts.values().sum();
		if total == 0 {
			return Self::empty();
		}

		let mut candidates: Vec<(String, f64)> = counts
			.iter()
			.filter(|(_, count)| **count > 0)
			.map(|(token, count)| (token.clone(), *count as f64 / total as f64))
			.collect();
		candidates.sort_by(|a, b| a.0.cmp(&b.0));

		Self { candidates }
	}

	/// Number of distinct candidates.
	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	/// Iterates `(candidate, probability)` pairs in stored order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.candidates.iter().map(|(token, p)| (token.as_str(), *p))
	}

	/// Probability of `token`, or `None` if it was never observed here.
	pub fn probability(&self, token: &str) -> Option<f64> {
		self.iter().find(|(candidate, _)| *candidate == token).map(|(_, p)| p)
	}

	/// Sum of all probabilities. `1.0` for any non-empty distribution,
	/// `0.0` for the empty one.
	pub fn total(&self) -> f64 {
		self.candidates.iter().map(|(_, p)| p).sum()
	}

	pub fn first(&self) -> Option<&str> {
		self.candidates.first().map(|(token, _)| token.as_str())
	}
}

/// Summary of a built model.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelStats {
	/// Number of distinct trigram contexts.
	pub keys: usize,
	/// Number of `(context, candidate)` pairs.
	pub entries: usize,
	/// Documents read while training.
	pub documents: usize,
	/// Non-blank lines read while training.
	pub lines: usize,
}

/// Context-conditioned word distributions learned from a corpus.
///
/// Built once by [`TrigramModelBuilder`](super::builder::TrigramModelBuilder)
/// and never mutated afterwards, so a single instance can be shared by any
/// number of concurrent spins without locking.
///
/// Contexts are stored first token, then third token, so a lookup from two
/// borrowed tokens allocates nothing.
///
/// # Invariants
/// - Keys are exactly the contexts observed at least once in training
/// - Every stored distribution is non-empty and normalized
#[derive(Clone, Debug, Default)]
pub struct TrigramModel {
	/// Example: { "the" => { "sat" => {"cat": 0.5, "dog": 0.5} } }
	contexts: HashMap<String, HashMap<String, Distribution>>,
	keys: usize,
	documents: usize,
	lines: usize,
}

impl TrigramModel {
	/// A model that knows nothing; every lookup yields the empty distribution.
	pub fn empty() -> Self {
		Self::default()
	}

	pub(crate) fn new(distributions: HashMap<TrigramKey, Distribution>, documents: usize, lines: usize) -> Self {
		let keys = distributions.len();
		let mut contexts: HashMap<String, HashMap<String, Distribution>> = HashMap::new();
		for (key, distribution) in distributions {
			contexts.entry(key.first).or_default().insert(key.third, distribution);
		}
		Self { contexts, keys, documents, lines }
	}

	/// Distribution of middle tokens between `first` and `third`.
	///
	/// Unknown contexts are not an error: the empty distribution is returned.
	pub fn lookup(&self, first: &str, third: &str) -> &Distribution {
		self.find(first, third).unwrap_or(&EMPTY_DISTRIBUTION)
	}

	pub fn get(&self, key: &TrigramKey) -> Option<&Distribution> {
		self.find(key.first(), key.third())
	}

	fn find(&self, first: &str, third: &str) -> Option<&Distribution> {
		self.contexts.get(first)?.get(third)
	}

	/// Number of known contexts.
	pub fn len(&self) -> usize {
		self.keys
	}

	pub fn is_empty(&self) -> bool {
		self.keys == 0
	}

	/// Iterates `(first, third, distribution)` for every known context.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Distribution)> {
		self.contexts.iter().flat_map(|(first, thirds)| {
			thirds
				.iter()
				.map(move |(third, distribution)| (first.as_str(), third.as_str(), distribution))
		})
	}

	pub fn stats(&self) -> ModelStats {
		ModelStats {
			keys: self.keys,
			entries: self.iter().map(|(_, _, distribution)| distribution.len()).sum(),
			documents: self.documents,
			lines: self.lines,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
		pairs.iter().map(|(token, count)| (token.to_string(), *count)).collect()
	}

	#[test]
	fn test_from_counts_normalizes() {
		let distribution = Distribution::from_counts(&counts(&[("b", 3), ("a", 1)]));

		assert_eq!(distribution.len(), 2);
		assert_eq!(distribution.probability("a"), Some(0.25));
		assert_eq!(distribution.probability("b"), Some(0.75));
		assert!((distribution.total() - 1.0).abs() < 1e-9);
	}

	#[test]
	fn test_from_counts_sorts_candidates() {
		let distribution = Distribution::from_counts(&counts(&[("zebra", 1), ("apple", 1), ("mango", 1)]));
		let order: Vec<&str> = distribution.iter().map(|(token, _)| token).collect();
		assert_eq!(order, vec!["apple", "mango", "zebra"]);
		assert_eq!(distribution.first(), Some("apple"));
	}

	#[test]
	fn test_from_counts_empty() {
		assert!(Distribution::from_counts(&HashMap::new()).is_empty());
		assert!(Distribution::from_counts(&counts(&[("a", 0)])).is_empty());
	}

	#[test]
	fn test_lookup_unknown_key_is_empty() {
		let model = TrigramModel::empty();
		let distribution = model.lookup("the", "sat");
		assert!(distribution.is_empty());
		assert_eq!(distribution.total(), 0.0);
		assert!(model.get(&TrigramKey::new("the", "sat")).is_none());
	}

	#[test]
	fn test_keys_are_case_sensitive() {
		assert_ne!(TrigramKey::new("The", "sat"), TrigramKey::new("the", "sat"));
		assert_eq!(TrigramKey::new("the", "sat"), TrigramKey::new("the".to_owned(), "sat"));
	}

	#[test]
	fn test_stats() {
		let mut distributions = HashMap::new();
		distributions.insert(TrigramKey::new("a", "c"), Distribution::from_counts(&counts(&[("b", 1), ("x", 2)])));
		distributions.insert(TrigramKey::new("b", "d"), Distribution::from_counts(&counts(&[("c", 1)])));
		let model = TrigramModel::new(distributions, 1, 2);

		assert_eq!(model.stats(), ModelStats { keys: 2, entries: 3, documents: 1, lines: 2 });
		assert_eq!(model.len(), 2);
		assert!(!model.is_empty());
	}

	#[test]
	fn test_lookup_by_borrowed_tokens() {
		let mut distributions = HashMap::new();
		distributions.insert(TrigramKey::new("the", "sat"), Distribution::from_counts(&counts(&[("cat", 1)])));
		distributions.insert(TrigramKey::new("the", "mat"), Distribution::from_counts(&counts(&[("red", 1)])));
		let model = TrigramModel::new(distributions, 1, 1);

		let first = String::from("the");
		assert_eq!(model.lookup(&first, "sat").probability("cat"), Some(1.0));
		assert_eq!(model.lookup(&first, "mat").probability("red"), Some(1.0));
		assert!(model.lookup(&first, "hat").is_empty());
		assert!(model.lookup("a", "sat").is_empty());
		assert_eq!(model.get(&TrigramKey::new("the", "mat")), Some(model.lookup("the", "mat")));

		let mut contexts: Vec<(&str, &str)> = model.iter().map(|(first, third, _)| (first, third)).collect();
		contexts.sort();
		assert_eq!(contexts, vec![("the", "mat"), ("the", "sat")]);
		assert_eq!(model.len(), 2);
	}
}
