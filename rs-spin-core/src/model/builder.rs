use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};

use super::trigram_model::{Distribution, TrigramKey, TrigramModel};
use crate::text::Tokenizer;

/// Chunks per CPU when counting a corpus in parallel.
const CHUNK_FACTOR: usize = 8;

/// Accumulates trigram counts and turns them into a [`TrigramModel`].
///
/// Building is split in two passes:
/// - counting (`add_document`, `add_tokens`, `merge`), which may be spread
///   over several partial builders
/// - normalization (`build`), which runs exactly once over the final counts
///
/// # Invariants
/// - Every stored count is >= 1
/// - Normalization never happens while counts can still change
#[derive(Clone, Debug, Default)]
pub struct TrigramModelBuilder {
	/// Occurrences of each middle token, per context.
	/// Example: { ("the", "sat") => { "cat" => 2, "dog" => 1 } }
	counts: HashMap<TrigramKey, HashMap<String, usize>>,
	documents: usize,
	lines: usize,
}

impl TrigramModelBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts every line of a document.
	///
	/// Lines are separated by `\n`. Blank lines are skipped, as are lines
	/// shorter than three tokens (they hold no complete trigram).
	pub fn add_document<T: Tokenizer + ?Sized>(&mut self, document: &str, tokenizer: &T) {
		self.documents += 1;
		for line in document.split('\n') {
			if line.trim().is_empty() {
				continue;
			}
			self.lines += 1;
			let tokens = tokenizer.tokenize(line);
			self.add_tokens(&tokens);
		}
	}

	/// Counts the trigrams of one tokenized line.
	///
	/// For each window `(t0, t1, t2)` the middle token `t1` is counted under
	/// the key `(t0, t2)`.
	pub fn add_tokens<S: AsRef<str>>(&mut self, tokens: &[S]) {
		for window in tokens.windows(3) {
			let key = TrigramKey::new(window[0].as_ref(), window[2].as_ref());
			*self
				.counts
				.entry(key)
				.or_default()
				.entry(window[1].as_ref().to_owned())
				.or_insert(0) += 1;
		}
	}

	/// Merges the counts of another (partial) builder into this one.
	///
	/// Occurrence counts for matching contexts and candidates are summed.
	pub fn merge(&mut self, other: Self) {
		for (key, candidates) in other.counts {
			let existing = self.counts.entry(key).or_default();
			for (token, count) in candidates {
				*existing.entry(token).or_insert(0) += count;
			}
		}
		self.documents += other.documents;
		self.lines += other.lines;
	}

	/// Number of contexts counted so far.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Normalizes the counts and freezes them into a model.
	pub fn build(self) -> TrigramModel {
		let distributions: HashMap<TrigramKey, Distribution> = self
			.counts
			.into_iter()
			.map(|(key, candidates)| {
				let distribution = Distribution::from_counts(&candidates);
				(key, distribution)
			})
			.filter(|(_, distribution)| !distribution.is_empty())
			.collect();

		TrigramModel::new(distributions, self.documents, self.lines)
	}
}

impl TrigramModel {
	/// Builds a model from a whole corpus.
	///
	/// - Splits the documents into chunks (based on CPU cores * factor).
	/// - Counts each chunk into a partial builder on its own thread.
	/// - Merges all partial builders, then normalizes once.
	///
	/// An empty corpus yields an empty model.
	pub fn from_corpus<T: Tokenizer + ?Sized>(documents: &[String], tokenizer: &T) -> Self {
		if documents.is_empty() {
			info!("Empty corpus, built an empty trigram model");
			return Self::empty();
		}

		let chunks = num_cpus::get() * CHUNK_FACTOR;
		let chunk_size = documents.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		thread::scope(|scope| {
			for chunk in documents.chunks(chunk_size) {
				let tx = tx.clone();
				scope.spawn(move || {
					let mut partial = TrigramModelBuilder::new();
					for document in chunk {
						partial.add_document(document, tokenizer);
					}
					// The receiver outlives the scope
					let _ = tx.send(partial);
				});
			}
		});
		drop(tx);

		let mut builder = TrigramModelBuilder::new();
		for partial in rx.iter() {
			debug!("Merging partial model with {} contexts", partial.len());
			builder.merge(partial);
		}

		let model = builder.build();
		let stats = model.stats();
		info!(
			"Built trigram model: {} contexts, {} entries from {} documents ({} lines)",
			stats.keys, stats.entries, stats.documents, stats.lines
		);
		model
	}
}
