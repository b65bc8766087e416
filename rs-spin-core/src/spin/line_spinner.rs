use log::trace;

use super::config::SpinnerConfig;
use super::document_spinner::ReplacementLogEntry;
use super::sampler::{RandomSource, WeightedSampler};
use crate::model::trigram_model::TrigramModel;
use crate::text::{Detokenizer, Tokenizer};

/// Outcome of examining the window `(i, i + 1, i + 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
	/// The middle token was emitted unchanged.
	Kept,
	/// The middle token, its substitute and the third token were emitted.
	Replaced,
}

impl Step {
	/// Distance to the start of the next window.
	///
	/// After a replacement the third token is already in the output, so the
	/// next window must start past it. Windows never overlap a substitution.
	fn advance(self) -> usize {
		match self {
			Step::Kept => 1,
			Step::Replaced => 2,
		}
	}
}

/// Rewrites a single line by substituting middle tokens in context.
///
/// # Responsibilities
/// - Scan the tokens of a line window by window
/// - Decide per window whether to replace (the replacement gate)
/// - Emit the original token followed by its marked substitute
/// - Record each substitution in the replacement log
pub struct LineSpinner<'a, T: ?Sized, D> {
	model: &'a TrigramModel,
	tokenizer: &'a T,
	detokenizer: &'a D,
	config: &'a SpinnerConfig,
	sampler: WeightedSampler,
}

impl<'a, T, D> LineSpinner<'a, T, D>
where
	T: Tokenizer + ?Sized,
	D: Detokenizer,
{
	pub fn new(model: &'a TrigramModel, tokenizer: &'a T, detokenizer: &'a D, config: &'a SpinnerConfig) -> Self {
		Self { model, tokenizer, detokenizer, config, sampler: WeightedSampler::new() }
	}

	/// Spins one line and returns the reassembled text.
	///
	/// Blank lines are returned unchanged. Substitutions are appended to
	/// `log` in scan order.
	pub fn spin<R: RandomSource + ?Sized>(&self, line: &str, log: &mut Vec<ReplacementLogEntry>, rng: &mut R) -> String {
		if line.trim().is_empty() {
			return line.to_owned();
		}

		let tokens = self.tokenizer.tokenize(line);
		let output = self.spin_tokens(&tokens, log, rng);
		self.detokenizer.detokenize(&output)
	}

	/// Spins an already tokenized line and returns the output tokens.
	///
	/// Lines shorter than three tokens have no window and are returned as is.
	pub fn spin_tokens<S, R>(&self, tokens: &[S], log: &mut Vec<ReplacementLogEntry>, rng: &mut R) -> Vec<String>
	where
		S: AsRef<str>,
		R: RandomSource + ?Sized,
	{
		let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
		if tokens.len() < 3 {
			return tokens.iter().map(|t| (*t).to_owned()).collect();
		}

		// The first token is never a substitution candidate
		let mut output = Vec::with_capacity(tokens.len() * 2);
		output.push(tokens[0].to_owned());

		let last_start = tokens.len() - 3;
		let mut i = 0;
		while i <= last_start {
			let step = self.visit(tokens[i], tokens[i + 1], tokens[i + 2], &mut output, log, &mut *rng);
			i += step.advance();
		}

		// Every window emits up to its middle token at least, and up to its
		// third token when replaced. Stopping at `len - 2` means the last
		// window was kept (or replaced one step earlier) and the final token
		// is still pending. Stopping at `len - 1` means it was emitted.
		if i == tokens.len() - 2 {
			output.push(tokens[tokens.len() - 1].to_owned());
		}

		output
	}

	/// Examines one window and emits its tokens.
	fn visit<R: RandomSource + ?Sized>(
		&self,
		first: &str,
		middle: &str,
		third: &str,
		output: &mut Vec<String>,
		log: &mut Vec<ReplacementLogEntry>,
		rng: &mut R,
	) -> Step {
		let distribution = self.model.lookup(first, third);

		// The draw is only taken for contexts with enough alternatives
		let eligible = !distribution.is_empty() && distribution.len() >= self.config.min_candidates;
		if !eligible || rng.next_unit() >= self.config.replace_probability {
			output.push(middle.to_owned());
			return Step::Kept;
		}

		let Some(candidate) = self.sampler.sample(distribution, rng) else {
			output.push(middle.to_owned());
			return Step::Kept;
		};

		trace!("Replacing '{middle}' with '{candidate}' between '{first}' and '{third}'");
		output.push(middle.to_owned());
		output.push(self.config.mark(candidate));
		output.push(third.to_owned());
		log.push(ReplacementLogEntry::new(middle, candidate));
		Step::Replaced
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::spin::sampler::{RngSource, ScriptedSource};
	use crate::text::{TreebankDetokenizer, TreebankTokenizer};

	fn model(corpus: &[&str]) -> TrigramModel {
		let documents: Vec<String> = corpus.iter().map(|d| d.to_string()).collect();
		TrigramModel::from_corpus(&documents, &TreebankTokenizer::new())
	}

	#[test]
	fn test_step_advance() {
		assert_eq!(Step::Kept.advance(), 1);
		assert_eq!(Step::Replaced.advance(), 2);
	}

	#[test]
	fn test_single_candidate_is_never_replaced() {
		let model = model(&["the cat sat on the mat"]);
		let config = SpinnerConfig::new().with_replace_probability(1.0);
		let spinner = LineSpinner::new(&model, &TreebankTokenizer, &TreebankDetokenizer, &config);
		let mut log = Vec::new();
		// A draw of 0.0 would pass any threshold
		let mut rng = ScriptedSource::constant(0.0);

		let spun = spinner.spin("the cat sat on the mat", &mut log, &mut rng);
		assert_eq!(spun, "the cat sat on the mat");
		assert!(log.is_empty());
	}

	#[test]
	fn test_forced_replacement_emits_original_marked_and_third() {
		let model = model(&["the cat sat", "the dog sat"]);
		let config = SpinnerConfig::new();
		let spinner = LineSpinner::new(&model, &TreebankTokenizer, &TreebankDetokenizer, &config);
		let mut log = Vec::new();
		// Gate draw 0.1 < 0.3, then sampler draw 0.9 -> "dog"
		let mut rng = ScriptedSource::new([0.1, 0.9]);

		let tokens = spinner.spin_tokens(&["the", "cat", "sat"], &mut log, &mut rng);
		assert_eq!(tokens, vec!["the", "cat", "<dog>", "sat"]);
		assert_eq!(log, vec![ReplacementLogEntry::new("cat", "dog")]);
	}

	#[test]
	fn test_gate_threshold_is_exclusive() {
		let model = model(&["the cat sat", "the dog sat"]);
		let config = SpinnerConfig::new();
		let spinner = LineSpinner::new(&model, &TreebankTokenizer, &TreebankDetokenizer, &config);
		let mut log = Vec::new();
		let mut rng = ScriptedSource::constant(0.3);

		let tokens = spinner.spin_tokens(&["the", "cat", "sat"], &mut log, &mut rng);
		assert_eq!(tokens, vec!["the", "cat", "sat"]);
		assert!(log.is_empty());
	}

	#[test]
	fn test_short_lines_are_untouched() {
		let model = model(&["a b c"]);
		let config = SpinnerConfig::new().with_replace_probability(1.0).with_min_candidates(1);
		let spinner = LineSpinner::new(&model, &TreebankTokenizer, &TreebankDetokenizer, &config);
		let mut log = Vec::new();
		let mut rng = ScriptedSource::constant(0.0);

		assert_eq!(spinner.spin("a b", &mut log, &mut rng), "a b");
		assert_eq!(spinner.spin("a", &mut log, &mut rng), "a");
		assert!(spinner.spin_tokens::<&str, _>(&[], &mut log, &mut rng).is_empty());
		assert!(log.is_empty());
	}

	#[test]
	fn test_blank_line_passes_through() {
		let model = TrigramModel::empty();
		let config = SpinnerConfig::new();
		let spinner = LineSpinner::new(&model, &TreebankTokenizer, &TreebankDetokenizer, &config);
		let mut log = Vec::new();

		assert_eq!(spinner.spin("   \t", &mut log, &mut RngSource::thread()), "   \t");
		assert_eq!(spinner.spin("", &mut log, &mut RngSource::thread()), "");
	}

	#[test]
	fn test_replacement_skips_the_third_token() {
		// Every context has two candidates, so every window is eligible
		let model = model(&["a x b y c z d", "a w b v c u d"]);
		let config = SpinnerConfig::new().with_replace_probability(1.0);
		let spinner = LineSpinner::new(&model, &TreebankTokenizer, &TreebankDetokenizer, &config);
		let mut log = Vec::new();
		let mut rng = ScriptedSource::constant(0.0);

		let tokens = spinner.spin_tokens(&["a", "x", "b", "y", "c", "z", "d"], &mut log, &mut rng);
		// Windows at 0, 2 and 4 are replaced; 1 and 3 are never examined
		assert_eq!(tokens, vec!["a", "x", "<w>", "b", "y", "<v>", "c", "z", "<u>", "d"]);
		assert_eq!(
			log,
			vec![
				ReplacementLogEntry::new("x", "w"),
				ReplacementLogEntry::new("y", "v"),
				ReplacementLogEntry::new("z", "u"),
			]
		);
	}
}
