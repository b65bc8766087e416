use log::debug;
use serde::{Deserialize, Serialize};

use super::config::SpinnerConfig;
use super::line_spinner::LineSpinner;
use super::sampler::RandomSource;
use crate::error::{Result, SpinError};
use crate::model::trigram_model::TrigramModel;
use crate::text::{Detokenizer, Tokenizer};

/// One substitution performed while spinning.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReplacementLogEntry {
	pub old_word: String,
	pub new_word: String,
}

impl ReplacementLogEntry {
	pub fn new(old_word: impl Into<String>, new_word: impl Into<String>) -> Self {
		Self { old_word: old_word.into(), new_word: new_word.into() }
	}
}

/// Spun document and the substitutions made, in scan order
/// (top to bottom, left to right).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SpinResult {
	pub spun_text: String,
	pub replacements: Vec<ReplacementLogEntry>,
}

/// Spins whole documents line by line.
///
/// Lines are split on `\n`, the same separator used when training, and
/// joined back with it: the output always has as many lines as the input
/// and blank lines are kept verbatim.
pub struct DocumentSpinner<'a, T: ?Sized, D> {
	lines: LineSpinner<'a, T, D>,
}

impl<'a, T, D> DocumentSpinner<'a, T, D>
where
	T: Tokenizer + ?Sized,
	D: Detokenizer,
{
	/// Creates a spinner over a built model.
	///
	/// # Errors
	/// Returns [`SpinError::Config`] if `config` does not validate.
	pub fn new(model: &'a TrigramModel, tokenizer: &'a T, detokenizer: &'a D, config: &'a SpinnerConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self { lines: LineSpinner::new(model, tokenizer, detokenizer, config) })
	}

	/// Spins a document.
	pub fn spin<R: RandomSource + ?Sized>(&self, document: &str, rng: &mut R) -> SpinResult {
		let mut replacements = Vec::new();
		let output: Vec<String> = document
			.split('\n')
			.map(|line| {
				if line.trim().is_empty() {
					line.to_owned()
				} else {
					self.lines.spin(line, &mut replacements, &mut *rng)
				}
			})
			.collect();

		debug!("Spun {} lines with {} replacements", output.len(), replacements.len());
		SpinResult { spun_text: output.join("\n"), replacements }
	}

	/// Spins request input, rejecting absent or blank text.
	///
	/// # Errors
	/// Returns [`SpinError::EmptyInput`] before any processing when `text` is
	/// `None` or only whitespace.
	pub fn spin_input<R: RandomSource + ?Sized>(&self, text: Option<&str>, rng: &mut R) -> Result<SpinResult> {
		match text {
			Some(text) if !text.trim().is_empty() => Ok(self.spin(text, rng)),
			_ => Err(SpinError::EmptyInput),
		}
	}
}
