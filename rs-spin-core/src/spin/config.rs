//! Spinner settings.

use crate::error::{Result, SpinError};

/// Settings of the replacement gate and of the substitution marker.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerConfig {
	/// Probability of replacing the middle token of an eligible window.
	pub replace_probability: f64,

	/// Minimum number of candidates a context needs before a replacement
	/// is considered. With a single candidate there is no real alternative.
	pub min_candidates: usize,

	/// Written before a substituted token.
	pub marker_open: String,

	/// Written after a substituted token.
	pub marker_close: String,
}

impl Default for SpinnerConfig {
	fn default() -> Self {
		Self {
			replace_probability: 0.3,
			min_candidates: 2,
			marker_open: "<".to_owned(),
			marker_close: ">".to_owned(),
		}
	}
}

impl SpinnerConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_replace_probability(mut self, probability: f64) -> Self {
		self.replace_probability = probability;
		self
	}

	pub fn with_min_candidates(mut self, min_candidates: usize) -> Self {
		self.min_candidates = min_candidates;
		self
	}

	pub fn with_marker(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
		self.marker_open = open.into();
		self.marker_close = close.into();
		self
	}

	/// Checks that the settings are usable.
	///
	/// # Errors
	/// Returns [`SpinError::Config`] if the probability is outside `[0, 1]`
	/// or `min_candidates` is zero.
	pub fn validate(&self) -> Result<()> {
		if !(0.0..=1.0).contains(&self.replace_probability) {
			return Err(SpinError::Config(format!(
				"replace_probability must be between 0.0 and 1.0, got {}",
				self.replace_probability
			)));
		}
		if self.min_candidates == 0 {
			return Err(SpinError::Config("min_candidates must be >= 1".to_owned()));
		}
		Ok(())
	}

	/// Wraps a substituted token in the configured marker.
	pub fn mark(&self, token: &str) -> String {
		format!("{}{}{}", self.marker_open, token, self.marker_close)
	}
}
