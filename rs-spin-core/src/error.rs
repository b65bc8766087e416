use thiserror::Error;

/// Errors that can cross the boundary of the spinning core.
///
/// Missing trigram contexts and floating-point rounding in the sampler are
/// not represented here: both are expected during normal operation and are
/// recovered inside the algorithm.
#[derive(Debug, Error)]
pub enum SpinError {
	/// The request carried no text (absent, empty or whitespace only).
	#[error("Text input required")]
	EmptyInput,

	/// A configuration value is out of range or could not be parsed.
	#[error("Configuration error: {0}")]
	Config(String),

	/// Reading the corpus failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpinError>;
