//! Stochastic rewriting of lines and documents.

/// Spinner settings.
pub mod config;

/// Weighted sampling and injectable randomness.
pub mod sampler;

/// Rewriting of a single line.
pub mod line_spinner;

/// Rewriting of whole documents and the replacement log.
pub mod document_spinner;

pub use config::SpinnerConfig;
pub use document_spinner::{DocumentSpinner, ReplacementLogEntry, SpinResult};
pub use line_spinner::LineSpinner;
pub use sampler::{RandomSource, RngSource, ScriptedSource, WeightedSampler};
