//! Trigram language model.
//!
//! - `TrigramKey`, `Distribution` and the immutable `TrigramModel`
//! - `TrigramModelBuilder`, which counts a corpus and normalizes once

/// Context keys, distributions and the read-only model.
pub mod trigram_model;

/// Counting, merging and normalization.
///
/// Also provides parallel construction from a whole corpus.
pub mod builder;

pub use builder::TrigramModelBuilder;
pub use trigram_model::{Distribution, ModelStats, TrigramKey, TrigramModel};
