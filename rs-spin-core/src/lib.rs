//! Trigram-based article spinning library.
//!
//! This crate provides:
//! - A trigram model of middle-token distributions built from a corpus
//! - Weighted sampling with injectable randomness
//! - Line and document spinners that substitute words in context and log
//!   every substitution
//! - Treebank-style tokenization and detokenization
//!
//! The model is built once and only read afterwards, so it can be shared
//! between concurrent spins.

/// Trigram model and its builder.
pub mod model;

/// Line and document spinning.
pub mod spin;

/// Tokenizer and detokenizer capabilities.
pub mod text;

/// Training corpus suppliers.
pub mod corpus;

/// Error type of the crate.
pub mod error;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{Result, SpinError};
