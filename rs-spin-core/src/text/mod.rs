//! Tokenization capabilities.
//!
//! The spinning core only depends on the [`Tokenizer`] and [`Detokenizer`]
//! traits. Treebank-style implementations are provided so the crate can be
//! used out of the box.

/// Splits a line of text into tokens.
pub mod tokenizer;

/// Reassembles tokens into readable text.
pub mod detokenizer;

pub use detokenizer::{Detokenizer, TreebankDetokenizer};
pub use tokenizer::{Tokenizer, TreebankTokenizer};
