/// Tokens glued to the token before them.
const CLOSING: [&str; 11] = [".", ",", ";", ":", "!", "?", "%", ")", "]", "}", "..."];

/// Tokens glued to the token after them.
const OPENING: [&str; 5] = ["(", "[", "{", "$", "#"];

/// Contraction parts produced by the tokenizer, glued to the preceding word
/// whatever their case.
const CLITICS: [&str; 7] = ["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Reassembles tokens into text with natural spacing.
pub trait Detokenizer: Send + Sync {
	fn detokenize<S: AsRef<str>>(&self, tokens: &[S]) -> String;
}

/// Inverse of [`TreebankTokenizer`](super::TreebankTokenizer).
///
/// Ordinary words are separated by a single space. No space is written
/// before closing punctuation or clitics, nor after opening brackets and
/// currency signs. Double quotes alternate between opening and closing.
/// A single quote closes an open one, marks a plural possessive after a
/// word ending in `s` (`firms'`), and opens a quote otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreebankDetokenizer;

impl TreebankDetokenizer {
	pub fn new() -> Self {
		Self
	}

	fn is_closing(token: &str) -> bool {
		CLOSING.contains(&token) || CLITICS.iter().any(|c| c.eq_ignore_ascii_case(token))
	}
}

impl Detokenizer for TreebankDetokenizer {
	fn detokenize<S: AsRef<str>>(&self, tokens: &[S]) -> String {
		let mut text = String::new();
		let mut glue_next = true;
		let mut quote_open = false;
		let mut single_open = false;
		let mut previous = "";

		for token in tokens {
			let token = token.as_ref();

			let (space_before, space_after) = if token == "\"" {
				quote_open = !quote_open;
				// Opening quote behaves like "(", closing quote like ")"
				(quote_open, !quote_open)
			} else if token == "'" {
				if single_open {
					single_open = false;
					(false, true)
				} else if previous.ends_with(['s', 'S']) {
					(false, true)
				} else {
					single_open = true;
					(true, false)
				}
			} else {
				(!Self::is_closing(token), !OPENING.contains(&token))
			};

			if space_before && !glue_next {
				text.push(' ');
			}
			text.push_str(token);
			glue_next = !space_after;
			previous = token;
		}

		text
	}
}
