use once_cell::sync::Lazy;
use regex::Regex;

/// In priority order:
/// - numbers with their unit or suffix (`5.5bn`, `10:30`, `1,000`, `24-hour`)
/// - dotted abbreviations (`U.S.`, `e.g.`)
/// - dotted hosts (`www.bbc.co.uk`)
/// - words with inner hyphens/apostrophes
/// - ellipsis, double dash, then any other single non-space character
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
	Regex::new(concat!(
		r"\d+(?:[.,:]\d+)*\w*(?:[-'’]\w+)*",
		r"|(?:[^\W\d_]\.){2,}",
		r"|\w+(?:\.\w+)+",
		r"|\w+(?:[-'’]\w+)*",
		r"|\.\.\.|--|[^\w\s]",
	))
	.expect("token pattern is a valid regex")
});

/// Clitics split off the end of a word, Treebank style.
const CLITICS: [&str; 6] = ["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Splits text into an ordered sequence of tokens.
///
/// Implementations must be deterministic: the same input always yields the
/// same tokens. The model and the spinner rely on this so that contexts seen
/// while training are found again while spinning.
pub trait Tokenizer: Send + Sync {
	fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Regex-based tokenizer following the Penn Treebank conventions closely
/// enough for spinning: punctuation becomes its own token and contractions
/// are split (`don't` -> `do`, `n't`).
#[derive(Debug, Default, Clone, Copy)]
pub struct TreebankTokenizer;

impl TreebankTokenizer {
	pub fn new() -> Self {
		Self
	}

	/// Pushes `word` into `tokens`, splitting a trailing contraction.
	fn push_word(word: &str, tokens: &mut Vec<String>) {
		let split = std::iter::once("n't")
			.chain(CLITICS)
			.find_map(|suffix| Self::split_suffix(word, suffix));

		match split {
			Some((stem, suffix)) => {
				tokens.push(stem.to_owned());
				tokens.push(suffix.to_owned());
			}
			None => tokens.push(word.to_owned()),
		}
	}

	/// Splits `suffix` (ASCII, any case) off the end of `word`, keeping a
	/// non-empty stem.
	fn split_suffix<'w>(word: &'w str, suffix: &str) -> Option<(&'w str, &'w str)> {
		if word.len() <= suffix.len() {
			return None;
		}
		let split = word.len() - suffix.len();
		let tail = word.get(split..)?;
		tail.eq_ignore_ascii_case(suffix).then(|| (&word[..split], tail))
	}
}

impl Tokenizer for TreebankTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let mut tokens = Vec::new();
		for found in TOKEN_PATTERN.find_iter(text) {
			let token = found.as_str();
			if token.contains('\'') {
				Self::push_word(token, &mut tokens);
			} else {
				tokens.push(token.to_owned());
			}
		}
		tokens
	}
}
