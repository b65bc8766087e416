use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use rs_spin_core::SpinError;

/// Server settings, read from `SPIN_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Folder holding the training documents.
	pub corpus_dir: PathBuf,
	/// Extension of the training documents, without the dot.
	pub corpus_extension: String,
	pub replace_probability: f64,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			corpus_dir: PathBuf::from("./data"),
			corpus_extension: "txt".to_owned(),
			replace_probability: 0.3,
		}
	}
}

impl ServerConfig {
	pub fn from_env() -> Result<Self, SpinError> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Builds the configuration from any key lookup, falling back to the
	/// defaults for absent keys.
	///
	/// # Errors
	/// Returns [`SpinError::Config`] if a present value cannot be parsed.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, SpinError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(host) = lookup("SPIN_HOST") {
			config.host = host;
		}
		if let Some(port) = lookup("SPIN_PORT") {
			config.port = parse("SPIN_PORT", &port)?;
		}
		if let Some(dir) = lookup("SPIN_CORPUS_DIR") {
			config.corpus_dir = PathBuf::from(dir);
		}
		if let Some(extension) = lookup("SPIN_CORPUS_EXT") {
			config.corpus_extension = extension;
		}
		if let Some(probability) = lookup("SPIN_REPLACE_PROBABILITY") {
			config.replace_probability = parse("SPIN_REPLACE_PROBABILITY", &probability)?;
		}

		Ok(config)
	}
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, SpinError> {
	value
		.trim()
		.parse()
		.map_err(|_| SpinError::Config(format!("{key} has an invalid value: '{value}'")))
}
