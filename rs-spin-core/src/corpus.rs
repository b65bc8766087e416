use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Result, SpinError};
use crate::io;

/// Supplies the training documents.
///
/// Each document uses `\n` as its line separator.
pub trait CorpusSource {
	fn documents(&self) -> Result<Vec<String>>;
}

/// Documents already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
	documents: Vec<String>,
}

impl InMemoryCorpus {
	pub fn new<I, S>(documents: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { documents: documents.into_iter().map(Into::into).collect() }
	}
}

impl CorpusSource for InMemoryCorpus {
	fn documents(&self) -> Result<Vec<String>> {
		Ok(self.documents.clone())
	}
}

/// One document per file, for every file with a given extension directly
/// inside a directory.
///
/// Files are read in name order so that builds are reproducible.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
	folder: PathBuf,
	extension: String,
}

impl DirectoryCorpus {
	/// # Notes
	/// `"."` and `"./"` resolve to the current working directory.
	pub fn new<P: AsRef<Path>>(folder: P, extension: &str) -> Self {
		let folder = io::normalize_folder(&folder.as_ref().to_string_lossy());
		Self { folder, extension: extension.trim_start_matches('.').to_owned() }
	}
}

impl CorpusSource for DirectoryCorpus {
	/// # Errors
	/// Returns an error if the path is not a directory or a file cannot be read.
	fn documents(&self) -> Result<Vec<String>> {
		if !self.folder.is_dir() {
			return Err(SpinError::Io(std::io::Error::new(
				std::io::ErrorKind::NotFound,
				format!("Expected a directory, got: {}", self.folder.display()),
			)));
		}

		let mut documents = Vec::new();
		for file in io::list_files(&self.folder, &self.extension)? {
			documents.push(io::read_document(self.folder.join(&file))?);
		}

		info!("Read {} documents from {}", documents.len(), self.folder.display());
		Ok(documents)
	}
}
