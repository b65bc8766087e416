use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::env;

/// Reads a whole text file as a single document.
///
/// - Reads the entire file into memory
/// - Normalizes `\r\n` to `\n` so line splitting matches training
pub(crate) fn read_document<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let contents = fs::read_to_string(filename)?;
	if contents.contains('\r') {
		Ok(contents.replace("\r\n", "\n"))
	} else {
		Ok(contents)
	}
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted by name.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
