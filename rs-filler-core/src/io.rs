use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::LoadError;

/// Reads a whole word file into a `String`.
///
/// # Errors
/// - `LoadError::Io` if the file cannot be opened or read
/// - `LoadError::Encoding` if its content is not UTF-8
pub fn read_to_string<P: AsRef<Path>>(filename: P) -> Result<String, LoadError> {
	let mut bytes = Vec::new();
	File::open(&filename)?.read_to_end(&mut bytes)?;
	String::from_utf8(bytes).map_err(|_| LoadError::Encoding(filename.as_ref().display().to_string()))
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/latin.txt` + `"bin"` → `data/latin.bin`
pub fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Whether `cache` can stand for `source`.
///
/// - Missing cache: `false`
/// - Missing or unreadable source timestamp: `true`
/// - Otherwise the cache must not be older than the source
pub fn cache_is_fresh<C: AsRef<Path>, S: AsRef<Path>>(cache: C, source: S) -> bool {
	let cache_time = match fs::metadata(cache).and_then(|meta| meta.modified()) {
		Ok(time) => time,
		Err(_) => return false,
	};
	match fs::metadata(source).and_then(|meta| meta.modified()) {
		Ok(source_time) => cache_time >= source_time,
		Err(_) => true,
	}
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/seussian.txt"` → `"seussian"`
/// - `"seussian.txt"` → `"seussian"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn output_path_swaps_extension() {
		let path = build_output_path("data/latin.txt", "bin").unwrap();
		assert_eq!(path, PathBuf::from("data/latin.bin"));
	}

	#[test]
	fn filename_drops_folder_and_extension() {
		assert_eq!(get_filename("./data/seussian.txt").unwrap(), "seussian");
		assert_eq!(get_filename("seussian.txt").unwrap(), "seussian");
	}

	#[test]
	fn dot_folder_is_current_dir() {
		assert_eq!(normalize_folder("data"), PathBuf::from("data"));
		assert!(normalize_folder("./").is_absolute());
	}

	#[test]
	fn missing_cache_is_never_fresh() {
		assert!(!cache_is_fresh("does/not/exist.bin", "does/not/exist.txt"));
	}

	#[test]
	fn missing_file_is_io_error() {
		assert!(matches!(read_to_string("does/not/exist.txt"), Err(LoadError::Io(_))));
	}
}
