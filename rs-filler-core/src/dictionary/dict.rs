use std::fmt;
use std::path::Path;

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::normalizer::Normalizer;
use super::row::Row;
use super::word_set::WordSet;
use super::{MIN_DISTINCT_WORDS, MIN_ROW_COUNT};
use crate::embedded;
use crate::error::{FillerError, LoadError};
use crate::io::{build_output_path, cache_is_fresh, get_filename, read_to_string};

/// A named collection of words, bucketed by length, used by the generator.
///
/// ## Responsibilities
/// - Loose (`append`) and strict (`place`) insertion
/// - Maintenance: `sort`, `prune`, `clean`, `map_words`, `merge`, `close`
/// - Introspection: `length`, `distinct`, `largest`, `sample`, `join`, `Display`
/// - `validate`, the precondition gate of every generation
///
/// ## Copies
/// `Clone` (and its alias `dup`) is a deep copy: the copy owns its own rows
/// and survives `close` on the original. Aliasing is opt-in through
/// `SharedDictionary`.
///
/// ## Sorted flag
/// `sorted` is only set by `sort` and only cleared by operations that add or
/// rewrite words. It is never recomputed.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
	name: Option<String>,
	words: WordSet,
	sorted: bool,
	normalizer: Normalizer,
}

impl Dictionary {
	/// Empty, unnamed dictionary using the default delimiters.
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_name(name: &str) -> Self {
		let mut dict = Self::new();
		dict.set_name(name);
		dict
	}

	/// Empty dictionary whose strict insertions and `clean` use `normalizer`.
	pub fn with_normalizer(normalizer: Normalizer) -> Self {
		Self { normalizer, ..Self::default() }
	}

	/// Builds a dictionary from source text split on `delimiters`.
	///
	/// Every token goes through strict insertion.
	pub fn from_tokens(text: &str, delimiters: &str) -> Self {
		let mut dict = Self::with_normalizer(Normalizer::new(delimiters));
		for token in dict.normalizer.tokenize(text) {
			dict.words.insert(token);
		}
		debug!("Tokenized {} words into {} rows", dict.len(), dict.words.row_count());
		dict
	}

	pub fn from_name_and_tokens(name: &str, text: &str, delimiters: &str) -> Self {
		let mut dict = Self::from_tokens(text, delimiters);
		dict.set_name(name);
		dict
	}

	/// Reads a UTF-8 word file and tokenizes it with the default delimiters.
	///
	/// # Errors
	/// Returns an error if the file cannot be read or is not UTF-8.
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self, LoadError> {
		let contents = read_to_string(&filepath)?;
		Ok(Self::from_tokens(&contents, super::DEFAULT_DELIMITERS))
	}

	pub fn from_file_with_name<P: AsRef<Path>>(name: &str, filepath: P) -> Result<Self, LoadError> {
		let mut dict = Self::from_file(filepath)?;
		dict.set_name(name);
		Ok(dict)
	}

	/// Loads a word file through a binary cache.
	///
	/// - `words.txt` is cached as `words.bin` in the same folder
	/// - If the cache is at least as recent as the text (or the text is gone) it
	///   is loaded with `postcard` and the text is not read
	/// - Otherwise the text is tokenized and the cache is (re)written
	/// - The dictionary is named after the file stem
	///
	/// # Errors
	/// Returns an error if reading, decoding or writing fails.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, LoadError> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		let mut dict: Dictionary;
		if cache_is_fresh(&binary_data_path, &filepath) {
			let bytes = std::fs::read(&binary_data_path)?;
			dict = postcard::from_bytes(&bytes)?;
			debug!("Loaded cached dictionary {}", binary_data_path.display());
		} else {
			dict = Self::from_file(&filepath)?;
			let bytes = postcard::to_stdvec(&dict)?;
			std::fs::write(&binary_data_path, bytes)?;
			debug!("Wrote dictionary cache {}", binary_data_path.display());
		}
		dict.set_name(&get_filename(&filepath)?);
		Ok(dict)
	}

	/// Opens one of the built-in dictionaries.
	///
	/// - `"Seussian"`, `"seussian"`, `"Seuss"`, `"seuss"`: the Seussian list
	/// - `"Latin"`, `"latin"`: the Latin list
	/// - anything else: an empty dictionary carrying `name`
	pub fn embedded(name: &str) -> Self {
		match embedded::lookup(name) {
			Some((canonical, contents)) => Self::from_name_and_tokens(canonical, contents, super::DEFAULT_DELIMITERS),
			None => Self::with_name(name),
		}
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn set_name(&mut self, name: &str) -> &mut Self {
		self.name = Some(name.to_owned());
		self
	}

	pub fn normalizer(&self) -> &Normalizer {
		&self.normalizer
	}

	/// Read-only access to the underlying storage.
	pub fn word_set(&self) -> &WordSet {
		&self.words
	}

	/// Loose insertion: the token is stored as given, duplicates included.
	///
	/// Only the empty token is ignored, since rows are keyed by positive length.
	pub fn append(&mut self, word: &str) -> &mut Self {
		if self.words.insert(word) {
			self.sorted = false;
		}
		self
	}

	pub fn append_all<I, S>(&mut self, words: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.append(word.as_ref());
		}
		self
	}

	/// Strict insertion: the token is normalized first and dropped if nothing
	/// remains. Duplicates are not rejected, `prune` removes them.
	pub fn place(&mut self, word: &str) -> &mut Self {
		let normalized = self.normalizer.normalize(word);
		if normalized.is_empty() {
			trace!("Dropped token {:?}: empty once normalized", word);
			return self;
		}
		if self.words.insert(&normalized) {
			self.sorted = false;
		}
		self
	}

	pub fn place_all<I, S>(&mut self, words: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.place(word.as_ref());
		}
		self
	}

	/// Orders rows by ascending length, keeping insertion order inside each
	/// row, and renumbers words so that insertion order follows that order.
	pub fn sort(&mut self) -> &mut Self {
		self.words.renumber();
		self.sorted = true;
		self
	}

	pub fn is_sorted(&self) -> bool {
		self.sorted
	}

	/// Removes duplicate words inside each row, keeping first occurrences.
	///
	/// Order is preserved, so the sorted flag is left untouched.
	pub fn prune(&mut self) -> &mut Self {
		let removed = self.words.prune();
		debug!("Pruned {} duplicate words", removed);
		self
	}

	/// Normalizes every word in place, then prunes.
	pub fn clean(&mut self) -> &mut Self {
		if self.words.map(|word| self.normalizer.normalize(word)) {
			self.sorted = false;
		}
		self.prune()
	}

	/// Applies `transform` to every word, keeping the row structure valid.
	///
	/// Words mapped to the empty string are removed.
	pub fn map_words<F>(&mut self, transform: F) -> &mut Self
	where
		F: FnMut(&str) -> String,
	{
		if self.words.map(transform) {
			self.sorted = false;
		}
		self
	}

	/// Deep copy. Same as `clone`.
	pub fn dup(&self) -> Self {
		self.clone()
	}

	/// Loose-appends every word of `other`, in its insertion order.
	pub fn merge(&mut self, other: &Dictionary) -> &mut Self {
		for word in other.words.in_insertion_order() {
			self.append(word);
		}
		self
	}

	/// Releases all storage. The dictionary is empty and unnamed afterwards.
	pub fn close(&mut self) -> &mut Self {
		*self = Self::default();
		self
	}

	pub fn include(&self, word: &str) -> bool {
		self.words.contains(word)
	}

	pub fn exclude(&self, word: &str) -> bool {
		!self.include(word)
	}

	/// Total number of words, duplicates included.
	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// Same as `len`.
	pub fn length(&self) -> usize {
		self.len()
	}

	/// Same as `len`.
	pub fn size(&self) -> usize {
		self.len()
	}

	/// Same as `len`.
	pub fn count(&self) -> usize {
		self.len()
	}

	pub fn distinct(&self) -> usize {
		self.words.distinct()
	}

	pub fn row_count(&self) -> usize {
		self.words.row_count()
	}

	pub fn largest(&self) -> usize {
		self.words.largest()
	}

	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.words.sample(rng)
	}

	/// Rows in the order the string form prints them.
	pub fn rows(&self) -> Vec<&Row> {
		if self.sorted {
			self.words.rows().collect()
		} else {
			self.words.rows_by_first_insertion()
		}
	}

	/// All words separated by `joiner`. Row boundaries are not marked.
	pub fn join(&self, joiner: &str) -> String {
		if self.sorted {
			self.words.rows().flat_map(Row::words).collect::<Vec<_>>().join(joiner)
		} else {
			self.words.in_insertion_order().join(joiner)
		}
	}

	/// Checks that the dictionary can serve every granularity.
	///
	/// # Errors
	/// - `DictUnsortable` if there is no word at all to order
	/// - `DictUnknown` if the storage is inconsistent or a word is not normal
	///   (only reachable through loose insertion, `map_words` or a bad cache)
	/// - `DictTooSmall` if there are fewer than `MIN_DISTINCT_WORDS` distinct
	///   words or fewer than `MIN_ROW_COUNT` lengths
	pub fn validate(&self) -> Result<(), FillerError> {
		if self.words.is_empty() {
			return Err(FillerError::DictUnsortable);
		}
		if !self.words.is_consistent() {
			return Err(FillerError::DictUnknown);
		}
		if let Some(word) = self.words.rows().flat_map(Row::words).find(|word| !self.normalizer.is_normal(word)) {
			debug!("Dictionary holds a malformed word: {:?}", word);
			return Err(FillerError::DictUnknown);
		}
		if self.distinct() < MIN_DISTINCT_WORDS || self.words.row_count() < MIN_ROW_COUNT {
			return Err(FillerError::DictTooSmall);
		}
		Ok(())
	}
}

impl fmt::Display for Dictionary {
	/// Nested form `[[w1, w2], [w3]]`, one group per row.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[")?;
		for (i, row) in self.rows().into_iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "[{}]", row.words().collect::<Vec<_>>().join(", "))?;
		}
		write!(f, "]")
	}
}
