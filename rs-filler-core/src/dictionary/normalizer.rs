use serde::{Deserialize, Serialize};

/// Delimiters used to split source text into tokens when none are given.
pub const DEFAULT_DELIMITERS: &str = " \t\n\r\u{b}\u{c},.;:!?\"()[]{}<>|/\\";

/// Characters ending a generated sentence. They never appear inside a word,
/// whatever the configured delimiters are, so sentences can be counted.
pub const TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Token cleaning and validation against a delimiter set.
///
/// A character is stripped from a token if it is:
/// - one of the configured delimiters
/// - whitespace or a control character
/// - a sentence terminator (`TERMINATORS`)
///
/// A word is *normal* when it is non-empty and contains no stripped character.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Normalizer {
	delimiters: String,
}

impl Default for Normalizer {
	fn default() -> Self {
		Self::new(DEFAULT_DELIMITERS)
	}
}

impl Normalizer {
	pub fn new(delimiters: &str) -> Self {
		Self { delimiters: delimiters.to_owned() }
	}

	pub fn delimiters(&self) -> &str {
		&self.delimiters
	}

	fn is_stripped(&self, c: char) -> bool {
		c.is_whitespace() || c.is_control() || TERMINATORS.contains(&c) || self.delimiters.contains(c)
	}

	/// Returns `token` without its stripped characters. May be empty.
	pub fn normalize(&self, token: &str) -> String {
		token.chars().filter(|c| !self.is_stripped(*c)).collect()
	}

	pub fn is_normal(&self, word: &str) -> bool {
		!word.is_empty() && !word.chars().any(|c| self.is_stripped(c))
	}

	/// Splits source text into normal tokens.
	///
	/// Every stripped character acts as a separator; empty pieces are skipped.
	pub fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		text.split(move |c: char| self.is_stripped(c)).filter(|token| !token.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalize_strips_delimiters_and_terminators() {
		let normalizer = Normalizer::default();
		assert_eq!(normalizer.normalize("  quick, "), "quick");
		assert_eq!(normalizer.normalize("a.b!c?"), "abc");
		assert_eq!(normalizer.normalize("don't"), "don't");
		assert_eq!(normalizer.normalize(" .,;"), "");
	}

	#[test]
	fn terminators_are_reserved_with_custom_delimiters() {
		let normalizer = Normalizer::new("-");
		assert_eq!(normalizer.normalize("well-known."), "wellknown");
		assert_eq!(normalizer.normalize("a,b"), "a,b");
		assert!(!normalizer.is_normal("tab\there"));
	}

	#[test]
	fn is_normal_matches_normalize() {
		let normalizer = Normalizer::default();
		for word in ["fish", "x", "red fish", "blue.", "", "one\u{7}"] {
			assert_eq!(normalizer.is_normal(word), !word.is_empty() && normalizer.normalize(word) == word);
		}
	}

	#[test]
	fn tokenize_splits_on_any_delimiter() {
		let normalizer = Normalizer::default();
		let tokens: Vec<&str> = normalizer.tokenize("One fish,\ntwo fish.  Red fish!").collect();
		assert_eq!(tokens, vec!["One", "fish", "two", "fish", "Red", "fish"]);
		assert_eq!(normalizer.tokenize(" \n\t").count(), 0);
	}
}
