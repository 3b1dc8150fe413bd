use std::ops::RangeInclusive;

use super::granularity::Granularity;

/// Parameters of one generation request.
///
/// `GenerationInput` holds both the **request** (granularity and bounds,
/// public fields checked at generation time) and the **shape** of sentences
/// and paragraphs (private, checked by their setters).
///
/// # Invariants
/// - `sentence_words` and `paragraph_sentences` are non-empty and start at 1 or more
/// - `comma_chance` lies in `[0.0, 1.0]`
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationInput {
	/// Output unit.
	pub kind: Granularity,

	/// Lower bound of the output size (inclusive).
	pub min: u64,

	/// Upper bound of the output size (inclusive).
	pub max: u64,

	/// Number of words per sentence.
	sentence_words: RangeInclusive<usize>,

	/// Number of sentences per paragraph.
	paragraph_sentences: RangeInclusive<usize>,

	/// Probability of a comma after a word that does not end its sentence.
	comma_chance: f64,
}

impl Default for GenerationInput {
	/// Between 1 and 100 words, default sentence shape.
	fn default() -> Self {
		Self::new(Granularity::Words, 1, 100)
	}
}

impl GenerationInput {
	pub fn new(kind: Granularity, min: u64, max: u64) -> Self {
		Self {
			kind,
			min,
			max,
			sentence_words: 3..=12,
			paragraph_sentences: 3..=7,
			comma_chance: 0.1,
		}
	}

	/// Same request with an exact size.
	pub fn exactly(kind: Granularity, amount: u64) -> Self {
		Self::new(kind, amount, amount)
	}

	pub fn sentence_words(&self) -> RangeInclusive<usize> {
		self.sentence_words.clone()
	}

	pub fn paragraph_sentences(&self) -> RangeInclusive<usize> {
		self.paragraph_sentences.clone()
	}

	pub fn comma_chance(&self) -> f64 {
		self.comma_chance
	}

	/// Sets how many words a sentence holds.
	///
	/// # Errors
	/// Returns an error if `min` is 0 or greater than `max`.
	pub fn set_sentence_words(&mut self, min: usize, max: usize) -> Result<(), String> {
		self.sentence_words = Self::checked_range("sentence words", min, max)?;
		Ok(())
	}

	/// Sets how many sentences a paragraph holds.
	///
	/// # Errors
	/// Returns an error if `min` is 0 or greater than `max`.
	pub fn set_paragraph_sentences(&mut self, min: usize, max: usize) -> Result<(), String> {
		self.paragraph_sentences = Self::checked_range("paragraph sentences", min, max)?;
		Ok(())
	}

	/// Sets the comma probability (0.0..1.0).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_comma_chance(&mut self, comma_chance: f64) -> Result<(), String> {
		if !(0.0..=1.0).contains(&comma_chance) {
			return Err("Comma chance must be between 0.0 and 1.0".to_owned());
		}
		self.comma_chance = comma_chance;
		Ok(())
	}

	fn checked_range(what: &str, min: usize, max: usize) -> Result<RangeInclusive<usize>, String> {
		if min == 0 {
			return Err(format!("{} must be at least 1", what));
		}
		if max < min {
			return Err(format!("{} range is empty: {}..={}", what, min, max));
		}
		Ok(min..=max)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let input = GenerationInput::default();
		assert_eq!(input.kind, Granularity::Words);
		assert_eq!((input.min, input.max), (1, 100));
		assert_eq!(input.sentence_words(), 3..=12);
		assert_eq!(input.paragraph_sentences(), 3..=7);
	}

	#[test]
	fn setters_reject_invalid_values() {
		let mut input = GenerationInput::exactly(Granularity::Sentences, 4);
		assert!(input.set_sentence_words(0, 3).is_err());
		assert!(input.set_paragraph_sentences(5, 4).is_err());
		assert!(input.set_comma_chance(1.5).is_err());
		assert!(input.set_comma_chance(-0.1).is_err());
		assert_eq!(input, GenerationInput::exactly(Granularity::Sentences, 4));

		input.set_sentence_words(1, 1).unwrap();
		input.set_comma_chance(0.0).unwrap();
		assert_eq!(input.sentence_words(), 1..=1);
		assert_eq!(input.comma_chance(), 0.0);
	}
}
