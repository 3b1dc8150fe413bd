use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::generation_input::GenerationInput;
use super::granularity::Granularity;
use crate::dictionary::{Dictionary, word_set::WordSet};
use crate::error::FillerError;

/// Length-exact text generator.
///
/// # Responsibilities
/// - Check the request bounds, then validate the dictionary
/// - Draw the target size uniformly in `[min, max]`
/// - Produce text measuring exactly the target in the requested unit
///
/// The random source is owned by the generator: seed it for reproducible
/// output, or hand in any `rand::Rng`.
///
/// Generation only reads the dictionary, whether it succeeds or fails.
#[derive(Debug)]
pub struct Generator<R = StdRng> {
	rng: R,
}

impl Generator<StdRng> {
	/// Generator seeded from the operating system.
	pub fn new() -> Self {
		Self { rng: StdRng::from_os_rng() }
	}

	/// Reproducible generator: equal seeds give equal output.
	pub fn with_seed(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl Default for Generator<StdRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: Rng> Generator<R> {
	pub fn with_rng(rng: R) -> Self {
		Self { rng }
	}

	/// Generates `kind` text whose size is drawn in `[min, max]`.
	///
	/// # Errors
	/// In this order:
	/// - `MinLessThanOne`, `MaxLessThanMin`, `MaxTooHigh` for bad bounds
	/// - the error of `dict.validate()`
	pub fn generate(&mut self, dict: &Dictionary, kind: Granularity, min: u64, max: u64) -> Result<String, FillerError> {
		self.generate_with(dict, &GenerationInput::new(kind, min, max))
	}

	/// Same as `generate`, with the sentence and paragraph shape of `input`.
	pub fn generate_with(&mut self, dict: &Dictionary, input: &GenerationInput) -> Result<String, FillerError> {
		check_bounds(input.kind, input.min, input.max)?;
		dict.validate()?;

		let target = usize::try_from(self.rng.random_range(input.min..=input.max))
			.map_err(|_| FillerError::MaxTooHigh)?;
		debug!(
			"Generating {} {} from dictionary {:?} ({} words)",
			target,
			input.kind,
			dict.name(),
			dict.len()
		);

		let words = dict.word_set();
		match input.kind {
			Granularity::Letters => self.letters(words, target),
			Granularity::Words => self.words(words, target),
			Granularity::Sentences => self.sentences(words, input, target),
			Granularity::Paragraphs => self.paragraphs(words, input, target),
		}
	}

	/// Words separated by single spaces, exactly `target` characters long.
	///
	/// When `target` can be written with whole words, every pick keeps the
	/// rest reachable. Otherwise words are picked until the rest fits under
	/// the largest length, and the last word is trimmed if no word has
	/// exactly the remaining length.
	fn letters(&mut self, words: &WordSet, target: usize) -> Result<String, FillerError> {
		let lengths: Vec<usize> = words.lengths().collect();
		let reachable = reachable_budgets(&lengths, target);

		let mut text = String::with_capacity(target);
		let mut remaining = target;

		if reachable[target] {
			loop {
				let word = words
					.sample_where(&mut self.rng, |length| {
						length == remaining || (length + 2 <= remaining && reachable[remaining - length - 1])
					})
					.ok_or(FillerError::DictUnknown)?;
				let length = word.chars().count();
				text.push_str(word);
				if length == remaining {
					break;
				}
				text.push(' ');
				remaining -= length + 1;
			}
			return Ok(text);
		}

		debug!("{} letters cannot be written with whole words, trimming the last one", target);
		let largest = words.largest();
		while remaining > largest {
			let word = words
				.sample_where(&mut self.rng, |length| length + 2 <= remaining)
				.ok_or(FillerError::DictUnknown)?;
			text.push_str(word);
			text.push(' ');
			remaining -= word.chars().count() + 1;
		}

		match words.row(remaining).and_then(|row| row.choose(&mut self.rng)) {
			Some(word) => text.push_str(word),
			None => {
				let word = words
					.sample_where(&mut self.rng, |length| length > remaining)
					.ok_or(FillerError::DictUnknown)?;
				text.extend(word.chars().take(remaining));
			}
		}
		Ok(text)
	}

	/// `target` words separated by single spaces.
	fn words(&mut self, words: &WordSet, target: usize) -> Result<String, FillerError> {
		let mut picked: Vec<&str> = Vec::with_capacity(target);
		for _ in 0..target {
			picked.push(words.sample(&mut self.rng).ok_or(FillerError::DictUnknown)?);
		}
		Ok(picked.join(" "))
	}

	/// `target` sentences separated by single spaces.
	fn sentences(&mut self, words: &WordSet, input: &GenerationInput, target: usize) -> Result<String, FillerError> {
		let mut text = String::new();
		for i in 0..target {
			if i > 0 {
				text.push(' ');
			}
			self.push_sentence(words, input, &mut text)?;
		}
		Ok(text)
	}

	/// `target` paragraphs separated by a blank line.
	fn paragraphs(&mut self, words: &WordSet, input: &GenerationInput, target: usize) -> Result<String, FillerError> {
		let mut text = String::new();
		for i in 0..target {
			if i > 0 {
				text.push_str("\n\n");
			}
			let count = self.rng.random_range(input.paragraph_sentences());
			for j in 0..count {
				if j > 0 {
					text.push(' ');
				}
				self.push_sentence(words, input, &mut text)?;
			}
		}
		Ok(text)
	}

	/// Appends one capitalized sentence ending with a terminator.
	fn push_sentence(&mut self, words: &WordSet, input: &GenerationInput, text: &mut String) -> Result<(), FillerError> {
		let count = self.rng.random_range(input.sentence_words());
		for i in 0..count {
			let word = words.sample(&mut self.rng).ok_or(FillerError::DictUnknown)?;
			if i == 0 {
				push_capitalized(text, word);
			} else {
				text.push(' ');
				text.push_str(word);
			}
			if i + 1 < count && self.rng.random_bool(input.comma_chance()) {
				text.push(',');
			}
		}
		text.push(self.terminator());
		Ok(())
	}

	/// Mostly `.`, sometimes `!` or `?`.
	fn terminator(&mut self) -> char {
		match self.rng.random_range(0..10) {
			0 => '!',
			1 => '?',
			_ => '.',
		}
	}
}

/// Checks a request's bounds, in precondition order.
///
/// # Errors
/// `MinLessThanOne`, then `MaxLessThanMin`, then `MaxTooHigh`.
pub fn check_bounds(kind: Granularity, min: u64, max: u64) -> Result<(), FillerError> {
	if min < 1 {
		return Err(FillerError::MinLessThanOne);
	}
	if max < min {
		return Err(FillerError::MaxLessThanMin);
	}
	if max > kind.ceiling() {
		return Err(FillerError::MaxTooHigh);
	}
	Ok(())
}

/// `reachable[b]` tells whether `b` letters can be written as whole words
/// separated by single spaces, using only the given word lengths.
fn reachable_budgets(lengths: &[usize], target: usize) -> Vec<bool> {
	let mut reachable = vec![false; target + 1];
	for budget in 1..=target {
		reachable[budget] = lengths
			.iter()
			.any(|&length| length == budget || (length + 2 <= budget && reachable[budget - length - 1]));
	}
	reachable
}

fn push_capitalized(text: &mut String, word: &str) {
	let mut chars = word.chars();
	if let Some(first) = chars.next() {
		text.extend(first.to_uppercase());
		text.push_str(chars.as_str());
	}
}

/// Generates with the thread-local random source.
///
/// # Errors
/// See `Generator::generate`.
pub fn generate(dict: &Dictionary, kind: Granularity, min: u64, max: u64) -> Result<String, FillerError> {
	Generator::with_rng(rand::rng()).generate(dict, kind, min, max)
}

/// Generates with `GenerationInput::default()` from the built-in Latin dictionary.
pub fn generate_default() -> Result<String, FillerError> {
	let dict = Dictionary::embedded("Latin");
	Generator::with_rng(rand::rng()).generate_with(&dict, &GenerationInput::default())
}
