use std::fmt;
use std::str::FromStr;

use crate::error::FillerError;

/// Unit in which the output size is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
	/// Unicode scalar values, spaces included.
	Letters,
	/// Whitespace-separated tokens.
	Words,
	/// Runs ended by `.`, `!` or `?`.
	Sentences,
	/// Blocks separated by a blank line.
	Paragraphs,
}

impl Granularity {
	pub const ALL: [Granularity; 4] = [
		Granularity::Letters,
		Granularity::Words,
		Granularity::Sentences,
		Granularity::Paragraphs,
	];

	/// Largest `max` accepted for this granularity.
	pub fn ceiling(self) -> u64 {
		match self {
			Granularity::Letters => 1_000_000,
			Granularity::Words => 250_000,
			Granularity::Sentences => 25_000,
			Granularity::Paragraphs => 5_000,
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Granularity::Letters => "letters",
			Granularity::Words => "words",
			Granularity::Sentences => "sentences",
			Granularity::Paragraphs => "paragraphs",
		}
	}
}

impl fmt::Display for Granularity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Parses `letters`, `words`, `sentences`, `paragraphs` (any case, singular
/// accepted). Anything else is `InvalidOutputType`.
impl FromStr for Granularity {
	type Err = FillerError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"letters" | "letter" => Ok(Granularity::Letters),
			"words" | "word" => Ok(Granularity::Words),
			"sentences" | "sentence" => Ok(Granularity::Sentences),
			"paragraphs" | "paragraph" => Ok(Granularity::Paragraphs),
			_ => Err(FillerError::InvalidOutputType),
		}
	}
}

/// Raw output type codes: 0 letters, 1 words, 2 sentences, 3 paragraphs.
impl TryFrom<u8> for Granularity {
	type Error = FillerError;

	fn try_from(code: u8) -> Result<Self, Self::Error> {
		match code {
			0 => Ok(Granularity::Letters),
			1 => Ok(Granularity::Words),
			2 => Ok(Granularity::Sentences),
			3 => Ok(Granularity::Paragraphs),
			_ => Err(FillerError::InvalidOutputType),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_names() {
		assert_eq!("Letters".parse::<Granularity>(), Ok(Granularity::Letters));
		assert_eq!(" word ".parse::<Granularity>(), Ok(Granularity::Words));
		assert_eq!("PARAGRAPHS".parse::<Granularity>(), Ok(Granularity::Paragraphs));
		assert_eq!("lines".parse::<Granularity>(), Err(FillerError::InvalidOutputType));
		for kind in Granularity::ALL {
			assert_eq!(kind.to_string().parse::<Granularity>(), Ok(kind));
		}
	}

	#[test]
	fn raw_codes() {
		assert_eq!(Granularity::try_from(2u8), Ok(Granularity::Sentences));
		assert_eq!(Granularity::try_from(4u8), Err(FillerError::InvalidOutputType));
	}

	#[test]
	fn ceilings_shrink_with_unit_size() {
		let ceilings: Vec<u64> = Granularity::ALL.iter().map(|kind| kind.ceiling()).collect();
		assert!(ceilings.windows(2).all(|pair| pair[0] > pair[1]));
	}
}
