use log::{error, warn as log_warn};

use crate::dictionary::{Dictionary, MIN_DISTINCT_WORDS, MIN_ROW_COUNT};
use crate::error::FillerError;

/// Dictionary-aware diagnostic for `err`.
///
/// Format: `"<identifier> : <message>"`, followed by the dictionary context
/// for dictionary errors.
///
/// Example:
/// `FillerError.DictTooSmall : dictionary is too small to produce exact output (dictionary "tiny": 12 distinct words of 300 required, 1 lengths of 2 required)`
pub fn describe(dict: &Dictionary, err: FillerError) -> String {
	let head = format!("{} : {}", err.identifier(), err);
	let name = dict.name().unwrap_or("<unnamed>");

	match err {
		FillerError::DictTooSmall => format!(
			"{} (dictionary \"{}\": {} distinct words of {} required, {} lengths of {} required)",
			head,
			name,
			dict.distinct(),
			MIN_DISTINCT_WORDS,
			dict.row_count(),
			MIN_ROW_COUNT
		),
		FillerError::DictUnsortable => format!("{} (dictionary \"{}\" holds no word)", head, name),
		FillerError::DictUnknown => format!(
			"{} (dictionary \"{}\": {} words in {} rows)",
			head,
			name,
			dict.len(),
			dict.row_count()
		),
		_ => head,
	}
}

/// Logs `err` at warn level and returns.
pub fn warn(dict: &Dictionary, err: FillerError) {
	log_warn!("{}", describe(dict, err));
}

/// Logs `err` at error level and terminates the process with status 1.
pub fn fatal(dict: &Dictionary, err: FillerError) -> ! {
	error!("{}", describe(dict, err));
	std::process::exit(1)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_errors_have_no_context() {
		let dict = Dictionary::with_name("tiny");
		assert_eq!(
			describe(&dict, FillerError::MaxLessThanMin),
			"FillerError.MaxLessThanMin : maximum output amount is less than the minimum"
		);
	}

	#[test]
	fn dictionary_errors_name_the_dictionary() {
		let mut dict = Dictionary::with_name("tiny");
		dict.append_all(["a", "bb", "cc"]);
		let text = describe(&dict, FillerError::DictTooSmall);
		assert!(text.starts_with("FillerError.DictTooSmall : "));
		assert!(text.contains("\"tiny\""));
		assert!(text.contains("3 distinct words of 300 required"));
		assert!(text.contains("2 lengths of 2 required"));

		let unnamed = Dictionary::new();
		assert!(describe(&unnamed, FillerError::DictUnsortable).contains("<unnamed>"));
	}

	#[test]
	fn every_kind_starts_with_its_identifier() {
		let dict = Dictionary::new();
		for err in FillerError::ALL {
			assert!(describe(&dict, err).starts_with(err.identifier()));
		}
	}
}
