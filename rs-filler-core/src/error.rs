use std::io;

/// Every way a generation request can fail.
///
/// The set is closed: input-shape errors (`InvalidOutputType`, `MinLessThanOne`,
/// `MaxLessThanMin`, `MaxTooHigh`) are caller mistakes, dictionary-state errors
/// (`DictTooSmall`, `DictUnsortable`) are fixed by mutating the dictionary and
/// retrying, and `DictUnknown` reports a broken internal invariant.
///
/// The `Display` form is the context-free message. See `report::describe`
/// for the dictionary-aware one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum FillerError {
	#[error("output type must be one of letters, words, sentences or paragraphs")]
	InvalidOutputType,

	#[error("minimum output amount must be at least one")]
	MinLessThanOne,

	#[error("maximum output amount is less than the minimum")]
	MaxLessThanMin,

	#[error("maximum output amount is above the supported ceiling")]
	MaxTooHigh,

	#[error("dictionary is too small to produce exact output")]
	DictTooSmall,

	#[error("dictionary cannot be sorted")]
	DictUnsortable,

	#[error("dictionary is in an unknown invalid state")]
	DictUnknown,
}

impl FillerError {
	/// All error kinds, in precondition order.
	pub const ALL: [FillerError; 7] = [
		FillerError::InvalidOutputType,
		FillerError::MinLessThanOne,
		FillerError::MaxLessThanMin,
		FillerError::MaxTooHigh,
		FillerError::DictTooSmall,
		FillerError::DictUnsortable,
		FillerError::DictUnknown,
	];

	/// Stable identifier of the kind, e.g. `"FillerError.DictTooSmall"`.
	pub fn identifier(&self) -> &'static str {
		match self {
			FillerError::InvalidOutputType => "FillerError.InvalidOutputType",
			FillerError::MinLessThanOne => "FillerError.MinLessThanOne",
			FillerError::MaxLessThanMin => "FillerError.MaxLessThanMin",
			FillerError::MaxTooHigh => "FillerError.MaxTooHigh",
			FillerError::DictTooSmall => "FillerError.DictTooSmall",
			FillerError::DictUnsortable => "FillerError.DictUnsortable",
			FillerError::DictUnknown => "FillerError.DictUnknown",
		}
	}

	/// Whether the error comes from the dictionary rather than the request.
	pub fn is_dictionary_error(&self) -> bool {
		matches!(
			self,
			FillerError::DictTooSmall | FillerError::DictUnsortable | FillerError::DictUnknown
		)
	}
}

/// Failures of the word-file and cache loaders.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("IO error: {0}")]
	Io(#[from] io::Error),

	#[error("cache error: {0}")]
	Cache(#[from] postcard::Error),

	#[error("word file is not valid UTF-8: {0}")]
	Encoding(String),
}
