//! Word storage and dictionary maintenance.
//!
//! - `Row`: words of one character length
//! - `WordSet`: rows keyed by length
//! - `Normalizer`: token cleaning against a delimiter set
//! - `Dictionary`: named word set with maintenance and validation
//! - `SharedDictionary`: aliasing handle over one dictionary

/// Words sharing one character length.
pub mod row;

/// Length-keyed word storage.
pub mod word_set;

/// Token cleaning and tokenization.
pub mod normalizer;

/// The dictionary and its maintenance contract.
mod dict;

/// Shallow (aliasing) handles.
mod shared;

pub use dict::Dictionary;
pub use normalizer::{Normalizer, DEFAULT_DELIMITERS, TERMINATORS};
pub use shared::SharedDictionary;

/// Minimum number of distinct words for a dictionary to be usable.
pub const MIN_DISTINCT_WORDS: usize = 300;

/// Minimum number of distinct word lengths for a dictionary to be usable.
///
/// With two lengths, any remaining letter budget above the largest length
/// can always be brought under it, so letter output can always be closed.
pub const MIN_ROW_COUNT: usize = 2;
