//! Length-exact filler text generation library.
//!
//! This crate provides a dictionary engine and a generator that together
//! produce placeholder text of an exact measured size:
//! - Word storage bucketed by character length (`dictionary`)
//! - Token normalization and dictionary maintenance (sort, prune, clean)
//! - Generation of letters, words, sentences or paragraphs within `[min, max]`
//! - A closed set of typed errors and their presentation helpers
//!
//! Loading word lists from disk and the built-in dictionaries are provided
//! as constructors on `Dictionary`.

/// Word storage, normalization and dictionary maintenance.
pub mod dictionary;

/// Length-exact text generation over a validated dictionary.
pub mod generator;

/// Closed set of generation errors and loading errors.
pub mod error;

/// Warn/fatal presentation of errors, outside the core control flow.
pub mod report;

/// Built-in word lists.
pub(crate) mod embedded;

/// I/O utilities (file loading, path helpers).
pub mod io;

pub use dictionary::{Dictionary, SharedDictionary, DEFAULT_DELIMITERS};
pub use error::{FillerError, LoadError};
pub use generator::generation_input::GenerationInput;
pub use generator::granularity::Granularity;
pub use embedded::EMBEDDED_NAMES;
pub use generator::{generate, generate_default, Generator};
