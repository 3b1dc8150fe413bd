use std::collections::HashSet;

use rand::Rng;

use serde::{Deserialize, Serialize};

/// A word together with its insertion sequence number.
///
/// The sequence number orders words across the whole dictionary; it is
/// what `join` follows on an unsorted dictionary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entry {
	pub(crate) seq: u64,
	pub(crate) word: String,
}

/// Bucket of words sharing the same character length.
///
/// ## Invariants
/// - Every word has exactly `length` characters (Unicode scalar values)
/// - `length` is strictly positive
/// - Entries are kept in ascending `seq` order
/// - Duplicates are allowed until `prune` is called
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Row {
	length: usize,
	entries: Vec<Entry>,
}

impl Row {
	pub(crate) fn new(length: usize) -> Self {
		Self { length, entries: Vec::new() }
	}

	/// Character length shared by every word of the row.
	pub fn length(&self) -> usize {
		self.length
	}

	/// Number of words in the row, duplicates included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Words of the row in insertion order.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|entry| entry.word.as_str())
	}

	pub fn get(&self, index: usize) -> Option<&str> {
		self.entries.get(index).map(|entry| entry.word.as_str())
	}

	/// Picks a word of the row uniformly.
	pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.entries.is_empty() {
			return None;
		}
		self.get(rng.random_range(0..self.entries.len()))
	}

	pub fn contains(&self, word: &str) -> bool {
		self.entries.iter().any(|entry| entry.word == word)
	}

	/// Number of distinct words in the row.
	pub fn distinct(&self) -> usize {
		self.words().collect::<HashSet<_>>().len()
	}

	pub(crate) fn entries(&self) -> &[Entry] {
		&self.entries
	}

	pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
		&mut self.entries
	}

	pub(crate) fn into_entries(self) -> Vec<Entry> {
		self.entries
	}

	/// Sequence number of the oldest word of the row.
	pub(crate) fn first_seq(&self) -> Option<u64> {
		self.entries.first().map(|entry| entry.seq)
	}

	/// Appends a word. The caller guarantees the length and the sequence order.
	pub(crate) fn push(&mut self, seq: u64, word: String) {
		self.entries.push(Entry { seq, word });
	}

	/// Removes duplicate words, keeping the first occurrence of each.
	///
	/// Returns the number of removed words.
	pub(crate) fn prune(&mut self) -> usize {
		let before = self.entries.len();
		let mut seen: HashSet<String> = HashSet::with_capacity(before);
		self.entries.retain(|entry| seen.insert(entry.word.clone()));
		before - self.entries.len()
	}

	/// Checks the row invariants.
	pub(crate) fn is_consistent(&self) -> bool {
		self.length > 0
			&& !self.entries.is_empty()
			&& self.entries.iter().all(|entry| entry.word.chars().count() == self.length)
			&& self.entries.windows(2).all(|pair| pair[0].seq < pair[1].seq)
	}
}
