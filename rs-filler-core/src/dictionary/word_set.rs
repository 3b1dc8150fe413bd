use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

use super::row::{Entry, Row};

/// Canonical storage of words, bucketed by character length.
///
/// Rows are keyed by length so that "some word of length L" is a single
/// map lookup, which is what letter-exact generation relies on.
///
/// ## Invariants
/// - At most one `Row` per length, and no `Row` is empty
/// - Sequence numbers are unique and smaller than `next_seq`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WordSet {
	rows: BTreeMap<usize, Row>,
	next_seq: u64,
}

impl WordSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a word to the row of its length, creating the row if needed.
	///
	/// Returns `false` (and stores nothing) for the empty word.
	pub fn insert(&mut self, word: &str) -> bool {
		let length = word.chars().count();
		if length == 0 {
			return false;
		}
		let seq = self.next_seq;
		self.next_seq += 1;
		self.rows
			.entry(length)
			.or_insert_with(|| Row::new(length))
			.push(seq, word.to_owned());
		true
	}

	/// Largest word length present, 0 when empty.
	pub fn largest(&self) -> usize {
		self.rows.keys().next_back().copied().unwrap_or(0)
	}

	/// Total number of words, duplicates included.
	pub fn len(&self) -> usize {
		self.rows.values().map(Row::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn row_count(&self) -> usize {
		self.rows.len()
	}

	pub fn row(&self, length: usize) -> Option<&Row> {
		self.rows.get(&length)
	}

	/// Rows in ascending length order.
	pub fn rows(&self) -> impl Iterator<Item = &Row> {
		self.rows.values()
	}

	/// Lengths present, ascending.
	pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
		self.rows.keys().copied()
	}

	/// Rows ordered by their oldest word.
	pub fn rows_by_first_insertion(&self) -> Vec<&Row> {
		let mut rows: Vec<&Row> = self.rows.values().collect();
		rows.sort_by_key(|row| row.first_seq());
		rows
	}

	/// Every word, in global insertion order.
	pub fn in_insertion_order(&self) -> Vec<&str> {
		let mut entries: Vec<&Entry> = self.rows.values().flat_map(Row::entries).collect();
		entries.sort_by_key(|entry| entry.seq);
		entries.into_iter().map(|entry| entry.word.as_str()).collect()
	}

	/// Exact-match membership. Only the row of the word's length is scanned.
	pub fn contains(&self, word: &str) -> bool {
		self.rows
			.get(&word.chars().count())
			.is_some_and(|row| row.contains(word))
	}

	/// Number of distinct words.
	pub fn distinct(&self) -> usize {
		self.rows.values().map(Row::distinct).sum()
	}

	/// Picks a word uniformly from the whole population.
	///
	/// Rows holding more words are proportionally more likely to be hit.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.sample_where(rng, |_| true)
	}

	/// Picks a word uniformly among the rows whose length satisfies `accept`.
	///
	/// Returns `None` if no accepted row exists.
	pub fn sample_where<R, F>(&self, rng: &mut R, accept: F) -> Option<&str>
	where
		R: Rng + ?Sized,
		F: Fn(usize) -> bool,
	{
		let total: usize = self
			.rows
			.iter()
			.filter(|(length, _)| accept(**length))
			.map(|(_, row)| row.len())
			.sum();
		if total == 0 {
			return None;
		}

		let mut index = rng.random_range(0..total);
		for (length, row) in &self.rows {
			if !accept(*length) {
				continue;
			}
			if index < row.len() {
				return row.get(index);
			}
			index -= row.len();
		}
		None
	}

	/// Removes duplicate words inside every row and drops emptied rows.
	///
	/// Returns the number of removed words.
	pub fn prune(&mut self) -> usize {
		let removed = self.rows.values_mut().map(Row::prune).sum();
		self.rows.retain(|_, row| !row.is_empty());
		removed
	}

	/// Rebuilds every word through `transform`.
	///
	/// Words whose length changed move to the matching row, words mapped to
	/// the empty string are dropped. Sequence numbers are preserved.
	/// Returns `true` if any word changed.
	pub fn map<F>(&mut self, mut transform: F) -> bool
	where
		F: FnMut(&str) -> String,
	{
		let mut entries: Vec<Entry> = std::mem::take(&mut self.rows)
			.into_values()
			.flat_map(Row::into_entries)
			.collect();
		entries.sort_by_key(|entry| entry.seq);

		let mut changed = false;
		for entry in entries {
			let word = transform(&entry.word);
			changed |= word != entry.word;
			let length = word.chars().count();
			if length == 0 {
				continue;
			}
			self.rows
				.entry(length)
				.or_insert_with(|| Row::new(length))
				.push(entry.seq, word);
		}
		changed
	}

	/// Reassigns sequence numbers in (length, sequence) order.
	pub fn renumber(&mut self) {
		let mut seq = 0;
		for row in self.rows.values_mut() {
			for entry in row.entries_mut() {
				entry.seq = seq;
				seq += 1;
			}
		}
		self.next_seq = seq;
	}

	pub fn clear(&mut self) {
		self.rows.clear();
		self.next_seq = 0;
	}

	/// Checks the storage invariants. Only a hand-edited or corrupted cache
	/// can break them.
	pub fn is_consistent(&self) -> bool {
		self.rows
			.iter()
			.all(|(length, row)| *length == row.length() && row.is_consistent())
			&& self
				.rows
				.values()
				.flat_map(Row::entries)
				.all(|entry| entry.seq < self.next_seq)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn set_of(words: &[&str]) -> WordSet {
		let mut set = WordSet::new();
		for word in words {
			set.insert(word);
		}
		set
	}

	#[test]
	fn insert_buckets_by_char_length() {
		let set = set_of(&["this", "is", "a", "déjà", "test"]);
		assert_eq!(set.len(), 5);
		assert_eq!(set.row_count(), 3);
		assert_eq!(set.row(4).map(Row::len), Some(3));
		assert_eq!(set.largest(), 4);
		assert!(set.contains("déjà"));
		assert!(!set.contains("deja"));
	}

	#[test]
	fn empty_word_is_ignored() {
		let mut set = WordSet::new();
		assert!(!set.insert(""));
		assert!(set.is_empty());
		assert_eq!(set.largest(), 0);
	}

	#[test]
	fn insertion_order_spans_rows() {
		let set = set_of(&["this", "is", "a", "quick", "test"]);
		assert_eq!(set.in_insertion_order(), vec!["this", "is", "a", "quick", "test"]);
		let lengths: Vec<usize> = set.rows_by_first_insertion().iter().map(|row| row.length()).collect();
		assert_eq!(lengths, vec![4, 2, 1, 5]);
	}

	#[test]
	fn renumber_follows_length_order() {
		let mut set = set_of(&["this", "is", "a", "test", "of"]);
		set.renumber();
		assert_eq!(set.in_insertion_order(), vec!["a", "is", "of", "this", "test"]);
		assert!(set.is_consistent());
	}

	#[test]
	fn map_moves_words_between_rows() {
		let mut set = set_of(&["abc", "de", "fgh"]);
		let changed = set.map(|word| if word == "abc" { "ab".to_owned() } else { word.to_owned() });
		assert!(changed);
		assert_eq!(set.row(2).map(Row::len), Some(2));
		assert_eq!(set.in_insertion_order(), vec!["ab", "de", "fgh"]);
		assert!(set.is_consistent());
		assert!(!set.map(str::to_owned));
	}

	#[test]
	fn map_to_empty_drops_word_and_row() {
		let mut set = set_of(&["x", "yz"]);
		set.map(|word| if word == "x" { String::new() } else { word.to_owned() });
		assert_eq!(set.row_count(), 1);
		assert!(set.row(1).is_none());
	}

	#[test]
	fn sample_where_respects_filter() {
		let set = set_of(&["a", "to", "the", "word"]);
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..50 {
			let word = set.sample_where(&mut rng, |length| length >= 3).unwrap_or_default();
			assert!(word == "the" || word == "word");
		}
		assert!(set.sample_where(&mut rng, |length| length > 10).is_none());
	}

	#[test]
	fn sample_weighs_rows_by_population() {
		let set = set_of(&["a", "bb", "cc", "dd", "ee", "ff", "gg", "hh", "ii", "jj"]);
		let mut rng = StdRng::seed_from_u64(2024);
		let draws = 20_000;
		let hits = (0..draws).filter(|_| set.sample(&mut rng) == Some("a")).count();
		let share = hits as f64 / draws as f64;
		assert!((0.08..0.12).contains(&share), "share of the lone short word: {}", share);

		let short = (0..1_000)
			.filter(|_| set.sample_where(&mut rng, |length| length <= 2).map(str::len) == Some(1))
			.count();
		assert!(short < 200, "{}", short);
	}

	#[test]
	fn sample_returns_member() {
		let set = set_of(&["alpha", "beta", "gamma", "pi"]);
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..20 {
			let word = set.sample(&mut rng).unwrap_or_default();
			assert!(set.contains(word));
		}
		assert!(WordSet::new().sample(&mut rng).is_none());
	}
}
