use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use super::dict::Dictionary;

/// Aliasing handle over a single `Dictionary`.
///
/// `share_handle` hands out another handle to the same storage: mutating
/// through one is visible through every other, and `==` compares storage
/// identity, not content. `deep_copy` is the only way to get an independent
/// dictionary back.
///
/// The handle is `!Send`, so aliases can never be mutated from two threads.
pub struct SharedDictionary(Rc<RefCell<Dictionary>>);

impl SharedDictionary {
	pub fn new(dict: Dictionary) -> Self {
		Self(Rc::new(RefCell::new(dict)))
	}

	/// Another handle to the same storage.
	pub fn share_handle(&self) -> Self {
		Self(Rc::clone(&self.0))
	}

	/// A handle to a fresh, independent copy of the storage.
	pub fn deep_copy(&self) -> Self {
		Self::new(self.0.borrow().clone())
	}

	/// Whether both handles point to the same storage.
	pub fn same_storage(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	/// Number of live handles on this storage.
	pub fn handle_count(&self) -> usize {
		Rc::strong_count(&self.0)
	}

	/// # Panics
	/// Panics if the dictionary is currently borrowed mutably.
	pub fn borrow(&self) -> Ref<'_, Dictionary> {
		self.0.borrow()
	}

	/// # Panics
	/// Panics if the dictionary is currently borrowed.
	pub fn borrow_mut(&self) -> RefMut<'_, Dictionary> {
		self.0.borrow_mut()
	}

	/// Takes a copy of the current content.
	pub fn snapshot(&self) -> Dictionary {
		self.0.borrow().clone()
	}
}

impl From<Dictionary> for SharedDictionary {
	fn from(dict: Dictionary) -> Self {
		Self::new(dict)
	}
}

impl PartialEq for SharedDictionary {
	fn eq(&self, other: &Self) -> bool {
		self.same_storage(other)
	}
}

impl Eq for SharedDictionary {}

impl fmt::Debug for SharedDictionary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SharedDictionary").field(&*self.0.borrow()).finish()
	}
}

impl fmt::Display for SharedDictionary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.borrow())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn shallow_handles_alias() {
		let seuss = SharedDictionary::new(Dictionary::embedded("Seussian"));
		let shallow = seuss.share_handle();
		assert!(shallow == seuss);
		assert_eq!(seuss.handle_count(), 2);

		shallow.borrow_mut().place("zzyzx");
		assert!(seuss.borrow().include("zzyzx"));

		shallow.borrow_mut().close();
		assert_eq!(seuss.to_string(), "[]");
	}

	#[test]
	fn deep_copies_are_independent() {
		let seuss = SharedDictionary::new(Dictionary::embedded("Seussian"));
		let expected = seuss.to_string();
		let copy = seuss.deep_copy();
		assert!(copy != seuss);
		assert_eq!(copy.to_string(), expected);

		seuss.borrow_mut().close();
		assert_eq!(seuss.borrow().length(), 0);
		assert_eq!(copy.to_string(), expected);
		assert!(copy.borrow().length() > 0);
	}

	#[test]
	fn equality_is_identity() {
		let empty = SharedDictionary::new(Dictionary::new());
		let slight = empty.deep_copy();
		slight.borrow_mut().place_all(["some", "test", "entries"]);
		assert!(slight != empty);

		let other_empty = SharedDictionary::new(Dictionary::new());
		assert!(other_empty != empty);
		assert_eq!(other_empty.snapshot(), empty.snapshot());
	}
}
