const SEUSSIAN: &str = include_str!("../data/seussian.txt");
const LATIN: &str = include_str!("../data/latin.txt");

/// Canonical names of the built-in dictionaries.
pub const EMBEDDED_NAMES: [&str; 2] = ["Latin", "Seussian"];

/// Resolves a built-in dictionary name to its canonical name and word list.
pub(crate) fn lookup(name: &str) -> Option<(&'static str, &'static str)> {
	match name {
		"Seussian" | "seussian" | "Seuss" | "seuss" => Some(("Seussian", SEUSSIAN)),
		"Latin" | "latin" => Some(("Latin", LATIN)),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn aliases_resolve() {
		for alias in ["Seussian", "seussian", "Seuss", "seuss"] {
			assert_eq!(lookup(alias).map(|(name, _)| name), Some("Seussian"));
		}
		assert_eq!(lookup("latin").map(|(name, _)| name), Some("Latin"));
		assert!(lookup("LATIN").is_none());
		assert!(EMBEDDED_NAMES.iter().all(|name| lookup(name).is_some()));
	}
}
