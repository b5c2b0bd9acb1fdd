use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A label set: a mapping from short label names to string values.
///
/// Backed by a `BTreeMap` rather than a `HashMap` so that iteration
/// order (and therefore the hash in [`Labels::hash`]) never depends on
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Labels(BTreeMap<String, String>);

/// A deterministic 64-bit signature for a [`Labels`] value. Two label
/// sets with identical key/value pairs always produce the same hash.
pub type LabelsHash = u64;

impl Labels {
	pub fn new() -> Self {
		Self(BTreeMap::new())
	}

	pub fn insert(
		&mut self,
		key: impl Into<String>,
		value: impl Into<String>,
	) -> &mut Self {
		self.0.insert(key.into(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Sorted-pairs signature, stable across process restarts and
	/// independent of insertion order.
	pub fn hash(&self) -> LabelsHash {
		let mut hasher = DefaultHasher::new();
		for (k, v) in &self.0 {
			k.hash(&mut hasher);
			v.hash(&mut hasher);
		}
		hasher.finish()
	}
}

impl FromIterator<(String, String)> for Labels {
	fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl<const N: usize> From<[(&str, &str); N]> for Labels {
	fn from(pairs: [(&str, &str); N]) -> Self {
		pairs
			.into_iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn hash_ignores_insertion_order() {
		let a: Labels = [("app", "foo"), ("dest", "bar")].into();
		let mut b = Labels::new();
		b.insert("dest", "bar");
		b.insert("app", "foo");
		assert_eq!(a.hash(), b.hash());
	}

	#[test]
	fn hash_distinguishes_values() {
		let a: Labels = [("app", "foo")].into();
		let b: Labels = [("app", "bar")].into();
		assert_ne!(a.hash(), b.hash());
	}
}
