//! Tag maps: what decode produces and what encode and merge consume.

use std::{collections::HashSet, slice, vec};

use crate::{
	format::FrameId,
	value::{
		Comment, FrameValue, Picture, Popularimeter, Private, UniqueFileId, UserText, UserUrl,
	},
};

/// Value of a tag map entry: one value, or several for multi-valued frames.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TagValue {
	/// Single value.
	Single(FrameValue),

	/// Ordered values of a multi-valued frame.
	Multiple(Vec<FrameValue>),
}

impl TagValue {
	/// All values, in order.
	pub fn values(&self) -> &[FrameValue] {
		match self {
			Self::Single(value) => slice::from_ref(value),
			Self::Multiple(values) => values,
		}
	}

	/// All values, in order.
	pub fn into_values(self) -> Vec<FrameValue> {
		match self {
			Self::Single(value) => vec![value],
			Self::Multiple(values) => values,
		}
	}

	/// The value, or the first of several.
	pub fn first(&self) -> Option<&FrameValue> {
		self.values().first()
	}
}

macro_rules! tag_value_from {
	($($from:ty),+) => {
		$(
			impl From<$from> for TagValue {
				fn from(value: $from) -> Self {
					Self::Single(value.into())
				}
			}
		)+
	};
}

tag_value_from!(
	FrameValue,
	&str,
	String,
	UserText,
	Comment,
	UserUrl,
	Picture,
	Private,
	UniqueFileId,
	Popularimeter
);

impl<T: Into<FrameValue>> From<Vec<T>> for TagValue {
	fn from(values: Vec<T>) -> Self {
		Self::Multiple(values.into_iter().map(Into::into).collect())
	}
}

/// Insertion-ordered map of tags.
///
/// Encoding emits frames in this order, so it's kept exactly: inserting an existing key replaces
/// its value where it stands.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TagMap<K> {
	entries: Vec<(K, TagValue)>,
}

/// Tags keyed by frame identifier.
pub type RawTags = TagMap<FrameId>;

/// Tags keyed by human-readable name (or by frame identifier, which is also accepted on write).
pub type WriteTags = TagMap<String>;

impl<K> Default for TagMap<K> {
	fn default() -> Self {
		Self {
			entries: Vec::new(),
		}
	}
}

impl<K> TagMap<K> {
	/// An empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries in order.
	pub fn iter(&self) -> impl Iterator<Item = (&K, &TagValue)> {
		self.entries.iter().map(|(key, value)| (key, value))
	}

	/// Keys in order.
	pub fn keys(&self) -> impl Iterator<Item = &K> {
		self.entries.iter().map(|(key, _)| key)
	}

	fn position<Q: ?Sized>(&self, key: &Q) -> Option<usize>
	where
		K: PartialEq<Q>,
	{
		self.entries.iter().position(|(k, _)| k == key)
	}

	/// Value for a key.
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&TagValue>
	where
		K: PartialEq<Q>,
	{
		self.position(key).map(|i| &self.entries[i].1)
	}

	/// Mutable value for a key.
	pub fn get_mut<Q: ?Sized>(&mut self, key: &Q) -> Option<&mut TagValue>
	where
		K: PartialEq<Q>,
	{
		self.position(key).map(|i| &mut self.entries[i].1)
	}

	/// Whether there's a value for a key.
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		K: PartialEq<Q>,
	{
		self.position(key).is_some()
	}

	/// Remove a key, returning its value.
	pub fn remove<Q: ?Sized>(&mut self, key: &Q) -> Option<TagValue>
	where
		K: PartialEq<Q>,
	{
		self.position(key).map(|i| self.entries.remove(i).1)
	}
}

impl<K: PartialEq> TagMap<K> {
	/// Set a key's value, replacing any existing value in place.
	pub fn insert(&mut self, key: K, value: impl Into<TagValue>) -> Option<TagValue> {
		let value = value.into();
		match self.position(&key) {
			Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
			None => {
				self.entries.push((key, value));
				None
			}
		}
	}

	/// Append a value to a key's list of values.
	///
	/// A single existing value becomes the first of the list.
	pub fn push(&mut self, key: K, value: impl Into<FrameValue>) {
		let value = value.into();
		match self.get_mut(&key) {
			Some(TagValue::Multiple(values)) => values.push(value),
			Some(slot) => {
				let mut values = std::mem::replace(slot, TagValue::Multiple(Vec::new())).into_values();
				values.push(value);
				*slot = TagValue::Multiple(values);
			}
			None => self.entries.push((key, TagValue::Multiple(vec![value]))),
		}
	}
}

impl<K: PartialEq, V: Into<TagValue>> FromIterator<(K, V)> for TagMap<K> {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = Self::new();
		map.extend(iter);
		map
	}
}

impl<K: PartialEq, V: Into<TagValue>> Extend<(K, V)> for TagMap<K> {
	fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
		for (key, value) in iter {
			self.insert(key, value);
		}
	}
}

impl<K> IntoIterator for TagMap<K> {
	type Item = (K, TagValue);
	type IntoIter = vec::IntoIter<(K, TagValue)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl<'map, K> IntoIterator for &'map TagMap<K> {
	type Item = &'map (K, TagValue);
	type IntoIter = slice::Iter<'map, (K, TagValue)>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

/// Decoded tags.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tags {
	/// Tags under their human-readable names. Empty when decoding with
	/// [`only_raw`](DecodeOptions::only_raw).
	pub named: WriteTags,

	/// Tags under their frame identifiers. Absent when decoding with
	/// [`no_raw`](DecodeOptions::no_raw).
	pub raw: Option<RawTags>,
}

/// Options for decoding.
#[derive(Clone, Debug, Default)]
pub struct DecodeOptions {
	include: Option<HashSet<FrameId>>,
	exclude: HashSet<FrameId>,
	only_raw: bool,
	no_raw: bool,
}

impl DecodeOptions {
	/// Default options: decode every known frame, return both maps.
	pub fn new() -> Self {
		Self::default()
	}

	/// Only decode these frames.
	///
	/// Can be called several times to add more frames.
	pub fn include(mut self, ids: impl IntoIterator<Item = FrameId>) -> Self {
		self.include.get_or_insert_with(HashSet::new).extend(ids);
		self
	}

	/// Don't decode these frames.
	pub fn exclude(mut self, ids: impl IntoIterator<Item = FrameId>) -> Self {
		self.exclude.extend(ids);
		self
	}

	/// Only return the raw identifier map.
	pub fn only_raw(mut self, only_raw: bool) -> Self {
		self.only_raw = only_raw;
		self
	}

	/// Only return the human-readable map.
	pub fn no_raw(mut self, no_raw: bool) -> Self {
		self.no_raw = no_raw;
		self
	}

	/// Whether the named map is wanted.
	pub fn wants_named(&self) -> bool {
		!self.only_raw
	}

	/// Whether the raw map is wanted.
	pub fn wants_raw(&self) -> bool {
		!self.no_raw
	}

	/// Whether a frame should be decoded.
	pub fn wants(&self, id: FrameId) -> bool {
		self.include.as_ref().map_or(true, |include| include.contains(&id))
			&& !self.exclude.contains(&id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn insert_keeps_position() {
		let mut map: WriteTags = [("title", "a"), ("album", "b"), ("artist", "c")]
			.into_iter()
			.map(|(k, v)| (k.to_string(), v))
			.collect();
		assert_eq!(map.insert("album".into(), "z"), Some("b".into()));
		assert_eq!(
			map.keys().map(String::as_str).collect::<Vec<_>>(),
			["title", "album", "artist"]
		);
		assert_eq!(map.get("album"), Some(&TagValue::from("z")));
		assert_eq!(map.remove("title"), Some("a".into()));
		assert_eq!(map.len(), 2);
		assert!(!map.contains_key("title"));
	}

	#[test]
	fn push_accumulates() {
		let id = FrameId::new("TXXX").unwrap();
		let mut map = RawTags::new();
		map.push(id, UserText::new("a", "1"));
		map.push(id, UserText::new("b", "2"));
		assert_eq!(
			map.get("TXXX"),
			Some(&TagValue::from(vec![
				UserText::new("a", "1"),
				UserText::new("b", "2")
			]))
		);

		let mut map = RawTags::new();
		map.insert(id, UserText::new("a", "1"));
		map.push(id, UserText::new("b", "2"));
		assert_eq!(map.get(&id).map(TagValue::values).map(<[_]>::len), Some(2));
	}

	#[test]
	fn option_filters() {
		let tit2 = FrameId::new("TIT2").unwrap();
		let talb = FrameId::new("TALB").unwrap();

		assert!(DecodeOptions::new().wants(tit2));
		let include = DecodeOptions::new().include([tit2]);
		assert!(include.wants(tit2));
		assert!(!include.wants(talb));
		let exclude = DecodeOptions::new().exclude([tit2]);
		assert!(!exclude.wants(tit2));
		assert!(exclude.wants(talb));
	}
}
