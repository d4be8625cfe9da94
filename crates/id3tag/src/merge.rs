//! Merging new tags into an existing tag.

use std::collections::HashMap;

use tracing::{instrument, trace};

use crate::{
	codec::Codec,
	table::{CompareKey, FrameSpecs},
	tags::{RawTags, TagValue, WriteTags},
	value::{FrameValue, KeyValue},
};

impl<S: FrameSpecs> Codec<S> {
	/// Merge new tags into existing raw tags.
	///
	/// Each new value replaces the existing value for its frame, except for multi-valued frames
	/// that already have values. For those, new records are matched against existing ones by the
	/// frame's compare key (the description of a `TXXX`, the picture type of an `APIC`...): a
	/// match is overwritten where it stands, anything else is appended. Frames without a compare
	/// key get every new record appended.
	///
	/// Frames not mentioned in `tags` are kept as they are.
	#[instrument(level = "debug", skip(self, tags, current), fields(tags = tags.len(), current = current.len()))]
	pub fn merge(&self, tags: &WriteTags, mut current: RawTags) -> RawTags {
		for (id, value) in self.translate(tags) {
			let Some(spec) = self.specs.by_id(id) else {
				continue;
			};

			match current.get_mut(&id) {
				Some(TagValue::Multiple(existing)) if spec.multiple => {
					trace!(%id, key = ?spec.update_compare_key, "merge into existing values");
					merge_records(existing, value.into_values(), spec.update_compare_key);
				}
				_ => {
					trace!(%id, "replace value");
					current.insert(id, value);
				}
			}
		}

		current
	}
}

fn merge_records(existing: &mut Vec<FrameValue>, new: Vec<FrameValue>, key: Option<CompareKey>) {
	let Some(key) = key else {
		existing.extend(new);
		return;
	};

	let index: HashMap<KeyValue, usize> = existing
		.iter()
		.enumerate()
		.filter_map(|(position, record)| Some((record.key(key)?, position)))
		.collect();

	for record in new {
		match record.key(key) {
			Some(value) => match index.get(&value) {
				Some(&position) => existing[position] = record,
				None => existing.push(record),
			},
			None => existing.push(record),
		}
	}
}
