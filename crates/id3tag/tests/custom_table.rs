use id3tag::{
	value::UserText, Codec, CompareKey, DecodeOptions, FrameKind, FrameSpec, TagValue, WriteTags,
};
use pretty_assertions::assert_eq;

static TABLE: &[FrameSpec] = &[
	FrameSpec::single(*b"TIT2", Some("TT2"), "name", FrameKind::Text),
	FrameSpec::multiple(
		*b"TXXX",
		None,
		"extra",
		FrameKind::UserText,
		Some(CompareKey::Description),
	),
];

#[test]
fn aliases_come_from_the_table() {
	let codec = Codec::new(TABLE);

	let mut tags = WriteTags::new();
	tags.insert("name".into(), "a");
	tags.insert("album".into(), "dropped, the table doesn't know it");
	tags.insert("extra".into(), vec![UserText::new("k", "v")]);
	let tag = codec.encode(&tags).unwrap();

	let decoded = codec.decode(&tag, &DecodeOptions::new()).unwrap().unwrap();
	assert_eq!(
		decoded.named.keys().map(String::as_str).collect::<Vec<_>>(),
		["name", "extra"]
	);

	let standard = id3tag::decode(&tag, &DecodeOptions::new()).unwrap().unwrap();
	assert_eq!(standard.named.get("title"), Some(&TagValue::from("a")));
}
