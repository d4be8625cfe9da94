use id3tag::{format::HEADER_LENGTH, DecodeOptions, ErrorKind, WriteTags};
use pretty_assertions::assert_eq;

fn title_album() -> (WriteTags, Vec<u8>) {
	let mut tags = WriteTags::new();
	tags.insert("title".into(), "abc");
	tags.insert("album".into(), "def");
	let tag = id3tag::encode(&tags).unwrap();
	(tags, tag)
}

/// Offset of the first frame's size field.
const FIRST_SIZE: usize = HEADER_LENGTH + 4;

/// Offset of the first frame's body.
const FIRST_BODY: usize = HEADER_LENGTH + 10;

fn decode_named(tag: &[u8]) -> WriteTags {
	id3tag::decode(tag, &DecodeOptions::new())
		.unwrap()
		.unwrap()
		.named
}

#[test]
fn bad_encoding_marker_drops_one_frame() {
	let (tags, mut tag) = title_album();
	tag[FIRST_BODY] = 9;

	let mut expected = tags;
	expected.remove("title");
	assert_eq!(decode_named(&tag), expected);
}

#[test]
fn truncated_subfield_drops_one_frame() {
	let mut tags = WriteTags::new();
	tags.insert(
		"userDefinedText".into(),
		vec![id3tag::value::UserText::new("desc", "value")],
	);
	tags.insert("album".into(), "def");
	let mut tag = id3tag::encode(&tags).unwrap();

	// turn the description terminator into text, leaving no terminator at all
	let body_size = u32::from_be_bytes(tag[FIRST_SIZE..FIRST_SIZE + 4].try_into().unwrap()) as usize;
	let description_end = FIRST_BODY + 1 + 2 + 8;
	assert_eq!(&tag[description_end..description_end + 2], [0, 0]);
	tag[description_end] = b'x';
	assert!(description_end < FIRST_BODY + body_size);

	let mut expected = tags;
	expected.remove("userDefinedText");
	assert_eq!(decode_named(&tag), expected);
}

#[test]
fn inflated_frame_size_is_clipped() {
	let mut tags = WriteTags::new();
	tags.insert("title".into(), "abc");
	let mut tag = id3tag::encode(&tags).unwrap();
	tag[FIRST_SIZE..FIRST_SIZE + 4].copy_from_slice(&[0, 0, 1, 0]);

	assert_eq!(decode_named(&tag), tags);
}

#[test]
fn shrunk_frame_size_truncates() {
	let (_, mut tag) = title_album();
	// marker, byte order mark, "ab" of "abc"
	tag[FIRST_SIZE..FIRST_SIZE + 4].copy_from_slice(&[0, 0, 0, 7]);

	let mut expected = WriteTags::new();
	expected.insert("title".into(), "ab");
	assert_eq!(decode_named(&tag), expected);
}

#[test]
fn truncated_tag_is_read_as_far_as_it_goes() {
	let (_, tag) = title_album();
	let cut = &tag[..tag.len() - 4];

	let mut expected = WriteTags::new();
	expected.insert("title".into(), "abc");
	expected.insert("album".into(), "d");
	assert_eq!(decode_named(cut), expected);
}

#[test]
fn bad_extended_header_is_an_error() {
	let mut tag = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
	assert!(id3tag::decode(&tag, &DecodeOptions::new()).unwrap().is_some());

	// extended header flag set, but no room for one
	tag[5] = 0b0100_0000;
	let err = id3tag::decode(&tag, &DecodeOptions::new()).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidSize { at: HEADER_LENGTH });
}

#[test]
fn strip_refuses_overrunning_tag() {
	let (_, tag) = title_album();
	let err = id3tag::strip(&tag[..tag.len() - 1]).unwrap_err();
	assert_eq!(err.kind(), ErrorKind::InvalidSize { at: 6 });
}
