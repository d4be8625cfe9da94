use id3tag::{
	format::FrameId,
	value::{Comment, Picture, Popularimeter, Private, UniqueFileId, UserText, UserUrl},
	DecodeOptions, FrameValue, RawTags, TagValue, WriteTags,
};
use pretty_assertions::assert_eq;

fn named(pairs: &[(&str, TagValue)]) -> WriteTags {
	pairs
		.iter()
		.map(|(name, value)| (name.to_string(), value.clone()))
		.collect()
}

fn id(id: &str) -> FrameId {
	FrameId::new(id).unwrap()
}

#[test]
fn empty_tag() {
	let tag = id3tag::encode(&WriteTags::new()).unwrap();
	assert_eq!(tag, b"ID3\x03\x00\x00\x00\x00\x00\x00");

	let tags = id3tag::decode(&tag, &DecodeOptions::new()).unwrap().unwrap();
	assert!(tags.named.is_empty());
	assert_eq!(tags.raw, Some(RawTags::new()));
}

#[test]
fn title_and_album() {
	let tags = named(&[("title", "a".into()), ("album", "b".into())]);
	let tag = id3tag::encode(&tags).unwrap();

	let decoded = id3tag::decode(&tag, &DecodeOptions::new()).unwrap().unwrap();
	assert_eq!(decoded.named, tags);

	let mut raw = RawTags::new();
	raw.insert(id("TIT2"), "a");
	raw.insert(id("TALB"), "b");
	assert_eq!(decoded.raw, Some(raw));
}

#[test]
fn every_frame_kind() {
	let tags = named(&[
		("title", "Ünïcödé ✓".into()),
		("artistUrl", vec![FrameValue::Url("https://example.com/a".into())].into()),
		("fileUrl", FrameValue::Url("https://example.com/f".into()).into()),
		(
			"userDefinedText",
			vec![UserText::new("one", "1"), UserText::new("two", "2")].into(),
		),
		(
			"comment",
			vec![Comment {
				language: "eng".into(),
				description: "short".into(),
				text: "long comment".into(),
			}]
			.into(),
		),
		(
			"userDefinedUrl",
			vec![UserUrl {
				description: "home".into(),
				url: "https://example.com".into(),
			}]
			.into(),
		),
		(
			"image",
			vec![Picture {
				mime: "image/png".into(),
				picture_type: Picture::FRONT_COVER,
				description: "cover".into(),
				data: vec![0x89, b'P', b'N', b'G', 0, 0, 0xFF],
			}]
			.into(),
		),
		(
			"private",
			vec![Private {
				owner: "owner@example.com".into(),
				data: vec![1, 2, 3],
			}]
			.into(),
		),
		(
			"uniqueFileIdentifier",
			vec![UniqueFileId {
				owner: "http://musicbrainz.org".into(),
				identifier: b"abcd-1234".to_vec(),
			}]
			.into(),
		),
		(
			"popularimeter",
			vec![Popularimeter {
				email: "me@example.com".into(),
				rating: 255,
				counter: 42,
			}]
			.into(),
		),
	]);

	let tag = id3tag::encode(&tags).unwrap();
	let decoded = id3tag::decode(&tag, &DecodeOptions::new()).unwrap().unwrap();
	assert_eq!(decoded.named, tags);
}

#[test]
fn tag_inside_audio() {
	let tags = named(&[("title", "a".into())]);
	let mut buffer = b"\xFF\xFBID3 in audio".to_vec();
	buffer.extend(id3tag::encode(&tags).unwrap());
	buffer.extend(b"\xFF\xFB more audio");

	let decoded = id3tag::decode(&buffer, &DecodeOptions::new()).unwrap().unwrap();
	assert_eq!(decoded.named, tags);
}

#[test]
fn no_tag_is_not_an_error() {
	assert_eq!(id3tag::decode(b"", &DecodeOptions::new()).unwrap(), None);
	assert_eq!(
		id3tag::decode(b"plain audio ID3", &DecodeOptions::new()).unwrap(),
		None
	);
}

#[test]
fn option_maps() {
	let tags = named(&[("title", "a".into()), ("album", "b".into())]);
	let tag = id3tag::encode(&tags).unwrap();

	let only_raw = id3tag::decode(&tag, &DecodeOptions::new().only_raw(true))
		.unwrap()
		.unwrap();
	assert!(only_raw.named.is_empty());
	assert_eq!(only_raw.raw.map(|raw| raw.len()), Some(2));

	let no_raw = id3tag::decode(&tag, &DecodeOptions::new().no_raw(true))
		.unwrap()
		.unwrap();
	assert_eq!(no_raw.named, tags);
	assert_eq!(no_raw.raw, None);

	let include = id3tag::decode(&tag, &DecodeOptions::new().include([id("TALB")]))
		.unwrap()
		.unwrap();
	assert_eq!(include.named, named(&[("album", "b".into())]));

	let exclude = id3tag::decode(&tag, &DecodeOptions::new().exclude([id("TALB")]))
		.unwrap()
		.unwrap();
	assert_eq!(exclude.named, named(&[("title", "a".into())]));
}

#[test]
fn write_then_update() {
	let audio = b"\xFF\xFB\x90\x00audio frames";
	let written = id3tag::write(
		&named(&[
			("title", "a".into()),
			("userDefinedText", vec![UserText::new("abc", "old")].into()),
		]),
		audio,
	)
	.unwrap();
	assert!(written.ends_with(audio));

	let updated = id3tag::update(
		&named(&[
			("album", "b".into()),
			(
				"userDefinedText",
				vec![UserText::new("abc", "deg"), UserText::new("new", "x")].into(),
			),
		]),
		&written,
	)
	.unwrap();
	assert!(updated.ends_with(audio));
	assert_eq!(id3tag::strip(&updated).unwrap().unwrap(), audio);

	let decoded = id3tag::decode(&updated, &DecodeOptions::new()).unwrap().unwrap();
	assert_eq!(
		decoded.named,
		named(&[
			("title", "a".into()),
			(
				"userDefinedText",
				vec![UserText::new("abc", "deg"), UserText::new("new", "x")].into()
			),
			("album", "b".into()),
		])
	);
}
