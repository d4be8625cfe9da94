use tracing::{debug, instrument};

use crate::{
	error::{ErrorKind, Result, SourceError},
	format::{decode_header, encode_header, HEADER_LENGTH},
	locate::locate,
};

/// Wrap already-encoded frames in a tag header.
pub fn embed(frames: &[u8]) -> Result<Vec<u8>> {
	let mut tag = encode_header(frames.len())?;
	tag.extend_from_slice(frames);
	Ok(tag)
}

/// Remove the first tag found in `buffer`.
///
/// Returns `Ok(None)` if there's no tag. If there is one but its size field can't be trusted, or
/// claims more bytes than the buffer has, that's an error: the tag's extent is unknown, so there's
/// no safe way to cut it out.
///
/// Exactly the header and the body its size declares are removed; a v2.4 footer is left behind.
#[instrument(level = "debug", skip(buffer), fields(len = buffer.len()))]
pub fn strip(buffer: &[u8]) -> Result<Option<Vec<u8>>> {
	let Some(offset) = locate(buffer) else {
		debug!("no tag to strip");
		return Ok(None);
	};

	let tag = &buffer[offset..];
	let header = decode_header(tag)?;
	let length = header.tag_length();
	if length > tag.len() {
		return Err(SourceError::from_source(
			ErrorKind::InvalidSize { at: 6 },
			tag,
			6,
			HEADER_LENGTH,
		)
		.with_message(format!(
			"tag claims {length} bytes but only {} are left in the buffer",
			tag.len()
		))
		.into());
	}

	debug!(%offset, %length, "strip tag");
	let mut rest = Vec::with_capacity(buffer.len() - length);
	rest.extend_from_slice(&buffer[..offset]);
	rest.extend_from_slice(&tag[length..]);
	Ok(Some(rest))
}
