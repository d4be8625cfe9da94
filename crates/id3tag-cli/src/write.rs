use std::{fs, path::PathBuf};

use clap::{Parser, ValueHint};
use id3tag::{value::UserText, WriteTags};
use miette::IntoDiagnostic;
use tracing::{debug, info};

use crate::args::parse_pair;

#[derive(Debug, Clone, Parser)]
pub struct WriteArgs {
	/// Audio file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Set a text tag.
	///
	/// NAME is a tag name like `title` or `album`, or a frame identifier like `TIT2`. Can be given
	/// multiple times.
	#[arg(long, value_name = "NAME=VALUE", value_parser = parse_pair)]
	pub set: Vec<(String, String)>,

	/// Set a user-defined text tag (TXXX).
	///
	/// Can be given multiple times, with different descriptions.
	#[arg(long, value_name = "DESCRIPTION=VALUE", value_parser = parse_pair)]
	pub user: Vec<(String, String)>,

	/// Merge into the existing tag instead of replacing it.
	///
	/// Tags that aren't given are kept, and user-defined texts are matched by description.
	#[arg(long)]
	pub merge: bool,

	/// Write the result here instead of modifying the input file.
	#[arg(long,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub output: Option<PathBuf>,
}

pub(crate) fn write(args: WriteArgs) -> miette::Result<()> {
	let mut tags = WriteTags::new();
	for (name, value) in args.set {
		tags.insert(name, value);
	}
	if !args.user.is_empty() {
		let user: Vec<_> = args
			.user
			.into_iter()
			.map(|(description, value)| UserText::new(description, value))
			.collect();
		tags.insert("userDefinedText".into(), user);
	}
	debug!(?tags, "tags to write");

	info!(path = ?args.input, "read input file");
	let buffer = fs::read(&args.input).into_diagnostic()?;

	let written = if args.merge {
		id3tag::update(&tags, &buffer)?
	} else {
		id3tag::write(&tags, &buffer)?
	};

	let output = args.output.unwrap_or(args.input);
	info!(path = ?output, bytes = %written.len(), "write output file");
	fs::write(output, written).into_diagnostic()
}
