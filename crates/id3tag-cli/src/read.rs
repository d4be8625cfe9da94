use std::{fs, path::PathBuf};

use clap::{Parser, ValueHint};
use id3tag::{format::FrameId, DecodeOptions, TagMap};
use miette::IntoDiagnostic;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct ReadArgs {
	/// Audio file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Print tags by frame identifier only.
	#[arg(long, conflicts_with = "no_raw")]
	pub raw: bool,

	/// Print tags by name only.
	#[arg(long)]
	pub no_raw: bool,

	/// Only read these frames.
	///
	/// Can be given multiple times.
	#[arg(long, value_name = "ID", value_parser = parse_frame_id)]
	pub include: Vec<FrameId>,

	/// Don't read these frames.
	///
	/// Can be given multiple times.
	#[arg(long, value_name = "ID", value_parser = parse_frame_id)]
	pub exclude: Vec<FrameId>,
}

fn parse_frame_id(id: &str) -> Result<FrameId, String> {
	FrameId::new(id).ok_or_else(|| format!("{id:?} is not a frame identifier"))
}

pub(crate) fn read(args: ReadArgs) -> miette::Result<()> {
	info!(path = ?args.input, "read input file");
	let buffer = fs::read(&args.input).into_diagnostic()?;

	let mut options = DecodeOptions::new()
		.only_raw(args.raw)
		.no_raw(args.no_raw)
		.exclude(args.exclude);
	if !args.include.is_empty() {
		options = options.include(args.include);
	}

	let Some(tags) = id3tag::decode(&buffer, &options)? else {
		eprintln!("no tag found in {}", args.input.display());
		return Ok(());
	};

	print_map(&tags.named);
	if let Some(raw) = &tags.raw {
		if !tags.named.is_empty() {
			println!();
		}
		print_map(raw);
	}

	Ok(())
}

fn print_map<K: std::fmt::Display>(map: &TagMap<K>) {
	for (key, value) in map.iter() {
		for value in value.values() {
			println!("{key}: {value}");
		}
	}
}
