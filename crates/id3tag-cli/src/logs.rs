use std::{
	env::var,
	fs::{metadata, File},
	io::{Error, Result},
	path::{Path, PathBuf},
	sync::Mutex,
};

use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::args::Args;

/// Initialise logging from `RUST_LOG`, if set.
///
/// Returns whether logging was initialised.
pub fn from_env() -> Result<bool> {
	if var("RUST_LOG").is_err() {
		return Ok(false);
	}

	tracing_subscriber::fmt::try_init().map_err(Error::other)?;
	Ok(true)
}

/// Initialise logging from `-v` and `--log-file`.
pub fn from_args(args: &Args) -> Result<()> {
	let verbosity = args.verbose.unwrap_or(0);
	let Some(filter) = filter_for(verbosity) else {
		return Ok(());
	};

	let log_file = args
		.log_file
		.as_deref()
		.map(|path| File::create(log_path(path)))
		.transpose()?;

	let mut builder = tracing_subscriber::fmt().with_env_filter(filter);
	if verbosity > 2 {
		builder = builder.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);
	}

	let init = match log_file {
		Some(writer) => builder.json().with_writer(Mutex::new(writer)).try_init(),
		None if verbosity > 3 => builder.pretty().try_init(),
		None => builder.try_init(),
	};
	match init {
		Ok(_) => info!("logging initialised"),
		Err(e) => eprintln!("Failed to initialise logging, continuing with none\n{e}"),
	}

	Ok(())
}

fn filter_for(verbosity: u8) -> Option<&'static str> {
	match verbosity {
		0 => None,
		1 => Some("warn"),
		2 => Some("info"),
		3 => Some("debug"),
		_ => Some("trace"),
	}
}

/// A directory gets a timestamped file inside it.
fn log_path(path: &Path) -> PathBuf {
	if metadata(path).map_or(false, |info| info.is_dir()) {
		path.join(format!(
			"id3tag.{}.log",
			chrono::Utc::now().format("%Y-%m-%dT%H-%M-%SZ")
		))
	} else {
		path.to_owned()
	}
}
