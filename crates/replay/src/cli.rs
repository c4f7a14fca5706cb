use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "srhud-replay")]
#[command(about = "Replay a recorded entity through the HUD engine")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Engine configuration (TOML); defaults apply when omitted
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Verbose logging
	#[arg(long, short = 'v')]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Print the display model built for the fixture entity
	Model {
		/// Fixture file (JSON)
		fixture: PathBuf,

		/// Pretty-print the model
		#[arg(long)]
		pretty: bool,
	},
	/// Click the roll control of one row and report what the host was asked to do
	Click {
		/// Fixture file (JSON)
		fixture: PathBuf,

		/// Row id: an item id, or a default action name
		row: String,
	},
	/// Enable the HUD, replay a burst of entity edits and report the window lifecycle
	Session {
		/// Fixture file (JSON)
		fixture: PathBuf,

		/// Number of entity edits in the burst
		#[arg(long, default_value_t = 5)]
		edits: usize,
	},
}
