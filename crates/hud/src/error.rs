//! Error types for the overlay engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::keybind::ParseError;

/// Failure reported by a host capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
	/// The referenced entity, item or document does not exist.
	#[error("not found: {0}")]
	NotFound(String),
	/// The capability is not reachable right now.
	#[error("unavailable: {0}")]
	Unavailable(String),
	/// The host attempted the operation and it failed.
	#[error("host operation failed: {0}")]
	Failed(String),
}

/// Engine-level failure kinds.
///
/// None of these are fatal. Public entry points convert them into an empty
/// model, a user notice or a log line.
#[derive(Debug, Error)]
pub enum HudError {
	/// There is no entity to act on.
	#[error("no entity selected")]
	NoSelection,

	/// The external catalog index could not be fetched.
	#[error("catalog {catalog} unavailable: {source}")]
	CatalogUnavailable {
		catalog: String,
		#[source]
		source: HostError,
	},

	/// A catalog-sourced action has no matching executable action.
	#[error("action '{action}' not found in catalog {catalog}")]
	ActionNotFound { catalog: String, action: String },

	/// The item exposes no capability the router can invoke.
	#[error("item '{item}' cannot be rolled")]
	UnsupportedItem { item: String },

	/// The entity reference could not be resolved.
	#[error("invalid entity reference: {0}")]
	InvalidEntity(#[source] HostError),

	/// The host failed while executing an action.
	#[error("action execution failed: {0}")]
	Execution(#[source] HostError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or an unknown key.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// The keybinding chord could not be parsed.
	#[error("invalid keybinding: {0}")]
	InvalidKeybinding(#[from] ParseError),
}
