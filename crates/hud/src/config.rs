//! Engine configuration.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```toml
//! refresh_debounce_ms = 100
//! selection_settle_ms = 50
//! keybinding = "ctrl-h"
//!
//! [window]
//! id = "steve-sr5-hud"
//! width = 400
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::keybind::KeyChord;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HudConfig {
	/// Coalescing window for entity change notifications.
	pub refresh_debounce_ms: u64,
	/// Delay absorbing selection churn before the overlay reacts.
	pub selection_settle_ms: u64,
	/// Chord of the open/close keybinding, e.g. `ctrl-h`.
	pub keybinding: String,
	pub notice_timeout_ms: u64,
	pub placeholder_portrait: String,
	pub catalog_placeholder_portrait: String,
	pub window: WindowSpec,
}

impl Default for HudConfig {
	fn default() -> Self {
		Self {
			refresh_debounce_ms: 100,
			selection_settle_ms: 50,
			keybinding: "ctrl-h".to_string(),
			notice_timeout_ms: 2000,
			placeholder_portrait: "icons/svg/mystery-man.svg".to_string(),
			catalog_placeholder_portrait: "icons/svg/clockwork.svg".to_string(),
			window: WindowSpec::default(),
		}
	}
}

impl HudConfig {
	/// Parses a TOML document and validates the keybinding.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.key_chord()?;
		Ok(config)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	pub fn refresh_debounce(&self) -> Duration {
		Duration::from_millis(self.refresh_debounce_ms)
	}

	pub fn selection_settle(&self) -> Duration {
		Duration::from_millis(self.selection_settle_ms)
	}

	pub fn notice_timeout(&self) -> Duration {
		Duration::from_millis(self.notice_timeout_ms)
	}

	pub fn key_chord(&self) -> Result<KeyChord, ConfigError> {
		Ok(self.keybinding.parse()?)
	}
}

/// Presentation of the overlay window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowSpec {
	/// Fixed logical id; at most one window with this id exists.
	pub id: String,
	pub width: u32,
	/// Fixed height, or `None` to size to content.
	pub height: Option<u32>,
	pub resizable: bool,
	pub minimizable: bool,
	/// Hide the window header and border.
	pub chromeless: bool,
	pub classes: Vec<String>,
}

impl Default for WindowSpec {
	fn default() -> Self {
		Self {
			id: "steve-sr5-hud".to_string(),
			width: 400,
			height: None,
			resizable: false,
			minimizable: false,
			chromeless: true,
			classes: vec!["sr5-hud-frame".to_string()],
		}
	}
}
