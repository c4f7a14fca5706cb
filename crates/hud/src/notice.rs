//! User-visible notices.
//!
//! Each notice kind is a static [`NoticeDef`] with a stable id, so hosts can
//! style or suppress them by id and tests can assert on kinds rather than text.

use std::time::Duration;

/// Severity level for notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
	#[default]
	Info,
	Warn,
}

/// Controls automatic dismissal of notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoDismiss {
	/// Notice automatically dismisses after the specified duration.
	After(Duration),
}

impl AutoDismiss {
	/// Default auto-dismiss duration (4 seconds).
	pub const DEFAULT: Self = Self::After(Duration::from_secs(4));
}

impl Default for AutoDismiss {
	fn default() -> Self {
		Self::DEFAULT
	}
}

/// Static notice definition.
#[derive(Debug)]
pub struct NoticeDef {
	pub id: &'static str,
	pub level: Level,
	pub auto_dismiss: AutoDismiss,
}

/// Runtime notice instance ready to display.
#[derive(Debug, Clone)]
pub struct Notice {
	pub def: &'static NoticeDef,
	pub message: String,
	pub auto_dismiss: AutoDismiss,
}

impl Notice {
	pub fn new(def: &'static NoticeDef, message: impl Into<String>) -> Self {
		Self {
			def,
			message: message.into(),
			auto_dismiss: def.auto_dismiss,
		}
	}

	/// Overrides the definition's dismissal.
	pub fn dismiss_after(mut self, duration: Duration) -> Self {
		self.auto_dismiss = AutoDismiss::After(duration);
		self
	}

	pub fn id(&self) -> &'static str {
		self.def.id
	}

	pub fn level(&self) -> Level {
		self.def.level
	}
}

pub mod keys {
	use super::{AutoDismiss, Level, NoticeDef};

	/// Opening the overlay requires a selected entity.
	pub static NO_SELECTION: NoticeDef = NoticeDef {
		id: "hud.no_selection",
		level: Level::Warn,
		auto_dismiss: AutoDismiss::DEFAULT,
	};

	/// A catalog-sourced row named an action the catalog does not have.
	pub static ACTION_NOT_FOUND: NoticeDef = NoticeDef {
		id: "hud.action_not_found",
		level: Level::Warn,
		auto_dismiss: AutoDismiss::DEFAULT,
	};

	/// The clicked item exposes nothing to roll.
	pub static UNSUPPORTED_ITEM: NoticeDef = NoticeDef {
		id: "hud.unsupported_item",
		level: Level::Info,
		auto_dismiss: AutoDismiss::DEFAULT,
	};
}
