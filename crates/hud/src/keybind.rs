//! Keybinding chords.
//!
//! The overlay registers one host keybinding. Its chord is written in plain
//! text and parsed here:
//!
//! ```text
//! chord     = (modifier "-")* key
//! modifier  = "ctrl" | "control" | "alt" | "shift" | "cmd" | "meta"
//! key       = fn-key | named-key | char
//! fn-key    = "f" digit digit?
//! named-key = "space" | "tab" | "enter" | "esc" | "backspace" | "delete" | ...
//! char      = ascii-graphic
//! ```

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;


/// Represents an error that occurred during chord parsing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
	/// Human-readable description of the parse error.
	pub message: String,
	/// Byte offset in the input where the error occurred.
	pub position: usize,
}

impl fmt::Display for ParseError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Parse error at position {}: {}", self.position, self.message)
	}
}

impl std::error::Error for ParseError {}

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct Modifiers: u8 {
		const CTRL = 1 << 0;
		const ALT = 1 << 1;
		const SHIFT = 1 << 2;
		const META = 1 << 3;
	}
}

const MODIFIER_NAMES: [(&str, Modifiers); 6] = [
	("ctrl", Modifiers::CTRL),
	("control", Modifiers::CTRL),
	("alt", Modifiers::ALT),
	("shift", Modifiers::SHIFT),
	("cmd", Modifiers::META),
	("meta", Modifiers::META),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
	/// A printable ASCII character, stored lowercase for letters.
	Char(char),
	/// Function key `F1`..`F24`.
	F(u8),
	Named(NamedKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
	Space,
	Tab,
	Enter,
	Escape,
	Backspace,
	Delete,
	Insert,
	Home,
	End,
	PageUp,
	PageDown,
	Up,
	Down,
	Left,
	Right,
}

const NAMED_KEYS: [(&str, NamedKey); 19] = [
	("space", NamedKey::Space),
	("tab", NamedKey::Tab),
	("enter", NamedKey::Enter),
	("return", NamedKey::Enter),
	("esc", NamedKey::Escape),
	("escape", NamedKey::Escape),
	("backspace", NamedKey::Backspace),
	("del", NamedKey::Delete),
	("delete", NamedKey::Delete),
	("insert", NamedKey::Insert),
	("home", NamedKey::Home),
	("end", NamedKey::End),
	("pageup", NamedKey::PageUp),
	("pagedown", NamedKey::PageDown),
	("up", NamedKey::Up),
	("down", NamedKey::Down),
	("left", NamedKey::Left),
	("right", NamedKey::Right),
	("ins", NamedKey::Insert),
];

impl NamedKey {
	const fn as_str(self) -> &'static str {
		match self {
			Self::Space => "space",
			Self::Tab => "tab",
			Self::Enter => "enter",
			Self::Escape => "esc",
			Self::Backspace => "backspace",
			Self::Delete => "delete",
			Self::Insert => "insert",
			Self::Home => "home",
			Self::End => "end",
			Self::PageUp => "pageup",
			Self::PageDown => "pagedown",
			Self::Up => "up",
			Self::Down => "down",
			Self::Left => "left",
			Self::Right => "right",
		}
	}

	/// Host key code (`KeyboardEvent.code` naming).
	const fn host_code(self) -> &'static str {
		match self {
			Self::Space => "Space",
			Self::Tab => "Tab",
			Self::Enter => "Enter",
			Self::Escape => "Escape",
			Self::Backspace => "Backspace",
			Self::Delete => "Delete",
			Self::Insert => "Insert",
			Self::Home => "Home",
			Self::End => "End",
			Self::PageUp => "PageUp",
			Self::PageDown => "PageDown",
			Self::Up => "ArrowUp",
			Self::Down => "ArrowDown",
			Self::Left => "ArrowLeft",
			Self::Right => "ArrowRight",
		}
	}
}

/// A single key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
	pub modifiers: Modifiers,
	pub key: Key,
}

/// Chord in the host's registration format, e.g. `KeyH` + `["Control"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBinding {
	pub key: String,
	pub modifiers: Vec<&'static str>,
}

impl KeyChord {
	pub fn to_host_binding(&self) -> HostBinding {
		let key = match self.key {
			Key::Char(c) if c.is_ascii_alphabetic() => format!("Key{}", c.to_ascii_uppercase()),
			Key::Char(c) if c.is_ascii_digit() => format!("Digit{c}"),
			Key::Char(c) => c.to_string(),
			Key::F(n) => format!("F{n}"),
			Key::Named(named) => named.host_code().to_string(),
		};
		let modifiers = [
			(Modifiers::CTRL, "Control"),
			(Modifiers::ALT, "Alt"),
			(Modifiers::SHIFT, "Shift"),
			(Modifiers::META, "Meta"),
		]
		.into_iter()
		.filter(|(flag, _)| self.modifiers.contains(*flag))
		.map(|(_, name)| name)
		.collect();
		HostBinding { key, modifiers }
	}
}

impl FromStr for KeyChord {
	type Err = ParseError;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let mut modifiers = Modifiers::empty();
		let mut rest = input;
		let mut position = 0;

		while let Some((word, tail)) = rest.split_once('-') {
			let Some(flag) = modifier(word) else {
				break;
			};
			if modifiers.contains(flag) {
				return Err(ParseError {
					message: format!("duplicate modifier '{word}'"),
					position,
				});
			}
			modifiers |= flag;
			position += word.len() + 1;
			rest = tail;
		}

		let key = parse_key(rest).ok_or_else(|| ParseError {
			message: if rest.is_empty() {
				"expected key, found end of input".to_string()
			} else {
				format!("unknown key '{rest}'")
			},
			position,
		})?;
		Ok(Self { modifiers, key })
	}
}

fn modifier(word: &str) -> Option<Modifiers> {
	MODIFIER_NAMES
		.iter()
		.find(|(name, _)| name.eq_ignore_ascii_case(word))
		.map(|(_, flag)| *flag)
}

fn parse_key(token: &str) -> Option<Key> {
	let mut chars = token.chars();
	if let (Some(c), None) = (chars.next(), chars.next()) {
		return c.is_ascii_graphic().then(|| Key::Char(c.to_ascii_lowercase()));
	}

	let lower = token.to_ascii_lowercase();
	if let Some(n) = lower.strip_prefix('f').and_then(|digits| digits.parse::<u8>().ok()) {
		return (1..=24).contains(&n).then_some(Key::F(n));
	}

	NAMED_KEYS
		.iter()
		.find(|(name, _)| *name == lower)
		.map(|(_, named)| Key::Named(*named))
}

impl fmt::Display for KeyChord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (flag, name) in [
			(Modifiers::CTRL, "ctrl"),
			(Modifiers::ALT, "alt"),
			(Modifiers::SHIFT, "shift"),
			(Modifiers::META, "cmd"),
		] {
			if self.modifiers.contains(flag) {
				write!(f, "{name}-")?;
			}
		}
		match self.key {
			Key::Char(c) => write!(f, "{c}"),
			Key::F(n) => write!(f, "f{n}"),
			Key::Named(named) => f.write_str(named.as_str()),
		}
	}
}
