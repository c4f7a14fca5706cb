//! Fixed section layout of the display model.

/// A named section collecting items by type-code membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionDef {
	pub label: &'static str,
	pub types: &'static [&'static str],
}

impl SectionDef {
	pub fn contains(&self, type_code: &str) -> bool {
		self.types.iter().any(|t| *t == type_code)
	}
}

pub const INVENTORY_SECTIONS: [SectionDef; 3] = [
	SectionDef {
		label: "Weapons, Armor & Ammo",
		types: &["weapon", "armor", "ammo", "modification"],
	},
	SectionDef {
		label: "Augmentations",
		types: &["bioware", "cyberware"],
	},
	SectionDef {
		label: "Devices & Equipment",
		types: &["device", "equipment"],
	},
];

pub const ACTION_SECTION: SectionDef = SectionDef {
	label: "Actions",
	types: &["action"],
};

const MAGIC_SECTIONS: [SectionDef; 2] = [
	SectionDef {
		label: "Spells & Rituals",
		types: &["spell", "ritual", "call_in_action"],
	},
	SectionDef {
		label: "Powers, Metamagic & Foci",
		types: &["adept_power", "metamagic", "focus", "preparation"],
	},
];

const RESONANCE_SECTIONS: [SectionDef; 2] = [
	SectionDef {
		label: "Complex Forms",
		types: &["complex_form"],
	},
	SectionDef {
		label: "Echoes & Sprite Powers",
		types: &["echo", "sprite_power", "call_in_action"],
	},
];

/// Mutually exclusive entity mode selecting the extra section pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialMode {
	Magic,
	Resonance,
}

impl SpecialMode {
	/// Parses the host's raw special code. Anything else is mundane.
	pub fn from_code(code: &str) -> Option<Self> {
		match code {
			"magic" => Some(Self::Magic),
			"resonance" => Some(Self::Resonance),
			_ => None,
		}
	}

	pub const fn label(self) -> &'static str {
		match self {
			Self::Magic => "Magic",
			Self::Resonance => "Resonance",
		}
	}

	pub const fn sections(self) -> &'static [SectionDef; 2] {
		match self {
			Self::Magic => &MAGIC_SECTIONS,
			Self::Resonance => &RESONANCE_SECTIONS,
		}
	}
}
