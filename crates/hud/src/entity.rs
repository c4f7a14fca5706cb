//! Source entity records as reported by the host.
//!
//! These mirror the host's actor data loosely: every numeric leaf defaults to
//! zero and every sub-record is optional, so partially populated entities
//! deserialize instead of failing.

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::model::ItemCapability;

/// Stable identity of a selectable entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for EntityId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for EntityId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

/// Point-in-time view of an entity and its owned items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
	pub id: EntityId,
	/// Display name of the placed entity.
	pub name: String,
	#[serde(default)]
	pub portrait: Option<String>,
	/// The underlying data record. Entities without one have nothing to show.
	#[serde(default)]
	pub data: Option<ActorData>,
	#[serde(default)]
	pub items: Vec<ItemRecord>,
}

impl EntitySnapshot {
	/// Looks up an owned item by id.
	pub fn item(&self, id: &str) -> Option<&ItemRecord> {
		self.items.iter().find(|item| item.id == id)
	}
}

/// Inline attribute record of an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorData {
	pub armor: Armor,
	pub track: Tracks,
	/// Raw special-mode code (`magic`, `resonance`, `mundane`, ...).
	pub special: Option<String>,
	pub skills: Option<SkillGroups>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Armor {
	pub value: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tracks {
	pub physical: TrackValue,
	pub stun: TrackValue,
}

/// One condition monitor: current damage against its base capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackValue {
	pub value: i64,
	pub base: i64,
}

/// Skill collections keyed by skill id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroups {
	pub active: BTreeMap<String, Skill>,
	pub knowledge: BTreeMap<String, Skill>,
	pub language: BTreeMap<String, Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
	/// Localization key of the skill name.
	pub label: Option<String>,
	/// Free-form name for user-defined skills.
	pub name: Option<String>,
	pub value: i64,
	/// Resolved label, filled in by aggregation for active skills.
	#[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
}

bitflags! {
	/// Execution capabilities an item exposes to the router.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
	#[serde(transparent)]
	pub struct ItemCaps: u8 {
		/// Can be cast or executed as an action.
		const CAST_ACTION = 1 << 0;
		/// Has a generic roll.
		const ROLL = 1 << 1;
		/// Can post a summary card.
		const POST_CARD = 1 << 2;
	}
}

impl Default for ItemCaps {
	fn default() -> Self {
		Self::empty()
	}
}

impl ItemCaps {
	/// Highest-priority capability: cast, then roll, then post.
	pub fn primary(self) -> Option<ItemCapability> {
		if self.contains(Self::CAST_ACTION) {
			Some(ItemCapability::CastAction)
		} else if self.contains(Self::ROLL) {
			Some(ItemCapability::Roll)
		} else if self.contains(Self::POST_CARD) {
			Some(ItemCapability::PostCard)
		} else {
			None
		}
	}
}

/// An item owned by an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub type_code: String,
	#[serde(default)]
	pub img: Option<String>,
	#[serde(default)]
	pub quantity: Option<i64>,
	#[serde(default)]
	pub capabilities: ItemCaps,
}
