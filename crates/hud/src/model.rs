//! Display model produced by one aggregation pass.
//!
//! A [`DisplayModel`] is rebuilt from source state on every pass and never
//! mutated afterwards. Rows reference their source item by id instead of
//! cloning it, so the router can resolve the live item before invoking it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::{SkillGroups, Tracks};

/// Named, ordered sections of rows.
pub type Sections = IndexMap<String, Vec<DisplayItem>>;

/// Render-ready snapshot of one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayModel {
	pub name: String,
	pub portrait: String,
	pub armor_value: i64,
	pub track: Tracks,
	/// Label of the special-mode button; absent for mundane entities.
	pub special_label: Option<String>,
	pub skills: SkillGroups,
	pub inventory: Sections,
	/// Native actions followed by catalog defaults, sorted.
	pub actions: Vec<DisplayItem>,
	/// Present only when the entity declares a special mode. Its presence is
	/// what shows the special-mode button, so an empty map is not equivalent.
	pub special_sections: Option<Sections>,
}

/// Executable capability resolved for a native item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCapability {
	CastAction,
	Roll,
	PostCard,
}

impl ItemCapability {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::CastAction => "cast_action",
			Self::Roll => "roll",
			Self::PostCard => "post_card",
		}
	}
}

/// Location of a catalog-sourced action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogRef {
	pub catalog_id: String,
	pub entry_key: String,
}

/// Where a row came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemSource {
	/// An item owned by the entity; `capability` is what the row would invoke.
	Native { capability: Option<ItemCapability> },
	/// A default action from the external catalog.
	Catalog(CatalogRef),
}

/// One row in a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
	/// Source item id, or the catalog entry key for catalog rows.
	pub id: String,
	pub name: String,
	/// Translated category label.
	pub label: String,
	pub type_code: String,
	pub portrait: String,
	pub quantity: Option<i64>,
	pub source: ItemSource,
}

impl DisplayItem {
	pub fn is_catalog_sourced(&self) -> bool {
		matches!(self.source, ItemSource::Catalog(_))
	}

	pub fn catalog_ref(&self) -> Option<&CatalogRef> {
		match &self.source {
			ItemSource::Catalog(reference) => Some(reference),
			ItemSource::Native { .. } => None,
		}
	}
}
