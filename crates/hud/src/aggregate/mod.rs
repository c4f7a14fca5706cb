//! Display-model aggregation.
//!
//! [`build`] resolves an entity reference through the host and hands the
//! snapshot to [`assemble`], which is pure: it copies scalar attributes with
//! defaults, localizes skills and item categories, partitions items into the
//! fixed sections and sorts every section. Nothing here mutates host state.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::catalog;
use crate::config::HudConfig;
use crate::entity::{ActorData, EntityId, EntitySnapshot, ItemRecord, SkillGroups};
use crate::error::HudError;
use crate::host::HostPorts;
use crate::i18n::{self, Localizer};
use crate::model::{DisplayItem, DisplayModel, ItemSource, Sections};

mod sections;
mod sort;

pub use sections::{ACTION_SECTION, INVENTORY_SECTIONS, SectionDef, SpecialMode};
pub use sort::{collate, compare_rows, sort_section};


/// Builds the display model of `entity`.
///
/// Returns `None` when nothing is selected, when the reference no longer
/// resolves, or when the entity has no data record.
pub async fn build(ports: &HostPorts, config: &HudConfig, entity: Option<&EntityId>) -> Option<DisplayModel> {
	let id = entity?;
	let snapshot = match resolve_entity(ports, id).await {
		Ok(snapshot) => snapshot,
		Err(err) => {
			warn!(entity = %id, error = %err, "hud.aggregate.invalid_entity");
			return None;
		}
	};
	let Some(data) = snapshot.data.as_ref() else {
		debug!(entity = %id, "hud.aggregate.no_data");
		return None;
	};

	let native_actions = translate_items(&snapshot.items, &ACTION_SECTION, ports.i18n.as_ref(), config);
	let actions = catalog::augment(
		native_actions,
		ports.catalog.as_ref(),
		ports.i18n.as_ref(),
		&config.catalog_placeholder_portrait,
	)
	.await;

	let model = assemble(&snapshot, data, actions, ports.i18n.as_ref(), config);
	debug!(
		entity = %id,
		inventory = model.inventory.values().map(Vec::len).sum::<usize>(),
		actions = model.actions.len(),
		special = model.special_sections.is_some(),
		"hud.aggregate.built"
	);
	Some(model)
}

async fn resolve_entity(ports: &HostPorts, id: &EntityId) -> Result<EntitySnapshot, HudError> {
	ports.selection.entity(id).await.map_err(HudError::InvalidEntity)
}

/// Assembles a model from a snapshot and its already augmented action rows.
pub fn assemble(
	snapshot: &EntitySnapshot,
	data: &ActorData,
	mut actions: Vec<DisplayItem>,
	i18n: &dyn Localizer,
	config: &HudConfig,
) -> DisplayModel {
	let section = |def: &SectionDef| {
		let mut rows = translate_items(&snapshot.items, def, i18n, config);
		sort_section(&mut rows);
		(def.label.to_string(), rows)
	};

	let inventory: Sections = INVENTORY_SECTIONS.iter().map(section).collect();
	sort_section(&mut actions);

	let special = data.special.as_deref().and_then(SpecialMode::from_code);
	let special_sections = special.map(|mode| mode.sections().iter().map(section).collect::<IndexMap<_, _>>());

	DisplayModel {
		name: snapshot.name.clone(),
		portrait: snapshot
			.portrait
			.clone()
			.unwrap_or_else(|| config.placeholder_portrait.clone()),
		armor_value: data.armor.value,
		track: data.track,
		special_label: special.map(|mode| mode.label().to_string()),
		skills: localize_skills(data.skills.as_ref(), i18n),
		inventory,
		actions,
		special_sections,
	}
}

/// Copies skills and attaches a display name to every active skill.
///
/// The source record is never touched; the copy is what the model owns.
pub fn localize_skills(skills: Option<&SkillGroups>, i18n: &dyn Localizer) -> SkillGroups {
	let Some(skills) = skills else {
		return SkillGroups::default();
	};
	let mut copy = skills.clone();
	for (key, skill) in &mut copy.active {
		let resolved = skill.label.as_deref().and_then(|label| i18n::resolve(i18n, [label]));
		skill.display_name = Some(resolved.unwrap_or_else(|| key.clone()));
	}
	copy
}

/// Rows for every item whose type belongs to `def`, in item order.
pub fn translate_items(items: &[ItemRecord], def: &SectionDef, i18n: &dyn Localizer, config: &HudConfig) -> Vec<DisplayItem> {
	items
		.iter()
		.filter(|item| def.contains(&item.type_code))
		.map(|item| display_item(item, i18n, config))
		.collect()
}

fn display_item(item: &ItemRecord, i18n: &dyn Localizer, config: &HudConfig) -> DisplayItem {
	DisplayItem {
		id: item.id.clone(),
		name: item.name.clone(),
		label: i18n::category_label(i18n, &item.type_code),
		type_code: item.type_code.clone(),
		portrait: item.img.clone().unwrap_or_else(|| config.placeholder_portrait.clone()),
		quantity: item.quantity,
		source: ItemSource::Native {
			capability: item.capabilities.primary(),
		},
	}
}
