//! Default actions merged in from the general-actions catalog.
//!
//! Every entity can take a fixed set of general actions (defense, drain,
//! composure, ...) that live in an external catalog rather than on the entity.
//! [`augment`] appends one row per target after the entity's native actions,
//! whether or not the catalog could be read.

use tracing::{debug, warn};

use crate::error::HudError;
use crate::host::{Catalog, CatalogEntry};
use crate::i18n::{self, Localizer};
use crate::model::{CatalogRef, DisplayItem, ItemSource};


/// Catalog whose index is searched for the default actions.
pub const GENERAL_ACTIONS_INDEX: &str = "shadowrun5e.sr5e-general-actions";
/// Catalog key stored on catalog-sourced rows for later execution.
pub const GENERAL_ACTIONS_KEY: &str = "sr5e-general-actions";
/// Type code given to every catalog row.
pub const ACTION_TYPE: &str = "action";

/// Default actions, in display order before sorting.
pub const GENERAL_ACTION_TARGETS: [&str; 10] = [
	"Armor",
	"Biofeedback Resist",
	"Drain",
	"Fade",
	"Judge Intentions",
	"Lift Carry",
	"Physical Damage Resist",
	"Physical Defense",
	"Memory",
	"Composure",
];

/// Appends the catalog default actions after `base`.
///
/// The index is fetched once per call. An unreadable catalog degrades to an
/// empty index, which still yields one placeholder row per target.
pub async fn augment(
	base: Vec<DisplayItem>,
	catalog: &dyn Catalog,
	i18n: &dyn Localizer,
	placeholder_portrait: &str,
) -> Vec<DisplayItem> {
	let index = match fetch_index(catalog).await {
		Ok(index) => index,
		Err(err) => {
			warn!(error = %err, "hud.catalog.unavailable");
			Vec::new()
		}
	};

	let mut actions = base;
	actions.extend(catalog_rows(&index, i18n, placeholder_portrait));
	actions
}

async fn fetch_index(catalog: &dyn Catalog) -> Result<Vec<CatalogEntry>, HudError> {
	let index = catalog
		.index(GENERAL_ACTIONS_INDEX)
		.await
		.map_err(|source| HudError::CatalogUnavailable {
			catalog: GENERAL_ACTIONS_INDEX.to_string(),
			source,
		})?;
	debug!(entries = index.len(), "hud.catalog.index");
	Ok(index)
}

/// Builds one row per target, in target order.
pub fn catalog_rows(index: &[CatalogEntry], i18n: &dyn Localizer, placeholder_portrait: &str) -> Vec<DisplayItem> {
	let category = i18n::category_label(i18n, ACTION_TYPE);

	GENERAL_ACTION_TARGETS
		.iter()
		.map(|&target| {
			let entry = find_entry(index, target);
			let entry_key = entry.map_or(target, |e| e.name.as_str()).to_string();
			DisplayItem {
				id: entry_key.clone(),
				name: action_label(i18n, target, entry),
				label: category.clone(),
				type_code: ACTION_TYPE.to_string(),
				portrait: entry
					.and_then(|e| e.img.clone())
					.unwrap_or_else(|| placeholder_portrait.to_string()),
				quantity: None,
				source: ItemSource::Catalog(CatalogRef {
					catalog_id: GENERAL_ACTIONS_KEY.to_string(),
					entry_key,
				}),
			}
		})
		.collect()
}

/// Case-insensitive exact name match.
fn find_entry<'a>(index: &'a [CatalogEntry], target: &str) -> Option<&'a CatalogEntry> {
	index.iter().find(|entry| entry.name.to_lowercase() == target.to_lowercase())
}

/// Display label of a target action.
///
/// Tries the localized action keys, then the entry's own label when it
/// differs from its name, then the raw target name.
pub fn action_label(i18n: &dyn Localizer, target: &str, entry: Option<&CatalogEntry>) -> String {
	if let Some(label) = i18n::resolve(i18n, i18n::action_label_keys(target)) {
		return label;
	}
	entry
		.and_then(|e| e.label.as_ref().filter(|label| **label != e.name))
		.cloned()
		.unwrap_or_else(|| target.to_string())
}
