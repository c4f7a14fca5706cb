//! Multi-tier label lookup.
//!
//! Hosts expose a flat key/value localization store. Labels for item types
//! and catalog actions live under several historical key schemes, so lookups
//! try an ordered list of candidate keys and take the first hit.

use heck::ToUpperCamelCase;

mod table;

pub use table::LocaleTable;

#[cfg(test)]
mod tests;

/// The host's label lookup.
pub trait Localizer: Send + Sync {
	fn has(&self, key: &str) -> bool;
	fn get(&self, key: &str) -> String;
}

/// Returns the label of the first candidate key the localizer knows.
pub fn resolve<I, K>(i18n: &dyn Localizer, candidates: I) -> Option<String>
where
	I: IntoIterator<Item = K>,
	K: AsRef<str>,
{
	candidates
		.into_iter()
		.find(|key| i18n.has(key.as_ref()))
		.map(|key| i18n.get(key.as_ref()))
}

const TYPE_KEY_STANDARD: &str = "TYPES.Item.";
const TYPE_KEY_BACKUPS: [&str; 2] = ["SR5.ItemTypes.", "Item."];
const ACTION_KEY_PREFIX: &str = "SR5.Content.Actions.";

/// Candidate keys for an item type code, most specific first.
///
/// Codes containing a separator (`call_in_action`) additionally offer the
/// word-capitalized form (`CallInAction`) under each backup scheme.
pub fn type_label_keys(type_code: &str) -> Vec<String> {
	let mut keys = Vec::with_capacity(5);
	keys.push(format!("{TYPE_KEY_STANDARD}{type_code}"));
	keys.extend(TYPE_KEY_BACKUPS.iter().map(|prefix| format!("{prefix}{type_code}")));

	if type_code.contains(['_', '-', ' ']) {
		let capitalized = type_code.to_upper_camel_case();
		keys.extend(TYPE_KEY_BACKUPS.iter().map(|prefix| format!("{prefix}{capitalized}")));
	}
	keys
}

/// Translated category label of a type code, or the raw code.
pub fn category_label(i18n: &dyn Localizer, type_code: &str) -> String {
	resolve(i18n, type_label_keys(type_code)).unwrap_or_else(|| type_code.to_string())
}

/// Candidate keys for a catalog action name: spaces kept, then stripped.
pub fn action_label_keys(name: &str) -> [String; 2] {
	let compact: String = name.split_whitespace().collect();
	[format!("{ACTION_KEY_PREFIX}{name}"), format!("{ACTION_KEY_PREFIX}{compact}")]
}
