use std::collections::HashMap;

use serde_json::Value;

use super::Localizer;

/// In-memory localization table keyed by dotted path.
///
/// Language files are nested JSON objects; loading flattens them so
/// `{"SR5": {"ItemTypes": {"weapon": "Weapon"}}}` answers `SR5.ItemTypes.weapon`.
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
	entries: HashMap<String, String>,
}

impl LocaleTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a nested JSON language file.
	pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
		let value: Value = serde_json::from_str(input)?;
		Ok(Self::from_value(&value))
	}

	/// Flattens an already parsed language value. Non-string leaves are skipped.
	pub fn from_value(value: &Value) -> Self {
		let mut table = Self::new();
		flatten_into(&mut table.entries, String::new(), value);
		table
	}

	pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
		self.entries.insert(key.into(), label.into());
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

fn flatten_into(out: &mut HashMap<String, String>, prefix: String, value: &Value) {
	match value {
		Value::Object(map) => {
			for (key, child) in map {
				let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
				flatten_into(out, path, child);
			}
		}
		Value::String(label) if !prefix.is_empty() => {
			out.insert(prefix, label.clone());
		}
		_ => {}
	}
}

impl Localizer for LocaleTable {
	fn has(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Unknown keys come back verbatim, matching host behaviour.
	fn get(&self, key: &str) -> String {
		self.entries.get(key).cloned().unwrap_or_else(|| key.to_string())
	}
}

impl<K, V> FromIterator<(K, V)> for LocaleTable
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self {
			entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}
