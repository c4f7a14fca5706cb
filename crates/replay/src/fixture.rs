//! Recorded host state loaded from JSON.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use srhud::EntitySnapshot;
use srhud::host::CatalogEntry;
use srhud::i18n::LocaleTable;
use srhud::testing::MemoryHost;


/// One selected entity plus the host context it is rendered in.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
	pub entity: EntitySnapshot,
	/// Nested locale object, flattened to dotted keys.
	#[serde(default)]
	pub locale: Value,
	/// General-actions catalog index; absent means the catalog is unreadable.
	#[serde(default)]
	pub catalog: Option<Vec<CatalogEntry>>,
	/// Catalog action names that can be executed.
	#[serde(default)]
	pub catalog_actions: Vec<String>,
}

impl Fixture {
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let text = std::fs::read_to_string(path).with_context(|| format!("reading fixture {}", path.display()))?;
		Self::parse(&text).with_context(|| format!("parsing fixture {}", path.display()))
	}

	pub fn parse(text: &str) -> anyhow::Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Builds a host with the fixture entity selected.
	pub fn into_host(self) -> Arc<MemoryHost> {
		let host = Arc::new(MemoryHost::new());
		host.set_locale(LocaleTable::from_value(&self.locale));
		host.set_catalog(self.catalog);
		for name in &self.catalog_actions {
			host.add_catalog_action(name);
		}
		host.select(Some(self.entity.id.as_str()));
		host.insert_entity(self.entity);
		host
	}
}
