//! In-memory host implementing every capability, for tests and replays.
//!
//! Calls that would reach the host's rule engine or window system are
//! recorded as [`HostCall`]s instead.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::config::WindowSpec;
use crate::entity::{ActorData, EntityId, EntitySnapshot, ItemCaps, ItemRecord};
use crate::error::HostError;
use crate::host::{ActionRunner, Catalog, CatalogEntry, DefenseTest, Executable, HostPorts, Notifier, OverlaySurface, SelectionSource};
use crate::i18n::{LocaleTable, Localizer};
use crate::model::{DisplayModel, ItemCapability};
use crate::notice::Notice;

/// A character with a default data record and no items.
pub fn character(id: &str, name: &str) -> EntitySnapshot {
	EntitySnapshot {
		id: EntityId::from(id),
		name: name.to_string(),
		portrait: None,
		data: Some(ActorData::default()),
		items: Vec::new(),
	}
}

pub fn item(id: &str, name: &str, type_code: &str, capabilities: ItemCaps) -> ItemRecord {
	ItemRecord {
		id: id.to_string(),
		name: name.to_string(),
		type_code: type_code.to_string(),
		img: None,
		quantity: None,
		capabilities,
	}
}

/// One recorded host side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
	Open { id: String },
	Render { id: String },
	Close { id: String },
	IndexFetch { catalog: String },
	CatalogAction { catalog: String, action: String, entity: EntityId },
	InvokeItem { entity: EntityId, item: String, capability: ItemCapability },
	RunTest { entity: EntityId, test: &'static str },
	RollSkill { entity: EntityId, skill: String },
	ToggleSheet { entity: EntityId },
	OpenItemSheet { entity: EntityId, item: String },
}

pub struct MemoryHost {
	selected: Mutex<Option<EntityId>>,
	owned: Mutex<Option<EntityId>>,
	entities: Mutex<HashMap<EntityId, EntitySnapshot>>,
	locale: Mutex<LocaleTable>,
	catalog: Mutex<Option<Vec<CatalogEntry>>>,
	catalog_actions: Mutex<Vec<String>>,
	windows: Mutex<HashMap<String, Option<DisplayModel>>>,
	calls: Arc<Mutex<Vec<HostCall>>>,
	notices: Mutex<Vec<Notice>>,
}

impl Default for MemoryHost {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryHost {
	/// Empty host: nothing selected, empty but readable catalog.
	pub fn new() -> Self {
		Self {
			selected: Mutex::new(None),
			owned: Mutex::new(None),
			entities: Mutex::new(HashMap::new()),
			locale: Mutex::new(LocaleTable::new()),
			catalog: Mutex::new(Some(Vec::new())),
			catalog_actions: Mutex::new(Vec::new()),
			windows: Mutex::new(HashMap::new()),
			calls: Arc::new(Mutex::new(Vec::new())),
			notices: Mutex::new(Vec::new()),
		}
	}

	pub fn ports(self: &Arc<Self>) -> HostPorts {
		HostPorts::from_host(Arc::clone(self))
	}

	pub fn select(&self, id: Option<&str>) {
		*self.selected.lock() = id.map(EntityId::from);
	}

	pub fn set_owned_character(&self, id: Option<&str>) {
		*self.owned.lock() = id.map(EntityId::from);
	}

	/// Adds or replaces an entity.
	pub fn insert_entity(&self, snapshot: EntitySnapshot) {
		self.entities.lock().insert(snapshot.id.clone(), snapshot);
	}

	/// Applies an in-place edit to a stored entity.
	pub fn update_entity(&self, id: &str, edit: impl FnOnce(&mut EntitySnapshot)) {
		if let Some(snapshot) = self.entities.lock().get_mut(&EntityId::from(id)) {
			edit(snapshot);
		}
	}

	pub fn set_locale(&self, locale: LocaleTable) {
		*self.locale.lock() = locale;
	}

	/// `None` makes the catalog unavailable.
	pub fn set_catalog(&self, index: Option<Vec<CatalogEntry>>) {
		*self.catalog.lock() = index;
	}

	/// Makes a named catalog action executable.
	pub fn add_catalog_action(&self, name: &str) {
		self.catalog_actions.lock().push(name.to_string());
	}

	pub fn calls(&self) -> Vec<HostCall> {
		self.calls.lock().clone()
	}

	pub fn clear_calls(&self) {
		self.calls.lock().clear();
	}

	/// Number of recorded calls matching a predicate.
	pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
		self.calls.lock().iter().filter(|call| pred(call)).count()
	}

	pub fn notices(&self) -> Vec<Notice> {
		self.notices.lock().clone()
	}

	pub fn open_windows(&self) -> usize {
		self.windows.lock().len()
	}

	/// Last model rendered into a window; `None` when the window is closed.
	pub fn window_model(&self, id: &str) -> Option<Option<DisplayModel>> {
		self.windows.lock().get(id).cloned()
	}

	fn record(&self, call: HostCall) {
		self.calls.lock().push(call);
	}
}

#[async_trait]
impl SelectionSource for MemoryHost {
	fn selected(&self) -> Option<EntityId> {
		self.selected.lock().clone()
	}

	fn owned_character(&self) -> Option<EntityId> {
		self.owned.lock().clone()
	}

	async fn entity(&self, id: &EntityId) -> Result<EntitySnapshot, HostError> {
		self.entities
			.lock()
			.get(id)
			.cloned()
			.ok_or_else(|| HostError::NotFound(id.to_string()))
	}
}

impl Localizer for MemoryHost {
	fn has(&self, key: &str) -> bool {
		self.locale.lock().has(key)
	}

	fn get(&self, key: &str) -> String {
		self.locale.lock().get(key)
	}
}

struct RecordedAction {
	calls: Arc<Mutex<Vec<HostCall>>>,
	catalog: String,
	action: String,
	entity: EntityId,
}

#[async_trait]
impl Executable for RecordedAction {
	async fn execute(self: Box<Self>) -> Result<(), HostError> {
		let Self {
			calls,
			catalog,
			action,
			entity,
		} = *self;
		calls.lock().push(HostCall::CatalogAction { catalog, action, entity });
		Ok(())
	}
}

#[async_trait]
impl Catalog for MemoryHost {
	async fn index(&self, catalog: &str) -> Result<Vec<CatalogEntry>, HostError> {
		self.record(HostCall::IndexFetch {
			catalog: catalog.to_string(),
		});
		self.catalog
			.lock()
			.clone()
			.ok_or_else(|| HostError::Unavailable(catalog.to_string()))
	}

	async fn find_named_action(
		&self,
		catalog: &str,
		action: &str,
		entity: &EntityId,
	) -> Result<Option<Box<dyn Executable>>, HostError> {
		if self.catalog.lock().is_none() {
			return Err(HostError::Unavailable(catalog.to_string()));
		}
		let known = self.catalog_actions.lock().iter().any(|name| name.eq_ignore_ascii_case(action));
		if !known {
			return Ok(None);
		}
		Ok(Some(Box::new(RecordedAction {
			calls: Arc::clone(&self.calls),
			catalog: catalog.to_string(),
			action: action.to_string(),
			entity: entity.clone(),
		})))
	}
}

#[async_trait]
impl ActionRunner for MemoryHost {
	async fn invoke_item(&self, entity: &EntityId, item: &str, capability: ItemCapability) -> Result<(), HostError> {
		self.record(HostCall::InvokeItem {
			entity: entity.clone(),
			item: item.to_string(),
			capability,
		});
		Ok(())
	}

	async fn run_test(&self, entity: &EntityId, test: &DefenseTest) -> Result<(), HostError> {
		self.record(HostCall::RunTest {
			entity: entity.clone(),
			test: test.test,
		});
		Ok(())
	}

	async fn roll_skill(&self, entity: &EntityId, skill: &str) -> Result<(), HostError> {
		self.record(HostCall::RollSkill {
			entity: entity.clone(),
			skill: skill.to_string(),
		});
		Ok(())
	}

	async fn toggle_sheet(&self, entity: &EntityId) -> Result<(), HostError> {
		self.record(HostCall::ToggleSheet { entity: entity.clone() });
		Ok(())
	}

	async fn open_item_sheet(&self, entity: &EntityId, item: &str) -> Result<(), HostError> {
		if self.entity(entity).await?.item(item).is_none() {
			return Err(HostError::NotFound(item.to_string()));
		}
		self.record(HostCall::OpenItemSheet {
			entity: entity.clone(),
			item: item.to_string(),
		});
		Ok(())
	}
}

#[async_trait]
impl OverlaySurface for MemoryHost {
	fn is_open(&self, id: &str) -> bool {
		self.windows.lock().contains_key(id)
	}

	async fn open(&self, spec: &WindowSpec, model: Option<&DisplayModel>) {
		self.windows.lock().insert(spec.id.clone(), model.cloned());
		self.record(HostCall::Open { id: spec.id.clone() });
	}

	async fn render(&self, id: &str, model: Option<&DisplayModel>) {
		if let Some(slot) = self.windows.lock().get_mut(id) {
			*slot = model.cloned();
		}
		self.record(HostCall::Render { id: id.to_string() });
	}

	async fn close(&self, id: &str) {
		self.windows.lock().remove(id);
		self.record(HostCall::Close { id: id.to_string() });
	}
}

impl Notifier for MemoryHost {
	fn notify(&self, notice: Notice) {
		self.notices.lock().push(notice);
	}
}
