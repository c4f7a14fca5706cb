//! Capabilities the engine consumes from the host application.
//!
//! Each trait is a thin seam over one host subsystem. The engine never holds
//! host state across an await point; liveness questions such as "is the
//! overlay open" are asked again at the point of use.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::WindowSpec;
use crate::entity::{EntityId, EntitySnapshot};
use crate::error::HostError;
use crate::i18n::Localizer;
use crate::model::{DisplayModel, ItemCapability};
use crate::notice::Notice;

/// The host's notion of "currently selected entity".
#[async_trait]
pub trait SelectionSource: Send + Sync {
	/// The current primary selection, if any.
	fn selected(&self) -> Option<EntityId>;

	/// The user's own character, used by shortcuts when nothing is selected.
	fn owned_character(&self) -> Option<EntityId> {
		None
	}

	/// Resolves an entity reference to its current state.
	async fn entity(&self, id: &EntityId) -> Result<EntitySnapshot, HostError>;
}

/// One entry of a catalog index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
	pub name: String,
	#[serde(default)]
	pub label: Option<String>,
	#[serde(default)]
	pub img: Option<String>,
}

/// A prepared host test or action, ready to run.
#[async_trait]
pub trait Executable: Send {
	async fn execute(self: Box<Self>) -> Result<(), HostError>;
}

/// Read-only external catalog of named entries.
#[async_trait]
pub trait Catalog: Send + Sync {
	/// Fetches the index of a catalog.
	async fn index(&self, catalog: &str) -> Result<Vec<CatalogEntry>, HostError>;

	/// Prepares the named action of a catalog against an entity.
	///
	/// `Ok(None)` means the catalog has no such action.
	async fn find_named_action(
		&self,
		catalog: &str,
		action: &str,
		entity: &EntityId,
	) -> Result<Option<Box<dyn Executable>>, HostError>;
}

/// Fixed parameters of the defense shortcut test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefenseTest {
	pub test: &'static str,
	pub armor: bool,
	pub attribute: &'static str,
}

/// Physical damage resistance: body plus armor.
pub const PHYSICAL_RESIST: DefenseTest = DefenseTest {
	test: "PhysicalResistTest",
	armor: true,
	attribute: "body",
};

/// Rule-engine entry points the router can reach.
#[async_trait]
pub trait ActionRunner: Send + Sync {
	/// Invokes one capability of an owned item.
	async fn invoke_item(&self, entity: &EntityId, item: &str, capability: ItemCapability) -> Result<(), HostError>;

	/// Runs a fixed test directly against an entity.
	async fn run_test(&self, entity: &EntityId, test: &DefenseTest) -> Result<(), HostError>;

	async fn roll_skill(&self, entity: &EntityId, skill: &str) -> Result<(), HostError>;

	/// Opens the entity sheet, or closes it when already open.
	async fn toggle_sheet(&self, entity: &EntityId) -> Result<(), HostError>;

	async fn open_item_sheet(&self, entity: &EntityId, item: &str) -> Result<(), HostError>;
}

/// Window management for the single overlay window.
#[async_trait]
pub trait OverlaySurface: Send + Sync {
	/// Whether a window with this id currently exists.
	fn is_open(&self, id: &str) -> bool;

	/// Creates the window and renders its first model.
	async fn open(&self, spec: &WindowSpec, model: Option<&DisplayModel>);

	/// Re-renders an existing window.
	async fn render(&self, id: &str, model: Option<&DisplayModel>);

	async fn close(&self, id: &str);
}

/// Non-fatal, user-visible notices.
pub trait Notifier: Send + Sync {
	fn notify(&self, notice: Notice);
}

/// Bundle of host capabilities shared by engine components.
#[derive(Clone)]
pub struct HostPorts {
	pub selection: Arc<dyn SelectionSource>,
	pub i18n: Arc<dyn Localizer>,
	pub catalog: Arc<dyn Catalog>,
	pub actions: Arc<dyn ActionRunner>,
	pub surface: Arc<dyn OverlaySurface>,
	pub notices: Arc<dyn Notifier>,
}

impl HostPorts {
	/// Builds ports from one host object implementing every capability.
	pub fn from_host<H>(host: Arc<H>) -> Self
	where
		H: SelectionSource + Localizer + Catalog + ActionRunner + OverlaySurface + Notifier + 'static,
	{
		Self {
			selection: host.clone(),
			i18n: host.clone(),
			catalog: host.clone(),
			actions: host.clone(),
			surface: host.clone(),
			notices: host,
		}
	}
}
