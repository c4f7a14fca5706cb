//! Routing of overlay interactions to host execution strategies.
//!
//! A row click is resolved through a fixed priority list, first match wins:
//! catalog action, cast, roll, post card, then nothing. Native rows carry only
//! the item id; the live item is looked up again at click time so the
//! capability invoked is the one the item has now.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, error};

use crate::entity::EntityId;
use crate::error::{HostError, HudError};
use crate::host::{ActionRunner, Catalog, HostPorts, Notifier, PHYSICAL_RESIST, SelectionSource};
use crate::model::{CatalogRef, DisplayItem, ItemCapability};
use crate::notice::{Notice, keys};


/// What a clicked row identifies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
	pub item_id: String,
	/// Set for catalog-sourced rows.
	pub catalog: Option<CatalogRef>,
}

impl From<&DisplayItem> for ItemDescriptor {
	fn from(item: &DisplayItem) -> Self {
		Self {
			item_id: item.id.clone(),
			catalog: item.catalog_ref().cloned(),
		}
	}
}

/// A user interaction captured by the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
	/// The roll control of an item or action row.
	ItemRoll(ItemDescriptor),
	/// The name of an owned item.
	ItemSheet { item_id: String },
	SkillRoll { skill_id: String },
	/// The portrait: toggles the entity sheet.
	Portrait,
	/// The armor badge: runs the defense test, bypassing row routing.
	DefenseShortcut,
}

/// Which strategy handled an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
	/// Nothing selected; nothing done.
	NoSelection,
	/// A catalog action was found and executed.
	CatalogAction,
	/// The catalog had no such action; the user was warned.
	ActionNotFound,
	/// An item capability was invoked.
	Invoked(ItemCapability),
	/// The row's item no longer exists on the entity.
	ItemMissing,
	/// The item exposes nothing to invoke; the user was told.
	Unsupported,
	/// A non-row interaction completed.
	Performed,
	/// The host failed; logged, not surfaced.
	Failed,
}

pub struct ActionRouter {
	selection: Arc<dyn SelectionSource>,
	catalog: Arc<dyn Catalog>,
	actions: Arc<dyn ActionRunner>,
	notices: Arc<dyn Notifier>,
}

impl ActionRouter {
	pub fn new(ports: &HostPorts) -> Self {
		Self {
			selection: Arc::clone(&ports.selection),
			catalog: Arc::clone(&ports.catalog),
			actions: Arc::clone(&ports.actions),
			notices: Arc::clone(&ports.notices),
		}
	}

	/// Handles any overlay interaction.
	pub async fn handle(&self, interaction: Interaction) -> DispatchOutcome {
		let result = match &interaction {
			Interaction::ItemRoll(item) => return self.dispatch(item).await,
			Interaction::DefenseShortcut => return self.defense_shortcut().await,
			Interaction::ItemSheet { item_id } => self.on_selected(|actions, entity| async move { actions.open_item_sheet(&entity, item_id).await }).await,
			Interaction::SkillRoll { skill_id } => self.on_selected(|actions, entity| async move { actions.roll_skill(&entity, skill_id).await }).await,
			Interaction::Portrait => self.on_selected(|actions, entity| async move { actions.toggle_sheet(&entity).await }).await,
		};
		self.settle(result.map(|()| DispatchOutcome::Performed), &interaction)
	}

	/// Routes a row click to exactly one strategy.
	pub async fn dispatch(&self, item: &ItemDescriptor) -> DispatchOutcome {
		let result = self.try_dispatch(item).await;
		self.settle(result, item)
	}

	/// Runs the fixed defense test against the selected entity, or the user's
	/// own character when nothing is selected.
	pub async fn defense_shortcut(&self) -> DispatchOutcome {
		let result = self.try_defense().await;
		self.settle(result, &Interaction::DefenseShortcut)
	}

	async fn try_defense(&self) -> Result<DispatchOutcome, HudError> {
		let entity = self
			.selection
			.selected()
			.or_else(|| self.selection.owned_character())
			.ok_or(HudError::NoSelection)?;
		self.actions.run_test(&entity, &PHYSICAL_RESIST).await.map_err(HudError::Execution)?;
		debug!(entity = %entity, test = PHYSICAL_RESIST.test, "hud.dispatch.defense");
		Ok(DispatchOutcome::Performed)
	}

	async fn try_dispatch(&self, item: &ItemDescriptor) -> Result<DispatchOutcome, HudError> {
		let entity = self.selection.selected().ok_or(HudError::NoSelection)?;

		if let Some(reference) = &item.catalog {
			return self.run_catalog_action(reference, &entity).await;
		}

		let snapshot = self.selection.entity(&entity).await.map_err(HudError::InvalidEntity)?;
		let Some(record) = snapshot.item(&item.item_id) else {
			debug!(entity = %entity, item = %item.item_id, "hud.dispatch.item_missing");
			return Ok(DispatchOutcome::ItemMissing);
		};
		let Some(capability) = record.capabilities.primary() else {
			return Err(HudError::UnsupportedItem {
				item: record.name.clone(),
			});
		};

		self.actions
			.invoke_item(&entity, &record.id, capability)
			.await
			.map_err(HudError::Execution)?;
		debug!(entity = %entity, item = %record.id, capability = capability.as_str(), "hud.dispatch.item");
		Ok(DispatchOutcome::Invoked(capability))
	}

	async fn run_catalog_action(&self, reference: &CatalogRef, entity: &EntityId) -> Result<DispatchOutcome, HudError> {
		let action = self
			.catalog
			.find_named_action(&reference.catalog_id, &reference.entry_key, entity)
			.await
			.map_err(|source| HudError::CatalogUnavailable {
				catalog: reference.catalog_id.clone(),
				source,
			})?
			.ok_or_else(|| HudError::ActionNotFound {
				catalog: reference.catalog_id.clone(),
				action: reference.entry_key.clone(),
			})?;
		action.execute().await.map_err(HudError::Execution)?;
		debug!(entity = %entity, action = %reference.entry_key, "hud.dispatch.catalog");
		Ok(DispatchOutcome::CatalogAction)
	}

	async fn on_selected<'a, F, Fut>(&'a self, f: F) -> Result<(), HudError>
	where
		F: FnOnce(&'a dyn ActionRunner, EntityId) -> Fut,
		Fut: Future<Output = Result<(), HostError>> + 'a,
	{
		let entity = self.selection.selected().ok_or(HudError::NoSelection)?;
		f(self.actions.as_ref(), entity).await.map_err(HudError::Execution)
	}

	/// Turns a routing error into its user-facing effect.
	fn settle(&self, result: Result<DispatchOutcome, HudError>, subject: &dyn std::fmt::Debug) -> DispatchOutcome {
		match result {
			Ok(outcome) => outcome,
			Err(HudError::NoSelection) => {
				debug!(?subject, "hud.dispatch.no_selection");
				DispatchOutcome::NoSelection
			}
			Err(err @ HudError::ActionNotFound { .. }) => {
				self.notices.notify(Notice::new(&keys::ACTION_NOT_FOUND, capitalize(&err.to_string())));
				DispatchOutcome::ActionNotFound
			}
			Err(err @ HudError::UnsupportedItem { .. }) => {
				self.notices.notify(Notice::new(&keys::UNSUPPORTED_ITEM, capitalize(&err.to_string())));
				DispatchOutcome::Unsupported
			}
			Err(err) => {
				error!(?subject, error = %err, "hud.dispatch.failed");
				DispatchOutcome::Failed
			}
		}
	}
}

fn capitalize(message: &str) -> String {
	let mut chars = message.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
