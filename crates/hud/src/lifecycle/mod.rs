//! Overlay lifecycle bound to the host selection.
//!
//! Two pieces of process-scoped state live here and nowhere else: the enable
//! flag, set only by [`Hud::toggle`], and the pending timers (selection settle
//! and coalesced refresh), cancelled whenever the engine is disabled.
//!
//! Whether the overlay window exists is never cached. Every decision asks the
//! [`OverlaySurface`](crate::host::OverlaySurface) again, so the window's
//! existence stays a function of `(enabled, has selection)`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use srhud_worker::Debouncer;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, trace};

use crate::aggregate;
use crate::config::HudConfig;
use crate::entity::EntityId;
use crate::error::ConfigError;
use crate::host::HostPorts;
use crate::keybind::KeyChord;
use crate::model::DisplayModel;
use crate::notice::{Notice, keys};
use crate::router::{ActionRouter, DispatchOutcome, Interaction};
use crate::scheduler::{RefreshScheduler, RefreshTarget};

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod tests;

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HudState {
	Disabled,
	EnabledNoSelection,
	EnabledVisible,
}

/// A host notification that an entity changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityChange {
	/// Scalar attributes changed. `data` covers the underlying record, `name`
	/// the display name; edits touching neither are ignored.
	Attributes { entity: EntityId, data: bool, name: bool },
	/// An owned item was added, removed or edited.
	Collection { entity: EntityId },
}

impl EntityChange {
	fn is_relevant(&self) -> bool {
		match self {
			Self::Attributes { data, name, .. } => *data || *name,
			Self::Collection { .. } => true,
		}
	}

	pub fn entity(&self) -> &EntityId {
		match self {
			Self::Attributes { entity, .. } | Self::Collection { entity } => entity,
		}
	}
}

/// Handle to the overlay engine. Cheap to clone; all clones share one engine.
#[derive(Clone)]
pub struct Hud {
	inner: Arc<HudInner>,
}

struct HudInner {
	ports: HostPorts,
	config: HudConfig,
	chord: KeyChord,
	enabled: AtomicBool,
	refresh: RefreshScheduler,
	settle: Debouncer,
	/// Serializes surface decisions so open/close never interleave.
	surface_gate: Mutex<()>,
	state_tx: watch::Sender<HudState>,
	router: ActionRouter,
}

impl Hud {
	/// Builds a disabled engine over the given host.
	pub fn new(ports: HostPorts, config: HudConfig) -> Result<Self, ConfigError> {
		let chord = config.key_chord()?;
		let (state_tx, _) = watch::channel(HudState::Disabled);
		let inner = Arc::new_cyclic(|weak: &Weak<HudInner>| {
			let target: Weak<dyn RefreshTarget> = weak.clone();
			HudInner {
				router: ActionRouter::new(&ports),
				refresh: RefreshScheduler::new(config.refresh_debounce(), target),
				settle: Debouncer::new("selection", config.selection_settle()),
				ports,
				config,
				chord,
				enabled: AtomicBool::new(false),
				surface_gate: Mutex::new(()),
				state_tx,
			}
		});
		Ok(Self { inner })
	}

	/// Current state, derived from the enable flag and the live surface.
	pub fn state(&self) -> HudState {
		self.inner.derive_state()
	}

	pub fn is_enabled(&self) -> bool {
		self.inner.is_enabled()
	}

	/// Receiver notified on every state transition.
	pub fn subscribe_state(&self) -> watch::Receiver<HudState> {
		self.inner.state_tx.subscribe()
	}

	pub fn config(&self) -> &HudConfig {
		&self.inner.config
	}

	/// Chord the host should bind to [`Hud::on_keybinding`].
	pub fn key_chord(&self) -> &KeyChord {
		&self.inner.chord
	}

	pub fn router(&self) -> &ActionRouter {
		&self.inner.router
	}

	/// Flips the enable flag.
	///
	/// Enabling opens the overlay when an entity is selected. Disabling cancels
	/// both timers and closes the overlay if it exists.
	pub async fn toggle(&self) -> HudState {
		let inner = &self.inner;
		let _gate = inner.surface_gate.lock().await;

		let enabled = !inner.enabled.fetch_xor(true, Ordering::AcqRel);
		info!(enabled, "hud.toggle");

		if enabled {
			if let Some(entity) = inner.ports.selection.selected() {
				inner.show(&entity).await;
			}
		} else {
			inner.settle.cancel();
			inner.hide().await;
		}
		inner.publish()
	}

	/// Keybinding entry point: closes an enabled overlay, or opens one when an
	/// entity is selected. Opening with nothing selected only warns.
	pub async fn on_keybinding(&self) -> HudState {
		if !self.is_enabled() && self.inner.ports.selection.selected().is_none() {
			let notice =
				Notice::new(&keys::NO_SELECTION, "Select a target token first.").dismiss_after(self.inner.config.notice_timeout());
			self.inner.ports.notices.notify(notice);
			return self.state();
		}
		self.toggle().await
	}

	/// Host selection changed. Settles for a short delay before reconciling,
	/// so rapid churn produces a single transition.
	pub fn on_selection_changed(&self) {
		if !self.is_enabled() {
			trace!("hud.selection.ignored");
			return;
		}
		let weak = Arc::downgrade(&self.inner);
		let generation = self.inner.settle.schedule(move || async move {
			if let Some(inner) = weak.upgrade() {
				inner.reconcile().await;
			}
		});
		trace!(generation, "hud.selection.changed");
	}

	/// Host entity changed. Relevant changes schedule a coalesced refresh.
	pub fn on_entity_changed(&self, change: &EntityChange) {
		if !self.is_enabled() || !change.is_relevant() {
			return;
		}
		trace!(entity = %change.entity(), "hud.entity.changed");
		self.inner.refresh.notify();
	}

	/// Forwards an overlay interaction to the router.
	pub async fn dispatch(&self, interaction: Interaction) -> DispatchOutcome {
		self.inner.router.handle(interaction).await
	}

	/// Builds the model for the current selection without touching the surface.
	pub async fn current_model(&self) -> Option<DisplayModel> {
		let selected = self.inner.ports.selection.selected();
		aggregate::build(&self.inner.ports, &self.inner.config, selected.as_ref()).await
	}
}

impl HudInner {
	fn is_enabled(&self) -> bool {
		self.enabled.load(Ordering::Acquire)
	}

	fn window_id(&self) -> &str {
		&self.config.window.id
	}

	fn derive_state(&self) -> HudState {
		if !self.is_enabled() {
			HudState::Disabled
		} else if self.ports.surface.is_open(self.window_id()) {
			HudState::EnabledVisible
		} else {
			HudState::EnabledNoSelection
		}
	}

	fn publish(&self) -> HudState {
		let state = self.derive_state();
		self.state_tx.send_if_modified(|current| {
			if *current == state {
				return false;
			}
			debug!(from = ?*current, to = ?state, "hud.state");
			*current = state;
			true
		});
		state
	}

	/// Applies the settled selection. Caller must not hold the surface gate.
	async fn reconcile(&self) {
		let _gate = self.surface_gate.lock().await;
		if !self.is_enabled() {
			return;
		}
		match self.ports.selection.selected() {
			Some(entity) => self.show(&entity).await,
			None => self.hide().await,
		}
		self.publish();
	}

	/// Renders `entity` into the overlay, creating it only if none exists.
	async fn show(&self, entity: &EntityId) {
		let model = aggregate::build(&self.ports, &self.config, Some(entity)).await;
		// The build awaited host I/O; existence is checked after it.
		if self.ports.surface.is_open(self.window_id()) {
			self.ports.surface.render(self.window_id(), model.as_ref()).await;
			debug!(entity = %entity, "hud.overlay.render");
		} else {
			self.ports.surface.open(&self.config.window, model.as_ref()).await;
			info!(entity = %entity, window = self.window_id(), "hud.overlay.open");
		}
	}

	/// Cancels the pending refresh and closes the overlay if it exists.
	async fn hide(&self) {
		self.refresh.cancel();
		if self.ports.surface.is_open(self.window_id()) {
			self.ports.surface.close(self.window_id()).await;
			info!(window = self.window_id(), "hud.overlay.close");
		}
	}
}

#[async_trait]
impl RefreshTarget for HudInner {
	fn is_live(&self) -> bool {
		self.is_enabled() && self.ports.surface.is_open(self.window_id())
	}

	async fn refresh(&self) {
		let _gate = self.surface_gate.lock().await;
		if !self.is_live() {
			debug!("hud.refresh.skipped");
			return;
		}
		let selected = self.ports.selection.selected();
		let model = aggregate::build(&self.ports, &self.config, selected.as_ref()).await;
		if !self.is_live() {
			debug!("hud.refresh.skipped");
			return;
		}
		self.ports.surface.render(self.window_id(), model.as_ref()).await;
		debug!(entity = ?selected, "hud.refresh.render");
	}
}
