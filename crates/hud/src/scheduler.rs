//! Coalesced refresh of the live overlay.
//!
//! Entity changes arrive in bursts (one edit touches the actor and several of
//! its items). [`RefreshScheduler::notify`] collapses a burst into one refresh
//! run after the window goes quiet. Refreshes are coalesced, never queued.

use std::sync::Weak;
use std::time::Duration;

use async_trait::async_trait;
use srhud_worker::Debouncer;
use tracing::{debug, trace};


/// What a refresh acts on.
#[async_trait]
pub trait RefreshTarget: Send + Sync + 'static {
	/// Whether the overlay exists right now.
	fn is_live(&self) -> bool;

	/// Rebuilds the model for the selection current at call time and pushes it.
	async fn refresh(&self);
}

/// Debounced refresh trigger bound to one target.
#[derive(Debug)]
pub struct RefreshScheduler {
	timer: Debouncer,
	target: Weak<dyn RefreshTarget>,
}

impl RefreshScheduler {
	pub fn new(window: Duration, target: Weak<dyn RefreshTarget>) -> Self {
		Self {
			timer: Debouncer::new("refresh", window),
			target,
		}
	}

	/// Cancels any pending refresh and schedules a new one a full window from now.
	///
	/// Liveness is checked when the timer fires, not here: the overlay may
	/// close during the window.
	pub fn notify(&self) {
		let target = self.target.clone();
		let generation = self.timer.schedule(move || async move {
			let Some(target) = target.upgrade() else {
				return;
			};
			if !target.is_live() {
				debug!("hud.refresh.skipped");
				return;
			}
			target.refresh().await;
		});
		trace!(generation, "hud.refresh.notify");
	}

	/// Drops the pending refresh, if any.
	pub fn cancel(&self) -> bool {
		self.timer.cancel()
	}

	pub fn is_pending(&self) -> bool {
		self.timer.is_pending()
	}

	pub fn window(&self) -> Duration {
		self.timer.window()
	}
}
