use std::time::Duration;

use crate::entity::EntityId;
use crate::host::OverlaySurface;
use crate::lifecycle::tests::{WINDOW, opens, renders, settle, setup};
use crate::lifecycle::{EntityChange, HudState};

/// Must never hold more than one overlay window.
///
/// - Enforced in: `HudInner::show`, `HudInner` surface gate
/// - Failure symptom: A second HUD window stacks over the first and only one
///   of them ever refreshes.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_single_overlay_instance() {
	let (host, hud) = setup();
	host.select(Some("sam"));

	let (first, _) = tokio::join!(hud.toggle(), async {
		hud.on_selection_changed();
	});
	assert_eq!(first, HudState::EnabledVisible);

	for id in ["decker", "sam"] {
		host.select(Some(id));
		hud.on_selection_changed();
		settle().await;
		hud.on_entity_changed(&EntityChange::Collection {
			entity: EntityId::from(id),
		});
	}
	tokio::time::sleep(Duration::from_millis(200)).await;

	assert_eq!(opens(&host), 1);
	assert_eq!(host.open_windows(), 1);
}

/// Must not create the overlay while the engine is disabled.
///
/// - Enforced in: `HudInner::reconcile`, `Hud::toggle`
/// - Failure symptom: A selection settle armed just before disabling reopens
///   the HUD the user just turned off.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_no_overlay_while_disabled() {
	let (host, hud) = setup();
	hud.toggle().await;

	host.select(Some("sam"));
	hud.on_selection_changed();
	hud.toggle().await;
	tokio::time::sleep(Duration::from_millis(200)).await;

	assert_eq!(hud.state(), HudState::Disabled);
	assert_eq!(opens(&host), 0);
}

/// Must cancel pending refresh and settle timers on disable.
///
/// - Enforced in: `Hud::toggle`, `HudInner::hide`
/// - Failure symptom: A stale refresh renders into a window that was closed.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_disable_cancels_pending_timers() {
	let (host, hud) = setup();
	host.select(Some("sam"));
	hud.toggle().await;

	hud.on_entity_changed(&EntityChange::Collection {
		entity: EntityId::from("sam"),
	});
	hud.on_selection_changed();
	assert!(hud.inner.refresh.is_pending());
	assert!(hud.inner.settle.is_pending());

	hud.toggle().await;
	assert!(!hud.inner.refresh.is_pending());
	assert!(!hud.inner.settle.is_pending());

	tokio::time::sleep(Duration::from_millis(200)).await;
	assert_eq!(renders(&host), 0);
	assert_eq!(opens(&host), 1);
}

/// Must re-check overlay liveness when a refresh fires, not when scheduled.
///
/// - Enforced in: `RefreshScheduler::notify`, `RefreshTarget::refresh for HudInner`
/// - Failure symptom: Closing the window from the host side during the
///   debounce window triggers a render into a missing window.
#[cfg_attr(test, tokio::test(flavor = "current_thread", start_paused = true))]
pub(crate) async fn test_liveness_checked_at_fire_time() {
	let (host, hud) = setup();
	host.select(Some("sam"));
	hud.toggle().await;

	hud.on_entity_changed(&EntityChange::Collection {
		entity: EntityId::from("sam"),
	});
	host.close(WINDOW).await;
	tokio::time::sleep(Duration::from_millis(200)).await;

	assert_eq!(renders(&host), 0);
	assert!(hud.is_enabled());
	assert_eq!(hud.state(), HudState::EnabledNoSelection);
}
