use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use super::*;
use crate::notice::AutoDismiss;
use crate::testing::{HostCall, MemoryHost, character};

pub(super) const WINDOW: &str = "steve-sr5-hud";

pub(super) fn setup() -> (Arc<MemoryHost>, Hud) {
	let host = Arc::new(MemoryHost::new());
	host.insert_entity(character("sam", "Street Samurai"));
	host.insert_entity(character("decker", "Decker"));
	let hud = Hud::new(host.ports(), HudConfig::default()).unwrap();
	(host, hud)
}

/// Sleeps past the selection settle delay.
pub(super) async fn settle() {
	tokio::time::sleep(Duration::from_millis(60)).await;
}

pub(super) fn opens(host: &MemoryHost) -> usize {
	host.count(|call| matches!(call, HostCall::Open { .. }))
}

pub(super) fn renders(host: &MemoryHost) -> usize {
	host.count(|call| matches!(call, HostCall::Render { .. }))
}

fn shown_name(host: &MemoryHost) -> Option<String> {
	host.window_model(WINDOW).flatten().map(|model| model.name)
}

fn collection(id: &str) -> EntityChange {
	EntityChange::Collection {
		entity: EntityId::from(id),
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn toggle_without_selection_enables_without_window() {
	let (host, hud) = setup();
	assert_eq!(hud.state(), HudState::Disabled);

	assert_eq!(hud.toggle().await, HudState::EnabledNoSelection);
	assert_eq!(host.open_windows(), 0);
	assert!(hud.is_enabled());

	assert_eq!(hud.toggle().await, HudState::Disabled);
	assert_eq!(opens(&host), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn toggle_with_selection_opens_then_closes() {
	let (host, hud) = setup();
	host.select(Some("sam"));

	assert_eq!(hud.toggle().await, HudState::EnabledVisible);
	assert_eq!(shown_name(&host).as_deref(), Some("Street Samurai"));

	assert_eq!(hud.toggle().await, HudState::Disabled);
	assert_eq!(host.open_windows(), 0);
	assert_eq!(host.count(|call| matches!(call, HostCall::Close { .. })), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn selection_appearing_opens_after_settle_delay() {
	let (host, hud) = setup();
	hud.toggle().await;

	host.select(Some("sam"));
	hud.on_selection_changed();
	tokio::time::sleep(Duration::from_millis(20)).await;
	assert_eq!(hud.state(), HudState::EnabledNoSelection);

	settle().await;
	assert_eq!(hud.state(), HudState::EnabledVisible);
	assert_eq!(opens(&host), 1);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn selection_churn_settles_into_one_transition() {
	let (host, hud) = setup();
	hud.toggle().await;

	for id in ["sam", "decker", "sam", "decker"] {
		host.select(Some(id));
		hud.on_selection_changed();
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	settle().await;

	assert_eq!(opens(&host), 1);
	assert_eq!(renders(&host), 0);
	assert_eq!(shown_name(&host).as_deref(), Some("Decker"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn new_selection_rerenders_existing_window() {
	let (host, hud) = setup();
	host.select(Some("sam"));
	hud.toggle().await;

	host.select(Some("decker"));
	hud.on_selection_changed();
	settle().await;

	assert_eq!(opens(&host), 1);
	assert_eq!(renders(&host), 1);
	assert_eq!(shown_name(&host).as_deref(), Some("Decker"));
	assert_eq!(hud.state(), HudState::EnabledVisible);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn clearing_selection_closes_but_stays_enabled() {
	let (host, hud) = setup();
	host.select(Some("sam"));
	hud.toggle().await;

	host.select(None);
	hud.on_selection_changed();
	settle().await;

	assert_eq!(hud.state(), HudState::EnabledNoSelection);
	assert!(hud.is_enabled());
	assert_eq!(host.open_windows(), 0);

	host.select(Some("sam"));
	hud.on_selection_changed();
	settle().await;
	assert_eq!(hud.state(), HudState::EnabledVisible);
	assert_eq!(opens(&host), 2);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn events_while_disabled_are_ignored() {
	let (host, hud) = setup();
	host.select(Some("sam"));

	hud.on_selection_changed();
	hud.on_entity_changed(&collection("sam"));
	tokio::time::sleep(Duration::from_millis(500)).await;

	assert!(host.calls().is_empty());
	assert_eq!(hud.state(), HudState::Disabled);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn change_bursts_coalesce_into_one_refresh_of_current_selection() {
	let (host, hud) = setup();
	host.select(Some("sam"));
	hud.toggle().await;
	host.clear_calls();

	for _ in 0..5 {
		hud.on_entity_changed(&collection("sam"));
		tokio::time::sleep(Duration::from_millis(20)).await;
	}
	// Selection moves without a selection event reaching the engine yet.
	host.select(Some("decker"));
	tokio::time::sleep(Duration::from_millis(150)).await;

	assert_eq!(renders(&host), 1);
	assert_eq!(shown_name(&host).as_deref(), Some("Decker"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn refresh_pushes_edited_entity() {
	let (host, hud) = setup();
	host.select(Some("sam"));
	hud.toggle().await;

	host.update_entity("sam", |sam| sam.name = "Razor".to_string());
	hud.on_entity_changed(&EntityChange::Attributes {
		entity: EntityId::from("sam"),
		data: false,
		name: true,
	});
	tokio::time::sleep(Duration::from_millis(150)).await;

	assert_eq!(shown_name(&host).as_deref(), Some("Razor"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn unrelated_attribute_edits_do_not_refresh() {
	let (host, hud) = setup();
	host.select(Some("sam"));
	hud.toggle().await;

	hud.on_entity_changed(&EntityChange::Attributes {
		entity: EntityId::from("sam"),
		data: false,
		name: false,
	});
	tokio::time::sleep(Duration::from_millis(150)).await;

	assert_eq!(renders(&host), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn keybinding_without_selection_warns_and_stays_disabled() {
	let (host, hud) = setup();

	assert_eq!(hud.on_keybinding().await, HudState::Disabled);

	let notices = host.notices();
	assert_eq!(notices.len(), 1);
	assert_eq!(notices[0].id(), "hud.no_selection");
	assert_eq!(notices[0].auto_dismiss, AutoDismiss::After(Duration::from_millis(2000)));
	assert_eq!(opens(&host), 0);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn keybinding_opens_and_closes() {
	let (host, hud) = setup();
	host.select(Some("sam"));

	assert_eq!(hud.on_keybinding().await, HudState::EnabledVisible);
	host.select(None);
	assert_eq!(hud.on_keybinding().await, HudState::Disabled);
	assert!(host.notices().is_empty());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn state_subscribers_see_transitions() {
	let (host, hud) = setup();
	let mut rx = hud.subscribe_state();
	host.select(Some("sam"));

	hud.toggle().await;
	assert!(rx.has_changed().unwrap());
	assert_eq!(*rx.borrow_and_update(), HudState::EnabledVisible);

	// Re-rendering does not change state.
	hud.on_selection_changed();
	settle().await;
	assert!(!rx.has_changed().unwrap());

	hud.toggle().await;
	assert_eq!(*rx.borrow_and_update(), HudState::Disabled);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn dispatch_reaches_the_router() {
	let (host, hud) = setup();
	host.select(Some("sam"));

	assert_eq!(hud.dispatch(Interaction::Portrait).await, DispatchOutcome::Performed);
	assert_eq!(
		host.calls(),
		[HostCall::ToggleSheet {
			entity: EntityId::from("sam")
		}]
	);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn current_model_follows_selection() {
	let (host, hud) = setup();
	assert!(hud.current_model().await.is_none());

	host.select(Some("decker"));
	assert_eq!(hud.current_model().await.map(|model| model.name).as_deref(), Some("Decker"));
	assert_eq!(host.open_windows(), 0);
}

#[test]
fn invalid_keybinding_is_rejected_at_construction() {
	let host = Arc::new(MemoryHost::new());
	let config = HudConfig {
		keybinding: "ctrl-".to_string(),
		..HudConfig::default()
	};

	assert!(matches!(Hud::new(host.ports(), config), Err(ConfigError::InvalidKeybinding(_))));
}

#[test]
fn default_chord_is_ctrl_h() {
	let (_, hud) = setup();

	assert_eq!(hud.key_chord().to_string(), "ctrl-h");
}
