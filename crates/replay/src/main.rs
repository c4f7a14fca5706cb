#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Fixture replay for the HUD engine.
//!
//! Loads a recorded entity with its host context into the in-memory host and
//! drives the engine the way the tabletop host would: building the model,
//! routing a click, or running an enable/edit/disable session.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use srhud::host::SelectionSource;
use srhud::testing::{HostCall, MemoryHost};
use srhud::{DisplayItem, DisplayModel, EntityChange, Hud, HudConfig, Interaction, ItemDescriptor};
use tracing::info;

mod cli;
mod fixture;

use cli::{Cli, Command};
use fixture::Fixture;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => HudConfig::load(path)?,
		None => HudConfig::default(),
	};

	match cli.command {
		Command::Model { fixture, pretty } => print_model(&fixture, config, pretty).await,
		Command::Click { fixture, row } => click(&fixture, config, &row).await,
		Command::Session { fixture, edits } => session(&fixture, config, edits).await,
	}
}

async fn print_model(path: &Path, config: HudConfig, pretty: bool) -> anyhow::Result<()> {
	let hud = Hud::new(Fixture::load(path)?.into_host().ports(), config)?;
	let model = hud.current_model().await.context("fixture entity has no data record")?;

	let json = if pretty {
		serde_json::to_string_pretty(&model)?
	} else {
		serde_json::to_string(&model)?
	};
	println!("{json}");
	Ok(())
}

async fn click(path: &Path, config: HudConfig, row: &str) -> anyhow::Result<()> {
	let host = Fixture::load(path)?.into_host();
	let hud = Hud::new(host.ports(), config)?;
	let model = hud.current_model().await.context("fixture entity has no data record")?;
	let item = find_row(&model, row).with_context(|| format!("no row with id '{row}'"))?;

	host.clear_calls();
	let outcome = hud.dispatch(Interaction::ItemRoll(ItemDescriptor::from(item))).await;
	info!(row, ?outcome, "replay.click");

	println!("outcome: {outcome:?}");
	report(&host);
	Ok(())
}

async fn session(path: &Path, config: HudConfig, edits: usize) -> anyhow::Result<()> {
	let host = Fixture::load(path)?.into_host();
	let settle = config.refresh_debounce() + config.selection_settle();
	let hud = Hud::new(host.ports(), config)?;
	let entity = host.selected().context("fixture selects no entity")?;

	println!("state: {:?}", hud.toggle().await);
	for _ in 0..edits {
		hud.on_entity_changed(&EntityChange::Collection { entity: entity.clone() });
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	tokio::time::sleep(settle).await;
	println!("state: {:?}", hud.toggle().await);

	report(&host);
	Ok(())
}

/// Looks a row up by id across every section of the model.
fn find_row<'a>(model: &'a DisplayModel, id: &str) -> Option<&'a DisplayItem> {
	let specials = model.special_sections.iter().flat_map(|sections| sections.values());
	model
		.inventory
		.values()
		.chain(specials)
		.flatten()
		.chain(&model.actions)
		.find(|item| item.id == id)
}

fn report(host: &MemoryHost) {
	for call in host.calls() {
		if !matches!(call, HostCall::IndexFetch { .. }) {
			println!("call: {call:?}");
		}
	}
	for notice in host.notices() {
		println!("notice [{}]: {}", notice.id(), notice.message);
	}
}

fn setup_tracing(verbose: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::prelude::*;

	let filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("srhud=debug,srhud_replay=debug,info")
			} else {
				EnvFilter::new("srhud=info,warn")
			}
		})
	};

	// SRHUD_LOG_DIR sends logs to a per-process file instead of stderr.
	if let Some(log_dir) = std::env::var("SRHUD_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("srhud-replay.{}.log", std::process::id()));

		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_target(true);

			tracing_subscriber::registry().with(filter()).with(file_layer).init();
			info!(path = ?log_path, "replay.tracing");
			return;
		}
	}

	tracing_subscriber::fmt()
		.with_env_filter(filter())
		.with_writer(std::io::stderr)
		.init();
}
