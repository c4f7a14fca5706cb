#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Selection-bound overlay engine for a tabletop host.
//!
//! The overlay mirrors the host's currently selected entity: its condition
//! tracks, skills, inventory and the actions it can take. This crate decides
//! *when* the overlay exists and refreshes, *what* it shows, and *where* a
//! click on one of its rows is sent. Rendering, templating and rule execution
//! stay with the host and are reached through the traits in [`host`].
//!
//! # Main Types
//!
//! - [`Hud`] - lifecycle and selection binder owning the single overlay instance
//! - [`DisplayModel`] - render-ready snapshot built by [`aggregate::build`]
//! - [`ActionRouter`] - maps row interactions onto host execution strategies
//! - [`HostPorts`] - the bundle of host capabilities the engine consumes
//!
//! # Flow
//!
//! ```text
//! host selection / enable events ──► Hud (settle debounce) ──► OverlaySurface
//!                                     │                           ▲
//! entity change events ──► RefreshScheduler (debounce) ──► aggregate::build
//!                                                           ├── i18n
//!                                                           └── catalog::augment
//! row clicks ──► ActionRouter ──► ActionRunner / Catalog
//! ```

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod filter;
pub mod host;
pub mod i18n;
pub mod keybind;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod router;
pub mod scheduler;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{HudConfig, WindowSpec};
pub use entity::{EntityId, EntitySnapshot, ItemCaps, ItemRecord};
pub use error::{ConfigError, HostError, HudError};
pub use host::HostPorts;
pub use lifecycle::{EntityChange, Hud, HudState};
pub use model::{CatalogRef, DisplayItem, DisplayModel, ItemCapability, ItemSource};
pub use router::{ActionRouter, DispatchOutcome, Interaction, ItemDescriptor};
