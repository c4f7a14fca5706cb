//! Timer and task primitives shared by the overlay engine.
//!
//! Everything here runs on the caller's tokio runtime. Timers are modelled as
//! spawned tasks racing a [`tokio::time::sleep`] against a generation-scoped
//! cancellation token, never as polling loops.

mod debounce;
mod spawn;
mod token;

pub use debounce::Debouncer;
pub use spawn::spawn;
pub use token::{GenerationClock, GenerationToken};
