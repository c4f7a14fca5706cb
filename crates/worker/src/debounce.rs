//! Cancellable trailing-edge debounce timer.
//!
//! A [`Debouncer`] owns at most one pending timer. Every [`Debouncer::schedule`]
//! cancels the previous timer and arms a new one `window` from now, so a burst
//! of calls collapses into a single job run after the burst goes quiet.
//!
//! Cancellation is generation-scoped: the timer task re-checks under the lock
//! that it is still the latest generation before running its job, so a timer
//! whose cancellation raced with its own wake-up never fires.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::{GenerationClock, GenerationToken, spawn};


/// Single-slot trailing-edge debouncer.
#[derive(Debug)]
pub struct Debouncer {
	name: &'static str,
	window: Duration,
	clock: GenerationClock,
	pending: Arc<Mutex<Option<GenerationToken>>>,
}

impl Debouncer {
	/// Creates a debouncer with the given trace name and coalescing window.
	pub fn new(name: &'static str, window: Duration) -> Self {
		Self {
			name,
			window,
			clock: GenerationClock::new(),
			pending: Arc::new(Mutex::new(None)),
		}
	}

	/// Returns the coalescing window.
	pub fn window(&self) -> Duration {
		self.window
	}

	/// Generation of the most recently armed timer, or 0 before the first.
	pub fn latest_generation(&self) -> u64 {
		self.clock.current()
	}

	/// Returns true while a timer is armed and has not fired or been cancelled.
	pub fn is_pending(&self) -> bool {
		self.pending.lock().is_some()
	}

	/// Cancels any armed timer and arms a new one that runs `job` after the window.
	///
	/// The job is constructed lazily at fire time. Returns the generation of the
	/// armed timer.
	pub fn schedule<F, Fut>(&self, job: F) -> u64
	where
		F: FnOnce() -> Fut + Send + 'static,
		Fut: Future<Output = ()> + Send + 'static,
	{
		let generation = self.clock.next();
		let token = GenerationToken::new(generation, CancellationToken::new());

		if let Some(previous) = self.pending.lock().replace(token.clone()) {
			previous.cancel();
			tracing::trace!(
				debouncer = self.name,
				superseded = previous.generation(),
				generation,
				"worker.debounce.reset"
			);
		} else {
			tracing::trace!(
				debouncer = self.name,
				generation,
				window_ms = self.window.as_millis() as u64,
				"worker.debounce.arm"
			);
		}

		let pending = Arc::clone(&self.pending);
		let window = self.window;
		let name = self.name;
		spawn(name, async move {
			tokio::select! {
				biased;
				_ = token.cancelled() => return,
				_ = tokio::time::sleep(window) => {}
			}

			{
				let mut slot = pending.lock();
				match slot.as_ref() {
					Some(current) if current.generation() == generation && !current.is_cancelled() => {
						slot.take();
					}
					_ => return,
				}
			}

			tracing::trace!(debouncer = name, generation, "worker.debounce.fire");
			job().await;
		});

		generation
	}

	/// Cancels the armed timer, if any. Returns true when a timer was cancelled.
	pub fn cancel(&self) -> bool {
		let Some(token) = self.pending.lock().take() else {
			return false;
		};
		token.cancel();
		tracing::trace!(
			debouncer = self.name,
			generation = token.generation(),
			latest = self.clock.current(),
			"worker.debounce.cancel"
		);
		true
	}
}

impl Drop for Debouncer {
	fn drop(&mut self) {
		if let Some(token) = self.pending.lock().take() {
			token.cancel();
		}
	}
}
