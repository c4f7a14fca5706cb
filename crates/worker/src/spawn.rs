use std::future::Future;

use tokio::task::JoinHandle;
use tracing::Instrument;

/// Spawns a timer task on the current runtime inside a `worker.task` span
/// naming the component that owns it.
///
/// # Panics
///
/// Panics when called outside a tokio runtime, like [`tokio::spawn`].
pub fn spawn<F>(owner: &'static str, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	let span = tracing::trace_span!("worker.task", owner);
	tracing::trace!(parent: &span, "worker.spawn");
	tokio::spawn(fut.instrument(span))
}
