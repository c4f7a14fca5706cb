use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio_util::sync::CancellationToken;

/// Shared counter that stamps each armed timer with a fresh generation.
#[derive(Debug, Default, Clone)]
pub struct GenerationClock {
	next: Arc<AtomicU64>,
}

impl GenerationClock {
	/// The first call to [`GenerationClock::next`] yields 1.
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues a new generation, strictly greater than every earlier one.
	pub fn next(&self) -> u64 {
		self.next.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
	}

	/// Last generation issued; 0 until the first `next`.
	pub fn current(&self) -> u64 {
		self.next.load(Ordering::Acquire)
	}
}

/// Handle to one armed timer: its generation plus the token that stops it.
#[derive(Debug, Clone)]
pub struct GenerationToken {
	generation: u64,
	cancel: CancellationToken,
}

impl GenerationToken {
	pub fn new(generation: u64, cancel: CancellationToken) -> Self {
		Self { generation, cancel }
	}

	pub const fn generation(&self) -> u64 {
		self.generation
	}

	/// Set once [`GenerationToken::cancel`] ran on this handle or any clone.
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}

	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// Resolves once the timer is cancelled.
	pub async fn cancelled(&self) {
		self.cancel.cancelled().await;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clock_starts_at_one_and_is_monotonic() {
		let clock = GenerationClock::new();
		assert_eq!(clock.current(), 0);
		assert_eq!(clock.next(), 1);
		assert_eq!(clock.next(), 2);
		assert_eq!(clock.current(), 2);
	}

	#[test]
	fn cloned_clock_shares_sequence() {
		let clock = GenerationClock::new();
		let other = clock.clone();
		clock.next();
		assert_eq!(other.next(), 2);
	}

	#[test]
	fn token_cancel_is_visible_through_clones() {
		let token = GenerationToken::new(7, CancellationToken::new());
		let clone = token.clone();
		assert!(!clone.is_cancelled());
		token.cancel();
		assert!(clone.is_cancelled());
		assert_eq!(clone.generation(), 7);
	}
}
