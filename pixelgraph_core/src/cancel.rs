//! Cooperative cancellation signal.
//!
//! Modeled as an explicit shared atomic flag rather than exceptions/panics:
//! the scheduler polls it once per tile instead of relying on
//! control-flow-by-error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cheaply cloneable, thread-safe cancellation flag.
///
/// Setting it is monotonic: once set, a `CancelFlag` never becomes unset
/// again. All clones observe the same underlying state.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
	/// Creates a fresh, unset flag.
	pub fn new() -> Self {
		Self(Arc::new(AtomicBool::new(false)))
	}

	/// Marks the flag as set. Idempotent.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	/// Returns whether the flag has been set.
	pub fn is_set(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn starts_unset() {
		let flag = CancelFlag::new();
		assert!(!flag.is_set());
	}

	#[test]
	fn cancel_is_observed_through_clones() {
		let flag = CancelFlag::new();
		let clone = flag.clone();
		assert!(!clone.is_set());
		flag.cancel();
		assert!(clone.is_set());
	}

	#[test]
	fn cancel_is_monotonic() {
		let flag = CancelFlag::new();
		flag.cancel();
		flag.cancel();
		assert_eq!(flag.is_set(), true);
	}
}
