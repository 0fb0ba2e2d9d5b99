//! A no-op progress sink, used by default outside the CLI and throughout
//! tests.

use super::ProgressTrait;
use crate::CancelFlag;

/// Reports nothing; `is_canceled` reflects an externally held [`CancelFlag`]
/// so tests can still exercise cancellation without a terminal.
pub struct NullProgress {
	cancel: CancelFlag,
}

impl NullProgress {
	pub fn new() -> Self {
		NullProgress { cancel: CancelFlag::new() }
	}

	/// Builds a drain whose `is_canceled` tracks the given flag.
	pub fn with_cancel_flag(cancel: CancelFlag) -> Self {
		NullProgress { cancel }
	}
}

impl Default for NullProgress {
	fn default() -> Self {
		Self::new()
	}
}

impl ProgressTrait for NullProgress {
	fn begin_task(&mut self, _label: &str, _total_units: u64) {}
	fn worked(&mut self, _units: u64) {}
	fn done(&mut self) {}
	fn is_canceled(&self) -> bool {
		self.cancel.is_set()
	}
}
