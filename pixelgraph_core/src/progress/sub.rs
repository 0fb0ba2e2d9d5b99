//! A sub-progress view metering out a fraction of a parent's budget.

use super::ProgressTrait;

/// The sub-progress protocol reports into the parent on a fixed internal
/// scale; the parent's own `begin_task` establishes its real `total_units`,
/// so a child only needs to be internally consistent about its own share.
const PARENT_UNIT_SCALE: f64 = 1_000_000.0;

/// Reports its own `[0, total_units]` progress as `fraction` of the parent's
/// budget — used to split a graph execution into a 10% construction /
/// 90% tiling progress budget.
pub struct SubProgress<'a> {
	parent: &'a mut dyn ProgressTrait,
	fraction: f64,
	total_units: u64,
	position: u64,
	reported_parent_units: f64,
}

impl<'a> SubProgress<'a> {
	/// Carves a `fraction` (`0.0..=1.0`) slice of `parent`'s remaining
	/// budget out for this sub-task.
	pub fn new(parent: &'a mut dyn ProgressTrait, fraction: f64) -> Self {
		SubProgress {
			parent,
			fraction: fraction.clamp(0.0, 1.0),
			total_units: 0,
			position: 0,
			reported_parent_units: 0.0,
		}
	}

	fn sync(&mut self) {
		let own_fraction = if self.total_units == 0 {
			1.0
		} else {
			(self.position as f64 / self.total_units as f64).clamp(0.0, 1.0)
		};
		let target_parent_units = own_fraction * self.fraction * PARENT_UNIT_SCALE;
		let delta = target_parent_units - self.reported_parent_units;
		if delta > 0.0 {
			self.parent.worked(delta.round() as u64);
			self.reported_parent_units = target_parent_units;
		}
	}
}

impl ProgressTrait for SubProgress<'_> {
	fn begin_task(&mut self, _label: &str, total_units: u64) {
		self.total_units = total_units;
		self.position = 0;
	}

	fn worked(&mut self, units: u64) {
		self.position = self.position.saturating_add(units).min(self.total_units.max(self.position));
		self.sync();
	}

	fn done(&mut self) {
		self.position = self.total_units;
		self.sync();
	}

	fn is_canceled(&self) -> bool {
		self.parent.is_canceled()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::progress::NullProgress;
	use pretty_assertions::assert_eq;

	struct RecordingProgress {
		total: u64,
		worked: u64,
		done: bool,
	}

	impl ProgressTrait for RecordingProgress {
		fn begin_task(&mut self, _label: &str, total_units: u64) {
			self.total = total_units;
		}
		fn worked(&mut self, units: u64) {
			self.worked += units;
		}
		fn done(&mut self) {
			self.done = true;
		}
		fn is_canceled(&self) -> bool {
			false
		}
	}

	#[test]
	fn sub_progress_done_reaches_full_fraction_of_parent_scale() {
		let mut parent = RecordingProgress {
			total: 0,
			worked: 0,
			done: false,
		};
		{
			let mut sub = SubProgress::new(&mut parent, 0.1);
			sub.begin_task("init", 10);
			sub.worked(10);
			sub.done();
		}
		assert_eq!(parent.worked, (0.1 * PARENT_UNIT_SCALE).round() as u64);
	}

	#[test]
	fn sub_progress_partial_completion_is_proportional() {
		let mut parent = RecordingProgress {
			total: 0,
			worked: 0,
			done: false,
		};
		{
			let mut sub = SubProgress::new(&mut parent, 1.0);
			sub.begin_task("tiling", 4);
			sub.worked(1);
			sub.worked(1);
		}
		assert_eq!(parent.worked, (0.5 * PARENT_UNIT_SCALE).round() as u64);
	}

	#[test]
	fn sub_progress_forwards_cancellation_from_parent() {
		let mut null = NullProgress::new();
		let sub = SubProgress::new(&mut null, 0.5);
		assert!(!sub.is_canceled());
	}
}
