//! A minimal terminal progress bar, scoped down to what the CLI actually
//! needs: a message, a position/length, and a percentage.

use super::ProgressTrait;
use crate::CancelFlag;
use colored::Colorize;
use std::io::{self, Write};

pub struct TerminalProgress {
	label: String,
	total: u64,
	position: u64,
	cancel: CancelFlag,
}

impl TerminalProgress {
	pub fn new(cancel: CancelFlag) -> Self {
		TerminalProgress {
			label: String::new(),
			total: 0,
			position: 0,
			cancel,
		}
	}

	fn redraw(&self) {
		let percent = if self.total == 0 {
			100
		} else {
			(self.position * 100 / self.total.max(1)).min(100)
		};
		let line = format!(
			"{} {}/{} ({}%)",
			self.label.bold(),
			self.position,
			self.total,
			percent
		);
		let mut stderr = io::stderr();
		let _ = write!(stderr, "\r\x1b[2K{line}");
		let _ = stderr.flush();
	}
}

impl ProgressTrait for TerminalProgress {
	fn begin_task(&mut self, label: &str, total_units: u64) {
		self.label = label.to_string();
		self.total = total_units;
		self.position = 0;
		self.redraw();
	}

	fn worked(&mut self, units: u64) {
		self.position = self.position.saturating_add(units).min(self.total.max(self.position));
		self.redraw();
	}

	fn done(&mut self) {
		self.position = self.total;
		self.redraw();
		let _ = io::stderr().write_all(b"\n");
	}

	fn is_canceled(&self) -> bool {
		self.cancel.is_set()
	}
}
