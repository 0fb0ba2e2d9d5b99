//! Top-level `execute_graph` entry point: wires the Initializer, Tile
//! Scheduler, and Disposer together with the 10%/90% progress budget
//! contract.

use crate::context::GraphContext;
use crate::disposer::dispose_all;
use crate::graph::Graph;
use crate::initializer::{OperatorContextInitializer, initialize};
use crate::observer::Observer;
use crate::scheduler::run_tile_scheduler;
use anyhow::Result;
use pixelgraph_core::{Config, ProgressTrait, SubProgress};

/// Scale used for the overall `execute_graph` progress task; `SubProgress`
/// reports onto this scale regardless of what scale the caller's own
/// `progress` uses internally.
const TOTAL_UNITS: u64 = 1_000_000;

/// Validates and initializes `graph`, drives tile-by-tile computation over
/// its output nodes, and disposes every context that reached `initialized`
/// — even if initialization or tiling failed partway through.
///
/// Disposal always runs; the original error (if any) is still returned.
pub fn execute_graph(
	graph: &Graph,
	observers: Vec<Box<dyn Observer>>,
	registry: &dyn OperatorContextInitializer,
	config: &Config,
	progress: &mut dyn ProgressTrait,
) -> Result<()> {
	progress.begin_task("executing graph", TOTAL_UNITS);

	let mut context = GraphContext::new(graph, observers);

	let init_result = {
		let mut init_progress = SubProgress::new(progress, 0.10);
		init_progress.begin_task("initializing", 1);
		let result = initialize(&mut context, registry);
		init_progress.worked(1);
		init_progress.done();
		result
	};

	let result = match init_result {
		Ok(()) => {
			let mut tile_progress = SubProgress::new(progress, 0.90);
			run_tile_scheduler(&mut context, config, &mut tile_progress)
		}
		Err(err) => Err(err),
	};

	dispose_all(&mut context);
	progress.done();

	result
}
