//! The observer contract: four events bracketing graph and per-tile
//! execution, registered before execution and read-only afterwards.

use crate::context::GraphContext;
use pixelgraph_core::Rectangle;

/// Notification surface for graph/tile lifecycle events.
///
/// Registered on a [`GraphContext`] before `execute_graph` runs; the list is
/// taken as an immutable snapshot at execution start, so an observer must
/// not itself try to register further observers.
pub trait Observer: Send {
	fn graph_processing_started(&mut self, context: &GraphContext<'_>);
	fn tile_processing_started(&mut self, context: &GraphContext<'_>, bounds: &Rectangle);
	fn tile_processing_stopped(&mut self, context: &GraphContext<'_>, bounds: &Rectangle);
	fn graph_processing_stopped(&mut self, context: &GraphContext<'_>);
}

/// Logs each event at debug level, naming the graph id and, for tile
/// events, the tile rectangle. Mirrors the level the engine logs its own
/// lifecycle events at.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl Observer for LoggingObserver {
	fn graph_processing_started(&mut self, context: &GraphContext<'_>) {
		log::debug!("graph '{}' processing started", context.graph.id);
	}

	fn tile_processing_started(&mut self, context: &GraphContext<'_>, bounds: &Rectangle) {
		log::debug!("graph '{}' tile started: {bounds:?}", context.graph.id);
	}

	fn tile_processing_stopped(&mut self, context: &GraphContext<'_>, bounds: &Rectangle) {
		log::debug!("graph '{}' tile stopped: {bounds:?}", context.graph.id);
	}

	fn graph_processing_stopped(&mut self, context: &GraphContext<'_>) {
		log::debug!("graph '{}' processing stopped", context.graph.id);
	}
}
