//! Tile-by-tile pull scheduling over the set of output products.

use crate::context::GraphContext;
use crate::error::GraphError;
use anyhow::{Context, Result};
use pixelgraph_core::{Config, ProgressTrait, Rectangle, TileGrid};

/// Computes the union of all output products' bounds, builds the tile grid
/// over it, and drives one tile request per visible output per tile.
///
/// `context.observers` is taken out for the duration of each callback so the
/// observer can still see `&context` without a borrow conflict, and is
/// restored before returning, success or failure.
pub fn run_tile_scheduler(context: &mut GraphContext<'_>, config: &Config, progress: &mut dyn ProgressTrait) -> Result<()> {
	let output_bounds: Vec<Rectangle> = context
		.output_contexts()
		.map(|ctx| {
			let product = ctx.target_product.as_ref().expect("output context is initialized");
			Rectangle::from_size(product.scene_width(), product.scene_height())
		})
		.collect();
	let union_bounds = Rectangle::union_all(&output_bounds);
	let grid = TileGrid::new(union_bounds, config.default_tile_width, config.default_tile_height);

	progress.begin_task("tiles", grid.tile_count());

	with_observers(context, |observer, context| observer.graph_processing_started(context));

	let result = drive_tiles(context, &grid, progress);

	with_observers(context, |observer, context| observer.graph_processing_stopped(context));
	progress.done();

	result
}

fn drive_tiles(context: &mut GraphContext<'_>, grid: &TileGrid, progress: &mut dyn ProgressTrait) -> Result<()> {
	for (tile_x, tile_y) in grid.iter_row_major() {
		if progress.is_canceled() {
			break;
		}

		let rect = grid.tile_rect(tile_x, tile_y);
		with_observers(context, |observer, context| observer.tile_processing_started(context, &rect));

		for output_id in context.output_node_ids.clone() {
			request_tile(context, &output_id, &rect, tile_x, tile_y)?;
		}

		with_observers(context, |observer, context| observer.tile_processing_stopped(context, &rect));
		progress.worked(1);
	}
	Ok(())
}

/// Takes `context.observers` out, invokes `f` for each in registration
/// order, and puts the list back — sidesteps holding `&mut context` and
/// `&context` (for the observer's own view) at the same time.
fn with_observers(context: &mut GraphContext<'_>, mut f: impl FnMut(&mut Box<dyn crate::observer::Observer>, &GraphContext<'_>)) {
	let mut observers = std::mem::take(&mut context.observers);
	for observer in observers.iter_mut() {
		f(observer, &*context);
	}
	context.observers = observers;
}

fn request_tile(context: &GraphContext<'_>, output_id: &str, rect: &Rectangle, tile_x: u32, tile_y: u32) -> Result<()> {
	let node_ctx = &context.node_contexts[output_id];
	let product = node_ctx.target_product.as_ref().expect("output context is initialized");
	let product_bounds = Rectangle::from_size(product.scene_width(), product.scene_height());
	if !product_bounds.intersects(rect) {
		return Ok(());
	}

	let operator = node_ctx.operator.as_ref().expect("output context is initialized");
	let bands = product.bands();

	let to_request: &[_] = if operator.capabilities().compute_all_bands {
		bands.first().map(std::slice::from_ref).unwrap_or(&[])
	} else {
		bands
	};

	for band in to_request {
		band
			.compute_tile(tile_x, tile_y)
			.with_context(|| GraphError::TileComputationFailed {
				node_id: output_id.to_string(),
				tile_x,
				tile_y,
			})?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Graph, Node};
	use crate::observer::Observer;
	use crate::operator::{Band, Operator, OperatorCapabilities, Product, Raster};
	use pixelgraph_core::NullProgress;
	use pretty_assertions::assert_eq;
	use std::sync::{Arc, Mutex};

	#[derive(Debug)]
	struct FakeRaster;
	impl Raster for FakeRaster {
		fn as_any(&self) -> &dyn std::any::Any {
			self
		}
	}

	struct FakeBand {
		calls: Arc<Mutex<Vec<(u32, u32)>>>,
	}
	impl Band for FakeBand {
		fn compute_tile(&self, tile_x: u32, tile_y: u32) -> Result<Arc<dyn Raster>> {
			self.calls.lock().unwrap().push((tile_x, tile_y));
			Ok(Arc::new(FakeRaster))
		}
	}

	/// Like [`FakeBand`], but records which output node it belongs to instead
	/// of which tile it was asked for, so a test can assert the order output
	/// nodes are visited in within a single tile.
	struct LabeledBand {
		label: String,
		calls: Arc<Mutex<Vec<String>>>,
	}
	impl Band for LabeledBand {
		fn compute_tile(&self, _tile_x: u32, _tile_y: u32) -> Result<Arc<dyn Raster>> {
			self.calls.lock().unwrap().push(self.label.clone());
			Ok(Arc::new(FakeRaster))
		}
	}

	struct FakeProduct {
		width: u32,
		height: u32,
		bands: Vec<Arc<dyn Band>>,
	}
	impl Product for FakeProduct {
		fn scene_width(&self) -> u32 {
			self.width
		}
		fn scene_height(&self) -> u32 {
			self.height
		}
		fn bands(&self) -> &[Arc<dyn Band>] {
			&self.bands
		}
	}

	struct FakeOperator {
		product: Arc<dyn Product>,
		capabilities: OperatorCapabilities,
	}
	impl Operator for FakeOperator {
		fn set_source_product(&mut self, _slot_name: &str, _product: Arc<dyn Product>) -> Result<()> {
			Ok(())
		}
		fn target_product(&mut self) -> Result<Arc<dyn Product>> {
			Ok(self.product.clone())
		}
		fn dispose(&mut self) -> Result<()> {
			Ok(())
		}
		fn capabilities(&self) -> OperatorCapabilities {
			self.capabilities
		}
	}

	struct RecordingObserver {
		events: Arc<Mutex<Vec<String>>>,
	}
	impl Observer for RecordingObserver {
		fn graph_processing_started(&mut self, _context: &GraphContext<'_>) {
			self.events.lock().unwrap().push("started".into());
		}
		fn tile_processing_started(&mut self, _context: &GraphContext<'_>, rect: &Rectangle) {
			self.events.lock().unwrap().push(format!("tile_started({},{})", rect.x, rect.y));
		}
		fn tile_processing_stopped(&mut self, _context: &GraphContext<'_>, rect: &Rectangle) {
			self.events.lock().unwrap().push(format!("tile_stopped({},{})", rect.x, rect.y));
		}
		fn graph_processing_stopped(&mut self, _context: &GraphContext<'_>) {
			self.events.lock().unwrap().push("stopped".into());
		}
	}

	fn make_initialized_context(
		graph: &Graph,
		width: u32,
		height: u32,
		compute_all_bands: bool,
		band_calls: Arc<Mutex<Vec<(u32, u32)>>>,
		band_count: usize,
	) -> GraphContext<'_> {
		let mut context = GraphContext::new(graph, Vec::new());
		let bands: Vec<Arc<dyn Band>> = (0..band_count)
			.map(|_| Arc::new(FakeBand { calls: band_calls.clone() }) as Arc<dyn Band>)
			.collect();
		let product: Arc<dyn Product> = Arc::new(FakeProduct { width, height, bands });
		let ctx = context.node_contexts.get_mut("only").unwrap();
		ctx.operator = Some(Box::new(FakeOperator {
			product: product.clone(),
			capabilities: OperatorCapabilities { compute_all_bands },
		}));
		ctx.target_product = Some(product);
		ctx.initialized = true;
		ctx.reference_count = 0;
		context.output_node_ids = vec!["only".to_string()];
		context
	}

	#[test]
	fn two_by_two_grid_fires_four_tile_pairs_in_row_major_order() {
		let graph = Graph::new("g", "1", vec![Node::new("only", "noop")]);
		let calls = Arc::new(Mutex::new(Vec::new()));
		let mut context = make_initialized_context(&graph, 100, 100, false, calls, 1);
		let events = Arc::new(Mutex::new(Vec::new()));
		context.observers = vec![Box::new(RecordingObserver { events: events.clone() })];

		let config = Config::new(64, 64);
		let mut progress = NullProgress::new();
		run_tile_scheduler(&mut context, &config, &mut progress).unwrap();

		assert_eq!(
			*events.lock().unwrap(),
			vec![
				"started".to_string(),
				"tile_started(0,0)".to_string(),
				"tile_stopped(0,0)".to_string(),
				"tile_started(64,0)".to_string(),
				"tile_stopped(64,0)".to_string(),
				"tile_started(0,64)".to_string(),
				"tile_stopped(0,64)".to_string(),
				"tile_started(64,64)".to_string(),
				"tile_stopped(64,64)".to_string(),
				"stopped".to_string(),
			]
		);
	}

	#[test]
	fn compute_all_bands_requests_only_the_first_band_once_per_tile() {
		let graph = Graph::new("g", "1", vec![Node::new("only", "noop")]);
		let calls = Arc::new(Mutex::new(Vec::new()));
		let mut context = make_initialized_context(&graph, 64, 64, true, calls.clone(), 3);
		let config = Config::new(64, 64);
		let mut progress = NullProgress::new();
		run_tile_scheduler(&mut context, &config, &mut progress).unwrap();

		assert_eq!(*calls.lock().unwrap(), vec![(0, 0)]);
	}

	#[test]
	fn per_band_requests_pull_every_band_when_compute_all_bands_is_unset() {
		let graph = Graph::new("g", "1", vec![Node::new("only", "noop")]);
		let calls = Arc::new(Mutex::new(Vec::new()));
		let mut context = make_initialized_context(&graph, 64, 64, false, calls.clone(), 3);
		let config = Config::new(64, 64);
		let mut progress = NullProgress::new();
		run_tile_scheduler(&mut context, &config, &mut progress).unwrap();

		assert_eq!(calls.lock().unwrap().len(), 3);
	}

	#[test]
	fn smaller_product_is_skipped_outside_its_own_bounds() {
		let graph = Graph::new("g", "1", vec![Node::new("only", "noop")]);
		let calls = Arc::new(Mutex::new(Vec::new()));
		let mut context = make_initialized_context(&graph, 50, 50, false, calls.clone(), 1);
		let config = Config::new(64, 64);
		let mut progress = NullProgress::new();
		run_tile_scheduler(&mut context, &config, &mut progress).unwrap();

		assert_eq!(*calls.lock().unwrap(), vec![(0, 0)]);
	}

	#[test]
	fn outputs_are_visited_in_declared_order_within_each_tile() {
		let graph = Graph::new(
			"g",
			"1",
			vec![Node::new("zeta", "noop"), Node::new("alpha", "noop")],
		);
		let mut context = GraphContext::new(&graph, Vec::new());
		let calls: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

		for node_id in ["zeta", "alpha"] {
			let product: Arc<dyn Product> = Arc::new(FakeProduct {
				width: 64,
				height: 64,
				bands: vec![Arc::new(LabeledBand {
					label: node_id.to_string(),
					calls: calls.clone(),
				})],
			});
			let ctx = context.node_contexts.get_mut(node_id).unwrap();
			ctx.operator = Some(Box::new(FakeOperator {
				product: product.clone(),
				capabilities: OperatorCapabilities::default(),
			}));
			ctx.target_product = Some(product);
			ctx.initialized = true;
		}

		// Declared in graph order ("zeta" before "alpha"), not alphabetical
		// or hash-map order, so the assertion below only passes if the
		// scheduler actually honors declaration order.
		context.output_node_ids = vec!["zeta".to_string(), "alpha".to_string()];

		let config = Config::new(64, 64);
		let mut progress = NullProgress::new();
		run_tile_scheduler(&mut context, &config, &mut progress).unwrap();

		assert_eq!(*calls.lock().unwrap(), vec!["zeta".to_string(), "alpha".to_string()]);
	}
}
