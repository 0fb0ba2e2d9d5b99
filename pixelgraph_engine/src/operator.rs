//! The operator capability contract: the engine only ever talks to an
//! operator through this trait, never through a concrete
//! algorithm type. Operator implementations themselves live outside this
//! crate — `pixelgraph_operators` is a reference ecosystem, not a
//! dependency of the engine.

use anyhow::Result;
use std::fmt;
use std::sync::Arc;

/// A raster tile handed back by a [`Band`]. The engine never inspects its
/// contents and treats the returned value as opaque; it exists only so the
/// trait has a concrete return type instead of `()`. Operators that need to
/// read their own upstream tiles (to actually compute something) downcast
/// via [`Raster::as_any`] rather than the engine ever doing so.
pub trait Raster: fmt::Debug + Send + Sync {
	fn as_any(&self) -> &dyn std::any::Any;
}

/// A single-channel lazy-tiled raster inside a [`Product`].
pub trait Band: Send + Sync {
	/// Computes (or returns from cache) the tile at `(tile_x, tile_y)`,
	/// recursively pulling whatever source tiles it needs. A `Result::Err`
	/// here is surfaced by the scheduler as `TileComputationFailed`.
	fn compute_tile(&self, tile_x: u32, tile_y: u32) -> Result<Arc<dyn Raster>>;
}

/// A collection of bands sharing one raster frame.
pub trait Product: Send + Sync {
	fn scene_width(&self) -> u32;
	fn scene_height(&self) -> u32;
	fn bands(&self) -> &[Arc<dyn Band>];
}

/// Capability descriptor probed once, at construction time, rather than via
/// dynamic type tests: a tagged flag struct instead of downcasting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperatorCapabilities {
	/// When set, a single tile request to the first band suffices to
	/// compute that tile for every band the operator produces.
	pub compute_all_bands: bool,
}

/// Optional capability letting an operator consume the raw configuration
/// element directly, bypassing the default by-name parameter converter.
pub trait CustomParameterConversion {
	fn apply_configuration(&mut self, config: &crate::param::ConfigElement) -> Result<()>;
}

/// The operator capability contract an operator exposes to the engine.
pub trait Operator: Send {
	/// Called once per declared source, before target-product construction.
	fn set_source_product(&mut self, slot_name: &str, product: Arc<dyn Product>) -> Result<()>;

	/// Called once, after parameters are bound, to obtain this operator's
	/// output product.
	fn target_product(&mut self) -> Result<Arc<dyn Product>>;

	/// Called exactly once during teardown. Failures are logged and
	/// swallowed by the caller; the operator need not be careful about
	/// double-dispose since the engine guarantees single invocation.
	fn dispose(&mut self) -> Result<()>;

	/// The capability descriptor for this operator instance.
	fn capabilities(&self) -> OperatorCapabilities;

	/// Binds a single named parameter by the default by-name convention.
	/// Operators deriving `#[derive(ParamBind)]` forward to the generated
	/// `set_param` method here; operators with no parameters can rely on
	/// the default no-op.
	fn apply_default_parameter(&mut self, _key: &str, _value: &str) -> Result<()> {
		Ok(())
	}

	/// Exposes the custom-parameter-conversion capability, if this operator
	/// implements it. Returning `Some` here bypasses
	/// [`apply_default_parameter`](Operator::apply_default_parameter).
	fn custom_parameter_conversion(&mut self) -> Option<&mut dyn CustomParameterConversion> {
		None
	}
}
