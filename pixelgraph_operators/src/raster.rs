//! A minimal in-memory raster/product/band implementation, standing in for
//! a real lazy-tiled image backend.
//!
//! Tiles are plain byte buffers; the cache below each band is a
//! [`DashMap`] so an operator is free to compute tiles from multiple
//! threads if its own upstream fetches do — the engine only ever issues
//! one tile request at a time per band, but nothing below that interface
//! is required to stay single-threaded.

use dashmap::DashMap;
use pixelgraph_engine::{Band, Product, Raster};
use std::any::Any;
use std::sync::Arc;

/// A single computed tile: raw bytes, one per pixel per channel, with no
/// format beyond what the producing operator and its consumers agree on.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
	pub bytes: Vec<u8>,
	pub width: u32,
	pub height: u32,
}

impl MemoryRaster {
	pub fn filled(width: u32, height: u32, value: u8) -> Self {
		MemoryRaster {
			bytes: vec![value; (width as usize) * (height as usize)],
			width,
			height,
		}
	}
}

impl Raster for MemoryRaster {
	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// Downcasts a raster produced by this crate's operators back to
/// [`MemoryRaster`]. Operators within this ecosystem share the concrete
/// tile representation even though the engine only ever sees `dyn Raster`.
pub fn as_memory_raster(raster: &Arc<dyn Raster>) -> anyhow::Result<&MemoryRaster> {
	raster
		.as_any()
		.downcast_ref::<MemoryRaster>()
		.ok_or_else(|| anyhow::anyhow!("expected a pixelgraph_operators::MemoryRaster tile"))
}

/// A band whose tiles are computed by a closure and cached by `(tile_x,
/// tile_y)`.
pub struct ComputedBand<F>
where
	F: Fn(u32, u32) -> anyhow::Result<Arc<dyn Raster>> + Send + Sync,
{
	cache: DashMap<(u32, u32), Arc<dyn Raster>>,
	compute: F,
}

impl<F> ComputedBand<F>
where
	F: Fn(u32, u32) -> anyhow::Result<Arc<dyn Raster>> + Send + Sync,
{
	pub fn new(compute: F) -> Self {
		ComputedBand {
			cache: DashMap::new(),
			compute,
		}
	}
}

impl<F> Band for ComputedBand<F>
where
	F: Fn(u32, u32) -> anyhow::Result<Arc<dyn Raster>> + Send + Sync,
{
	fn compute_tile(&self, tile_x: u32, tile_y: u32) -> anyhow::Result<Arc<dyn Raster>> {
		if let Some(cached) = self.cache.get(&(tile_x, tile_y)) {
			log::trace!("tile ({tile_x}, {tile_y}) served from cache");
			return Ok(cached.clone());
		}
		log::trace!("computing tile ({tile_x}, {tile_y})");
		let raster = (self.compute)(tile_x, tile_y)?;
		self.cache.insert((tile_x, tile_y), raster.clone());
		Ok(raster)
	}
}

/// A product backed by a fixed list of bands, all sharing `(width,
/// height)`.
pub struct MemoryProduct {
	pub width: u32,
	pub height: u32,
	pub bands: Vec<Arc<dyn Band>>,
}

impl Product for MemoryProduct {
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
