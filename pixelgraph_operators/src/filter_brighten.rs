//! `filter_brighten`: a one-source operator that scales every byte of its
//! upstream's tiles by a configurable factor. The simplest possible
//! pass-through-shaped filter, used as the middle stage of a linear chain.

use crate::raster::{ComputedBand, MemoryProduct, MemoryRaster, as_memory_raster};
use anyhow::{Result, anyhow, bail};
use pixelgraph_derive::ParamBind;
use pixelgraph_engine::{Band, Operator, OperatorCapabilities, Product, Raster};
use std::sync::Arc;

#[derive(Debug, Clone, ParamBind)]
pub struct Params {
	pub factor: f32,
}

impl Default for Params {
	fn default() -> Self {
		Params { factor: 1.0 }
	}
}

pub struct FilterBrighten {
	params: Params,
	source: Option<Arc<dyn Product>>,
}

impl FilterBrighten {
	pub fn new() -> Self {
		FilterBrighten {
			params: Params::default(),
			source: None,
		}
	}
}

impl Default for FilterBrighten {
	fn default() -> Self {
		Self::new()
	}
}

impl Operator for FilterBrighten {
	fn set_source_product(&mut self, slot_name: &str, product: Arc<dyn Product>) -> Result<()> {
		if slot_name != "in" {
			bail!("'filter_brighten' only declares a source slot named 'in', got '{slot_name}'");
		}
		self.source = Some(product);
		Ok(())
	}

	fn target_product(&mut self) -> Result<Arc<dyn Product>> {
		let upstream = self
			.source
			.clone()
			.ok_or_else(|| anyhow!("'filter_brighten' requires a source wired to slot 'in'"))?;
		let factor = self.params.factor;

		let bands: Vec<Arc<dyn Band>> = upstream
			.bands()
			.iter()
			.map(|upstream_band| {
				let upstream_band = upstream_band.clone();
				Arc::new(ComputedBand::new(move |tile_x, tile_y| {
					let tile = upstream_band.compute_tile(tile_x, tile_y)?;
					let source = as_memory_raster(&tile)?;
					let bytes = source
						.bytes
						.iter()
						.map(|&v| (f32::from(v) * factor).clamp(0.0, 255.0) as u8)
						.collect();
					Ok(Arc::new(MemoryRaster {
						bytes,
						width: source.width,
						height: source.height,
					}) as Arc<dyn Raster>)
				})) as Arc<dyn Band>
			})
			.collect();

		Ok(Arc::new(MemoryProduct {
			width: upstream.scene_width(),
			height: upstream.scene_height(),
			bands,
		}))
	}

	fn dispose(&mut self) -> Result<()> {
		Ok(())
	}

	fn capabilities(&self) -> OperatorCapabilities {
		OperatorCapabilities::default()
	}

	fn apply_default_parameter(&mut self, key: &str, value: &str) -> Result<()> {
		self.params.set_param(key, value)
	}
}
