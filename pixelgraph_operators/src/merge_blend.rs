//! `merge_blend`: a two-source operator (named slots `base` and `overlay`)
//! that alpha-blends byte values, declaring the compute-all-bands
//! capability — a single tile request to the first band computes every
//! band's output in one pass.

use crate::raster::{ComputedBand, MemoryProduct, MemoryRaster, as_memory_raster};
use anyhow::{Result, anyhow, bail};
use pixelgraph_derive::ParamBind;
use pixelgraph_engine::{Band, Operator, OperatorCapabilities, Product, Raster};
use std::sync::Arc;

#[derive(Debug, Clone, ParamBind)]
pub struct Params {
	pub alpha: f32,
}

impl Default for Params {
	fn default() -> Self {
		Params { alpha: 0.5 }
	}
}

pub struct MergeBlend {
	params: Params,
	base: Option<Arc<dyn Product>>,
	overlay: Option<Arc<dyn Product>>,
}

impl MergeBlend {
	pub fn new() -> Self {
		MergeBlend {
			params: Params::default(),
			base: None,
			overlay: None,
		}
	}
}

impl Default for MergeBlend {
	fn default() -> Self {
		Self::new()
	}
}

impl Operator for MergeBlend {
	fn set_source_product(&mut self, slot_name: &str, product: Arc<dyn Product>) -> Result<()> {
		match slot_name {
			"base" => {
				self.base = Some(product);
				Ok(())
			}
			"overlay" => {
				self.overlay = Some(product);
				Ok(())
			}
			other => bail!("'merge_blend' only declares sources 'base' and 'overlay', got '{other}'"),
		}
	}

	fn target_product(&mut self) -> Result<Arc<dyn Product>> {
		let base = self.base.clone().ok_or_else(|| anyhow!("'merge_blend' requires a source wired to slot 'base'"))?;
		let overlay = self
			.overlay
			.clone()
			.ok_or_else(|| anyhow!("'merge_blend' requires a source wired to slot 'overlay'"))?;
		let alpha = self.params.alpha;

		let base_band = base.bands().first().cloned().ok_or_else(|| anyhow!("'base' source has no bands"))?;
		let overlay_band = overlay.bands().first().cloned().ok_or_else(|| anyhow!("'overlay' source has no bands"))?;

		// One closure co-populates both output bands in a single call, which
		// is exactly what the compute-all-bands capability promises the
		// scheduler: requesting band 0 is enough.
		let blend = move |tile_x: u32, tile_y: u32| -> Result<Arc<dyn Raster>> {
			let base_tile = as_memory_raster(&base_band.compute_tile(tile_x, tile_y)?)?.clone();
			let overlay_tile = as_memory_raster(&overlay_band.compute_tile(tile_x, tile_y)?)?.clone();
			let bytes = base_tile
				.bytes
				.iter()
				.zip(overlay_tile.bytes.iter())
				.map(|(&b, &o)| (f32::from(b) * (1.0 - alpha) + f32::from(o) * alpha).clamp(0.0, 255.0) as u8)
				.collect();
			Ok(Arc::new(MemoryRaster {
				bytes,
				width: base_tile.width,
				height: base_tile.height,
			}) as Arc<dyn Raster>)
		};

		let bands: Vec<Arc<dyn Band>> = vec![Arc::new(ComputedBand::new(blend.clone())), Arc::new(ComputedBand::new(blend))];

		Ok(Arc::new(MemoryProduct {
			width: base.scene_width(),
			height: base.scene_height(),
			bands,
		}))
	}

	fn dispose(&mut self) -> Result<()> {
		Ok(())
	}

	fn capabilities(&self) -> OperatorCapabilities {
		OperatorCapabilities { compute_all_bands: true }
	}

	fn apply_default_parameter(&mut self, key: &str, value: &str) -> Result<()> {
		self.params.set_param(key, value)
	}
}
