//! `read_constant`: a zero-source operator that produces a single-band
//! product filled with one constant byte value. Exercises the plain
//! "source" role at the head of a processing chain.

use crate::raster::{ComputedBand, MemoryProduct, MemoryRaster};
use anyhow::{Result, bail};
use pixelgraph_derive::ParamBind;
use pixelgraph_engine::{Band, Operator, OperatorCapabilities, Product, Raster};
use std::sync::Arc;

#[derive(Debug, Clone, ParamBind)]
pub struct Params {
	pub width: u32,
	pub height: u32,
	pub tile_width: u32,
	pub tile_height: u32,
	pub value: u8,
}

impl Default for Params {
	fn default() -> Self {
		Params {
			width: 256,
			height: 256,
			tile_width: 64,
			tile_height: 64,
			value: 0,
		}
	}
}

pub struct ReadConstant {
	params: Params,
}

impl ReadConstant {
	pub fn new() -> Self {
		ReadConstant { params: Params::default() }
	}
}

impl Default for ReadConstant {
	fn default() -> Self {
		Self::new()
	}
}

impl Operator for ReadConstant {
	fn set_source_product(&mut self, slot_name: &str, _product: Arc<dyn Product>) -> Result<()> {
		bail!("'read_constant' accepts no sources but received one on slot '{slot_name}'")
	}

	fn target_product(&mut self) -> Result<Arc<dyn Product>> {
		let value = self.params.value;
		let tile_width = self.params.tile_width;
		let tile_height = self.params.tile_height;
		let band: Arc<dyn Band> = Arc::new(ComputedBand::new(move |_tile_x, _tile_y| {
			Ok(Arc::new(MemoryRaster::filled(tile_width, tile_height, value)) as Arc<dyn Raster>)
		}));
		Ok(Arc::new(MemoryProduct {
			width: self.params.width,
			height: self.params.height,
			bands: vec![band],
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

#[cfg(test)]
mod tests {
	use super::*;
	use crate::raster::as_memory_raster;
	use pretty_assertions::assert_eq;

	#[test]
	fn produces_a_tile_filled_with_the_configured_value() {
		let mut op = ReadConstant::new();
		op.apply_default_parameter("value", "42").unwrap();
		op.apply_default_parameter("width", "64").unwrap();
		op.apply_default_parameter("height", "64").unwrap();
		op.apply_default_parameter("tile_width", "8").unwrap();
		op.apply_default_parameter("tile_height", "8").unwrap();

		let product = op.target_product().unwrap();
		let raster = product.bands()[0].compute_tile(0, 0).unwrap();
		assert_eq!(as_memory_raster(&raster).unwrap().bytes, vec![42u8; 64]);
	}

	#[test]
	fn rejects_any_declared_source() {
		let mut op = ReadConstant::new();
		let dummy: Arc<dyn Product> = Arc::new(MemoryProduct {
			width: 1,
			height: 1,
			bands: vec![],
		});
		assert!(op.set_source_product("in", dummy).is_err());
	}
}
