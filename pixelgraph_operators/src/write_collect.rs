//! `write_collect`: a one-source sink operator that forwards its upstream's
//! tiles unchanged. Its only job is to exist as the Write end of a chain
//! so the scheduler has something to call an output node.

use anyhow::{Result, anyhow, bail};
use pixelgraph_engine::{Band, Operator, OperatorCapabilities, Product};
use std::sync::Arc;

pub struct WriteCollect {
	source: Option<Arc<dyn Product>>,
}

impl WriteCollect {
	pub fn new() -> Self {
		WriteCollect { source: None }
	}
}

impl Default for WriteCollect {
	fn default() -> Self {
		Self::new()
	}
}

impl Operator for WriteCollect {
	fn set_source_product(&mut self, slot_name: &str, product: Arc<dyn Product>) -> Result<()> {
		if slot_name != "in" {
			bail!("'write_collect' only declares a source slot named 'in', got '{slot_name}'");
		}
		self.source = Some(product);
		Ok(())
	}

	fn target_product(&mut self) -> Result<Arc<dyn Product>> {
		self
			.source
			.clone()
			.ok_or_else(|| anyhow!("'write_collect' requires a source wired to slot 'in'"))
	}

	fn dispose(&mut self) -> Result<()> {
		Ok(())
	}

	fn capabilities(&self) -> OperatorCapabilities {
		OperatorCapabilities::default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::raster::{MemoryProduct, as_memory_raster};
	use crate::read_constant::ReadConstant;

	#[test]
	fn forwards_the_upstream_product_untouched() {
		let mut source = ReadConstant::new();
		source.apply_default_parameter("value", "5").unwrap();
		let source_product = source.target_product().unwrap();

		let mut sink = WriteCollect::new();
		sink.set_source_product("in", source_product).unwrap();
		let product = sink.target_product().unwrap();

		let tile = product.bands()[0].compute_tile(0, 0).unwrap();
		assert!(as_memory_raster(&tile).unwrap().bytes.iter().all(|&b| b == 5));
	}

	#[test]
	fn missing_source_fails() {
		let mut sink = WriteCollect::new();
		assert!(sink.target_product().is_err());
	}

	#[test]
	fn rejects_unknown_slot_names() {
		let mut sink = WriteCollect::new();
		let dummy: Arc<dyn Product> = Arc::new(MemoryProduct {
			width: 1,
			height: 1,
			bands: vec![],
		});
		assert!(sink.set_source_product("unexpected", dummy).is_err());
	}
}
