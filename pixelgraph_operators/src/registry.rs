//! Operator registry: the concrete shape of the Operator Context
//! Initialization collaborator the engine requires, modeled as operation
//! factories keyed by tag name.

use crate::filter_brighten::FilterBrighten;
use crate::merge_blend::MergeBlend;
use crate::read_constant::ReadConstant;
use crate::write_collect::WriteCollect;
use anyhow::{Result, anyhow};
use pixelgraph_engine::{Operator, OperatorContextInitializer};
use std::collections::HashMap;

/// Builds one operator instance from its declared name. One impl per
/// operator in this crate, keyed and registered the way a read/transform
/// factory split keys its operations by tag name.
pub trait OperatorFactory: Send + Sync {
	fn tag_name(&self) -> &'static str;
	fn build(&self) -> Box<dyn Operator>;
}

struct ReadConstantFactory;
impl OperatorFactory for ReadConstantFactory {
	fn tag_name(&self) -> &'static str {
		"read_constant"
	}
	fn build(&self) -> Box<dyn Operator> {
		Box::new(ReadConstant::new())
	}
}

struct FilterBrightenFactory;
impl OperatorFactory for FilterBrightenFactory {
	fn tag_name(&self) -> &'static str {
		"filter_brighten"
	}
	fn build(&self) -> Box<dyn Operator> {
		Box::new(FilterBrighten::new())
	}
}

struct MergeBlendFactory;
impl OperatorFactory for MergeBlendFactory {
	fn tag_name(&self) -> &'static str {
		"merge_blend"
	}
	fn build(&self) -> Box<dyn Operator> {
		Box::new(MergeBlend::new())
	}
}

struct WriteCollectFactory;
impl OperatorFactory for WriteCollectFactory {
	fn tag_name(&self) -> &'static str {
		"write_collect"
	}
	fn build(&self) -> Box<dyn Operator> {
		Box::new(WriteCollect::new())
	}
}

/// A name-keyed table of [`OperatorFactory`] impls, usable directly as the
/// Initializer's `OperatorContextInitializer` collaborator.
pub struct Registry {
	factories: HashMap<&'static str, Box<dyn OperatorFactory>>,
}

impl Registry {
	pub fn new_empty() -> Self {
		Registry { factories: HashMap::new() }
	}

	/// A registry pre-loaded with every demonstration operator in this
	/// crate.
	pub fn new_default() -> Self {
		let mut registry = Registry::new_empty();
		registry.register(Box::new(ReadConstantFactory));
		registry.register(Box::new(FilterBrightenFactory));
		registry.register(Box::new(MergeBlendFactory));
		registry.register(Box::new(WriteCollectFactory));
		registry
	}

	pub fn register(&mut self, factory: Box<dyn OperatorFactory>) {
		self.factories.insert(factory.tag_name(), factory);
	}
}

impl Default for Registry {
	fn default() -> Self {
		Registry::new_default()
	}
}

impl OperatorContextInitializer for Registry {
	fn construct(&self, operator_name: &str) -> Result<Box<dyn Operator>> {
		let factory = self
			.factories
			.get(operator_name)
			.ok_or_else(|| anyhow!("operator '{operator_name}' is not registered"))?;
		Ok(factory.build())
	}
}
