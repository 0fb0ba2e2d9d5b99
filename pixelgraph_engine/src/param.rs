//! The opaque per-node configuration tree and the default parameter
//! converter that binds it onto an operator.
//!
//! The document format the graph was parsed from is out of scope; by the
//! time it reaches this crate it is already a [`ConfigElement`] tree whose
//! leaf values are strings.

use crate::operator::Operator;
use anyhow::{Context, Result};
use pixelgraph_derive::context;

/// A node in the hierarchical name/value configuration tree: an optional
/// opaque parameter element whose children are themselves name/value pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigElement {
	pub name: String,
	pub value: Option<String>,
	pub children: Vec<ConfigElement>,
}

impl ConfigElement {
	pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
		ConfigElement {
			name: name.into(),
			value: Some(value.into()),
			children: Vec::new(),
		}
	}

	pub fn branch(name: impl Into<String>, children: Vec<ConfigElement>) -> Self {
		ConfigElement {
			name: name.into(),
			value: None,
			children,
		}
	}

	pub fn child(&self, name: &str) -> Option<&ConfigElement> {
		self.children.iter().find(|c| c.name == name)
	}
}

/// Binds `configuration` onto `operator`, honoring the custom-parameter-
/// conversion capability when the operator declares it, falling back to the
/// default by-name converter otherwise.
///
/// A `None` configuration is a no-op: the operator keeps its defaults.
#[context("binding configuration onto operator")]
pub fn inject_parameters(operator: &mut dyn Operator, configuration: Option<&ConfigElement>) -> Result<()> {
	let Some(config) = configuration else {
		return Ok(());
	};

	if let Some(custom) = operator.custom_parameter_conversion() {
		return custom
			.apply_configuration(config)
			.context("custom parameter conversion failed");
	}

	apply_default_conversion(operator, config)
}

/// The default converter: binds each child of `config` onto the operator by
/// name, via whatever `#[derive(ParamBind)]` generated for it. Leaves without
/// a value (pure branch nodes) are skipped — the default converter only
/// understands a flat property bag, matching the operators in this crate.
fn apply_default_conversion(operator: &mut dyn Operator, config: &ConfigElement) -> Result<()> {
	for child in &config.children {
		let Some(value) = &child.value else { continue };
		operator
			.apply_default_parameter(&child.name, value)
			.with_context(|| format!("setting parameter '{}'", child.name))?;
	}
	Ok(())
}
