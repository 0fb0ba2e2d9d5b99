//! Dependency resolution and topological operator construction.

use crate::context::GraphContext;
use crate::error::GraphError;
use crate::operator::Operator;
use crate::param::inject_parameters;
use anyhow::{Context, Result, bail};
use pixelgraph_derive::context;
use std::collections::HashSet;

/// Constructs an operator for a node, given its already-wired source
/// products and configuration. The engine never constructs operators
/// itself; this is the seam where the operator ecosystem plugs in.
pub trait OperatorContextInitializer {
	fn construct(&self, operator_name: &str) -> Result<Box<dyn Operator>>;
}

/// Runs both initializer phases on `context`, using `registry` to construct
/// operators by name.
///
/// Returns `Ok(())` on full success. On failure the context is left with
/// nodes initialized before the failing one still on `init_order_stack`,
/// for the caller to dispose.
///
/// Idempotent: a second call against a context whose dependencies are
/// already resolved only re-runs the recursive construction pass, which is
/// itself a per-node no-op once every output is initialized.
#[context("initializing graph context")]
pub fn initialize(context: &mut GraphContext<'_>, registry: &dyn OperatorContextInitializer) -> Result<()> {
	if context.graph.nodes.is_empty() {
		bail!(GraphError::EmptyGraph);
	}

	if !context.dependencies_resolved {
		resolve_dependencies(context)?;
		context.dependencies_resolved = true;

		// Declaration order, not hash-map iteration order: node registration
		// order is part of the scheduler's contract with observers and tests.
		let output_ids: Vec<String> = context
			.graph
			.nodes
			.iter()
			.filter(|node| context.node_contexts[&node.id].is_output())
			.map(|node| node.id.clone())
			.collect();
		context.output_node_ids = output_ids;
	}

	for output_id in context.output_node_ids.clone() {
		init_node_context(context, &output_id, registry, &mut HashSet::new())?;
	}

	Ok(())
}

/// Phase 1: for each node's declared sources, resolve the source-node-id
/// against the graph and bump the upstream node's reference count.
///
/// Guarded by `context.dependencies_resolved` in [`initialize`] — a second
/// call against the same context would otherwise double every node's
/// `reference_count`.
fn resolve_dependencies(context: &mut GraphContext<'_>) -> Result<()> {
	let mut increments: Vec<String> = Vec::new();

	for node in &context.graph.nodes {
		for source in &node.sources {
			if context.graph.node_by_id(&source.source_node_id).is_none() {
				return Err(GraphError::MissingSource {
					node_id: node.id.clone(),
					source_node_id: source.source_node_id.clone(),
				}
				.into());
			}
			source.mark_resolved();
			increments.push(source.source_node_id.clone());
		}
	}

	for upstream_id in increments {
		if let Some(ctx) = context.node_contexts.get_mut(&upstream_id) {
			ctx.reference_count += 1;
		}
	}

	Ok(())
}

/// Phase 2, recursive node-context initialization.
///
/// `visiting` guards against a cyclic graph recursing forever: a graph is
/// assumed acyclic by its caller, but a cycle is reported rather than
/// crashing the process.
fn init_node_context(
	context: &mut GraphContext<'_>,
	node_id: &str,
	registry: &dyn OperatorContextInitializer,
	visiting: &mut HashSet<String>,
) -> Result<()> {
	if context.node_contexts.get(node_id).map(|c| c.initialized).unwrap_or(false) {
		return Ok(());
	}

	if !visiting.insert(node_id.to_string()) {
		return Err(GraphError::OperatorInitializationFailed { node_id: node_id.to_string() })
			.context("cyclic source reference detected");
	}

	let sources: Vec<(String, String)> = context
		.node_contexts
		.get(node_id)
		.expect("node id came from the graph's own node list")
		.node
		.sources
		.iter()
		.map(|s| (s.slot_name.clone(), s.source_node_id.clone()))
		.collect();

	for (_, source_node_id) in &sources {
		init_node_context(context, source_node_id, registry, visiting)?;
	}

	let mut source_products = Vec::with_capacity(sources.len());
	for (slot_name, source_node_id) in &sources {
		let product = context
			.node_contexts
			.get(source_node_id)
			.and_then(|ctx| ctx.target_product.clone())
			.expect("upstream node was just initialized above");
		source_products.push((slot_name.clone(), product));
	}

	visiting.remove(node_id);

	let (operator_name, configuration) = {
		let node = &context.node_contexts[node_id].node;
		(node.operator_name.clone(), node.configuration.clone())
	};

	let mut operator = registry
		.construct(&operator_name)
		.with_context(|| GraphError::OperatorInitializationFailed { node_id: node_id.to_string() })?;

	for (slot_name, product) in &source_products {
		operator
			.set_source_product(slot_name, product.clone())
			.with_context(|| GraphError::OperatorInitializationFailed { node_id: node_id.to_string() })?;
	}

	inject_parameters(operator.as_mut(), configuration.as_ref())
		.with_context(|| GraphError::ParameterInjectionFailed { node_id: node_id.to_string() })?;

	let target_product = operator
		.target_product()
		.with_context(|| GraphError::OperatorInitializationFailed { node_id: node_id.to_string() })?;

	let ctx = context.node_contexts.get_mut(node_id).expect("node context exists for its own id");
	ctx.source_products_by_slot = source_products.into_iter().collect();
	ctx.operator = Some(operator);
	ctx.target_product = Some(target_product);
	ctx.initialized = true;

	context.init_order_stack.insert(0, node_id.to_string());

	Ok(())
}
