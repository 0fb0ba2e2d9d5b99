//! Runtime state: [`NodeContext`] per node, collected into a
//! [`GraphContext`].

use crate::graph::{Graph, Node};
use crate::observer::Observer;
use crate::operator::{Operator, Product};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-node runtime record.
///
/// Mutated only by the Initializer (the exclusive writer during phase 2) and
/// read-only afterwards, so nothing here needs interior mutability: the
/// Initializer holds `&mut HashMap<String, NodeContext>` and never aliases
/// two entries' mutable borrows at once.
pub struct NodeContext<'g> {
	pub node: &'g Node,
	pub operator: Option<Box<dyn Operator>>,
	pub target_product: Option<Arc<dyn Product>>,
	/// Number of downstream nodes that declare this node as a source.
	/// Zero after dependency resolution marks this node as an output node.
	pub reference_count: u32,
	pub initialized: bool,
	pub source_products_by_slot: HashMap<String, Arc<dyn Product>>,
}

impl<'g> NodeContext<'g> {
	pub fn new(node: &'g Node) -> Self {
		NodeContext {
			node,
			operator: None,
			target_product: None,
			reference_count: 0,
			initialized: false,
			source_products_by_slot: HashMap::new(),
		}
	}

	pub fn is_output(&self) -> bool {
		self.reference_count == 0
	}
}

/// Collection of node contexts keyed by node id, the disposal stack, and the
/// set of output node contexts.
pub struct GraphContext<'g> {
	pub graph: &'g Graph,
	pub node_contexts: HashMap<String, NodeContext<'g>>,
	/// Completed-initialization order, front-insertion. The Disposer pops
	/// front-to-back, giving LIFO disposal without a mutable operator graph.
	pub init_order_stack: Vec<String>,
	pub output_node_ids: Vec<String>,
	pub observers: Vec<Box<dyn Observer>>,
	/// Set once Phase 1 dependency resolution has run. Guards
	/// [`crate::initializer::initialize`] against re-incrementing every
	/// node's `reference_count` on a second call against the same context.
	pub(crate) dependencies_resolved: bool,
}

impl<'g> GraphContext<'g> {
	/// Builds an empty context with one uninitialized `NodeContext` per node,
	/// matching the Initializer's expected input shape.
	pub fn new(graph: &'g Graph, observers: Vec<Box<dyn Observer>>) -> Self {
		let node_contexts = graph
			.nodes
			.iter()
			.map(|node| (node.id.clone(), NodeContext::new(node)))
			.collect();

		GraphContext {
			graph,
			node_contexts,
			init_order_stack: Vec::new(),
			output_node_ids: Vec::new(),
			observers,
			dependencies_resolved: false,
		}
	}

	pub fn output_contexts(&self) -> impl Iterator<Item = &NodeContext<'g>> {
		self.output_node_ids.iter().filter_map(|id| self.node_contexts.get(id))
	}
}
