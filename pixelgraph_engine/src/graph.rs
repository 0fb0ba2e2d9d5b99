//! The static, immutable-during-execution graph declaration.

use crate::param::ConfigElement;
use std::cell::OnceCell;

/// A single named input slot on a node, wired to an upstream node's target
/// product.
///
/// `resolved` is set exactly once by the Initializer's dependency-resolution
/// phase; it records only that the source id was validated, not the
/// upstream node itself. The actual upstream lookup stays a by-id relation
/// into `GraphContext`'s map rather than an owning pointer, so `Graph` never
/// borrows itself.
#[derive(Debug)]
pub struct NodeSource {
	pub slot_name: String,
	pub source_node_id: String,
	resolved: OnceCell<()>,
}

impl NodeSource {
	pub fn new(slot_name: impl Into<String>, source_node_id: impl Into<String>) -> Self {
		NodeSource {
			slot_name: slot_name.into(),
			source_node_id: source_node_id.into(),
			resolved: OnceCell::new(),
		}
	}

	pub fn is_resolved(&self) -> bool {
		self.resolved.get().is_some()
	}

	/// Marks this source as resolved. Idempotent: a second call is a no-op,
	/// matching the Initializer's own idempotent re-entry.
	pub(crate) fn mark_resolved(&self) {
		let _ = self.resolved.set(());
	}
}

/// A named instance of an operator within a graph. Immutable during
/// execution.
#[derive(Debug)]
pub struct Node {
	pub id: String,
	pub operator_name: String,
	pub sources: Vec<NodeSource>,
	pub configuration: Option<ConfigElement>,
}

impl Node {
	pub fn new(id: impl Into<String>, operator_name: impl Into<String>) -> Self {
		Node {
			id: id.into(),
			operator_name: operator_name.into(),
			sources: Vec::new(),
			configuration: None,
		}
	}

	pub fn with_source(mut self, slot_name: impl Into<String>, source_node_id: impl Into<String>) -> Self {
		self.sources.push(NodeSource::new(slot_name, source_node_id));
		self
	}

	pub fn with_configuration(mut self, configuration: ConfigElement) -> Self {
		self.configuration = Some(configuration);
		self
	}
}

/// The static declaration of a processing pipeline. Conceptually a DAG;
/// acyclicity is assumed of the caller but the Initializer still guards
/// against cyclic references rather than recursing unboundedly.
#[derive(Debug)]
pub struct Graph {
	pub id: String,
	pub version: String,
	pub nodes: Vec<Node>,
}

impl Graph {
	pub fn new(id: impl Into<String>, version: impl Into<String>, nodes: Vec<Node>) -> Self {
		Graph {
			id: id.into(),
			version: version.into(),
			nodes,
		}
	}

	pub fn node_by_id(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn node_source_starts_unresolved_and_marks_idempotently() {
		let source = NodeSource::new("in", "upstream");
		assert!(!source.is_resolved());
		source.mark_resolved();
		source.mark_resolved();
		assert!(source.is_resolved());
	}

	#[test]
	fn node_by_id_finds_and_misses() {
		let graph = Graph::new(
			"g",
			"1",
			vec![Node::new("a", "read"), Node::new("b", "write").with_source("in", "a")],
		);
		assert_eq!(graph.node_by_id("a").unwrap().operator_name, "read");
		assert!(graph.node_by_id("missing").is_none());
	}
}
