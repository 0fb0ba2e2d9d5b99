//! The fatal error kinds a graph execution can raise, as a typed enum
//! wrapped in `anyhow::Error` — callers that need to discriminate use
//! `anyhow::Error::downcast_ref::<GraphError>()`; callers that just want a
//! message use `Display`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
	/// The graph has zero nodes.
	EmptyGraph,
	/// A node references a source-node-id that doesn't resolve to any node.
	MissingSource { node_id: String, source_node_id: String },
	/// Operator construction or source/parameter wiring failed.
	OperatorInitializationFailed { node_id: String },
	/// Binding the configuration element onto the operator failed.
	ParameterInjectionFailed { node_id: String },
	/// A band tile pull threw.
	TileComputationFailed { node_id: String, tile_x: u32, tile_y: u32 },
}

impl fmt::Display for GraphError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GraphError::EmptyGraph => write!(f, "graph has zero nodes"),
			GraphError::MissingSource { node_id, source_node_id } => {
				write!(f, "node '{node_id}' references unknown source node '{source_node_id}'")
			}
			GraphError::OperatorInitializationFailed { node_id } => {
				write!(f, "operator initialization failed for node '{node_id}'")
			}
			GraphError::ParameterInjectionFailed { node_id } => {
				write!(f, "parameter injection failed for node '{node_id}'")
			}
			GraphError::TileComputationFailed { node_id, tile_x, tile_y } => {
				write!(f, "tile computation failed for node '{node_id}' at tile ({tile_x}, {tile_y})")
			}
		}
	}
}

impl std::error::Error for GraphError {}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn display_messages_name_the_node() {
		let err = GraphError::MissingSource {
			node_id: "write".into(),
			source_node_id: "missing".into(),
		};
		assert_eq!(err.to_string(), "node 'write' references unknown source node 'missing'");
	}

	#[test]
	fn downcast_through_anyhow_recovers_the_kind() {
		let wrapped: anyhow::Error = anyhow::Error::from(GraphError::EmptyGraph);
		let kind = wrapped.downcast_ref::<GraphError>();
		assert_eq!(kind, Some(&GraphError::EmptyGraph));
	}
}
