//! JSON deserialization of an already-parsed graph document into
//! `pixelgraph_engine::graph::Graph`. The engine itself only ever consumes
//! an already-parsed in-memory graph; JSON is simply this crate's choice
//! of serialized form for that document.

use anyhow::{Context, Result, bail};
use pixelgraph_engine::{ConfigElement, Graph, Node};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct GraphDoc {
	id: String,
	#[serde(default = "default_version")]
	version: String,
	nodes: Vec<NodeDoc>,
}

fn default_version() -> String {
	"1".to_string()
}

#[derive(Debug, Deserialize)]
struct NodeDoc {
	id: String,
	operator: String,
	#[serde(default)]
	sources: Vec<SourceDoc>,
	#[serde(default)]
	configuration: Option<serde_json::Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct SourceDoc {
	slot: String,
	node: String,
}

/// Reads and parses a graph document from `path`.
pub fn load_graph(path: &Path) -> Result<Graph> {
	let text = std::fs::read_to_string(path).with_context(|| format!("reading graph document '{}'", path.display()))?;
	parse_graph(&text).with_context(|| format!("parsing graph document '{}'", path.display()))
}

/// Parses a graph document from a JSON string.
pub fn parse_graph(text: &str) -> Result<Graph> {
	let doc: GraphDoc = serde_json::from_str(text).context("deserializing graph document")?;

	let nodes = doc
		.nodes
		.into_iter()
		.map(|node_doc| {
			let mut node = Node::new(node_doc.id, node_doc.operator);
			for source in node_doc.sources {
				node = node.with_source(source.slot, source.node);
			}
			if let Some(configuration) = node_doc.configuration {
				node = node.with_configuration(config_from_map("configuration", &configuration)?);
			}
			Ok(node)
		})
		.collect::<Result<Vec<Node>>>()?;

	Ok(Graph::new(doc.id, doc.version, nodes))
}

/// Converts a JSON object into a [`ConfigElement`] branch: each entry is
/// either a leaf (string value) or a nested branch (object value). Any
/// other JSON type at a configuration position is rejected — the
/// configuration tree only carries string values.
fn config_from_map(name: &str, map: &serde_json::Map<String, Value>) -> Result<ConfigElement> {
	let children = map
		.iter()
		.map(|(key, value)| config_from_value(key, value))
		.collect::<Result<Vec<ConfigElement>>>()?;
	Ok(ConfigElement::branch(name, children))
}

fn config_from_value(name: &str, value: &Value) -> Result<ConfigElement> {
	match value {
		Value::String(s) => Ok(ConfigElement::leaf(name, s.clone())),
		Value::Number(n) => Ok(ConfigElement::leaf(name, n.to_string())),
		Value::Bool(b) => Ok(ConfigElement::leaf(name, b.to_string())),
		Value::Object(map) => config_from_map(name, map),
		Value::Null => bail!("configuration entry '{name}' is null"),
		Value::Array(_) => bail!("configuration entry '{name}' is an array, expected a string, number, bool or object"),
	}
}
