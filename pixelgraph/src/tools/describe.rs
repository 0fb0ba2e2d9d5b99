use crate::graph_doc::load_graph;
use anyhow::Result;
use pixelgraph_engine::disposer::dispose_all;
use pixelgraph_engine::initializer::initialize;
use pixelgraph_engine::GraphContext;
use pixelgraph_operators::Registry;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Path to a graph document (JSON).
	#[arg(required = true)]
	graph: PathBuf,
}

/// Initializes the graph (without running any tiling) and prints one line
/// per node: its id, operator name, reference count, and whether it's an
/// output node.
pub fn run(arguments: &Subcommand) -> Result<()> {
	let graph = load_graph(&arguments.graph)?;
	let registry = Registry::new_default();
	let mut context = GraphContext::new(&graph, Vec::new());

	let init_result = initialize(&mut context, &registry);

	println!("graph '{}' (version {}): {} node(s)", graph.id, graph.version, graph.nodes.len());
	for node in &graph.nodes {
		let ctx = &context.node_contexts[&node.id];
		println!(
			"  {} [{}] refs={} {}",
			node.id,
			node.operator_name,
			ctx.reference_count,
			if ctx.is_output() { "(output)" } else { "" }
		);
	}

	dispose_all(&mut context);
	init_result
}
