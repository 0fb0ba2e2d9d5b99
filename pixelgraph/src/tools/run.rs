use crate::graph_doc::load_graph;
use anyhow::Result;
use pixelgraph_core::{CancelFlag, Config, TerminalProgress};
use pixelgraph_engine::{LoggingObserver, execute_graph};
use pixelgraph_operators::Registry;
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Path to a graph document (JSON).
	#[arg(required = true)]
	graph: PathBuf,

	/// Tile width used for the output tile grid, if the graph's own
	/// backends don't otherwise dictate one.
	#[arg(long, default_value_t = 256)]
	tile_width: u32,

	/// Tile height used for the output tile grid.
	#[arg(long, default_value_t = 256)]
	tile_height: u32,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let graph = load_graph(&arguments.graph)?;
	let config = Config::new(arguments.tile_width, arguments.tile_height);
	let registry = Registry::new_default();
	let cancel = CancelFlag::new();
	let mut progress = TerminalProgress::new(cancel);

	execute_graph(&graph, vec![Box::new(LoggingObserver)], &registry, &config, &mut progress)
}
