//! Graph execution engine.
//!
//! Validates a declared processing graph, topologically wires node
//! execution contexts with source-product bindings, and drives tile-by-tile
//! pull computation across the graph's output products. The engine knows
//! nothing about pixels: operators, bands, and products are external
//! collaborators reached only through the traits in [`operator`].

pub mod context;
pub mod disposer;
pub mod error;
pub mod execute;
pub mod graph;
pub mod initializer;
pub mod observer;
pub mod operator;
pub mod param;
pub mod scheduler;

pub use context::{GraphContext, NodeContext};
pub use error::GraphError;
pub use execute::execute_graph;
pub use graph::{Graph, Node, NodeSource};
pub use initializer::OperatorContextInitializer;
pub use observer::{LoggingObserver, Observer};
pub use operator::{Band, CustomParameterConversion, Operator, OperatorCapabilities, Product, Raster};
pub use param::ConfigElement;
