//! hs-graph: node/component topology for plant and air loops.
//!
//! Every placed piece of equipment is a two-port component between an inlet
//! node and an outlet node. Splitters and mixers are plain nodes shared by
//! several ports. Each node carries either water or air, and a component
//! never joins the two; a coil that sits on a plant loop and an air loop is
//! placed once per loop.
//!
//! # Example
//!
//! ```
//! use hs_graph::{GraphBuilder, Medium};
//!
//! let mut builder = GraphBuilder::new();
//! let inlet = builder.add_node("Supply Inlet Node", Medium::Water);
//! let outlet = builder.add_node("Supply Outlet Node", Medium::Water);
//! builder.add_component("Hot Water Loop Pump", inlet, outlet);
//! let graph = builder.build().unwrap();
//!
//! assert!(graph.reachable(inlet, outlet));
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod traverse;
pub(crate) mod validate;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use graph::{Component, Graph, Medium, Node, Port, PortKind};
