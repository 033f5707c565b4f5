//! Navigation graph.
//!
//! Nodes are the anchors produced by the geometry normalizer; edges join
//! anchors that share a room or can see each other through open space or
//! through their own door/window. The graph is built once per floor plan
//! and shared read-only through [`GraphCache`].

mod builder;
mod cache;
mod nav_graph;
mod node;
mod topology;

pub use builder::GraphBuilder;
pub use cache::GraphCache;
pub use nav_graph::NavGraph;
pub use node::{Edge, Node, NodeKind};
pub use topology::Topology;
