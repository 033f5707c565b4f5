//! Route planning.
//!
//! [`plan`] runs Dijkstra over the undirected interpretation of the graph
//! (one-way edges excepted). Equal-cost routes are ordered by fewer door
//! crossings, then by the lexicographic order of their node ids, so the
//! same request always yields the same route.

pub mod dijkstra;
mod planner;

pub use planner::{Path, plan};
