//! Graph builder: normalized geometry to navigation graph.

use std::sync::Arc;

use crate::config::NavConfig;
use crate::error::GraphBuildError;
use crate::geometry::NormalizedGeometry;

use super::nav_graph::NavGraph;
use super::node::{Edge, Node};
use super::topology::Topology;

/// Builds a [`NavGraph`] from [`NormalizedGeometry`].
///
/// Every anchor becomes a node. Two nodes are joined when they lie in the
/// same room or can see each other (see [`Topology::line_of_sight`]).
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    config: NavConfig,
}

impl GraphBuilder {
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    /// Build the graph.
    ///
    /// One-way rules turn the edge between their anchors into a directed
    /// edge; a rule whose anchors are not connected is logged and ignored.
    pub fn build(&self, geometry: &NormalizedGeometry) -> Result<NavGraph, GraphBuildError> {
        let topology = Topology::new(
            geometry,
            self.config.geometry.boundary_tolerance,
            self.config.graph.clone(),
        );

        let nodes: Vec<Node> = geometry
            .anchors
            .iter()
            .map(|a| Node::new(a.id.clone(), a.position, a.kind))
            .collect();

        let n = nodes.len();
        let mut edges = Vec::new();
        let mut pairs = Vec::new();

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (&nodes[i], &nodes[j]);
                if !topology.connects((i, &a.position, a.kind), (j, &b.position, b.kind)) {
                    continue;
                }
                let weight = topology.edge_weight((i, a.position), (j, b.position));
                pairs.push((i, j));
                edges.push(Edge::new(a.id.clone(), b.id.clone(), weight));
            }
        }

        for &(from, to) in &geometry.one_way {
            let found = pairs
                .iter()
                .position(|&(i, j)| (i, j) == (from, to) || (j, i) == (from, to));
            match found {
                Some(e) => {
                    let weight = edges[e].weight;
                    edges[e] = Edge::one_way(nodes[from].id.clone(), nodes[to].id.clone(), weight);
                }
                None => tracing::warn!(
                    "One-way rule {} -> {} ignored: anchors are not connected",
                    nodes[from].id,
                    nodes[to].id
                ),
            }
        }

        let aliases: Vec<(String, usize)> = geometry
            .anchors
            .iter()
            .enumerate()
            .flat_map(|(i, a)| a.absorbed.iter().map(move |id| (id.clone(), i)))
            .collect();

        let graph = NavGraph::from_parts(nodes, edges)?
            .with_aliases(aliases)
            .with_topology(Arc::new(topology));

        tracing::info!(
            "Built navigation graph: {} nodes, {} edges",
            graph.len(),
            graph.edge_count()
        );

        Ok(graph)
    }
}
