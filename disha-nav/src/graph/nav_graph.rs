//! Navigation graph arena.

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::Point2D;
use crate::error::GraphBuildError;

use super::node::{Edge, Node, NodeKind};
use super::topology::Topology;

/// Weighted navigation graph.
///
/// Nodes live in an arena indexed by position; every cross reference is
/// an index or an id, never a pointer. The graph is immutable once built:
/// updates produce a new graph (see [`NavGraph::with_temporary_node`]).
///
/// Ids absorbed by anchor merging resolve to the surviving node.
#[derive(Clone, Debug, Default)]
pub struct NavGraph {
    /// All nodes.
    nodes: Vec<Node>,

    /// Node id (and alias) to node index.
    index: HashMap<String, usize>,

    /// Adjacency list: adjacency[i] = [(neighbor_idx, weight), ...]
    adjacency: Vec<Vec<(usize, f32)>>,

    /// Edges as given (one entry per undirected or one-way edge).
    edges: Vec<Edge>,

    /// Geometry used to connect temporary nodes. Absent for graphs
    /// assembled from parts.
    topology: Option<Arc<Topology>>,
}

impl NavGraph {
    /// Assemble a graph from explicit nodes and edges.
    ///
    /// Fails when ids repeat, when an edge names a missing node, or when a
    /// weight is negative or not finite.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphBuildError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GraphBuildError::DuplicateNode(node.id.clone()));
            }
        }

        let mut adjacency = vec![Vec::new(); nodes.len()];
        for edge in &edges {
            let lookup = |id: &str| {
                index.get(id).copied().ok_or_else(|| GraphBuildError::DanglingEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    missing: id.to_string(),
                })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;

            if !(edge.weight.is_finite() && edge.weight >= 0.0) {
                return Err(GraphBuildError::InvalidWeight {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    weight: edge.weight,
                });
            }

            adjacency[from].push((to, edge.weight));
            if !edge.one_way {
                adjacency[to].push((from, edge.weight));
            }
        }

        Ok(Self {
            nodes,
            index,
            adjacency,
            edges,
            topology: None,
        })
    }

    /// Register merged ids as aliases of a node.
    pub(crate) fn with_aliases(mut self, aliases: impl IntoIterator<Item = (String, usize)>) -> Self {
        for (alias, idx) in aliases {
            self.index.entry(alias).or_insert(idx);
        }
        self
    }

    /// Attach the topology used for temporary-node connection.
    pub(crate) fn with_topology(mut self, topology: Arc<Topology>) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Index of a node id or alias.
    #[inline]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Look up a node by id or alias.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    /// Node at an arena index.
    #[inline]
    pub fn node_at(&self, idx: usize) -> Option<&Node> {
        self.nodes.get(idx)
    }

    /// Whether an id (or alias) names a node.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Adjacency list in the traversable direction.
    pub fn adjacency(&self) -> &[Vec<(usize, f32)>] {
        &self.adjacency
    }

    /// Outgoing neighbors of a node.
    pub fn neighbors(&self, idx: usize) -> &[(usize, f32)] {
        self.adjacency.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nearest permanent node to a position.
    pub fn nearest_node(&self, target: Point2D) -> Option<&Node> {
        self.nodes
            .iter()
            .filter(|n| !n.is_temporary())
            .min_by(|a, b| {
                a.position
                    .distance(&target)
                    .total_cmp(&b.position.distance(&target))
            })
    }

    /// Copy of this graph with an extra temporary node.
    ///
    /// With topology, the node is connected by the same room and
    /// visibility rules as every other node. Without it (graphs assembled
    /// from parts) it is connected to the nearest node only.
    pub fn with_temporary_node(
        &self,
        id: impl Into<String>,
        position: Point2D,
    ) -> Result<NavGraph, GraphBuildError> {
        let node = Node::temp(id, position);
        if self.index.contains_key(&node.id) {
            return Err(GraphBuildError::DuplicateNode(node.id));
        }

        let new_idx = self.nodes.len();
        let mut graph = self.clone();

        let links: Vec<(usize, f32)> = match &self.topology {
            Some(topo) => self
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| !n.is_temporary())
                .filter(|(i, n)| {
                    topo.connects(
                        (new_idx, &position, NodeKind::Temp),
                        (*i, &n.position, n.kind),
                    )
                })
                .map(|(i, n)| (i, topo.edge_weight((new_idx, position), (i, n.position))))
                .collect(),
            None => self
                .nearest_node(position)
                .and_then(|n| self.index_of(&n.id))
                .map(|i| (i, position.distance(&self.nodes[i].position)))
                .into_iter()
                .collect(),
        };

        graph.index.insert(node.id.clone(), new_idx);
        graph.adjacency.push(Vec::with_capacity(links.len()));
        for &(i, weight) in &links {
            graph.edges.push(Edge::new(node.id.clone(), self.nodes[i].id.clone(), weight));
            graph.adjacency[new_idx].push((i, weight));
            graph.adjacency[i].push((new_idx, weight));
        }
        graph.nodes.push(node);

        tracing::debug!(
            "Temporary node '{}' linked to {} nodes",
            graph.nodes[new_idx].id,
            links.len()
        );

        Ok(graph)
    }
}
