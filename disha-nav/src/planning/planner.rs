//! Path planner over the navigation graph.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::graph::NavGraph;

use super::dijkstra::dijkstra;

/// Ordered node path from start to goal inclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Canonical node ids (aliases already resolved).
    pub nodes: Vec<String>,
    /// Sum of edge weights along the path.
    pub cost: f32,
    /// Door nodes strictly between start and goal.
    pub door_crossings: usize,
}

impl Path {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a planned path (it holds at least the start).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Start equals goal.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn start(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn goal(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    /// The same path walked backwards.
    pub fn reversed(&self) -> Path {
        Path {
            nodes: self.nodes.iter().rev().cloned().collect(),
            ..self.clone()
        }
    }

    /// Straight-line length through the node positions (floor-plan units).
    pub fn geometric_length(&self, graph: &NavGraph) -> f32 {
        self.nodes
            .windows(2)
            .filter_map(|w| Some(graph.node(&w[0])?.position.distance(&graph.node(&w[1])?.position)))
            .sum()
    }
}

/// Compute the lowest-cost path between two nodes.
///
/// Ids may name merged primitives; they resolve to the node that absorbed
/// them. Start equal to goal yields a single-node path of zero cost.
pub fn plan(graph: &NavGraph, start: &str, goal: &str) -> Result<Path, PlanError> {
    let start_idx = graph
        .index_of(start)
        .ok_or_else(|| PlanError::UnknownNode(start.to_string()))?;
    let goal_idx = graph
        .index_of(goal)
        .ok_or_else(|| PlanError::UnknownNode(goal.to_string()))?;

    let result = dijkstra(graph.adjacency(), graph.nodes(), start_idx, goal_idx).ok_or_else(|| {
        PlanError::NoPath {
            start: start.to_string(),
            goal: goal.to_string(),
        }
    })?;

    let nodes: Vec<String> = result
        .path
        .iter()
        .filter_map(|&i| graph.node_at(i).map(|n| n.id.clone()))
        .collect();

    tracing::debug!(
        "Planned {} -> {}: {} nodes, cost {:.2}, {} doors",
        start,
        goal,
        nodes.len(),
        result.distance,
        result.door_crossings
    );

    Ok(Path {
        nodes,
        cost: result.distance,
        door_crossings: result.door_crossings,
    })
}
