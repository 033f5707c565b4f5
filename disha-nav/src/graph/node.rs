//! Node and edge types for the navigation graph.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Semantic type of a navigation node.
///
/// The type drives instruction semantics: crossing a door or window node
/// produces a dedicated "through" instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Door centre on its wall.
    Door,
    /// Window centre on its wall.
    Window,
    /// Point of interest.
    Poi,
    /// Named zone reference point.
    Zone,
    /// Room centre.
    Room,
    /// Point where two or more walls meet.
    Junction,
    /// Temporary node for a live position (replanning).
    Temp,
}

impl NodeKind {
    /// Merge priority (higher wins when two anchors collapse into one).
    #[inline]
    pub fn priority(&self) -> u8 {
        match self {
            NodeKind::Door => 6,
            NodeKind::Window => 5,
            NodeKind::Poi => 4,
            NodeKind::Zone => 3,
            NodeKind::Room => 2,
            NodeKind::Junction => 1,
            NodeKind::Temp => 0,
        }
    }

    /// Door or window.
    #[inline]
    pub fn is_passage(&self) -> bool {
        matches!(self, NodeKind::Door | NodeKind::Window)
    }

    /// Lowercase name for logging and display.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Door => "door",
            NodeKind::Window => "window",
            NodeKind::Poi => "poi",
            NodeKind::Zone => "zone",
            NodeKind::Room => "room",
            NodeKind::Junction => "junction",
            NodeKind::Temp => "temp",
        }
    }
}

/// A node in the navigation graph. Immutable once the graph is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within one graph.
    pub id: String,
    /// Position in floor-plan units.
    pub position: Point2D,
    /// Semantic type.
    pub kind: NodeKind,
}

impl Node {
    /// Create a new node.
    #[inline]
    pub fn new(id: impl Into<String>, position: Point2D, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            position,
            kind,
        }
    }

    /// Create a temporary live-position node.
    #[inline]
    pub fn temp(id: impl Into<String>, position: Point2D) -> Self {
        Self::new(id, position, NodeKind::Temp)
    }

    /// Check if this is a temporary node.
    #[inline]
    pub fn is_temporary(&self) -> bool {
        self.kind == NodeKind::Temp
    }
}

/// A weighted connection between two nodes.
///
/// Stored with a direction for representation; traversable both ways
/// unless `one_way` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Walking cost (non-negative).
    pub weight: f32,
    /// Only traversable from `from` to `to`.
    #[serde(default)]
    pub one_way: bool,
}

impl Edge {
    /// Create an undirected edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
            one_way: false,
        }
    }

    /// Create a directed (one-way) edge.
    pub fn one_way(from: impl Into<String>, to: impl Into<String>, weight: f32) -> Self {
        Self {
            one_way: true,
            ..Self::new(from, to, weight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let order = [
            NodeKind::Door,
            NodeKind::Window,
            NodeKind::Poi,
            NodeKind::Zone,
            NodeKind::Room,
            NodeKind::Junction,
            NodeKind::Temp,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].priority() > pair[1].priority());
        }
    }

    #[test]
    fn test_passage_kinds() {
        assert!(NodeKind::Door.is_passage());
        assert!(NodeKind::Window.is_passage());
        assert!(!NodeKind::Room.is_passage());
        assert!(!NodeKind::Junction.is_passage());
    }

    #[test]
    fn test_node_creation() {
        let node = Node::new("d1", Point2D::new(1.0, 2.0), NodeKind::Door);
        assert_eq!(node.id, "d1");
        assert!(!node.is_temporary());
        assert!(Node::temp("here", Point2D::ZERO).is_temporary());
    }

    #[test]
    fn test_edge_constructors() {
        assert!(!Edge::new("a", "b", 1.0).one_way);
        let e = Edge::one_way("a", "b", 2.0);
        assert!(e.one_way);
        assert_eq!(e.weight, 2.0);
    }
}
