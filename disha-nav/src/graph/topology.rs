//! Wall/room topology and the edge-admission rules derived from it.

use crate::config::{DistanceMetric, GraphConfig};
use crate::core::{Point2D, Segment2D, SegmentCrossing, polygon};
use crate::geometry::{NormalizedGeometry, Passage, RoomOutline, WallSegment};

use super::NodeKind;

/// Crossings closer than this (edge parameter) to an edge endpoint are
/// treated as the endpoint touching the wall.
const ENDPOINT_EPS: f32 = 1e-4;

/// Geometry retained alongside a built graph.
///
/// Node indices of the graph equal anchor indices of the normalized
/// geometry, so passages refer to their nodes by index. Nodes appended
/// later (temporary nodes) have no passage and no width.
#[derive(Clone, Debug)]
pub struct Topology {
    walls: Vec<WallSegment>,
    passages: Vec<Passage>,
    rooms: Vec<RoomOutline>,
    passage_widths: Vec<Option<f32>>,
    boundary_tolerance: f32,
    config: GraphConfig,
}

impl Topology {
    /// Capture the topology of a normalized floor plan.
    pub fn new(geometry: &NormalizedGeometry, boundary_tolerance: f32, config: GraphConfig) -> Self {
        Self {
            walls: geometry.walls.clone(),
            passages: geometry.passages.clone(),
            rooms: geometry.rooms.clone(),
            passage_widths: geometry.anchors.iter().map(|a| a.passage_width).collect(),
            boundary_tolerance,
            config,
        }
    }

    /// Rooms whose outline covers a node.
    ///
    /// A junction sits on the walls between rooms, so it is kept in its
    /// first covering room only; otherwise it would bridge two rooms
    /// without a door.
    pub fn rooms_covering(&self, position: Point2D, kind: NodeKind) -> Vec<usize> {
        let mut rooms: Vec<usize> = self
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, r)| polygon::covers(&r.polygon, position, self.boundary_tolerance))
            .map(|(i, _)| i)
            .collect();

        if kind == NodeKind::Junction {
            rooms.truncate(1);
        }
        rooms
    }

    /// Straight-line visibility between two node positions.
    ///
    /// The segment is blocked by any wall it crosses strictly between its
    /// endpoints, unless the crossing lies inside an opening whose node is
    /// one of the two endpoints. Parallel and collinear walls never block.
    pub fn line_of_sight(&self, from: (usize, Point2D), to: (usize, Point2D)) -> bool {
        let edge = Segment2D::new(from.1, to.1);

        for (wall_idx, wall) in self.walls.iter().enumerate() {
            let SegmentCrossing::At { point, t, .. } = edge.crossing(&wall.segment) else {
                continue;
            };

            if t <= ENDPOINT_EPS || t >= 1.0 - ENDPOINT_EPS {
                continue;
            }

            let through_opening = self.passages.iter().any(|p| {
                p.wall == wall_idx && (p.anchor == from.0 || p.anchor == to.0) && p.spans(point)
            });
            if !through_opening {
                return false;
            }
        }
        true
    }

    /// Whether two nodes get an edge: same room, or line of sight.
    pub fn connects(&self, a: (usize, &Point2D, NodeKind), b: (usize, &Point2D, NodeKind)) -> bool {
        let rooms_a = self.rooms_covering(*a.1, a.2);
        let rooms_b = self.rooms_covering(*b.1, b.2);

        if rooms_a.iter().any(|r| rooms_b.contains(r)) {
            return true;
        }

        let homed_junction = |kind: NodeKind, rooms: &[usize]| kind == NodeKind::Junction && !rooms.is_empty();
        if homed_junction(a.2, &rooms_a) || homed_junction(b.2, &rooms_b) {
            return false;
        }

        self.line_of_sight((a.0, *a.1), (b.0, *b.1))
    }

    /// Walking cost between two nodes, including the narrow-passage
    /// penalty of each endpoint.
    pub fn edge_weight(&self, a: (usize, Point2D), b: (usize, Point2D)) -> f32 {
        let base = match self.config.distance_metric {
            DistanceMetric::Euclidean => a.1.distance(&b.1),
            DistanceMetric::Manhattan => a.1.manhattan_distance(&b.1),
        };
        base * self.width_penalty(a.0) * self.width_penalty(b.0)
    }

    /// Multiplicative penalty for a node's passage width (1.0 when wide
    /// enough or not a passage).
    pub fn width_penalty(&self, node: usize) -> f32 {
        let min = self.config.min_passage_width;
        match self.passage_widths.get(node).copied().flatten() {
            Some(w) if w < min => 1.0 + self.config.narrow_passage_penalty * (min - w) / min,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeometryConfig;
    use crate::floorplan::{FloorPlan, Opening, Room, Wall};
    use crate::geometry::GeometryNormalizer;
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32) -> Point2D {
        Point2D::new(x, y)
    }

    /// Two rooms split by a wall at x = 10 with a door at (10, 0).
    fn split_rooms(door_width: f32) -> (NormalizedGeometry, Topology) {
        let plan = FloorPlan::new()
            .with_wall(Wall::new("mid", p(10.0, -5.0), p(10.0, 5.0)))
            .with_door(Opening::new("d", p(10.0, 0.0), "mid", door_width))
            .with_room(Room::rect("left", p(0.0, -5.0), p(10.0, 5.0)))
            .with_room(Room::rect("right", p(10.0, -5.0), p(20.0, 5.0)));
        let geometry = GeometryNormalizer::new(GeometryConfig::default())
            .normalize(&plan)
            .unwrap();
        let topology = Topology::new(&geometry, 0.05, GraphConfig::default());
        (geometry, topology)
    }

    #[test]
    fn test_wall_blocks_unless_through_own_opening() {
        let (_, topo) = split_rooms(1.0);
        let far = 99;

        // Crosses the wall inside the door span but neither end is the door
        assert!(!topo.line_of_sight((far, p(5.0, 0.0)), (far + 1, p(15.0, 0.0))));

        // Door node index 0 as an endpoint: touching at the end never blocks
        assert!(topo.line_of_sight((0, p(10.0, 0.0)), (far, p(15.0, 0.0))));

        // Crossing outside the opening is blocked
        assert!(!topo.line_of_sight((far, p(5.0, 4.0)), (far + 1, p(15.0, 4.0))));
    }

    #[test]
    fn test_parallel_wall_never_blocks() {
        let (_, topo) = split_rooms(1.0);
        assert!(topo.line_of_sight((50, p(10.0, -8.0)), (51, p(10.0, 8.0))));
    }

    #[test]
    fn test_rooms_covering() {
        let (_, topo) = split_rooms(1.0);
        assert_eq!(topo.rooms_covering(p(10.0, 0.0), NodeKind::Door), vec![0, 1]);
        assert_eq!(topo.rooms_covering(p(10.0, 5.0), NodeKind::Junction), vec![0]);
        assert!(topo.rooms_covering(p(30.0, 0.0), NodeKind::Poi).is_empty());
    }

    #[test]
    fn test_narrow_passage_penalty() {
        let (geometry, topo) = split_rooms(0.45);
        let door = geometry.anchor_index("d").unwrap();
        assert_relative_eq!(topo.width_penalty(door), 1.5);

        let left = geometry.anchor_index("left").unwrap();
        assert_relative_eq!(topo.width_penalty(left), 1.0);
        assert_relative_eq!(
            topo.edge_weight((left, p(5.0, 0.0)), (door, p(10.0, 0.0))),
            7.5
        );
    }

    #[test]
    fn test_manhattan_metric() {
        let (geometry, _) = split_rooms(1.0);
        let config = GraphConfig {
            distance_metric: DistanceMetric::Manhattan,
            ..GraphConfig::default()
        };
        let topo = Topology::new(&geometry, 0.05, config);
        assert_relative_eq!(topo.edge_weight((90, p(0.0, 0.0)), (91, p(3.0, 4.0))), 7.0);
    }
}
