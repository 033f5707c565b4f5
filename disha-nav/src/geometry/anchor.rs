//! Output types of the geometry normalizer.

use crate::core::{Point2D, Segment2D};
use crate::floorplan::OpeningKind;
use crate::graph::NodeKind;

/// A position at which a navigation decision can occur.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor {
    /// Id of the primitive that produced this anchor.
    pub id: String,
    pub kind: NodeKind,
    pub position: Point2D,
    /// Ids of lower-priority anchors merged into this one.
    pub absorbed: Vec<String>,
    /// Width of the passage for door/window anchors.
    pub passage_width: Option<f32>,
}

/// A validated wall.
#[derive(Clone, Debug, PartialEq)]
pub struct WallSegment {
    pub id: String,
    pub segment: Segment2D,
}

/// A door or window snapped onto its wall.
#[derive(Clone, Debug, PartialEq)]
pub struct Passage {
    pub id: String,
    pub kind: OpeningKind,
    /// Index into [`NormalizedGeometry::walls`].
    pub wall: usize,
    /// Centre projected onto the wall.
    pub center: Point2D,
    pub width: f32,
    /// Index of the anchor that represents this passage after merging.
    pub anchor: usize,
}

impl Passage {
    /// Whether a point on the wall falls inside the opening.
    #[inline]
    pub fn spans(&self, point: Point2D) -> bool {
        self.center.distance(&point) <= self.width * 0.5
    }
}

/// A validated room outline.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomOutline {
    pub id: String,
    pub polygon: Vec<Point2D>,
}

/// Canonical geometry consumed by the graph builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedGeometry {
    pub anchors: Vec<Anchor>,
    pub walls: Vec<WallSegment>,
    pub passages: Vec<Passage>,
    pub rooms: Vec<RoomOutline>,
    /// One-way rules resolved to (from, to) anchor indices.
    pub one_way: Vec<(usize, usize)>,
}

impl NormalizedGeometry {
    /// Find the anchor index for an id, including absorbed ids.
    pub fn anchor_index(&self, id: &str) -> Option<usize> {
        self.anchors
            .iter()
            .position(|a| a.id == id || a.absorbed.iter().any(|x| x == id))
    }
}
