//! Line segment type using endpoint representation.

use super::Point2D;

/// Result of intersecting two segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentCrossing {
    /// Segments do not meet.
    Disjoint,
    /// Segments are parallel or collinear (never treated as a crossing).
    Parallel,
    /// Segments meet at a single point.
    At {
        /// Intersection point.
        point: Point2D,
        /// Parameter along `self` in [0, 1].
        t: f32,
        /// Parameter along `other` in [0, 1].
        s: f32,
    },
}

/// A 2D line segment defined by its endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2D {
    /// Start point of the segment.
    pub start: Point2D,
    /// End point of the segment.
    pub end: Point2D,
}

impl Segment2D {
    /// Create a new segment from two points.
    #[inline]
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Direction vector (end - start), not normalized.
    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.start
    }

    /// Point at parameter t (0 = start, 1 = end).
    #[inline]
    pub fn point_at(&self, t: f32) -> Point2D {
        self.start + self.direction() * t
    }

    /// Project a point onto the infinite line, returning the parameter t.
    ///
    /// Degenerate (zero-length) segments project everything to t = 0.
    #[inline]
    pub fn project_point(&self, point: Point2D) -> f32 {
        let d = self.direction();
        let len_sq = d.dot(&d);
        if len_sq < f32::EPSILON {
            return 0.0;
        }
        (point - self.start).dot(&d) / len_sq
    }

    /// Closest point on the segment (clamped projection).
    #[inline]
    pub fn closest_point(&self, point: Point2D) -> Point2D {
        self.point_at(self.project_point(point).clamp(0.0, 1.0))
    }

    /// Distance from a point to the segment (not the infinite line).
    #[inline]
    pub fn distance_to_point(&self, point: Point2D) -> f32 {
        point.distance(&self.closest_point(point))
    }

    /// Intersect with another segment.
    ///
    /// Parallel and collinear pairs report [`SegmentCrossing::Parallel`]
    /// regardless of overlap.
    pub fn crossing(&self, other: &Segment2D) -> SegmentCrossing {
        let d1 = self.direction();
        let d2 = other.direction();

        let cross = d1.cross(&d2);
        let scale = d1.length() * d2.length();
        if scale < f32::EPSILON || cross.abs() <= 1e-6 * scale {
            return SegmentCrossing::Parallel;
        }

        let origin_diff = other.start - self.start;
        let t = origin_diff.cross(&d2) / cross;
        let s = origin_diff.cross(&d1) / cross;

        const EPS: f32 = 1e-6;
        if (-EPS..=1.0 + EPS).contains(&t) && (-EPS..=1.0 + EPS).contains(&s) {
            let t = t.clamp(0.0, 1.0);
            SegmentCrossing::At {
                point: self.point_at(t),
                t,
                s: s.clamp(0.0, 1.0),
            }
        } else {
            SegmentCrossing::Disjoint
        }
    }
}
