//! Core geometric types shared by every stage of the engine.
//!
//! - [`Point2D`]: position / direction vector in floor-plan units
//! - [`Segment2D`]: line segment with intersection and projection queries
//! - [`polygon`]: centroid, containment and boundary distance for room outlines
//! - [`math`]: heading and angle helpers (counter-clockwise positive)

pub mod math;
mod point;
pub mod polygon;
mod segment;

pub use point::Point2D;
pub use segment::{Segment2D, SegmentCrossing};
