//! Geometry normalization.
//!
//! Turns the raw floor-plan bundle into a canonical, validated set of
//! navigation anchors plus the wall/passage/room topology the graph
//! builder needs for its visibility and room-connectivity tests.
//!
//! ```text
//!  FloorPlan ──validate──► snap openings ──► junctions ──► candidates
//!                                                              │
//!                                        merge (priority) ◄────┘
//!                                              │
//!                                              ▼
//!                                     NormalizedGeometry
//! ```

mod anchor;
mod normalizer;

pub use anchor::{Anchor, NormalizedGeometry, Passage, RoomOutline, WallSegment};
pub use normalizer::GeometryNormalizer;
