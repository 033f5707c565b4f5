//! Floor-plan primitive bundle.
//!
//! This is the input handed over by the floor-plan collaborator: walls,
//! doors and windows attached to walls, room outlines, points of interest
//! and named zones. Cross references are by id only, never by nested
//! ownership, so rooms and walls can refer to each other freely.

mod io;
mod types;

pub use types::{FloorPlan, OneWayRule, Opening, OpeningKind, Poi, Room, Wall, WallKind, Zone};
