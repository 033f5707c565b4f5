//! Shared floor-plan fixtures for the integration tests.

#![allow(dead_code)]

use disha_nav::floorplan::{Opening, Room, Wall};
use disha_nav::{FloorPlan, NavConfig, Navigator, Point2D, PositionSample};

pub fn p(x: f32, y: f32) -> Point2D {
    Point2D::new(x, y)
}

/// Closed rectangle of four walls named `{prefix}-south/east/north/west`.
pub fn box_walls(plan: FloorPlan, prefix: &str, min: Point2D, max: Point2D) -> FloorPlan {
    plan.with_wall(Wall::new(format!("{prefix}-south"), min, p(max.x, min.y)))
        .with_wall(Wall::new(format!("{prefix}-east"), p(max.x, min.y), max))
        .with_wall(Wall::new(format!("{prefix}-north"), max, p(min.x, max.y)))
        .with_wall(Wall::new(format!("{prefix}-west"), p(min.x, max.y), min))
}

/// Straight corridor: room R1 centred at (0,0), door D at (10,0), room R2
/// centred at (20,0).
pub fn corridor_plan() -> FloorPlan {
    box_walls(FloorPlan::new(), "outer", p(-10.0, -5.0), p(30.0, 5.0))
        .with_wall(Wall::new("mid", p(10.0, -5.0), p(10.0, 5.0)))
        .with_door(Opening::new("D", p(10.0, 0.0), "mid", 1.0))
        .with_room(Room::rect("R1", p(-10.0, -5.0), p(10.0, 5.0)))
        .with_room(Room::rect("R2", p(10.0, -5.0), p(30.0, 5.0)))
}

/// Two closed wings with no opening between them.
pub fn wings_plan() -> FloorPlan {
    let west = box_walls(FloorPlan::new(), "west", p(0.0, 0.0), p(20.0, 10.0));
    box_walls(west, "east", p(40.0, 0.0), p(60.0, 10.0))
        .with_wall(Wall::new("west-mid", p(10.0, 0.0), p(10.0, 10.0)))
        .with_wall(Wall::new("east-mid", p(50.0, 0.0), p(50.0, 10.0)))
        .with_door(Opening::new("west-door", p(10.0, 5.0), "west-mid", 1.0))
        .with_door(Opening::new("east-door", p(50.0, 5.0), "east-mid", 1.0))
        .with_room(Room::rect("A1", p(0.0, 0.0), p(10.0, 10.0)))
        .with_room(Room::rect("A2", p(10.0, 0.0), p(20.0, 10.0)))
        .with_room(Room::rect("B1", p(40.0, 0.0), p(50.0, 10.0)))
        .with_room(Room::rect("B2", p(50.0, 0.0), p(60.0, 10.0)))
}

/// The sample clinic floor plan shipped with the crate.
pub fn clinic_plan() -> FloorPlan {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("maps/clinic.yaml");
    FloorPlan::load(&path).expect("clinic floor plan")
}

pub fn navigator(plan: &FloorPlan) -> Navigator {
    Navigator::with_floor_plan(NavConfig::default(), plan).expect("navigator")
}

/// Samples along the x axis, one per timestamp starting at 1.
pub fn walk_x(xs: &[f32]) -> Vec<PositionSample> {
    xs.iter()
        .enumerate()
        .map(|(i, &x)| PositionSample::new(x, 0.0, i as u64 + 1))
        .collect()
}
