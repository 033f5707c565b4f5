//! Serde data model of the floor-plan primitives.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Construction type of a wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallKind {
    #[default]
    Interior,
    Exterior,
    Partition,
    Glass,
}

/// A wall segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,
    pub start: Point2D,
    pub end: Point2D,
    #[serde(default = "default_wall_thickness")]
    pub thickness: f32,
    #[serde(default, rename = "type")]
    pub kind: WallKind,
}

/// Door or window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    /// Lowercase name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            OpeningKind::Door => "door",
            OpeningKind::Window => "window",
        }
    }
}

/// A passage through a wall (door or window).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: String,
    /// Centre of the opening.
    pub position: Point2D,
    /// Rotation in the floor-plan editor (degrees). Informational only.
    #[serde(default)]
    pub angle: f32,
    /// Id of the wall the opening sits in.
    pub wall: String,
    /// Clear width of the opening.
    #[serde(default = "default_opening_width")]
    pub width: f32,
}

/// A room outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub polygon: Vec<Point2D>,
}

/// A point of interest (elevator, help desk, restroom...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub position: Point2D,
}

/// A named area represented by a single reference point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub position: Point2D,
}

/// Restricts the passage between two anchors to one direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneWayRule {
    pub from: String,
    pub to: String,
}

/// The complete primitive bundle for one floor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub doors: Vec<Opening>,
    #[serde(default)]
    pub windows: Vec<Opening>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub pois: Vec<Poi>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub one_way: Vec<OneWayRule>,
}

fn default_wall_thickness() -> f32 {
    0.1
}
fn default_opening_width() -> f32 {
    0.9
}

impl Wall {
    /// Create an interior wall with default thickness.
    pub fn new(id: impl Into<String>, start: Point2D, end: Point2D) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            thickness: default_wall_thickness(),
            kind: WallKind::Interior,
        }
    }
}

impl Opening {
    /// Create an opening with the given width.
    pub fn new(id: impl Into<String>, position: Point2D, wall: impl Into<String>, width: f32) -> Self {
        Self {
            id: id.into(),
            position,
            angle: 0.0,
            wall: wall.into(),
            width,
        }
    }
}

impl Room {
    /// Create an unnamed room.
    pub fn new(id: impl Into<String>, polygon: Vec<Point2D>) -> Self {
        Self {
            id: id.into(),
            name: None,
            polygon,
        }
    }

    /// Axis-aligned rectangular room.
    pub fn rect(id: impl Into<String>, min: Point2D, max: Point2D) -> Self {
        Self::new(
            id,
            vec![
                min,
                Point2D::new(max.x, min.y),
                max,
                Point2D::new(min.x, max.y),
            ],
        )
    }
}

impl Poi {
    /// Create an unnamed point of interest.
    pub fn new(id: impl Into<String>, position: Point2D) -> Self {
        Self {
            id: id.into(),
            name: None,
            position,
        }
    }
}

impl Zone {
    /// Create an unnamed zone.
    pub fn new(id: impl Into<String>, position: Point2D) -> Self {
        Self {
            id: id.into(),
            name: None,
            position,
        }
    }
}

impl FloorPlan {
    /// Create an empty floor plan.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wall(mut self, wall: Wall) -> Self {
        self.walls.push(wall);
        self
    }

    pub fn with_door(mut self, door: Opening) -> Self {
        self.doors.push(door);
        self
    }

    pub fn with_window(mut self, window: Opening) -> Self {
        self.windows.push(window);
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_poi(mut self, poi: Poi) -> Self {
        self.pois.push(poi);
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    pub fn with_one_way(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.one_way.push(OneWayRule {
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Iterate over doors and windows together with their kind.
    pub fn openings(&self) -> impl Iterator<Item = (OpeningKind, &Opening)> {
        self.doors
            .iter()
            .map(|d| (OpeningKind::Door, d))
            .chain(self.windows.iter().map(|w| (OpeningKind::Window, w)))
    }

    /// Total primitive count (for logging).
    pub fn primitive_count(&self) -> usize {
        self.walls.len()
            + self.doors.len()
            + self.windows.len()
            + self.rooms.len()
            + self.pois.len()
            + self.zones.len()
    }
}
