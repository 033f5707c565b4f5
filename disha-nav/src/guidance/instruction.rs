//! Static instruction types.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Side of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnDirection {
    Left,
    Right,
    /// Heading reverses (beyond the turn-around angle).
    Around,
}

/// What the walker does for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstructionKind {
    /// Keep the current heading.
    #[default]
    Straight,
    /// Change heading by `degrees` (unsigned) towards `direction`, then walk.
    Turn { direction: TurnDirection, degrees: f32 },
    /// Pass through a door at the target node.
    ThroughDoor,
    /// Pass through a window opening at the target node.
    ThroughWindow,
}

impl InstructionKind {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            InstructionKind::Straight => "straight",
            InstructionKind::Turn { .. } => "turn",
            InstructionKind::ThroughDoor => "through door",
            InstructionKind::ThroughWindow => "through window",
        }
    }

    /// Door or window crossing.
    #[inline]
    pub fn is_crossing(&self) -> bool {
        matches!(self, InstructionKind::ThroughDoor | InstructionKind::ThroughWindow)
    }
}

/// One step of the route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    /// Meters to travel before the next decision point.
    pub distance: Option<f32>,
    /// Directive text.
    pub text: String,
    /// Point the walker must reach to complete this instruction.
    pub target: Point2D,
    /// Node at the target point.
    pub target_node: String,
    /// Expected walking line for this instruction (floor-plan units).
    /// A single point for crossings.
    pub polyline: Vec<Point2D>,
    /// Last instruction of the route.
    pub arrival: bool,
}

impl Instruction {
    /// Distance in meters, zero when unset.
    #[inline]
    pub fn meters(&self) -> f32 {
        self.distance.unwrap_or(0.0)
    }
}

/// Instruction sequence for one planned path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteGuidance {
    pub start_node: String,
    pub start_position: Point2D,
    pub goal_node: String,
    pub instructions: Vec<Instruction>,
    /// Sum of instruction distances (meters).
    pub total_distance: f32,
    /// Node ids the instructions were derived from.
    pub path: Vec<String>,
}

impl RouteGuidance {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
