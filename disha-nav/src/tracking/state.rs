//! Tracker states, progress and signals.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Live progress tracker state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TrackerState {
    /// Route accepted, no position seen yet
    AwaitingPosition,

    /// Walking towards the target of instruction `i`
    OnInstruction(usize),

    /// Left the route; waiting for a new instruction sequence
    Deviated,

    /// Final instruction completed
    Arrived,

    /// Navigation cancelled
    Cancelled,
}

impl TrackerState {
    /// Is this a terminal state?
    pub fn is_terminal(&self) -> bool {
        matches!(self, TrackerState::Arrived | TrackerState::Cancelled)
    }

    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            TrackerState::AwaitingPosition => "AwaitingPosition",
            TrackerState::OnInstruction(_) => "OnInstruction",
            TrackerState::Deviated => "Deviated",
            TrackerState::Arrived => "Arrived",
            TrackerState::Cancelled => "Cancelled",
        }
    }
}

/// Walker progress against the active instruction sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressState {
    pub instruction_index: usize,
    pub last_position: Option<Point2D>,
    /// Timestamp of the last accepted sample. Survives route changes so
    /// stale samples stay stale.
    pub last_timestamp: Option<u64>,
    /// Sum of cross-track distances since the last advance (floor-plan units).
    pub accumulated_error: f32,
    pub deviated: bool,
    /// Target node of the last completed instruction (or the route start).
    pub last_confirmed_node: Option<String>,
}

/// Position fix from the positioning collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub x: f32,
    pub y: f32,
    /// Monotonic timestamp (any unit, typically milliseconds).
    pub timestamp: u64,
}

impl PositionSample {
    pub fn new(x: f32, y: f32, timestamp: u64) -> Self {
        Self { x, y, timestamp }
    }

    /// Sample position in floor-plan units.
    #[inline]
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// What the replanning trigger needs to plan again.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplanRequest {
    /// Last known position (floor-plan units).
    pub position: Point2D,
    pub last_confirmed_node: Option<String>,
    /// Instruction that was active when the walker deviated.
    pub instruction_index: usize,
}

/// Signal emitted to the instruction consumer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TrackerEvent {
    /// Instruction `index` is now active.
    Advance { index: usize },

    /// Instruction `index` was the last one and is complete.
    Arrived { index: usize },

    /// The walker left the route.
    ReplanNeeded(ReplanRequest),
}

impl TrackerEvent {
    /// Event name for logging
    pub fn name(&self) -> &'static str {
        match self {
            TrackerEvent::Advance { .. } => "advance",
            TrackerEvent::Arrived { .. } => "arrived",
            TrackerEvent::ReplanNeeded(_) => "replan-needed",
        }
    }
}
