//! Live progress tracker.
//!
//! Single-writer state machine: feed it position samples one at a time
//! and it reports when the walker reaches the current instruction's
//! target, arrives, or leaves the route.

use crate::config::{NavConfig, TrackingConfig};
use crate::core::{Point2D, Segment2D};
use crate::guidance::{Instruction, InstructionKind, RouteGuidance};

use super::state::{PositionSample, ProgressState, ReplanRequest, TrackerEvent, TrackerState};

/// Tracks a walker against a [`RouteGuidance`].
pub struct ProgressTracker {
    /// Tolerances converted to floor-plan units.
    config: TrackingConfig,
    guidance: Option<RouteGuidance>,
    state: TrackerState,
    progress: ProgressState,
    replan: Option<ReplanRequest>,
}

impl ProgressTracker {
    /// Create an idle tracker. Tolerances are read in meters.
    pub fn new(config: &NavConfig) -> Self {
        let t = &config.tracking;
        Self {
            config: TrackingConfig {
                straight_proximity: config.meters_to_units(t.straight_proximity),
                turn_proximity: config.meters_to_units(t.turn_proximity),
                door_proximity: config.meters_to_units(t.door_proximity),
                window_proximity: config.meters_to_units(t.window_proximity),
                deviation_threshold: config.meters_to_units(t.deviation_threshold),
                queue_capacity: t.queue_capacity,
            },
            guidance: None,
            state: TrackerState::AwaitingPosition,
            progress: ProgressState::default(),
            replan: None,
        }
    }

    /// Create a tracker that has already accepted `guidance`.
    pub fn with_guidance(config: &NavConfig, guidance: RouteGuidance) -> Self {
        let mut tracker = Self::new(config);
        tracker.accept(guidance);
        tracker
    }

    /// Replace the active instruction sequence and reset progress.
    ///
    /// Ignored once arrived or cancelled. Returns whether the sequence was
    /// taken.
    pub fn accept(&mut self, guidance: RouteGuidance) -> bool {
        if self.state.is_terminal() {
            tracing::warn!("Route rejected: navigation already {}", self.state.name());
            return false;
        }

        tracing::info!(
            "Accepted route {} -> {}: {} instructions",
            guidance.start_node,
            guidance.goal_node,
            guidance.len()
        );

        self.progress = ProgressState {
            last_timestamp: self.progress.last_timestamp,
            last_confirmed_node: Some(guidance.start_node.clone()),
            ..ProgressState::default()
        };
        self.guidance = Some(guidance);
        self.replan = None;
        self.transition(TrackerState::AwaitingPosition);
        true
    }

    /// Apply one position sample.
    ///
    /// Stale samples (timestamp not newer than the last accepted one) are
    /// ignored, as is everything after a terminal state. At most one state
    /// transition happens per sample.
    pub fn update(&mut self, sample: PositionSample) -> Option<TrackerEvent> {
        if self.state.is_terminal() {
            return None;
        }

        if let Some(last) = self.progress.last_timestamp
            && sample.timestamp <= last
        {
            tracing::debug!(
                "Ignoring stale sample at t={} (last t={})",
                sample.timestamp,
                last
            );
            return None;
        }

        let position = sample.position();
        if !position.is_finite() {
            tracing::warn!("Ignoring non-finite sample at t={}", sample.timestamp);
            return None;
        }

        self.progress.last_timestamp = Some(sample.timestamp);
        self.progress.last_position = Some(position);

        let guidance = self.guidance.as_ref()?;
        let count = guidance.instructions.len();

        match self.state {
            TrackerState::AwaitingPosition if count == 0 => {
                self.transition(TrackerState::Arrived);
                Some(TrackerEvent::Arrived { index: 0 })
            }
            TrackerState::AwaitingPosition => {
                self.transition(TrackerState::OnInstruction(0));
                None
            }
            TrackerState::OnInstruction(i) => {
                let instruction = &guidance.instructions[i];
                let off_route = cross_track_distance(position, instruction);
                let reached = position.distance(&instruction.target) <= self.proximity(instruction.kind)
                    || (off_route <= self.config.deviation_threshold && past_opening(position, instruction));

                if reached {
                    self.progress.last_confirmed_node = Some(instruction.target_node.clone());
                    self.progress.accumulated_error = 0.0;

                    if i + 1 >= count {
                        self.transition(TrackerState::Arrived);
                        return Some(TrackerEvent::Arrived { index: i });
                    }

                    self.progress.instruction_index = i + 1;
                    self.transition(TrackerState::OnInstruction(i + 1));
                    return Some(TrackerEvent::Advance { index: i + 1 });
                }

                self.progress.accumulated_error += off_route;

                if off_route > self.config.deviation_threshold {
                    tracing::info!(
                        "Walker {:.1} units off instruction {}; replan needed",
                        off_route,
                        i
                    );
                    let request = ReplanRequest {
                        position,
                        last_confirmed_node: self.progress.last_confirmed_node.clone(),
                        instruction_index: i,
                    };
                    self.progress.deviated = true;
                    self.replan = Some(request.clone());
                    self.transition(TrackerState::Deviated);
                    return Some(TrackerEvent::ReplanNeeded(request));
                }
                None
            }
            // Deviated waits for a new route; the position is already recorded
            TrackerState::Deviated | TrackerState::Arrived | TrackerState::Cancelled => None,
        }
    }

    /// Stop tracking for good.
    pub fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.transition(TrackerState::Cancelled);
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn guidance(&self) -> Option<&RouteGuidance> {
        self.guidance.as_ref()
    }

    /// Pending replan request while deviated.
    pub fn replan_request(&self) -> Option<&ReplanRequest> {
        self.replan.as_ref()
    }

    /// Instruction currently being followed.
    pub fn current_instruction(&self) -> Option<&Instruction> {
        match self.state {
            TrackerState::OnInstruction(i) => self.guidance.as_ref()?.instructions.get(i),
            _ => None,
        }
    }

    pub(crate) fn queue_capacity(&self) -> usize {
        self.config.queue_capacity
    }

    fn proximity(&self, kind: InstructionKind) -> f32 {
        match kind {
            InstructionKind::Straight => self.config.straight_proximity,
            InstructionKind::Turn { .. } => self.config.turn_proximity,
            InstructionKind::ThroughDoor => self.config.door_proximity,
            InstructionKind::ThroughWindow => self.config.window_proximity,
        }
    }

    fn transition(&mut self, next: TrackerState) {
        if self.state != next {
            tracing::debug!("Tracker: {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}

/// Distance from a position to the expected walking line of an instruction.
fn cross_track_distance(position: Point2D, instruction: &Instruction) -> f32 {
    match instruction.polyline.as_slice() {
        [] => position.distance(&instruction.target),
        [only] => position.distance(only),
        line => line
            .windows(2)
            .map(|w| Segment2D::new(w[0], w[1]).distance_to_point(position))
            .fold(f32::INFINITY, f32::min),
    }
}

/// Whether a crossing has been walked through: the position projects
/// forward onto the leg leaving the opening.
fn past_opening(position: Point2D, instruction: &Instruction) -> bool {
    if !instruction.kind.is_crossing() {
        return false;
    }
    match instruction.polyline.as_slice() {
        [.., at, next] if at != next => Segment2D::new(*at, *next).project_point(position) > 0.0,
        _ => false,
    }
}
