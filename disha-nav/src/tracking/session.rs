//! Channel-fed navigation session.
//!
//! Position samples and control commands may come from any thread. They
//! are queued on a bounded channel and applied by a single consumer, so the
//! tracker never sees two updates at once. Signals go out on a second
//! channel.
//!
//! ```text
//!  producers ──SessionCommand──► [bounded queue] ──► NavigationSession
//!  (any thread)                                        │ ProgressTracker
//!                                                      ▼
//!  consumer ◄──────────────TrackerEvent──────── [unbounded queue]
//! ```

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use thiserror::Error;

use crate::config::NavConfig;
use crate::guidance::RouteGuidance;

use super::state::{PositionSample, TrackerEvent, TrackerState};
use super::tracker::ProgressTracker;

/// Input to a session.
#[derive(Clone, Debug)]
pub enum SessionCommand {
    /// A position fix.
    Position(PositionSample),
    /// Replace the active instruction sequence (after replanning).
    Reroute(RouteGuidance),
    /// End navigation.
    Cancel,
}

/// The session has stopped and no longer accepts commands.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("navigation session closed")]
pub struct SessionClosed;

/// Cloneable producer side of a session.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: Sender<SessionCommand>,
}

impl SessionHandle {
    /// Queue a position sample (blocks while the queue is full).
    pub fn send_position(&self, sample: PositionSample) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Position(sample))
    }

    /// Queue a replacement route.
    pub fn reroute(&self, guidance: RouteGuidance) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Reroute(guidance))
    }

    /// Queue cancellation.
    pub fn cancel(&self) -> Result<(), SessionClosed> {
        self.send(SessionCommand::Cancel)
    }

    pub fn send(&self, command: SessionCommand) -> Result<(), SessionClosed> {
        self.tx.send(command).map_err(|_| SessionClosed)
    }
}

/// Single consumer that owns a [`ProgressTracker`].
pub struct NavigationSession {
    tracker: ProgressTracker,
    commands: Receiver<SessionCommand>,
    events: Sender<TrackerEvent>,
}

impl NavigationSession {
    /// Create a session for an accepted route.
    ///
    /// Returns the session, a handle for producers, and the event stream.
    pub fn new(config: &NavConfig, guidance: RouteGuidance) -> (Self, SessionHandle, Receiver<TrackerEvent>) {
        let tracker = ProgressTracker::with_guidance(config, guidance);
        let (cmd_tx, cmd_rx) = bounded(tracker.queue_capacity().max(1));
        let (event_tx, event_rx) = unbounded();

        let session = Self {
            tracker,
            commands: cmd_rx,
            events: event_tx,
        };
        (session, SessionHandle { tx: cmd_tx }, event_rx)
    }

    /// Apply every command queued right now without blocking.
    ///
    /// Returns the number of commands applied.
    pub fn pump(&mut self) -> usize {
        let batch: Vec<SessionCommand> = self.commands.try_iter().collect();
        self.apply_batch(batch)
    }

    /// Block applying commands until the tracker reaches a terminal state
    /// or every handle is dropped. Returns the final state.
    pub fn run(mut self) -> TrackerState {
        while !self.tracker.state().is_terminal() {
            let Ok(first) = self.commands.recv() else {
                tracing::debug!("All session handles dropped");
                break;
            };
            let mut batch = vec![first];
            batch.extend(self.commands.try_iter());
            self.apply_batch(batch);
        }

        tracing::info!("Navigation session ended in {}", self.tracker.state().name());
        self.tracker.state()
    }

    /// Run on a dedicated thread.
    pub fn spawn(self) -> std::io::Result<JoinHandle<TrackerState>> {
        thread::Builder::new()
            .name("tracker".into())
            .spawn(move || self.run())
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// Apply a batch in arrival order, except that runs of consecutive
    /// position samples are applied in timestamp order.
    fn apply_batch(&mut self, batch: Vec<SessionCommand>) -> usize {
        let applied = batch.len();
        let mut positions: Vec<PositionSample> = Vec::new();

        for command in batch {
            match command {
                SessionCommand::Position(sample) => positions.push(sample),
                control => {
                    self.apply_positions(&mut positions);
                    self.apply_control(control);
                }
            }
        }
        self.apply_positions(&mut positions);

        applied
    }

    fn apply_positions(&mut self, positions: &mut Vec<PositionSample>) {
        positions.sort_by_key(|s| s.timestamp);
        for sample in positions.drain(..) {
            if let Some(event) = self.tracker.update(sample) {
                tracing::debug!("Session signal: {}", event.name());
                // Nobody listening is not an error for the tracker
                let _ = self.events.send(event);
            }
        }
    }

    fn apply_control(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Reroute(guidance) => {
                self.tracker.accept(guidance);
            }
            SessionCommand::Cancel => self.tracker.cancel(),
            SessionCommand::Position(sample) => {
                let mut single = vec![sample];
                self.apply_positions(&mut single);
            }
        }
    }
}
