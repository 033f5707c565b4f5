//! Live progress tracking.
//!
//! [`ProgressTracker`] is the state machine; [`NavigationSession`] feeds it
//! from a queue so that concurrent producers are applied one sample at a
//! time, in timestamp order.
//!
//! ```text
//!  AwaitingPosition ──first fix──► OnInstruction(0) ──target reached──► OnInstruction(i+1)
//!         ▲                               │                                   │
//!         │ new route                off route                      last target reached
//!         │                               ▼                                   ▼
//!         └──────────────────────────  Deviated                            Arrived
//!
//!  cancel (any non-terminal state) ──► Cancelled
//! ```

mod session;
mod state;
mod tracker;

pub use session::{NavigationSession, SessionClosed, SessionCommand, SessionHandle};
pub use state::{PositionSample, ProgressState, ReplanRequest, TrackerEvent, TrackerState};
pub use tracker::ProgressTracker;
