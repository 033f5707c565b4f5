//! DishaNav - indoor wayfinding engine.
//!
//! Turns a floor plan (walls, doors, windows, rooms, points of interest)
//! into a navigation graph, plans routes over it, and produces short
//! walking instructions for a visually-impaired pedestrian. A live
//! tracker follows the walker's position and signals when to announce
//! the next instruction or when to plan again.
//!
//! ## Data Flow
//!
//! ```text
//! FloorPlan ──► GeometryNormalizer ──► GraphBuilder ──► GraphCache (Arc<NavGraph>)
//!                                                            │
//!                        start, goal ──► plan() ◄────────────┘
//!                                          │
//!                                        Path
//!                                          │
//!                                InstructionSynthesizer
//!                                          │
//!                                    RouteGuidance
//!                                          │
//!        position samples ──► NavigationSession / ProgressTracker
//!                                          │
//!                      advance / arrived / replan-needed events
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use disha_nav::{FloorPlan, NavConfig, Navigator};
//!
//! let plan = FloorPlan::load("maps/clinic.yaml".as_ref())?;
//! let navigator = Navigator::with_floor_plan(NavConfig::default(), &plan)?;
//!
//! let guidance = navigator.route("entrance", "pharmacy")?;
//! for step in &guidance.instructions {
//!     println!("{}", step.text);
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod floorplan;
pub mod geometry;
pub mod graph;
pub mod guidance;
pub mod navigator;
pub mod planning;
pub mod tracking;

pub use config::NavConfig;
pub use crate::core::Point2D;
pub use error::{DishaError, GeometryError, GraphBuildError, PlanError, Result};
pub use floorplan::FloorPlan;
pub use geometry::GeometryNormalizer;
pub use graph::{Edge, GraphBuilder, GraphCache, NavGraph, Node, NodeKind};
pub use guidance::{Instruction, InstructionKind, InstructionSynthesizer, RouteGuidance, TurnDirection};
pub use navigator::Navigator;
pub use planning::{Path, plan};
pub use tracking::{
    NavigationSession, PositionSample, ProgressTracker, SessionHandle, TrackerEvent, TrackerState,
};
