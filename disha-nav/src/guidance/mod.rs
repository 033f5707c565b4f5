//! Turn-by-turn guidance.
//!
//! The synthesizer walks a planned node path and produces a short list of
//! typed instructions: straight runs, turns, and door/window crossings,
//! each with a distance in meters and the point that completes it.

mod instruction;
mod synthesizer;

pub use instruction::{Instruction, InstructionKind, RouteGuidance, TurnDirection};
pub use synthesizer::InstructionSynthesizer;
