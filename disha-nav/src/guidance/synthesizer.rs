//! Instruction synthesizer: node path to static instructions.

use crate::config::NavConfig;
use crate::core::Point2D;
use crate::core::math::heading_change_deg;
use crate::error::PlanError;
use crate::graph::{NavGraph, NodeKind};
use crate::planning::Path;

use super::instruction::{Instruction, InstructionKind, RouteGuidance, TurnDirection};

/// Legs shorter than this (floor-plan units) have no heading.
const MIN_LEG_LENGTH: f32 = 1e-4;

/// Straight or turn run being accumulated.
struct Run {
    kind: InstructionKind,
    length: f32,
    polyline: Vec<Point2D>,
}

impl Run {
    fn new(kind: InstructionKind, from: Point2D) -> Self {
        Self {
            kind,
            length: 0.0,
            polyline: vec![from],
        }
    }
}

/// Turns an ordered node path into a minimal instruction sequence.
///
/// Consecutive legs whose heading stays within the tolerance collapse into
/// one run. A run ends at every turn and at every intermediate door or
/// window, which emits its own zero-distance crossing instruction. The last
/// run signals arrival.
#[derive(Clone, Debug)]
pub struct InstructionSynthesizer {
    config: NavConfig,
}

impl InstructionSynthesizer {
    pub fn new(config: &NavConfig) -> Self {
        Self { config: config.clone() }
    }

    /// Synthesize instructions for a path planned on `graph`.
    ///
    /// Fails with [`PlanError::UnknownNode`] if the path names a node the
    /// graph does not have (a path from an older graph).
    pub fn synthesize(&self, graph: &NavGraph, path: &Path) -> Result<RouteGuidance, PlanError> {
        let nodes = path
            .nodes
            .iter()
            .map(|id| graph.node(id).ok_or_else(|| PlanError::UnknownNode(id.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let (Some(first), Some(last)) = (nodes.first(), nodes.last()) else {
            return Err(PlanError::UnknownNode(String::new()));
        };

        let mut instructions = Vec::new();
        let mut run = Run::new(InstructionKind::Straight, first.position);
        let mut heading: Option<Point2D> = None;

        for i in 0..nodes.len().saturating_sub(1) {
            let (here, next) = (nodes[i], nodes[i + 1]);
            let leg = next.position - here.position;
            let length = leg.length();
            let leg_heading = if length > MIN_LEG_LENGTH {
                Some(leg.normalize())
            } else {
                heading
            };

            if i > 0 {
                let turn = self.classify_turn(heading, leg_heading);

                if here.kind.is_passage() {
                    let finished = std::mem::replace(
                        &mut run,
                        Run::new(turn.unwrap_or(InstructionKind::Straight), here.position),
                    );
                    instructions.push(self.finish(finished, &here.id, false));

                    let crossing = if here.kind == NodeKind::Door {
                        InstructionKind::ThroughDoor
                    } else {
                        InstructionKind::ThroughWindow
                    };
                    let legs = [nodes[i - 1].position, here.position, next.position];
                    instructions.push(self.crossing(crossing, legs, &here.id));
                } else if let Some(turn) = turn {
                    let finished = std::mem::replace(&mut run, Run::new(turn, here.position));
                    instructions.push(self.finish(finished, &here.id, false));
                }
            }

            run.length += length;
            run.polyline.push(next.position);
            heading = leg_heading;
        }

        if nodes.len() > 1 {
            instructions.push(self.finish(run, &last.id, true));
        }

        let total_distance = instructions.iter().map(Instruction::meters).sum();

        tracing::debug!(
            "Synthesized {} instructions for {} nodes ({:.1} m)",
            instructions.len(),
            nodes.len(),
            total_distance
        );

        Ok(RouteGuidance {
            start_node: first.id.clone(),
            start_position: first.position,
            goal_node: last.id.clone(),
            instructions,
            total_distance,
            path: path.nodes.clone(),
        })
    }

    /// Turn kind for a heading change, or None within tolerance.
    ///
    /// The side comes from the sign of the cross product of the incoming
    /// and outgoing headings (positive is a left turn).
    fn classify_turn(&self, incoming: Option<Point2D>, outgoing: Option<Point2D>) -> Option<InstructionKind> {
        let (a, b) = (incoming?, outgoing?);
        let signed = heading_change_deg(a, b);
        let degrees = signed.abs();

        if degrees <= self.config.instructions.heading_tolerance_deg {
            return None;
        }

        let direction = if degrees >= self.config.instructions.turn_around_deg {
            TurnDirection::Around
        } else if signed > 0.0 {
            TurnDirection::Left
        } else {
            TurnDirection::Right
        };

        Some(InstructionKind::Turn { direction, degrees })
    }

    fn finish(&self, run: Run, target_node: &str, arrival: bool) -> Instruction {
        let meters = self.config.units_to_meters(run.length);
        let target = run.polyline.last().copied().unwrap_or_default();

        let mut text = match run.kind {
            InstructionKind::Turn { direction, degrees } => {
                format!("{} and walk {}", self.turn_phrase(direction, degrees), spoken_distance(meters))
            }
            _ => format!("Walk straight for {}", spoken_distance(meters)),
        };
        if arrival {
            text.push_str(" to arrive at your destination");
        }

        Instruction {
            kind: run.kind,
            distance: Some(meters),
            text,
            target,
            target_node: target_node.to_string(),
            polyline: run.polyline,
            arrival,
        }
    }

    /// Zero-distance crossing. The polyline keeps the legs either side of
    /// the opening so the walker can be tracked through it.
    fn crossing(&self, kind: InstructionKind, legs: [Point2D; 3], node: &str) -> Instruction {
        let text = match kind {
            InstructionKind::ThroughWindow => "Go through the window opening",
            _ => "Go through the door",
        };

        Instruction {
            kind,
            distance: Some(0.0),
            text: text.to_string(),
            target: legs[1],
            target_node: node.to_string(),
            polyline: legs.to_vec(),
            arrival: false,
        }
    }

    fn turn_phrase(&self, direction: TurnDirection, degrees: f32) -> String {
        let side = match direction {
            TurnDirection::Around => return "Turn around".to_string(),
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        };

        if degrees < self.config.instructions.slight_turn_deg {
            format!("Turn slightly {}", side)
        } else if degrees > self.config.instructions.sharp_turn_deg {
            format!("Turn sharp {}", side)
        } else {
            format!("Turn {}", side)
        }
    }
}

/// Distance rounded to half meters for speech.
fn spoken_distance(meters: f32) -> String {
    let rounded = ((meters * 2.0).round() / 2.0).max(0.5);
    if rounded == 1.0 {
        "1 meter".to_string()
    } else {
        format!("{} meters", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use approx::assert_relative_eq;

    fn graph(nodes: &[(&str, f32, f32, NodeKind)]) -> NavGraph {
        let nodes = nodes
            .iter()
            .map(|&(id, x, y, kind)| Node::new(id, Point2D::new(x, y), kind))
            .collect::<Vec<_>>();
        let edges = nodes
            .windows(2)
            .map(|w| Edge::new(w[0].id.clone(), w[1].id.clone(), 1.0))
            .collect();
        NavGraph::from_parts(nodes, edges).unwrap()
    }

    fn path(ids: &[&str]) -> Path {
        Path {
            nodes: ids.iter().map(|s| s.to_string()).collect(),
            cost: 0.0,
            door_crossings: 0,
        }
    }

    fn synth() -> InstructionSynthesizer {
        InstructionSynthesizer::new(&NavConfig::default())
    }

    #[test]
    fn test_single_node_path() {
        let g = graph(&[("a", 0.0, 0.0, NodeKind::Room)]);
        let guidance = synth().synthesize(&g, &path(&["a"])).unwrap();
        assert!(guidance.is_empty());
        assert_eq!(guidance.total_distance, 0.0);
    }

    #[test]
    fn test_collinear_legs_collapse() {
        let g = graph(&[
            ("a", 0.0, 0.0, NodeKind::Room),
            ("b", 3.0, 0.1, NodeKind::Junction),
            ("c", 7.0, 0.0, NodeKind::Poi),
        ]);
        let guidance = synth().synthesize(&g, &path(&["a", "b", "c"])).unwrap();

        assert_eq!(guidance.len(), 1);
        let only = &guidance.instructions[0];
        assert_eq!(only.kind, InstructionKind::Straight);
        assert!(only.arrival);
        assert_eq!(only.target_node, "c");
        assert_eq!(only.polyline.len(), 3);
        assert_relative_eq!(only.meters(), 7.0, epsilon = 0.01);
    }

    #[test]
    fn test_turn_direction() {
        let g = graph(&[
            ("a", 0.0, 0.0, NodeKind::Room),
            ("b", 4.0, 0.0, NodeKind::Junction),
            ("c", 4.0, 3.0, NodeKind::Poi),
            ("d", 8.0, 3.0, NodeKind::Room),
        ]);
        let guidance = synth().synthesize(&g, &path(&["a", "b", "c", "d"])).unwrap();
        let kinds: Vec<InstructionKind> = guidance.instructions.iter().map(|i| i.kind).collect();

        assert_eq!(kinds.len(), 3);
        assert_eq!(kinds[0], InstructionKind::Straight);
        assert!(matches!(
            kinds[1],
            InstructionKind::Turn { direction: TurnDirection::Left, degrees } if (degrees - 90.0).abs() < 0.01
        ));
        assert!(matches!(
            kinds[2],
            InstructionKind::Turn { direction: TurnDirection::Right, .. }
        ));
        assert_eq!(guidance.instructions[1].text, "Turn left and walk 3 meters");
        assert_relative_eq!(guidance.total_distance, 11.0);
    }

    #[test]
    fn test_door_crossing() {
        let g = graph(&[
            ("r1", 0.0, 0.0, NodeKind::Room),
            ("d", 10.0, 0.0, NodeKind::Door),
            ("r2", 20.0, 0.0, NodeKind::Room),
        ]);
        let guidance = synth().synthesize(&g, &path(&["r1", "d", "r2"])).unwrap();
        let ins = &guidance.instructions;

        assert_eq!(ins.len(), 3);
        assert_eq!(ins[0].kind, InstructionKind::Straight);
        assert_relative_eq!(ins[0].meters(), 10.0);
        assert_eq!(ins[1].kind, InstructionKind::ThroughDoor);
        assert_eq!(ins[1].distance, Some(0.0));
        assert_eq!(ins[1].target_node, "d");
        assert_eq!(
            ins[1].polyline,
            vec![Point2D::new(0.0, 0.0), Point2D::new(10.0, 0.0), Point2D::new(20.0, 0.0)]
        );
        assert_eq!(ins[2].kind, InstructionKind::Straight);
        assert_relative_eq!(ins[2].meters(), 10.0);
        assert!(ins[2].arrival);
        assert_eq!(ins[2].text, "Walk straight for 10 meters to arrive at your destination");
    }

    #[test]
    fn test_turn_after_window() {
        let g = graph(&[
            ("a", 0.0, 0.0, NodeKind::Room),
            ("w", 5.0, 0.0, NodeKind::Window),
            ("b", 5.0, -5.0, NodeKind::Room),
        ]);
        let guidance = synth().synthesize(&g, &path(&["a", "w", "b"])).unwrap();
        assert_eq!(guidance.instructions[1].kind, InstructionKind::ThroughWindow);
        assert!(matches!(
            guidance.instructions[2].kind,
            InstructionKind::Turn { direction: TurnDirection::Right, .. }
        ));
    }

    #[test]
    fn test_endpoint_doors_emit_no_crossing() {
        let g = graph(&[
            ("d1", 0.0, 0.0, NodeKind::Door),
            ("d2", 6.0, 0.0, NodeKind::Door),
        ]);
        let guidance = synth().synthesize(&g, &path(&["d1", "d2"])).unwrap();
        assert_eq!(guidance.len(), 1);
        assert_eq!(guidance.instructions[0].kind, InstructionKind::Straight);
    }

    #[test]
    fn test_turn_around_and_units() {
        let config = NavConfig::default().with_units_per_meter(100.0);
        let g = graph(&[
            ("a", 0.0, 0.0, NodeKind::Room),
            ("b", 500.0, 0.0, NodeKind::Poi),
            ("c", 200.0, 0.0, NodeKind::Room),
        ]);
        let guidance = InstructionSynthesizer::new(&config)
            .synthesize(&g, &path(&["a", "b", "c"]))
            .unwrap();

        assert_relative_eq!(guidance.instructions[0].meters(), 5.0);
        assert!(matches!(
            guidance.instructions[1].kind,
            InstructionKind::Turn { direction: TurnDirection::Around, .. }
        ));
        assert!(guidance.instructions[1].text.starts_with("Turn around and walk 3 meters"));
    }

    #[test]
    fn test_unknown_node() {
        let g = graph(&[("a", 0.0, 0.0, NodeKind::Room)]);
        assert_eq!(
            synth().synthesize(&g, &path(&["a", "gone"])).unwrap_err(),
            PlanError::UnknownNode("gone".into())
        );
    }

    #[test]
    fn test_spoken_distance() {
        assert_eq!(spoken_distance(1.1), "1 meter");
        assert_eq!(spoken_distance(2.3), "2.5 meters");
        assert_eq!(spoken_distance(0.1), "0.5 meters");
    }
}
