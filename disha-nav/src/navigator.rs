//! Navigator facade: floor plan in, guidance and sessions out.

use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::config::NavConfig;
use crate::core::Point2D;
use crate::error::{DishaError, PlanError, Result};
use crate::floorplan::FloorPlan;
use crate::graph::{GraphCache, NavGraph};
use crate::guidance::{InstructionSynthesizer, RouteGuidance};
use crate::planning::{Path, plan};
use crate::tracking::{NavigationSession, ReplanRequest, SessionHandle, TrackerEvent};

/// Id of the temporary node inserted for a live position.
pub const LIVE_NODE_ID: &str = "live-position";

/// Ties the engine together around a shared graph cache.
///
/// All methods take `&self`; routing reads a graph snapshot, so a
/// floor-plan reload never disturbs a route being computed.
pub struct Navigator {
    config: NavConfig,
    cache: GraphCache,
    synthesizer: InstructionSynthesizer,
}

impl Navigator {
    /// Create a navigator with an empty graph.
    pub fn new(config: NavConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            synthesizer: InstructionSynthesizer::new(&config),
            cache: GraphCache::empty(),
            config,
        })
    }

    /// Create a navigator and build its first graph.
    pub fn with_floor_plan(config: NavConfig, plan: &FloorPlan) -> Result<Self> {
        let navigator = Self::new(config)?;
        navigator.load_floor_plan(plan)?;
        Ok(navigator)
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Rebuild the graph from a new floor plan. Returns the graph generation.
    pub fn load_floor_plan(&self, plan: &FloorPlan) -> Result<u64> {
        self.cache.rebuild(plan, &self.config)
    }

    /// Snapshot of the current graph.
    pub fn graph(&self) -> Arc<NavGraph> {
        self.cache.snapshot()
    }

    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Plan a node path on the current graph.
    pub fn plan(&self, start: &str, goal: &str) -> Result<Path> {
        Ok(plan(&self.graph(), start, goal)?)
    }

    /// Plan and synthesize guidance between two nodes.
    pub fn route(&self, start: &str, goal: &str) -> Result<RouteGuidance> {
        let graph = self.graph();
        let path = plan(&graph, start, goal)?;
        let guidance = self.synthesizer.synthesize(&graph, &path)?;

        tracing::info!(
            "Route {} -> {}: {} nodes, {} instructions, {:.1} m",
            start,
            goal,
            path.len(),
            guidance.len(),
            guidance.total_distance
        );
        Ok(guidance)
    }

    /// Guidance from an arbitrary position to a goal node.
    ///
    /// The position joins the graph as a temporary node. If it cannot see
    /// any node that reaches the goal, the route starts at the nearest
    /// node instead.
    pub fn reroute_from(&self, position: Point2D, goal: &str) -> Result<RouteGuidance> {
        let graph = self.graph();
        if !graph.contains(goal) {
            return Err(PlanError::UnknownNode(goal.to_string()).into());
        }

        let live = graph.with_temporary_node(LIVE_NODE_ID, position)?;
        match plan(&live, LIVE_NODE_ID, goal) {
            Ok(path) => Ok(self.synthesizer.synthesize(&live, &path)?),
            Err(PlanError::NoPath { .. }) => {
                let nearest = graph
                    .nearest_node(position)
                    .map(|n| n.id.clone())
                    .ok_or_else(|| PlanError::UnknownNode(LIVE_NODE_ID.to_string()))?;
                tracing::warn!(
                    "Live position ({:.1}, {:.1}) not connected; rerouting from '{}'",
                    position.x,
                    position.y,
                    nearest
                );
                self.route(&nearest, goal)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Answer a tracker replan request.
    ///
    /// Falls back to the last confirmed node when the position cannot
    /// reach the goal.
    pub fn reroute(&self, request: &ReplanRequest, goal: &str) -> Result<RouteGuidance> {
        match self.reroute_from(request.position, goal) {
            Err(DishaError::Plan(PlanError::NoPath { .. })) if request.last_confirmed_node.is_some() => {
                let from = request.last_confirmed_node.as_deref().unwrap_or_default();
                self.route(from, goal)
            }
            other => other,
        }
    }

    /// Start a tracking session for accepted guidance.
    pub fn session(&self, guidance: RouteGuidance) -> (NavigationSession, SessionHandle, Receiver<TrackerEvent>) {
        NavigationSession::new(&self.config, guidance)
    }
}
