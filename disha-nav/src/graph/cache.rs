//! Shared, copy-on-write holder of the current graph.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::NavConfig;
use crate::error::Result;
use crate::floorplan::FloorPlan;
use crate::geometry::GeometryNormalizer;

use super::builder::GraphBuilder;
use super::nav_graph::NavGraph;

struct Entry {
    graph: Arc<NavGraph>,
    generation: u64,
}

/// Holds the current [`NavGraph`] for concurrent readers.
///
/// Readers take an `Arc` snapshot and plan against it without holding the
/// lock. A rebuild swaps in a whole new graph and bumps the generation;
/// snapshots taken earlier stay valid.
pub struct GraphCache {
    current: RwLock<Entry>,
}

impl GraphCache {
    /// Cache holding an empty graph at generation 0.
    pub fn empty() -> Self {
        Self {
            current: RwLock::new(Entry {
                graph: Arc::new(NavGraph::default()),
                generation: 0,
            }),
        }
    }

    /// Cache holding `graph` at generation 1.
    pub fn new(graph: NavGraph) -> Self {
        let cache = Self::empty();
        cache.replace(graph);
        cache
    }

    /// Current graph.
    pub fn snapshot(&self) -> Arc<NavGraph> {
        Arc::clone(&self.current.read().graph)
    }

    /// Generation of the current graph.
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Swap in a new graph, returning its generation.
    pub fn replace(&self, graph: NavGraph) -> u64 {
        let mut entry = self.current.write();
        entry.graph = Arc::new(graph);
        entry.generation += 1;
        entry.generation
    }

    /// Normalize and build a floor plan, then swap it in.
    ///
    /// On error the previous graph stays in place.
    pub fn rebuild(&self, plan: &FloorPlan, config: &NavConfig) -> Result<u64> {
        tracing::debug!("Rebuilding graph from {} primitives", plan.primitive_count());

        let geometry = GeometryNormalizer::new(config.geometry.clone()).normalize(plan)?;
        let graph = GraphBuilder::new(config.clone()).build(&geometry)?;
        let generation = self.replace(graph);

        tracing::info!("Graph generation {} ready", generation);
        Ok(generation)
    }
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::empty()
    }
}
