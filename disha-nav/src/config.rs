//! Configuration loading for DishaNav

use crate::error::{DishaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavConfig {
    /// Floor-plan units per meter (default: 1.0)
    #[serde(default = "default_units_per_meter")]
    pub units_per_meter: f32,
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub instructions: InstructionConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

/// Geometry normalizer parameters (floor-plan units)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Anchors closer than this are merged into one (default: 0.3)
    #[serde(default = "default_min_anchor_separation")]
    pub min_anchor_separation: f32,

    /// Distance within which a point counts as lying on a room outline (default: 0.05)
    #[serde(default = "default_boundary_tolerance")]
    pub boundary_tolerance: f32,

    /// Wall endpoints closer than this are treated as the same joint (default: 0.05)
    #[serde(default = "default_junction_snap_distance")]
    pub junction_snap_distance: f32,

    /// Maximum distance between a door/window centre and its wall (default: 0.5)
    #[serde(default = "default_max_opening_offset")]
    pub max_opening_offset: f32,
}

/// Edge weight metric
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    #[default]
    Euclidean,
    Manhattan,
}

/// Graph builder parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Walking-distance metric for edge weights
    #[serde(default)]
    pub distance_metric: DistanceMetric,

    /// Passages narrower than this are penalized (floor-plan units, default: 0.9)
    #[serde(default = "default_min_passage_width")]
    pub min_passage_width: f32,

    /// Extra weight fraction per unit of relative width deficit (default: 1.0)
    #[serde(default = "default_narrow_passage_penalty")]
    pub narrow_passage_penalty: f32,
}

/// Instruction synthesizer parameters (degrees)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstructionConfig {
    /// Heading changes within this angle continue the current run (default: 10)
    #[serde(default = "default_heading_tolerance_deg")]
    pub heading_tolerance_deg: f32,

    /// Turns below this angle are "slight" (default: 45)
    #[serde(default = "default_slight_turn_deg")]
    pub slight_turn_deg: f32,

    /// Turns above this angle are "sharp" (default: 135)
    #[serde(default = "default_sharp_turn_deg")]
    pub sharp_turn_deg: f32,

    /// Turns above this angle become "turn around" (default: 170)
    #[serde(default = "default_turn_around_deg")]
    pub turn_around_deg: f32,
}

/// Live progress tracker parameters (meters)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Proximity tolerance for straight runs (default: 1.5)
    #[serde(default = "default_straight_proximity")]
    pub straight_proximity: f32,

    /// Proximity tolerance for turn runs (default: 1.0)
    #[serde(default = "default_turn_proximity")]
    pub turn_proximity: f32,

    /// Proximity tolerance for door crossings (default: 0.75)
    #[serde(default = "default_door_proximity")]
    pub door_proximity: f32,

    /// Proximity tolerance for window crossings (default: 0.75)
    #[serde(default = "default_window_proximity")]
    pub window_proximity: f32,

    /// Cross-track distance that triggers a replan (default: 5.0)
    #[serde(default = "default_deviation_threshold")]
    pub deviation_threshold: f32,

    /// Capacity of the session command queue (default: 256)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_anchor_separation: default_min_anchor_separation(),
            boundary_tolerance: default_boundary_tolerance(),
            junction_snap_distance: default_junction_snap_distance(),
            max_opening_offset: default_max_opening_offset(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            distance_metric: DistanceMetric::default(),
            min_passage_width: default_min_passage_width(),
            narrow_passage_penalty: default_narrow_passage_penalty(),
        }
    }
}

impl Default for InstructionConfig {
    fn default() -> Self {
        Self {
            heading_tolerance_deg: default_heading_tolerance_deg(),
            slight_turn_deg: default_slight_turn_deg(),
            sharp_turn_deg: default_sharp_turn_deg(),
            turn_around_deg: default_turn_around_deg(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            straight_proximity: default_straight_proximity(),
            turn_proximity: default_turn_proximity(),
            door_proximity: default_door_proximity(),
            window_proximity: default_window_proximity(),
            deviation_threshold: default_deviation_threshold(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            units_per_meter: default_units_per_meter(),
            geometry: GeometryConfig::default(),
            graph: GraphConfig::default(),
            instructions: InstructionConfig::default(),
            tracking: TrackingConfig::default(),
        }
    }
}

// Default value functions
fn default_units_per_meter() -> f32 {
    1.0
}
fn default_min_anchor_separation() -> f32 {
    0.3
}
fn default_boundary_tolerance() -> f32 {
    0.05
}
fn default_junction_snap_distance() -> f32 {
    0.05
}
fn default_max_opening_offset() -> f32 {
    0.5
}
fn default_min_passage_width() -> f32 {
    0.9
}
fn default_narrow_passage_penalty() -> f32 {
    1.0
}
fn default_heading_tolerance_deg() -> f32 {
    10.0
}
fn default_slight_turn_deg() -> f32 {
    45.0
}
fn default_sharp_turn_deg() -> f32 {
    135.0
}
fn default_turn_around_deg() -> f32 {
    170.0
}
fn default_straight_proximity() -> f32 {
    1.5
}
fn default_turn_proximity() -> f32 {
    1.0
}
fn default_door_proximity() -> f32 {
    0.75
}
fn default_window_proximity() -> f32 {
    0.75
}
fn default_deviation_threshold() -> f32 {
    5.0
}
fn default_queue_capacity() -> usize {
    256
}

impl NavConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DishaError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: NavConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style setter for floor-plan units per meter.
    pub fn with_units_per_meter(mut self, units: f32) -> Self {
        self.units_per_meter = units;
        self
    }

    /// Builder-style setter for anchor merge distance.
    pub fn with_min_anchor_separation(mut self, distance: f32) -> Self {
        self.geometry.min_anchor_separation = distance;
        self
    }

    /// Builder-style setter for the edge weight metric.
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.graph.distance_metric = metric;
        self
    }

    /// Builder-style setter for the minimum comfortable passage width.
    pub fn with_min_passage_width(mut self, width: f32) -> Self {
        self.graph.min_passage_width = width;
        self
    }

    /// Builder-style setter for heading tolerance.
    pub fn with_heading_tolerance_deg(mut self, degrees: f32) -> Self {
        self.instructions.heading_tolerance_deg = degrees;
        self
    }

    /// Builder-style setter for the deviation threshold.
    pub fn with_deviation_threshold(mut self, meters: f32) -> Self {
        self.tracking.deviation_threshold = meters;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("units_per_meter", self.units_per_meter),
            ("geometry.min_anchor_separation", self.geometry.min_anchor_separation),
            ("geometry.boundary_tolerance", self.geometry.boundary_tolerance),
            ("geometry.max_opening_offset", self.geometry.max_opening_offset),
            ("graph.min_passage_width", self.graph.min_passage_width),
            ("instructions.heading_tolerance_deg", self.instructions.heading_tolerance_deg),
            ("tracking.straight_proximity", self.tracking.straight_proximity),
            ("tracking.turn_proximity", self.tracking.turn_proximity),
            ("tracking.door_proximity", self.tracking.door_proximity),
            ("tracking.window_proximity", self.tracking.window_proximity),
            ("tracking.deviation_threshold", self.tracking.deviation_threshold),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(DishaError::Config(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.graph.narrow_passage_penalty < 0.0 {
            return Err(DishaError::Config(
                "graph.narrow_passage_penalty must not be negative".to_string(),
            ));
        }

        let max_proximity = self.tracking.max_proximity();
        if self.tracking.deviation_threshold <= max_proximity {
            return Err(DishaError::Config(format!(
                "tracking.deviation_threshold ({}) must exceed every proximity tolerance ({})",
                self.tracking.deviation_threshold, max_proximity
            )));
        }

        if self.tracking.queue_capacity == 0 {
            return Err(DishaError::Config(
                "tracking.queue_capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Convert meters into floor-plan units.
    #[inline]
    pub fn meters_to_units(&self, meters: f32) -> f32 {
        meters * self.units_per_meter
    }

    /// Convert floor-plan units into meters.
    #[inline]
    pub fn units_to_meters(&self, units: f32) -> f32 {
        units / self.units_per_meter
    }
}

impl TrackingConfig {
    /// Largest of the per-instruction proximity tolerances.
    pub fn max_proximity(&self) -> f32 {
        self.straight_proximity
            .max(self.turn_proximity)
            .max(self.door_proximity)
            .max(self.window_proximity)
    }
}
