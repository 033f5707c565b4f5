//! Error types for DishaNav

use thiserror::Error;

/// Malformed floor-plan input, caught while normalizing geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{kind} '{id}' references unknown wall '{wall}'")]
    UnknownWall {
        kind: &'static str,
        id: String,
        wall: String,
    },

    #[error("room '{id}' has {vertices} vertices (need at least 3)")]
    DegeneratePolygon { id: String, vertices: usize },

    #[error("duplicate primitive id '{0}'")]
    DuplicateId(String),

    #[error("{kind} '{id}' has a non-finite coordinate")]
    NonFiniteCoordinate { kind: &'static str, id: String },

    #[error("{kind} '{id}' has non-positive width {width}")]
    InvalidWidth {
        kind: &'static str,
        id: String,
        width: f32,
    },

    #[error("{kind} '{id}' lies {offset:.2} units from wall '{wall}'")]
    OpeningOffWall {
        kind: &'static str,
        id: String,
        wall: String,
        offset: f32,
    },

    #[error("one-way rule references unknown anchor '{0}'")]
    UnknownOneWayAnchor(String),
}

impl GeometryError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownWall { .. } => "UNKNOWN_WALL",
            Self::DegeneratePolygon { .. } => "DEGENERATE_POLYGON",
            Self::DuplicateId(_) => "DUPLICATE_ID",
            Self::NonFiniteCoordinate { .. } => "NON_FINITE",
            Self::InvalidWidth { .. } => "INVALID_WIDTH",
            Self::OpeningOffWall { .. } => "OPENING_OFF_WALL",
            Self::UnknownOneWayAnchor(_) => "UNKNOWN_ONE_WAY_ANCHOR",
        }
    }
}

/// Structural inconsistency in an assembled graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphBuildError {
    #[error("duplicate node id '{0}'")]
    DuplicateNode(String),

    #[error("edge {from} -> {to} references missing node '{missing}'")]
    DanglingEdge {
        from: String,
        to: String,
        missing: String,
    },

    #[error("edge {from} -> {to} has invalid weight {weight}")]
    InvalidWeight { from: String, to: String, weight: f32 },
}

impl GraphBuildError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateNode(_) => "DUPLICATE_NODE",
            Self::DanglingEdge { .. } => "DANGLING_EDGE",
            Self::InvalidWeight { .. } => "INVALID_WEIGHT",
        }
    }
}

/// Route planning failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// Typically a stale graph after a floor-plan update.
    #[error("unknown node '{0}'")]
    UnknownNode(String),

    #[error("no path from '{start}' to '{goal}'")]
    NoPath { start: String, goal: String },
}

impl PlanError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownNode(_) => "UNKNOWN_NODE",
            Self::NoPath { .. } => "NO_PATH",
        }
    }
}

/// DishaNav error type
#[derive(Error, Debug)]
pub enum DishaError {
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Graph error: {0}")]
    GraphBuild(#[from] GraphBuildError),

    #[error("Planning error: {0}")]
    Plan(#[from] PlanError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Floor plan error: {0}")]
    FloorPlan(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DishaError {
    /// Short error code for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Geometry(e) => e.code(),
            Self::GraphBuild(e) => e.code(),
            Self::Plan(e) => e.code(),
            Self::Config(_) => "CONFIG",
            Self::FloorPlan(_) => "FLOOR_PLAN",
            Self::Io(_) => "IO",
        }
    }
}

impl From<toml::de::Error> for DishaError {
    fn from(e: toml::de::Error) -> Self {
        DishaError::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for DishaError {
    fn from(e: serde_yaml::Error) -> Self {
        DishaError::FloorPlan(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DishaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::UnknownWall {
            kind: "door",
            id: "d1".into(),
            wall: "w9".into(),
        };
        assert_eq!(err.to_string(), "door 'd1' references unknown wall 'w9'");

        let err = PlanError::NoPath {
            start: "a".into(),
            goal: "b".into(),
        };
        assert_eq!(err.to_string(), "no path from 'a' to 'b'");
    }

    #[test]
    fn test_error_code_passthrough() {
        let err: DishaError = PlanError::UnknownNode("x".into()).into();
        assert_eq!(err.code(), "UNKNOWN_NODE");

        let err: DishaError = GeometryError::DuplicateId("x".into()).into();
        assert_eq!(err.code(), "DUPLICATE_ID");
        assert!(matches!(err, DishaError::Geometry(_)));
    }
}
