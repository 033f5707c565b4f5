//! YAML loading for floor-plan bundles.

use std::path::Path;

use super::FloorPlan;
use crate::error::{DishaError, Result};

impl FloorPlan {
    /// Parse a floor plan from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a floor plan from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DishaError::FloorPlan(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let plan = Self::from_yaml_str(&content)?;
        tracing::debug!(
            "Loaded floor plan {:?}: {} primitives",
            path,
            plan.primitive_count()
        );
        Ok(plan)
    }

    /// Serialize the floor plan as YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
