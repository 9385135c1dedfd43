use serde::{Deserialize, Serialize};

use crate::hierarchy::hierarchy::HierarchyError;

pub const DEFAULT_RESOLUTION: usize = 20;

/// Labels carry two fractional digits; past 100 units distinct endpoints
/// share a label.
pub const MAX_RESOLUTION: usize = 100;

// Serializable, comparable, explicit defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Number of discretization units `[0, 1]` is divided into.
    pub resolution: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl HierarchyConfig {
    pub fn with_resolution(resolution: usize) -> Self {
        Self { resolution }
    }

    pub fn from_json_str(json: &str) -> Result<Self, HierarchyError> {
        let config: HierarchyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HierarchyError> {
        if self.resolution == 0 {
            return Err(HierarchyError::InvalidResolution(self.resolution));
        }
        if self.resolution > MAX_RESOLUTION {
            return Err(HierarchyError::ResolutionTooFine {
                resolution: self.resolution,
                max: MAX_RESOLUTION,
            });
        }
        Ok(())
    }

    pub fn interval_count(&self) -> usize {
        self.resolution * (self.resolution + 1) / 2
    }
}
