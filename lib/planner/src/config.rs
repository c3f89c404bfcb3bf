use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use wayfind_core::{DEFAULT_TOLERANCE, UNKNOWN_LOCATION};

/// Configuration for a planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub name: String,
    /// Upper bound on stops accepted by a single trip query
    pub max_trip_stops: usize,
    /// Relative tolerance for the fallback distance match during path
    /// reconstruction; exact matches are always tried first
    pub distance_tolerance: f64,
    /// Name reported for unregistered ids
    pub unknown_name: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            name: String::from("default"),
            max_trip_stops: 64,
            distance_tolerance: DEFAULT_TOLERANCE,
            unknown_name: UNKNOWN_LOCATION.to_string(),
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_trip_stops == 0 {
            return Err(Error::InvalidConfig(
                "max_trip_stops must be at least 1".to_string(),
            ));
        }
        if !self.distance_tolerance.is_finite() || self.distance_tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "distance_tolerance must be finite and non-negative, got {}",
                self.distance_tolerance
            )));
        }
        Ok(())
    }
}
