// JSON datasets for seeding a planner
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use wayfind_core::{Location, LocationId};
use wayfind_planner::{Planner, PlannerConfig};

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Planner(#[from] wayfind_planner::Error),
}

/// An undirected, weighted connection as written in a dataset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub from: LocationId,
    pub to: LocationId,
    pub weight: f64,
}

/// Locations and connections used to populate a [`Planner`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub config: PlannerConfig,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, DatasetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a planner, validating every location and connection.
    pub fn into_planner(self) -> Result<Planner, DatasetError> {
        let planner = Planner::new(self.config)?;
        for location in self.locations {
            planner.add_location(location)?;
        }
        for conn in self.connections {
            planner.add_connection(conn.from, conn.to, conn.weight)?;
        }
        Ok(planner)
    }

    /// Eight cities joined by thirteen connections (distances in miles).
    pub fn sample() -> Self {
        let city = |id: &str, name: &str, description: &str, tags: &[&str]| {
            Location::new(id, name)
                .with_description(description)
                .with_categories(tags.iter().copied())
        };
        let locations = vec![
            city("SF", "San Francisco", "The City by the Bay", &["urban", "coastal", "affordable"]),
            city("ND", "New Delhi", "The Capital of India", &["historical", "urban"]),
            city("PAR", "Paris", "The City of Love", &["romantic", "cultural", "historical"]),
            city("NY", "New York", "The Big Apple", &["historical", "urban", "coastal"]),
            city("LA", "Los Angeles", "Tinseltown", &["urban", "coastal"]),
            city("VN", "Venice", "The Floating City", &["romantic", "coastal", "historical"]),
            city(
                "RM",
                "Rome",
                "The Eternal City",
                &["romantic", "cultural", "historical", "affordable"],
            ),
            city("LN", "London", "The Big Smoke", &["historical", "affordable", "urban"]),
        ];

        let connections = [
            ("NY", "ND", 7300.0),
            ("NY", "PAR", 5500.0),
            ("ND", "PAR", 7000.0),
            ("NY", "SF", 2500.0),
            ("LA", "SF", 380.0),
            ("VN", "PAR", 524.0),
            ("VN", "ND", 3656.0),
            ("RM", "VN", 245.0),
            ("RM", "PAR", 688.0),
            ("LN", "NY", 3461.0),
            ("LN", "PAR", 213.0),
            ("RM", "LN", 910.0),
            ("LA", "NY", 2445.0),
        ]
        .into_iter()
        .map(|(from, to, weight)| ConnectionRecord {
            from: from.into(),
            to: to.into(),
            weight,
        })
        .collect();

        Self {
            config: PlannerConfig::default(),
            locations,
            connections,
        }
    }
}
