//! # Wayfind
//!
//! An in-memory location graph with shortest-path and multi-stop trip planning.
//!
//! Wayfind stores named locations and weighted, undirected connections in an
//! adjacency list, computes single-source distances with Dijkstra's algorithm,
//! and reconstructs explicit routes from the resulting distance map.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! wayfind path NY PAR
//! wayfind trip LA SF NY LN
//! wayfind --dataset world.json filter historical
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use wayfind::prelude::*;
//!
//! let planner = Dataset::sample().into_planner().unwrap();
//!
//! let outcome = planner.shortest_path("NY", "PAR");
//! assert_eq!(outcome.route().unwrap().distance, 5500.0);
//!
//! let trip = planner.plan_trip(&["LA", "SF", "NY"]).unwrap();
//! assert_eq!(trip.legs.len(), 2);
//! ```
//!
//! ## Crate Structure
//!
//! - `wayfind-core` - Graph store, Dijkstra distances, path reconstruction, filters
//! - `wayfind-planner` - Validated queries, multi-stop trips, shared read/write handle

pub mod dataset;
pub mod report;

// Re-export core types
pub use wayfind_core::{
    compute_distances, reconstruct_path, DistanceMap, Edge, Filter, FilterCondition, Graph,
    Location, LocationId, Route, UNREACHABLE,
};

// Re-export planner
pub use wayfind_planner::{
    Error, FailedLeg, Planner, PlannerConfig, Result, RouteOutcome, TripLeg, TripPlan,
};

pub use dataset::{ConnectionRecord, Dataset, DatasetError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        compute_distances, reconstruct_path, Dataset, DistanceMap, Filter, FilterCondition,
        Graph, Location, LocationId, Planner, PlannerConfig, Route, RouteOutcome, TripPlan,
    };
}
