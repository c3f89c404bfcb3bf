//! # Wayfind Core
//!
//! Core library for the Wayfind route planner.
//!
//! This crate provides the graph engine:
//!
//! - [`Location`] - A named place with description and category tags
//! - [`Graph`] - Location store with a symmetric, weighted adjacency list
//! - [`compute_distances`] - Dijkstra single-source distances ([`DistanceMap`])
//! - [`reconstruct_path`] - Explicit shortest path recovered from a [`DistanceMap`]
//! - [`FilterCondition`] - Category and name filters over locations
//!
//! ## Example
//!
//! ```rust
//! use wayfind_core::{compute_distances, reconstruct_path, Graph, Location};
//!
//! let mut graph = Graph::new();
//! graph.add_location(Location::new("NY", "New York").with_category("urban"));
//! graph.add_location(Location::new("PAR", "Paris").with_category("romantic"));
//! graph.add_connection("NY", "PAR", 5500.0);
//!
//! let distances = compute_distances(&graph, "NY");
//! assert_eq!(distances.distance("PAR"), 5500.0);
//!
//! let path = reconstruct_path(&graph, &distances, "NY", "PAR").unwrap();
//! assert_eq!(path.len(), 2);
//! ```

pub mod dijkstra;
pub mod error;
pub mod filter;
pub mod graph;
pub mod location;

pub use dijkstra::{
    compute_distances, path_weight, reconstruct_path, reconstruct_path_with_tolerance,
    shortest_route, DistanceMap, Route, DEFAULT_TOLERANCE, UNREACHABLE,
};
pub use error::{Error, Result};
pub use filter::{Filter, FilterCondition};
pub use graph::{validate_weight, Edge, Graph, UNKNOWN_LOCATION};
pub use location::{Location, LocationId};
