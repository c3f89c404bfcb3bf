//! # Wayfind Planner
//!
//! Query layer over the Wayfind graph engine.
//!
//! A [`Planner`] owns a location graph behind a read-write lock and answers
//! validated queries against it:
//!
//! - **Shortest path**: one distance computation, a reachability check, then
//!   path reconstruction ([`RouteOutcome`])
//! - **Multi-stop trips**: consecutive legs solved independently, stopping at
//!   the first unreachable leg ([`TripPlan`])
//! - **Filters**: exact category lookup and composite location filters
//! - **Batch queries**: independent pairs evaluated in parallel
//!
//! ## Example
//!
//! ```rust
//! use wayfind_planner::{Planner, PlannerConfig};
//! use wayfind_core::Location;
//!
//! let planner = Planner::new(PlannerConfig::default()).unwrap();
//! planner.add_location(Location::new("LA", "Los Angeles")).unwrap();
//! planner.add_location(Location::new("SF", "San Francisco")).unwrap();
//! planner.add_location(Location::new("NY", "New York")).unwrap();
//! planner.add_connection("LA", "SF", 380.0).unwrap();
//! planner.add_connection("NY", "SF", 2500.0).unwrap();
//!
//! let trip = planner.plan_trip(&["LA", "SF", "NY"]).unwrap();
//! assert!(trip.is_complete());
//! assert_eq!(trip.total_distance(), 2880.0);
//! ```

pub mod config;
pub mod error;
pub mod planner;
pub mod trip;

pub use config::PlannerConfig;
pub use error::{Error, Result};
pub use planner::Planner;
pub use trip::{FailedLeg, RouteOutcome, TripLeg, TripPlan};
