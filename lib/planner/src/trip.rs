use serde::{Deserialize, Serialize};
use wayfind_core::{LocationId, Route};

/// Result of a single shortest-path query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(Route),
    NoPath { from: LocationId, to: LocationId },
}

impl RouteOutcome {
    #[inline]
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::NoPath { .. } => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }
}

impl std::fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteOutcome::Found(route) => {
                let path: Vec<&str> = route.path.iter().map(|id| id.as_str()).collect();
                write!(f, "{} ({})", path.join(" -> "), route.distance)
            }
            RouteOutcome::NoPath { from, to } => {
                write!(f, "no path found between {} and {}", from, to)
            }
        }
    }
}

/// One solved segment of a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripLeg {
    pub index: usize,
    pub from: LocationId,
    pub to: LocationId,
    pub route: Route,
}

/// The leg that stopped a trip from being planned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedLeg {
    pub index: usize,
    pub from: LocationId,
    pub to: LocationId,
}

impl std::fmt::Display for FailedLeg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "leg {}: no path found between {} and {}",
            self.index + 1,
            self.from,
            self.to
        )
    }
}

/// Leg-by-leg itinerary over an ordered list of stops.
///
/// Legs are solved independently; planning stops at the first unreachable leg,
/// so `legs` holds only the legs before `failed_leg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    pub stops: Vec<LocationId>,
    pub legs: Vec<TripLeg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_leg: Option<FailedLeg>,
}

impl TripPlan {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.failed_leg.is_none()
    }

    /// Sum of the distances of the solved legs.
    pub fn total_distance(&self) -> f64 {
        self.legs.iter().map(|leg| leg.route.distance).sum()
    }
}
