use crate::{Error, FailedLeg, PlannerConfig, Result, RouteOutcome, TripLeg, TripPlan};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use wayfind_core::{
    compute_distances, reconstruct_path_with_tolerance, DistanceMap, Filter, FilterCondition,
    Graph, Location, LocationId, Route,
};

/// Shared handle over a location graph.
///
/// Queries take the read lock, setup operations take the write lock. Clones
/// share the same graph.
#[derive(Clone)]
pub struct Planner {
    config: Arc<PlannerConfig>,
    graph: Arc<RwLock<Graph>>,
}

impl Default for Planner {
    fn default() -> Self {
        Self {
            config: Arc::new(PlannerConfig::default()),
            graph: Arc::new(RwLock::new(Graph::new())),
        }
    }
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        Self::from_graph(config, Graph::new())
    }

    /// Wrap an already populated graph.
    pub fn from_graph(config: PlannerConfig, graph: Graph) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            graph: Arc::new(RwLock::new(graph)),
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Insert or overwrite a location
    pub fn add_location(&self, location: Location) -> Result<()> {
        if location.id.is_empty() {
            warn!(name = %location.name, "rejected location with blank id");
            return Err(wayfind_core::Error::InvalidLocationId(location.id.to_string()).into());
        }
        self.graph.write().add_location(location);
        Ok(())
    }

    /// Add an undirected connection; the weight must be finite and non-negative
    pub fn add_connection(
        &self,
        a: impl Into<LocationId>,
        b: impl Into<LocationId>,
        weight: f64,
    ) -> Result<()> {
        let (a, b) = (a.into(), b.into());
        self.graph
            .write()
            .try_add_connection(a.clone(), b.clone(), weight)
            .map_err(|e| {
                warn!(from = %a, to = %b, weight, "rejected connection: {e}");
                Error::from(e)
            })
    }

    /// Run `f` against the graph under the read lock.
    pub fn with_graph<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        f(&*self.graph.read())
    }

    pub fn location(&self, id: &str) -> Option<Location> {
        self.graph.read().location(id).cloned()
    }

    /// Display name, or the configured unknown sentinel
    pub fn location_name(&self, id: &str) -> String {
        self.graph
            .read()
            .location(id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| self.config.unknown_name.clone())
    }

    /// All locations, ordered by id
    pub fn locations(&self) -> Vec<Location> {
        self.graph.read().locations().into_iter().cloned().collect()
    }

    /// Locations carrying exactly `tag`, ordered by id
    pub fn filter_by_category(&self, tag: &str) -> Vec<Location> {
        self.filter(&FilterCondition::HasCategory(tag.to_string()))
    }

    pub fn filter(&self, filter: &dyn Filter) -> Vec<Location> {
        self.graph.read().filter(filter).into_iter().cloned().collect()
    }

    pub fn location_count(&self) -> usize {
        self.graph.read().location_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.read().connection_count()
    }

    /// Raw single-source distances from `start`
    pub fn distances(&self, start: &str) -> DistanceMap {
        compute_distances(&self.graph.read(), start)
    }

    /// Shortest path between two locations
    pub fn shortest_path(&self, start: &str, end: &str) -> RouteOutcome {
        let graph = self.graph.read();
        let distances = compute_distances(&graph, start);
        let outcome = self.route_from(&graph, &distances, end);
        debug!(from = start, to = end, found = outcome.is_found(), "shortest path query");
        outcome
    }

    /// Independent shortest-path queries evaluated in parallel.
    ///
    /// Distances are computed once per distinct start and shared by every pair
    /// leaving from it. Results keep the order of `pairs`.
    pub fn shortest_paths<S>(&self, pairs: &[(S, S)]) -> Vec<RouteOutcome>
    where
        S: AsRef<str> + Sync,
    {
        let graph = self.graph.read();
        let graph: &Graph = &graph;

        let mut starts: Vec<&str> = pairs.iter().map(|(from, _)| from.as_ref()).collect();
        starts.sort_unstable();
        starts.dedup();

        let maps: HashMap<&str, DistanceMap> = starts
            .par_iter()
            .map(|&start| (start, compute_distances(graph, start)))
            .collect();
        debug!(pairs = pairs.len(), starts = maps.len(), "batch shortest path query");

        pairs
            .par_iter()
            .map(|(from, to)| match maps.get(from.as_ref()) {
                Some(distances) => self.route_from(graph, distances, to.as_ref()),
                None => RouteOutcome::NoPath {
                    from: LocationId::from(from.as_ref()),
                    to: LocationId::from(to.as_ref()),
                },
            })
            .collect()
    }

    /// Plan a trip leg by leg over consecutive stops.
    ///
    /// A single stop yields a complete plan with no legs. The first unreachable
    /// leg ends planning and is reported in [`TripPlan::failed_leg`].
    pub fn plan_trip<S: AsRef<str>>(&self, stops: &[S]) -> Result<TripPlan> {
        if stops.is_empty() {
            warn!("rejected empty trip");
            return Err(Error::EmptyTrip);
        }
        if stops.len() > self.config.max_trip_stops {
            warn!(stops = stops.len(), max = self.config.max_trip_stops, "rejected trip");
            return Err(Error::TooManyStops {
                count: stops.len(),
                max: self.config.max_trip_stops,
            });
        }
        if let Some(blank) = stops.iter().find(|s| s.as_ref().trim().is_empty()) {
            warn!(stops = stops.len(), "rejected trip with blank stop id");
            return Err(wayfind_core::Error::InvalidLocationId(blank.as_ref().to_string()).into());
        }

        let graph = self.graph.read();
        let mut maps: HashMap<&str, DistanceMap> = HashMap::new();
        let mut legs = Vec::with_capacity(stops.len() - 1);
        let mut failed_leg = None;

        for (index, pair) in stops.windows(2).enumerate() {
            let (from, to) = (pair[0].as_ref(), pair[1].as_ref());
            let distances = maps
                .entry(from)
                .or_insert_with(|| compute_distances(&graph, from));

            match self.route_from(&graph, distances, to) {
                RouteOutcome::Found(route) => {
                    debug!(leg = index, from, to, distance = route.distance, "trip leg solved");
                    legs.push(TripLeg {
                        index,
                        from: LocationId::from(from),
                        to: LocationId::from(to),
                        route,
                    });
                }
                RouteOutcome::NoPath { from, to } => {
                    debug!(leg = index, %from, %to, "trip leg unreachable");
                    failed_leg = Some(FailedLeg { index, from, to });
                    break;
                }
            }
        }

        Ok(TripPlan {
            stops: stops.iter().map(|s| LocationId::from(s.as_ref())).collect(),
            legs,
            failed_leg,
        })
    }

    fn route_from(&self, graph: &Graph, distances: &DistanceMap, end: &str) -> RouteOutcome {
        let start = distances.start().as_str();
        reconstruct_path_with_tolerance(
            graph,
            distances,
            start,
            end,
            self.config.distance_tolerance,
        )
        .map(|path| {
            RouteOutcome::Found(Route {
                path,
                distance: distances.distance(end),
            })
        })
        .unwrap_or_else(|| RouteOutcome::NoPath {
            from: distances.start().clone(),
            to: LocationId::from(end),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::path_weight;

    fn triangle() -> Planner {
        let planner = Planner::default();
        planner
            .add_location(Location::new("NY", "New York").with_categories(["historical", "urban"]))
            .unwrap();
        planner
            .add_location(Location::new("ND", "New Delhi").with_categories(["historical", "urban"]))
            .unwrap();
        planner
            .add_location(Location::new("PAR", "Paris").with_categories(["romantic", "historical"]))
            .unwrap();
        planner.add_connection("NY", "ND", 7300.0).unwrap();
        planner.add_connection("NY", "PAR", 5500.0).unwrap();
        planner.add_connection("ND", "PAR", 7000.0).unwrap();
        planner
    }

    fn ids(route: &Route) -> Vec<&str> {
        route.path.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_shortest_path_found() {
        let planner = triangle();
        let outcome = planner.shortest_path("NY", "PAR");
        let route = outcome.route().unwrap();
        assert_eq!(ids(route), vec!["NY", "PAR"]);
        assert_eq!(route.distance, 5500.0);
    }

    #[test]
    fn test_route_weight_matches_distance_at_large_scale() {
        let planner = Planner::default();
        planner.add_connection("S", "P", 500000.0).unwrap();
        planner.add_connection("P", "T", 500000.0).unwrap();
        planner.add_connection("S", "M", 1.0).unwrap();
        planner.add_connection("M", "T", 999999.0005).unwrap();

        let outcome = planner.shortest_path("S", "T");
        let route = outcome.route().unwrap();
        assert_eq!(ids(route), vec!["S", "P", "T"]);
        assert_eq!(
            planner.with_graph(|g| path_weight(g, &route.path)),
            Some(route.distance)
        );

        let plan = planner.plan_trip(&["M", "S", "T"]).unwrap();
        for leg in &plan.legs {
            assert_eq!(
                planner.with_graph(|g| path_weight(g, &leg.route.path)),
                Some(leg.route.distance)
            );
        }
        assert_eq!(plan.total_distance(), 1.0 + 1000000.0);
    }

    #[test]
    fn test_shortest_path_unreachable_reports_no_path() {
        let planner = triangle();
        planner.add_location(Location::new("ISO", "Island")).unwrap();
        let outcome = planner.shortest_path("NY", "ISO");
        assert!(!outcome.is_found());
        assert_eq!(outcome.to_string(), "no path found between NY and ISO");

        let outcome = planner.shortest_path("XX", "NY");
        assert!(matches!(outcome, RouteOutcome::NoPath { .. }));
    }

    #[test]
    fn test_add_connection_validation() {
        let planner = Planner::default();
        assert!(matches!(
            planner.add_connection("A", "B", -5.0),
            Err(Error::Graph(wayfind_core::Error::InvalidWeight { .. }))
        ));
        assert!(planner.add_connection("A", "", 1.0).is_err());
        assert!(planner
            .add_location(Location::new(" ", "Nowhere"))
            .is_err());
        assert_eq!(planner.connection_count(), 0);
    }

    #[test]
    fn test_location_name_sentinel() {
        let planner = triangle();
        assert_eq!(planner.location_name("PAR"), "Paris");
        assert_eq!(planner.location_name("XX"), "Unknown");

        let config = PlannerConfig {
            unknown_name: "?".to_string(),
            ..Default::default()
        };
        let planner = Planner::new(config).unwrap();
        assert_eq!(planner.location_name("XX"), "?");
    }

    #[test]
    fn test_filter_by_category() {
        let planner = triangle();
        let romantic: Vec<LocationId> = planner
            .filter_by_category("romantic")
            .into_iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(romantic, vec![LocationId::from("PAR")]);
        assert_eq!(planner.filter_by_category("historical").len(), 3);
        assert!(planner.filter_by_category("alpine").is_empty());
    }

    #[test]
    fn test_trip_chains_legs() {
        let planner = triangle();
        let plan = planner.plan_trip(&["ND", "NY", "PAR"]).unwrap();
        assert!(plan.is_complete());
        assert_eq!(plan.legs.len(), 2);
        assert_eq!(ids(&plan.legs[0].route), vec!["ND", "NY"]);
        assert_eq!(ids(&plan.legs[1].route), vec!["NY", "PAR"]);
        assert_eq!(plan.total_distance(), 7300.0 + 5500.0);
    }

    #[test]
    fn test_trip_stops_at_unreachable_leg() {
        let planner = triangle();
        planner.add_location(Location::new("ISO", "Island")).unwrap();
        let plan = planner.plan_trip(&["NY", "ISO", "PAR"]).unwrap();
        assert!(!plan.is_complete());
        assert!(plan.legs.is_empty());
        let failed = plan.failed_leg.unwrap();
        assert_eq!(failed.index, 0);
        assert_eq!(failed.from, "NY");
        assert_eq!(failed.to, "ISO");
    }

    #[test]
    fn test_trip_failure_after_solved_legs() {
        let planner = triangle();
        let plan = planner.plan_trip(&["PAR", "NY", "XX", "ND"]).unwrap();
        assert_eq!(plan.legs.len(), 1);
        assert_eq!(plan.failed_leg.as_ref().unwrap().index, 1);
        assert_eq!(plan.stops.len(), 4);
    }

    #[test]
    fn test_trip_input_validation() {
        let planner = triangle();
        let empty: [&str; 0] = [];
        assert_eq!(planner.plan_trip(&empty), Err(Error::EmptyTrip));

        let single = planner.plan_trip(&["NY"]).unwrap();
        assert!(single.is_complete());
        assert!(single.legs.is_empty());
        assert_eq!(single.total_distance(), 0.0);

        let config = PlannerConfig {
            max_trip_stops: 2,
            ..Default::default()
        };
        let small = Planner::new(config).unwrap();
        assert!(matches!(
            small.plan_trip(&["A", "B", "C"]),
            Err(Error::TooManyStops { count: 3, max: 2 })
        ));
        assert!(planner.plan_trip(&["NY", ""]).is_err());
    }

    #[test]
    fn test_trip_repeated_stop() {
        let planner = triangle();
        let plan = planner.plan_trip(&["NY", "NY", "PAR", "NY"]).unwrap();
        assert!(plan.is_complete());
        assert_eq!(ids(&plan.legs[0].route), vec!["NY"]);
        assert_eq!(plan.legs[0].route.distance, 0.0);
        assert_eq!(plan.total_distance(), 11000.0);
    }

    #[test]
    fn test_batch_matches_single_queries() {
        let planner = triangle();
        let pairs = [
            ("NY", "PAR"),
            ("ND", "PAR"),
            ("NY", "ND"),
            ("XX", "NY"),
            ("PAR", "PAR"),
        ];
        let batch = planner.shortest_paths(&pairs);
        assert_eq!(batch.len(), pairs.len());
        for ((from, to), outcome) in pairs.iter().zip(&batch) {
            assert_eq!(outcome, &planner.shortest_path(from, to));
        }
    }

    #[test]
    fn test_clones_share_graph() {
        let planner = triangle();
        let other = planner.clone();
        other.add_connection("PAR", "LN", 213.0).unwrap();
        assert_eq!(planner.distances("NY").distance("LN"), 5713.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PlannerConfig {
            distance_tolerance: f64::NAN,
            ..Default::default()
        };
        assert!(Planner::new(config).is_err());
    }
}
