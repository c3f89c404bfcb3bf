use crate::{Error, Filter, Location, LocationId, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Name reported for identifiers that have no registered location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// One side of an undirected connection, stored in the adjacency list of its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub to: LocationId,
    pub weight: f64,
}

impl Edge {
    #[inline]
    #[must_use]
    pub fn new(to: LocationId, weight: f64) -> Self {
        Self { to, weight }
    }
}

/// Check that a connection weight is usable by Dijkstra.
pub fn validate_weight(from: &str, to: &str, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWeight {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        })
    }
}

/// In-memory location graph: location metadata plus a symmetric adjacency list.
///
/// Adjacency slots may exist for identifiers that were never registered as
/// locations; connecting two unknown ids creates empty slots for both.
/// Parallel edges and self-loops are kept as separate entries.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    locations: AHashMap<LocationId, Location>,
    adjacency: AHashMap<LocationId, Vec<Edge>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(location_count: usize) -> Self {
        Self {
            locations: AHashMap::with_capacity(location_count),
            adjacency: AHashMap::with_capacity(location_count),
        }
    }

    /// Insert or overwrite a location. Existing connections of the id are kept.
    pub fn add_location(&mut self, location: Location) {
        self.adjacency.entry(location.id.clone()).or_default();
        self.locations.insert(location.id.clone(), location);
    }

    /// Add an undirected connection. The weight is assumed finite and non-negative;
    /// use [`Graph::try_add_connection`] for untrusted input.
    pub fn add_connection(
        &mut self,
        a: impl Into<LocationId>,
        b: impl Into<LocationId>,
        weight: f64,
    ) {
        let a = a.into();
        let b = b.into();
        self.adjacency
            .entry(a.clone())
            .or_default()
            .push(Edge::new(b.clone(), weight));
        self.adjacency.entry(b).or_default().push(Edge::new(a, weight));
    }

    /// Validated variant of [`Graph::add_connection`].
    pub fn try_add_connection(
        &mut self,
        a: impl Into<LocationId>,
        b: impl Into<LocationId>,
        weight: f64,
    ) -> Result<()> {
        let a = a.into();
        let b = b.into();
        for id in [&a, &b] {
            if id.is_empty() {
                return Err(Error::InvalidLocationId(id.to_string()));
            }
        }
        validate_weight(a.as_str(), b.as_str(), weight)?;
        self.add_connection(a, b, weight);
        Ok(())
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Display name of a location, or [`UNKNOWN_LOCATION`].
    pub fn location_name(&self, id: &str) -> &str {
        self.locations
            .get(id)
            .map(|l| l.name.as_str())
            .unwrap_or(UNKNOWN_LOCATION)
    }

    /// True if `id` has an adjacency slot (registered or auto-created).
    pub fn contains_vertex(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// The stored key for `id`, if it has an adjacency slot.
    pub fn vertex_id(&self, id: &str) -> Option<&LocationId> {
        self.adjacency.get_key_value(id).map(|(k, _)| k)
    }

    /// Adjacency entries of `id` in insertion order; empty for unknown ids.
    pub fn neighbors(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn vertices(&self) -> impl Iterator<Item = &LocationId> {
        self.adjacency.keys()
    }

    /// All registered locations, ordered by id.
    pub fn locations(&self) -> Vec<&Location> {
        let mut all: Vec<&Location> = self.locations.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Locations tagged with exactly `tag`, ordered by id.
    pub fn filter_by_category(&self, tag: &str) -> Vec<&Location> {
        self.filter(&crate::FilterCondition::HasCategory(tag.to_string()))
    }

    /// Locations matching an arbitrary filter, ordered by id.
    pub fn filter(&self, filter: &dyn Filter) -> Vec<&Location> {
        let mut matched: Vec<&Location> = self
            .locations
            .values()
            .filter(|l| filter.matches(l))
            .collect();
        matched.sort_by(|a, b| a.id.cmp(&b.id));
        matched
    }

    /// Every adjacency slot with its entries, ordered by id.
    pub fn adjacency(&self) -> Vec<(&LocationId, &[Edge])> {
        let mut all: Vec<(&LocationId, &[Edge])> = self
            .adjacency
            .iter()
            .map(|(id, edges)| (id, edges.as_slice()))
            .collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected connections inserted (each is stored twice).
    pub fn connection_count(&self) -> usize {
        self.adjacency.values().map(|v| v.len()).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty() && self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_edge(g: &Graph, from: &str, to: &str, weight: f64) -> bool {
        g.neighbors(from).iter().any(|e| e.to == to && e.weight == weight)
    }

    #[test]
    fn test_connection_is_symmetric() {
        let mut g = Graph::new();
        g.add_connection("NY", "PAR", 5500.0);
        assert!(has_edge(&g, "NY", "PAR", 5500.0));
        assert!(has_edge(&g, "PAR", "NY", 5500.0));
        assert_eq!(g.connection_count(), 1);
    }

    #[test]
    fn test_connection_before_locations() {
        let mut g = Graph::new();
        g.add_connection("A", "B", 1.0);
        assert!(g.contains_vertex("A"));
        assert!(g.contains_vertex("B"));
        assert_eq!(g.location_count(), 0);

        g.add_location(Location::new("A", "Alpha"));
        assert_eq!(g.neighbors("A").len(), 1, "registering must keep existing edges");
        assert_eq!(g.location_name("A"), "Alpha");
    }

    #[test]
    fn test_add_location_last_write_wins() {
        let mut g = Graph::new();
        g.add_location(Location::new("SF", "San Fran"));
        g.add_location(Location::new("SF", "San Francisco"));
        assert_eq!(g.location_count(), 1);
        assert_eq!(g.location_name("SF"), "San Francisco");
    }

    #[test]
    fn test_unknown_name_sentinel() {
        let g = Graph::new();
        assert_eq!(g.location_name("nowhere"), UNKNOWN_LOCATION);
        assert!(g.neighbors("nowhere").is_empty());
    }

    #[test]
    fn test_parallel_edges_not_deduplicated() {
        let mut g = Graph::new();
        g.add_connection("A", "B", 3.0);
        g.add_connection("A", "B", 3.0);
        g.add_connection("A", "B", 1.0);
        assert_eq!(g.neighbors("A").len(), 3);
        assert_eq!(g.neighbors("B").len(), 3);
        assert_eq!(g.connection_count(), 3);
    }

    #[test]
    fn test_self_loop() {
        let mut g = Graph::new();
        g.add_connection("A", "A", 2.0);
        assert_eq!(g.neighbors("A").len(), 2);
        assert_eq!(g.connection_count(), 1);
    }

    #[test]
    fn test_try_add_connection_rejects_bad_weights() {
        let mut g = Graph::new();
        assert!(matches!(
            g.try_add_connection("A", "B", -1.0),
            Err(Error::InvalidWeight { .. })
        ));
        assert!(g.try_add_connection("A", "B", f64::NAN).is_err());
        assert!(g.try_add_connection("A", "B", f64::INFINITY).is_err());
        assert!(matches!(
            g.try_add_connection("", "B", 1.0),
            Err(Error::InvalidLocationId(_))
        ));
        assert!(g.is_empty(), "rejected connections must not touch the graph");
        assert!(g.try_add_connection("A", "B", 0.0).is_ok());
    }

    #[test]
    fn test_filter_by_category_exact_match() {
        let mut g = Graph::new();
        g.add_location(Location::new("RM", "Rome").with_categories(["historical", "romantic"]));
        g.add_location(Location::new("LA", "Los Angeles").with_category("urban"));
        g.add_location(Location::new("LN", "London").with_categories(["historical", "urban"]));

        let ids: Vec<&str> = g
            .filter_by_category("historical")
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["LN", "RM"]);
        assert!(g.filter_by_category("Historical").is_empty());
        assert!(g.filter_by_category("histor").is_empty());
        assert!(g.filter_by_category("alpine").is_empty());
    }

    #[test]
    fn test_listings_sorted() {
        let mut g = Graph::new();
        g.add_location(Location::new("PAR", "Paris"));
        g.add_location(Location::new("LN", "London"));
        g.add_connection("PAR", "LN", 213.0);
        g.add_connection("ZZ", "LN", 1.0);

        let ids: Vec<&str> = g.locations().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["LN", "PAR"]);

        let slots: Vec<&str> = g.adjacency().iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(slots, vec!["LN", "PAR", "ZZ"]);
        assert_eq!(g.vertex_count(), 3);
    }
}
