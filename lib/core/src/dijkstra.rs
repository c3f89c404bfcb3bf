use crate::{Graph, LocationId};
use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Distance reported for vertices with no path from the start.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Default relative tolerance for the fallback match of `d[n] + w` against
/// `d[current]`: a few ULPs of rounding noise.
pub const DEFAULT_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Frontier entry for the Dijkstra min-heap
#[derive(Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    dist: OrderedFloat<f64>,
    id: &'a LocationId,
}

impl Ord for Candidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: smaller distance = higher priority, id breaks ties
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.id.cmp(self.id))
    }
}

impl PartialOrd for Candidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source shortest distances from one start vertex.
///
/// Holds an entry for every vertex known to the graph at computation time.
/// Unreachable vertices (and everything, when the start is unknown) hold
/// [`UNREACHABLE`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    start: LocationId,
    distances: AHashMap<LocationId, f64>,
    predecessors: AHashMap<LocationId, LocationId>,
}

impl DistanceMap {
    /// The vertex this map was computed from.
    #[inline]
    pub fn start(&self) -> &LocationId {
        &self.start
    }

    /// Distance to `id`; [`UNREACHABLE`] for unreachable or unknown ids.
    #[inline]
    pub fn distance(&self, id: &str) -> f64 {
        self.distances.get(id).copied().unwrap_or(UNREACHABLE)
    }

    /// Distance to `id` if the vertex is known, reachable or not.
    #[inline]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    #[inline]
    pub fn is_reachable(&self, id: &str) -> bool {
        self.distance(id).is_finite()
    }

    /// Vertex that last improved `id` during relaxation.
    pub fn predecessor(&self, id: &str) -> Option<&LocationId> {
        self.predecessors.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, f64)> {
        self.distances.iter().map(|(id, d)| (id, *d))
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.values().filter(|d| d.is_finite()).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Reconstruct the route from this map's start to `end`.
    pub fn route_to(&self, graph: &Graph, end: &str) -> Option<Route> {
        let path = reconstruct_path(graph, self, self.start.as_str(), end)?;
        Some(Route {
            path,
            distance: self.distance(end),
        })
    }
}

/// An explicit shortest path with its total weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub path: Vec<LocationId>,
    pub distance: f64,
}

impl Route {
    /// Number of connections traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Dijkstra over non-negative weights from `start` to every known vertex.
///
/// Stale heap entries are skipped (lazy deletion). An unknown start yields a
/// map where every vertex is unreachable.
pub fn compute_distances(graph: &Graph, start: &str) -> DistanceMap {
    let mut dist: AHashMap<&LocationId, f64> = graph.vertices().map(|v| (v, UNREACHABLE)).collect();
    let mut prev: AHashMap<&LocationId, &LocationId> = AHashMap::new();
    let mut heap = BinaryHeap::new();

    if let Some(source) = graph.vertex_id(start) {
        dist.insert(source, 0.0);
        heap.push(Candidate {
            dist: OrderedFloat(0.0),
            id: source,
        });
    }

    while let Some(Candidate { dist: d, id: current }) = heap.pop() {
        let d = d.into_inner();
        if d > dist.get(&current).copied().unwrap_or(UNREACHABLE) {
            continue;
        }

        for edge in graph.neighbors(current.as_str()) {
            let next = d + edge.weight;
            let best = dist.entry(&edge.to).or_insert(UNREACHABLE);
            if next < *best {
                *best = next;
                prev.insert(&edge.to, current);
                heap.push(Candidate {
                    dist: OrderedFloat(next),
                    id: &edge.to,
                });
            }
        }
    }

    DistanceMap {
        start: LocationId::from(start),
        distances: dist.into_iter().map(|(id, d)| (id.clone(), d)).collect(),
        predecessors: prev
            .into_iter()
            .map(|(id, p)| (id.clone(), p.clone()))
            .collect(),
    }
}

/// Walk back from `end` to `start` along edges where `d[n] + w == d[current]`.
///
/// Returns `None` when `end` is unknown or unreachable, or when `start` is not
/// the vertex `distances` was computed from. Uses [`DEFAULT_TOLERANCE`].
pub fn reconstruct_path(
    graph: &Graph,
    distances: &DistanceMap,
    start: &str,
    end: &str,
) -> Option<Vec<LocationId>> {
    reconstruct_path_with_tolerance(graph, distances, start, end, DEFAULT_TOLERANCE)
}

/// [`reconstruct_path`] with an explicit relative tolerance (0.0 for exact matching).
///
/// The walk first follows only edges with `d[n] + w == d[current]` exactly.
/// Edges within `tolerance * |d[current]|` are considered only when no exact
/// walk exists, which never happens for a map built by [`compute_distances`].
/// Among matching neighbors the one closest to the start wins, then the
/// earliest in adjacency order. Vertices are never revisited and dead ends are
/// backtracked, so zero-weight edges cannot loop the walk.
pub fn reconstruct_path_with_tolerance(
    graph: &Graph,
    distances: &DistanceMap,
    start: &str,
    end: &str,
    tolerance: f64,
) -> Option<Vec<LocationId>> {
    if distances.start() != start || !distances.is_reachable(end) {
        return None;
    }
    let start_id = graph.vertex_id(start)?;
    let end_id = graph.vertex_id(end)?;

    walk_back(graph, distances, start_id, end_id, 0.0).or_else(|| {
        (tolerance > 0.0)
            .then(|| walk_back(graph, distances, start_id, end_id, tolerance))
            .flatten()
    })
}

/// Depth-first walk from `end_id` to `start_id` over matching edges.
fn walk_back(
    graph: &Graph,
    distances: &DistanceMap,
    start_id: &LocationId,
    end_id: &LocationId,
    tolerance: f64,
) -> Option<Vec<LocationId>> {
    let mut path: Vec<&LocationId> = vec![end_id];
    let mut frames = vec![tight_neighbors(graph, distances, end_id, tolerance)];
    let mut visited: AHashSet<&LocationId> = AHashSet::new();
    visited.insert(end_id);

    while let Some(&current) = path.last() {
        if current == start_id {
            return Some(path.into_iter().rev().cloned().collect());
        }

        let frame = frames.last_mut()?;
        match frame.find(|n| !visited.contains(n)) {
            Some(next) => {
                visited.insert(next);
                path.push(next);
                frames.push(tight_neighbors(graph, distances, next, tolerance));
            }
            None => {
                path.pop();
                frames.pop();
            }
        }
    }

    None
}

/// Neighbors `n` of `current` lying on a shortest path, ordered by (distance, adjacency index).
fn tight_neighbors<'g>(
    graph: &'g Graph,
    distances: &DistanceMap,
    current: &LocationId,
    tolerance: f64,
) -> std::vec::IntoIter<&'g LocationId> {
    let target = distances.distance(current.as_str());
    let mut tight: Vec<(f64, usize, &'g LocationId)> = graph
        .neighbors(current.as_str())
        .iter()
        .enumerate()
        .filter_map(|(idx, edge)| {
            let d = distances.distance(edge.to.as_str());
            (d.is_finite() && approx_eq(d + edge.weight, target, tolerance)).then_some((d, idx, &edge.to))
        })
        .collect();
    tight.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    tight
        .into_iter()
        .map(|(_, _, id)| id)
        .collect::<Vec<_>>()
        .into_iter()
}

#[inline]
fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    a == b || (a - b).abs() <= tolerance * b.abs()
}

/// Compute distances from `start` once and reconstruct the route to `end`.
pub fn shortest_route(graph: &Graph, start: &str, end: &str) -> Option<Route> {
    compute_distances(graph, start).route_to(graph, end)
}

/// Total weight of `path`, using the lightest parallel edge for each hop.
///
/// `None` if two consecutive ids are not connected.
pub fn path_weight(graph: &Graph, path: &[LocationId]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |acc, hop| {
        graph
            .neighbors(hop[0].as_str())
            .iter()
            .filter(|e| e.to == hop[1])
            .map(|e| e.weight)
            .min_by(|a, b| a.total_cmp(b))
            .map(|w| acc + w)
    })
}
