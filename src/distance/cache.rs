//! Sparse pairwise distance cache.

use std::collections::HashMap;

use crate::graph::{Graph, VertexId};
use crate::models::{Direction, Stop};

/// Shortest-path distances between the locations a trip evaluation needs.
///
/// Keys are ordered `(from, to)` pairs; a missing pair means the destination
/// is unreachable from the source, which is distinct from a cached zero
/// distance. The cache is rebuilt per optimization call and holds exactly
/// the pairs cost evaluation can ask for:
///
/// - heading to the company: garage → each stop, each stop → company, and
///   every ordered pair of stops;
/// - heading to the garage: company → each stop, each stop → garage, and
///   every ordered pair of stops.
///
/// Building runs one [`Graph::shortest_paths_from`] per distinct source, not
/// one per pair.
///
/// # Examples
///
/// ```
/// use shuttle_routing::distance::DistanceCache;
/// use shuttle_routing::graph::Graph;
/// use shuttle_routing::models::{Direction, Stop};
///
/// let mut graph = Graph::new();
/// graph.add_vertex(0, 0.0, 0.0);
/// graph.add_vertex(1, 1.0, 0.0);
/// graph.add_vertex(2, 2.0, 0.0);
/// for (a, b) in [(0, 1), (1, 2)] {
///     graph.add_edge(a, b);
///     graph.add_edge(b, a);
/// }
///
/// let stops = [Stop::new(1, 4)];
/// let cache = DistanceCache::build(&mut graph, 0, 2, &stops, Direction::ToCompany);
/// assert_eq!(cache.get(0, 1), Some(1.0)); // garage -> stop
/// assert_eq!(cache.get(1, 2), Some(1.0)); // stop -> company
/// assert_eq!(cache.get(2, 0), None);      // never needed, so never cached
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistanceCache {
    distances: HashMap<(VertexId, VertexId), f64>,
}

impl DistanceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the cache for one trip of the given direction.
    pub fn build(
        graph: &mut Graph,
        garage: VertexId,
        company: VertexId,
        stops: &[Stop],
        direction: Direction,
    ) -> Self {
        let stop_ids: Vec<VertexId> = stops.iter().map(|s| s.vertex_id).collect();

        let mut needed: Vec<(VertexId, VertexId)> = Vec::new();
        match direction {
            Direction::ToCompany => {
                for &s in &stop_ids {
                    needed.push((garage, s));
                    needed.push((s, company));
                }
            }
            Direction::ToGarage => {
                for &s in &stop_ids {
                    needed.push((company, s));
                    needed.push((s, garage));
                }
            }
        }
        for &a in &stop_ids {
            for &b in &stop_ids {
                if a != b {
                    needed.push((a, b));
                }
            }
        }

        // Group destinations by source so each distinct source costs exactly
        // one shortest-path run.
        let mut by_source: Vec<(VertexId, Vec<VertexId>)> = Vec::new();
        for (from, to) in needed {
            match by_source.iter_mut().find(|(s, _)| *s == from) {
                Some((_, dests)) => dests.push(to),
                None => by_source.push((from, vec![to])),
            }
        }

        let mut cache = Self::new();
        for (source, dests) in by_source {
            cache.record_from(graph, source, &dests);
        }
        cache
    }

    /// Runs shortest paths from `source` and records the finite distances to
    /// each destination. Unreached destinations are left out of the map.
    fn record_from(&mut self, graph: &mut Graph, source: VertexId, dests: &[VertexId]) {
        if !graph.shortest_paths_from(source) {
            return;
        }
        for &dest in dests {
            if let Some(d) = graph.distance_to(dest) {
                if d.is_finite() {
                    self.distances.insert((source, dest), d);
                }
            }
        }
    }

    /// Cached distance from one vertex to another.
    ///
    /// `None` means the pair was either never required or unreachable.
    pub fn get(&self, from: VertexId, to: VertexId) -> Option<f64> {
        self.distances.get(&(from, to)).copied()
    }

    /// Inserts a distance directly. Mostly useful for synthetic caches in
    /// tests and benchmarks.
    pub fn insert(&mut self, from: VertexId, to: VertexId, distance: f64) {
        self.distances.insert((from, to), distance);
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
