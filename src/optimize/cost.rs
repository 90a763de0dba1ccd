//! Trip cost evaluation over the distance cache.

use crate::distance::DistanceCache;
use crate::graph::VertexId;
use crate::models::{Direction, Stop};

use super::construction::fill_routes;

/// Wraps a bus path with the hub endpoints for the given direction.
///
/// Heading to the company the bus leaves the garage and ends at the
/// workplace; heading back it leaves the workplace and ends at the garage.
pub fn attach_hubs(
    path: &[VertexId],
    garage: VertexId,
    company: VertexId,
    direction: Direction,
) -> Vec<VertexId> {
    let (first, last) = direction.hub_endpoints(garage, company);
    let mut full = Vec::with_capacity(path.len() + 2);
    full.push(first);
    full.extend_from_slice(path);
    full.push(last);
    full
}

/// Total distance of serving `order` with the given buses, or `None` when
/// any required leg is missing from the cache (an unreachable pair makes
/// the whole candidate infeasible, with no partial credit).
///
/// Builds the per-bus paths with [`fill_routes`], attaches hub endpoints,
/// and sums the cached distance of every consecutive leg. Buses left
/// without stops contribute nothing.
pub fn plan_cost(
    order: &[Stop],
    capacities: &[u32],
    garage: VertexId,
    company: VertexId,
    cache: &DistanceCache,
    direction: Direction,
) -> Option<f64> {
    let mut total = 0.0;
    for path in fill_routes(order, capacities) {
        if path.is_empty() {
            continue;
        }
        let full = attach_hubs(&path, garage, company, direction);
        for leg in full.windows(2) {
            total += cache.get(leg[0], leg[1])?;
        }
    }
    Some(total)
}
