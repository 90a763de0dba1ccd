//! Greedy route construction over an ordered stop sequence.

use std::collections::VecDeque;

use crate::graph::VertexId;
use crate::models::Stop;

/// Partitions an ordered stop sequence across buses, front to back.
///
/// Buses are given by their capacities, ascending. Each bus consumes stops
/// from the front of the sequence until its seats run out: a stop that fits
/// is consumed whole; a stop that overflows the remaining seats is split —
/// its vertex joins this bus's path and the overflow workers stay at the
/// front of the sequence for the next bus, so a split stop appears in two
/// consecutive paths.
///
/// Works on a private copy of the stops; zero-worker stops are pruned before
/// filling. Returns one path per bus, without hub endpoints. Demand beyond
/// the combined capacity is left unserved; callers guarantee coverage via
/// selection.
///
/// # Examples
///
/// ```
/// use shuttle_routing::models::Stop;
/// use shuttle_routing::optimize::fill_routes;
///
/// let order = [Stop::new(1, 3), Stop::new(2, 4)];
/// let paths = fill_routes(&order, &[5, 5]);
/// // First bus takes all of stop 1 plus two workers of stop 2.
/// assert_eq!(paths, vec![vec![1, 2], vec![2]]);
/// ```
pub fn fill_routes(order: &[Stop], capacities: &[u32]) -> Vec<Vec<VertexId>> {
    let mut pending: VecDeque<Stop> = order.iter().copied().filter(|s| s.workers > 0).collect();
    let mut paths = Vec::with_capacity(capacities.len());

    for &capacity in capacities {
        let mut path = Vec::new();
        let mut remaining = i64::from(capacity);
        while remaining > 0 {
            let Some(head) = pending.front_mut() else {
                break;
            };
            remaining -= i64::from(head.workers);
            path.push(head.vertex_id);
            if remaining < 0 {
                // Partial pickup: leave the overflow at the front.
                head.workers = (-remaining) as u32;
                break;
            }
            pending.pop_front();
        }
        paths.push(path);
    }
    paths
}
