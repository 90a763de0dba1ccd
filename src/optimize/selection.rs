//! Direction-dependent bus selection.

use crate::graph::VertexId;
use crate::models::Fleet;

/// Picks idle buses to cover `demand` workers, greedily minimizing the count.
///
/// From the idle pool sorted ascending by capacity, repeatedly takes the
/// first bus whose capacity covers the remaining demand, or the largest bus
/// when none does, until the demand is covered. The result is sorted
/// ascending by capacity, ready for route construction.
///
/// Returns `None` when the demand exceeds the combined idle capacity (the
/// trip is infeasible), and `Some(vec![])` when the demand is zero.
///
/// This is a first-fit/largest-fallback heuristic: small in vehicle count
/// but not provably minimal.
///
/// # Examples
///
/// ```
/// use shuttle_routing::models::Fleet;
/// use shuttle_routing::optimize::select_to_company;
///
/// let mut fleet = Fleet::new();
/// fleet.add_bus(10);
/// fleet.add_bus(30);
/// // One 30-seat bus covers 25 workers on its own.
/// let picked = select_to_company(&fleet, 25).unwrap();
/// assert_eq!(picked.len(), 1);
/// assert_eq!(fleet.buses()[picked[0]].capacity(), 30);
/// assert!(select_to_company(&fleet, 41).is_none());
/// ```
pub fn select_to_company(fleet: &Fleet, demand: u32) -> Option<Vec<usize>> {
    let mut pool: Vec<usize> = fleet
        .buses()
        .iter()
        .enumerate()
        .filter(|(_, b)| b.is_idle())
        .map(|(i, _)| i)
        .collect();
    pool.sort_by_key(|&i| fleet.buses()[i].capacity());

    if u64::from(demand) > fleet.idle_capacity() {
        return None;
    }

    let mut remaining = i64::from(demand);
    let mut selected = Vec::new();
    while remaining > 0 && !pool.is_empty() {
        let pick = pool
            .iter()
            .position(|&i| i64::from(fleet.buses()[i].capacity()) >= remaining)
            .unwrap_or(pool.len() - 1);
        let bus = pool.remove(pick);
        remaining -= i64::from(fleet.buses()[bus].capacity());
        selected.push(bus);
    }
    selected.sort_by_key(|&i| fleet.buses()[i].capacity());
    Some(selected)
}

/// Picks the buses already committed to this company's outbound trip.
///
/// A committed bus carries a non-empty route whose first or last vertex is
/// the company's workplace; those are the buses that must drive the workers
/// back. The result is sorted ascending by capacity.
pub fn select_to_garage(fleet: &Fleet, company_vertex: VertexId) -> Vec<usize> {
    let mut selected: Vec<usize> = fleet
        .buses()
        .iter()
        .enumerate()
        .filter(|(_, b)| {
            b.route().first() == Some(&company_vertex) || b.route().last() == Some(&company_vertex)
        })
        .map(|(i, _)| i)
        .collect();
    selected.sort_by_key(|&i| fleet.buses()[i].capacity());
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet_of(capacities: &[u32]) -> Fleet {
        let mut fleet = Fleet::new();
        for &c in capacities {
            fleet.add_bus(c);
        }
        fleet
    }

    #[test]
    fn test_infeasible_when_demand_exceeds_idle_capacity() {
        let fleet = fleet_of(&[10, 20]);
        assert!(select_to_company(&fleet, 31).is_none());
    }

    #[test]
    fn test_zero_demand_selects_nothing() {
        let fleet = fleet_of(&[10, 20]);
        assert_eq!(select_to_company(&fleet, 0), Some(vec![]));
    }

    #[test]
    fn test_first_fit_prefers_smallest_sufficient_bus() {
        let fleet = fleet_of(&[10, 20, 50]);
        let picked = select_to_company(&fleet, 15).expect("feasible");
        assert_eq!(picked.len(), 1);
        assert_eq!(fleet.buses()[picked[0]].capacity(), 20);
    }

    #[test]
    fn test_largest_fallback_when_no_single_bus_suffices() {
        let fleet = fleet_of(&[10, 20, 50]);
        // 60 > 50, so the largest bus goes first, then 10 covers the rest.
        let picked = select_to_company(&fleet, 60).expect("feasible");
        let capacities: Vec<u32> = picked.iter().map(|&i| fleet.buses()[i].capacity()).collect();
        assert_eq!(capacities, vec![10, 50]);
    }

    #[test]
    fn test_selected_capacity_covers_demand() {
        let fleet = fleet_of(&[7, 13, 19, 23]);
        for demand in [1u32, 7, 8, 20, 40, 62] {
            let picked = select_to_company(&fleet, demand).expect("feasible");
            let total: u64 = picked
                .iter()
                .map(|&i| u64::from(fleet.buses()[i].capacity()))
                .sum();
            assert!(total >= u64::from(demand), "demand {demand} uncovered");
        }
    }

    #[test]
    fn test_greedy_selection_is_tight() {
        let fleet = fleet_of(&[10, 20, 50]);
        let picked = select_to_company(&fleet, 60).expect("feasible");
        let total: u64 = picked
            .iter()
            .map(|&i| u64::from(fleet.buses()[i].capacity()))
            .sum();
        // Dropping any selected bus must leave the demand uncovered.
        for &skip in &picked {
            let rest = total - u64::from(fleet.buses()[skip].capacity());
            assert!(rest < 60);
        }
    }

    #[test]
    fn test_committed_buses_are_not_idle_candidates() {
        let mut fleet = fleet_of(&[10, 20]);
        fleet.assign_route(1, vec![0, 5, 9]);
        assert!(select_to_company(&fleet, 15).is_none());
        let picked = select_to_company(&fleet, 10).expect("feasible");
        assert_eq!(picked, vec![0]);
    }

    #[test]
    fn test_to_garage_matches_route_endpoints() {
        let mut fleet = fleet_of(&[10, 20, 30]);
        fleet.assign_route(0, vec![3, 1, 9]); // ends at company 9
        fleet.assign_route(2, vec![9, 2, 3]); // starts at company 9
        let picked = select_to_garage(&fleet, 9);
        assert_eq!(picked, vec![0, 2]);
        assert!(select_to_garage(&fleet, 77).is_empty());
    }

    #[test]
    fn test_to_garage_sorted_ascending_by_capacity() {
        let mut fleet = fleet_of(&[40, 10]);
        fleet.assign_route(0, vec![3, 9]);
        fleet.assign_route(1, vec![3, 9]);
        let picked = select_to_garage(&fleet, 9);
        let capacities: Vec<u32> = picked.iter().map(|&i| fleet.buses()[i].capacity()).collect();
        assert_eq!(capacities, vec![10, 40]);
    }
}
