//! Simulated-annealing search over stop orderings.
//!
//! A single-solution trajectory search: each step proposes a neighbor by
//! swapping two stops in the visiting order and accepts it with probability
//! `1 / (1 + exp(delta / temperature))` — near one-half at high temperature,
//! trending toward pure improvement as the temperature falls. The schedule
//! is linear: the temperature starts at `iterations * cooling_rate` and
//! drops by `cooling_rate` every iteration.
//!
//! # References
//!
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated
//! Annealing".

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceCache;
use crate::graph::{Graph, VertexId};
use crate::models::{Company, Direction, Fleet, Stop};

use super::construction::fill_routes;
use super::cost::{attach_hubs, plan_cost};
use super::selection::{select_to_company, select_to_garage};
use super::INFEASIBLE;

/// Annealing schedule parameters.
///
/// # Examples
///
/// ```
/// use shuttle_routing::optimize::AnnealConfig;
///
/// let config = AnnealConfig::new(10_000, 0.05);
/// assert_eq!(config.initial_temperature(), 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnealConfig {
    /// Number of search iterations; the sole bound on run time.
    pub iterations: u32,
    /// Temperature decrement per iteration.
    pub cooling_rate: f64,
}

impl AnnealConfig {
    /// Creates a schedule with the given iteration count and cooling rate.
    pub fn new(iterations: u32, cooling_rate: f64) -> Self {
        Self {
            iterations,
            cooling_rate,
        }
    }

    /// Starting temperature of the linear schedule.
    pub fn initial_temperature(&self) -> f64 {
        f64::from(self.iterations) * self.cooling_rate
    }
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self::new(100_000, 0.05)
    }
}

/// Optimizes one company's trips and writes the resulting routes into the
/// fleet.
///
/// Borrows the graph mutably because shortest-path labels are transient
/// single-writer state; distance lookups during the search go through the
/// cache built once per call.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use shuttle_routing::graph::Graph;
/// use shuttle_routing::models::{Company, Direction, Fleet};
/// use shuttle_routing::optimize::{AnnealConfig, Annealer};
///
/// // Unit square 0 - 1 - 2 - 3 - 0; garage at 3, company at 2.
/// let mut graph = Graph::new();
/// graph.add_vertex(0, 0.0, 0.0);
/// graph.add_vertex(1, 1.0, 0.0);
/// graph.add_vertex(2, 1.0, 1.0);
/// graph.add_vertex(3, 0.0, 1.0);
/// for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
///     graph.add_edge(a, b);
///     graph.add_edge(b, a);
/// }
///
/// let mut company = Company::new("BosH", 2);
/// company.set_stop(0, 3);
/// company.set_stop(1, 2);
/// let mut fleet = Fleet::new();
/// fleet.add_bus(5);
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let mut annealer = Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(200, 0.05));
/// let distance = annealer.optimize(&company, Direction::ToCompany, &mut rng);
/// assert!((distance - 3.0).abs() < 1e-10);
/// assert_eq!(fleet.buses()[0].route().first(), Some(&3));
/// assert_eq!(fleet.buses()[0].route().last(), Some(&2));
/// ```
pub struct Annealer<'a> {
    graph: &'a mut Graph,
    fleet: &'a mut Fleet,
    garage: VertexId,
    config: AnnealConfig,
}

impl<'a> Annealer<'a> {
    /// Creates an annealer over the given road graph and fleet.
    pub fn new(
        graph: &'a mut Graph,
        fleet: &'a mut Fleet,
        garage: VertexId,
        config: AnnealConfig,
    ) -> Self {
        Self {
            graph,
            fleet,
            garage,
            config,
        }
    }

    /// Runs one optimization pass for `company` in `direction`.
    ///
    /// Selects buses, searches stop orderings for the cheapest total
    /// distance, and commits the best ordering's routes (hub endpoints
    /// included) to the selected buses. Returns the total distance, or
    /// [`INFEASIBLE`] when the demand cannot be covered or some required
    /// leg of the road network is unreachable. The company's own stop list
    /// is never modified.
    pub fn optimize<R: Rng>(
        &mut self,
        company: &Company,
        direction: Direction,
        rng: &mut R,
    ) -> f64 {
        let selected = match direction {
            Direction::ToCompany => {
                match select_to_company(self.fleet, company.total_demand()) {
                    Some(selected) => selected,
                    None => {
                        warn!(
                            "company {}: demand {} exceeds idle capacity {}",
                            company.name(),
                            company.total_demand(),
                            self.fleet.idle_capacity()
                        );
                        return INFEASIBLE;
                    }
                }
            }
            Direction::ToGarage => select_to_garage(self.fleet, company.vertex_id()),
        };

        let mut order: Vec<Stop> = company
            .stops()
            .iter()
            .copied()
            .filter(|s| s.workers > 0)
            .collect();
        if order.is_empty() {
            return 0.0;
        }
        if selected.is_empty() {
            warn!("company {}: no buses to run {:?}", company.name(), direction);
            return INFEASIBLE;
        }
        let capacities: Vec<u32> = selected
            .iter()
            .map(|&i| self.fleet.buses()[i].capacity())
            .collect();

        let cache = DistanceCache::build(
            self.graph,
            self.garage,
            company.vertex_id(),
            &order,
            direction,
        );

        let company_vertex = company.vertex_id();
        let Some(mut current_cost) =
            plan_cost(&order, &capacities, self.garage, company_vertex, &cache, direction)
        else {
            warn!(
                "company {}: some stop is unreachable, {:?} trip dropped",
                company.name(),
                direction
            );
            return INFEASIBLE;
        };
        let initial_cost = current_cost;
        let mut best = order.clone();
        let mut best_cost = current_cost;

        if order.len() >= 2 {
            let mut temperature = self.config.initial_temperature();
            for _ in 0..self.config.iterations {
                let a = rng.random_range(0..order.len());
                let mut b = rng.random_range(0..order.len());
                while b == a {
                    b = rng.random_range(0..order.len());
                }
                let mut candidate = order.clone();
                candidate.swap(a, b);

                if let Some(cost) = plan_cost(
                    &candidate,
                    &capacities,
                    self.garage,
                    company_vertex,
                    &cache,
                    direction,
                ) {
                    let delta = cost - current_cost;
                    let acceptance = 1.0 / (1.0 + (delta / temperature).exp());
                    if rng.random::<f64>() <= acceptance {
                        order = candidate;
                        current_cost = cost;
                        if current_cost < best_cost {
                            best = order.clone();
                            best_cost = current_cost;
                        }
                    }
                }
                temperature -= self.config.cooling_rate;
            }
        }

        for (&bus, path) in selected.iter().zip(fill_routes(&best, &capacities)) {
            let route = if path.is_empty() {
                Vec::new()
            } else {
                attach_hubs(&path, self.garage, company_vertex, direction)
            };
            self.fleet.assign_route(bus, route);
        }
        debug!(
            "company {}: {:?} trip over {} buses, distance {:.3} (started at {:.3})",
            company.name(),
            direction,
            selected.len(),
            best_cost,
            initial_cost
        );
        best_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Unit square 0 - 1 - 2 - 3 - 0 with both stops on the garage side.
    fn square() -> Graph {
        let mut graph = Graph::new();
        graph.add_vertex(0, 0.0, 0.0);
        graph.add_vertex(1, 1.0, 0.0);
        graph.add_vertex(2, 1.0, 1.0);
        graph.add_vertex(3, 0.0, 1.0);
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            graph.add_edge(a, b);
            graph.add_edge(b, a);
        }
        graph
    }

    /// Line 0 - 1 - 2 - 3 - 4 with unit spacing.
    fn line() -> Graph {
        let mut graph = Graph::new();
        for id in 0..5u64 {
            graph.add_vertex(id, id as f64, 0.0);
        }
        for id in 0..4u64 {
            graph.add_edge(id, id + 1);
            graph.add_edge(id + 1, id);
        }
        graph
    }

    fn square_company() -> Company {
        let mut company = Company::new("BosH", 2);
        company.set_stop(0, 3);
        company.set_stop(1, 2);
        company
    }

    #[test]
    fn test_square_trip_distance() {
        let mut graph = square();
        let mut fleet = Fleet::new();
        fleet.add_bus(5);
        let company = square_company();
        let mut rng = StdRng::seed_from_u64(42);

        let mut annealer =
            Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(100, 0.05));
        let distance = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        assert!((distance - 3.0).abs() < 1e-10);

        let route = fleet.buses()[0].route();
        assert_eq!(route.first(), Some(&3));
        assert_eq!(route.last(), Some(&2));
        assert_eq!(route.len(), 4);
    }

    #[test]
    fn test_zero_iterations_reports_initial_cost() {
        let mut graph = square();
        let mut fleet = Fleet::new();
        fleet.add_bus(5);
        let company = square_company();
        let mut rng = StdRng::seed_from_u64(1);

        let mut annealer = Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(0, 0.05));
        let distance = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        // Registration order is kept: 3 -> 0 -> 1 -> 2.
        assert!((distance - 3.0).abs() < 1e-10);
        assert_eq!(fleet.buses()[0].route(), &[3, 0, 1, 2]);
    }

    #[test]
    fn test_infeasible_demand() {
        let mut graph = square();
        let mut fleet = Fleet::new();
        fleet.add_bus(4); // five workers waiting
        let company = square_company();
        let mut rng = StdRng::seed_from_u64(1);

        let mut annealer = Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(10, 0.05));
        let distance = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        assert_eq!(distance, INFEASIBLE);
        assert!(fleet.buses()[0].is_idle());
    }

    #[test]
    fn test_unreachable_stop_is_infeasible() {
        let mut graph = square();
        graph.add_vertex(9, 50.0, 50.0); // no edges
        let mut fleet = Fleet::new();
        fleet.add_bus(10);
        let mut company = Company::new("BosH", 2);
        company.set_stop(0, 2);
        company.set_stop(9, 1);
        let mut rng = StdRng::seed_from_u64(1);

        let mut annealer = Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(10, 0.05));
        let distance = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        assert_eq!(distance, INFEASIBLE);
    }

    #[test]
    fn test_company_without_stops_costs_nothing() {
        let mut graph = square();
        let mut fleet = Fleet::new();
        fleet.add_bus(5);
        let company = Company::new("Empty", 2);
        let mut rng = StdRng::seed_from_u64(1);

        let mut annealer = Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(10, 0.05));
        let distance = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        assert_eq!(distance, 0.0);
        assert!(fleet.buses()[0].is_idle());
    }

    #[test]
    fn test_single_stop_skips_search() {
        let mut graph = line();
        let mut fleet = Fleet::new();
        fleet.add_bus(5);
        let mut company = Company::new("One", 4);
        company.set_stop(2, 3);
        let mut rng = StdRng::seed_from_u64(1);

        let mut annealer =
            Annealer::new(&mut graph, &mut fleet, 0, AnnealConfig::new(1000, 0.05));
        let distance = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        // 0 -> 2 -> 4.
        assert!((distance - 4.0).abs() < 1e-10);
        assert_eq!(fleet.buses()[0].route(), &[0, 2, 4]);
    }

    #[test]
    fn test_search_does_not_worsen_initial_order() {
        let mut graph = line();
        let mut fleet = Fleet::new();
        fleet.add_bus(10);
        // Registration order 3, 1, 2 is a detour; 1, 2, 3 is optimal.
        let mut company = Company::new("Line", 4);
        company.set_stop(3, 2);
        company.set_stop(1, 2);
        company.set_stop(2, 2);
        let mut rng = StdRng::seed_from_u64(7);

        let initial = {
            let mut fleet_copy = fleet.clone();
            let mut graph_copy = graph.clone();
            let mut warmup =
                Annealer::new(&mut graph_copy, &mut fleet_copy, 0, AnnealConfig::new(0, 0.05));
            warmup.optimize(&company, Direction::ToCompany, &mut StdRng::seed_from_u64(7))
        };
        assert!((initial - 8.0).abs() < 1e-10); // 0->3 + 3->1 + 1->2 + 2->4

        let mut annealer =
            Annealer::new(&mut graph, &mut fleet, 0, AnnealConfig::new(500, 0.05));
        let best = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        assert!(best <= initial + 1e-10);
        assert!(best >= 4.0 - 1e-10); // cannot beat the straight line
    }

    #[test]
    fn test_round_trip_reuses_committed_buses() {
        let mut graph = square();
        let mut fleet = Fleet::new();
        fleet.add_bus(5);
        fleet.add_bus(50); // stays idle; outbound fits in the small bus
        let company = square_company();
        let mut rng = StdRng::seed_from_u64(3);

        let mut annealer =
            Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(100, 0.05));
        let out = annealer.optimize(&company, Direction::ToCompany, &mut rng);
        assert!(out >= 0.0);
        let back = annealer.optimize(&company, Direction::ToGarage, &mut rng);
        assert!(back >= 0.0);

        let route = fleet.buses()[0].route();
        assert_eq!(route.first(), Some(&2));
        assert_eq!(route.last(), Some(&3));
        assert!(fleet.buses()[1].is_idle());
    }

    #[test]
    fn test_to_garage_without_committed_buses_is_infeasible() {
        let mut graph = square();
        let mut fleet = Fleet::new();
        fleet.add_bus(5);
        let company = square_company();
        let mut rng = StdRng::seed_from_u64(3);

        let mut annealer =
            Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(10, 0.05));
        let back = annealer.optimize(&company, Direction::ToGarage, &mut rng);
        assert_eq!(back, INFEASIBLE);
    }

    #[test]
    fn test_fixed_seed_reproduces_cost() {
        let graph = line();
        let mut company = Company::new("Line", 4);
        company.set_stop(3, 2);
        company.set_stop(1, 2);
        company.set_stop(2, 2);

        let run = || {
            let mut graph = graph.clone();
            let mut fleet = Fleet::new();
            fleet.add_bus(10);
            let mut rng = StdRng::seed_from_u64(99);
            let mut annealer =
                Annealer::new(&mut graph, &mut fleet, 0, AnnealConfig::new(300, 0.05));
            let cost = annealer.optimize(&company, Direction::ToCompany, &mut rng);
            (cost, fleet.buses()[0].route().to_vec())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_company_stops_survive_optimization() {
        let mut graph = square();
        let mut fleet = Fleet::new();
        fleet.add_bus(4); // forces a split of stop 0 across buses
        fleet.add_bus(4);
        let company = square_company();
        let demand_before = company.total_demand();
        let mut rng = StdRng::seed_from_u64(5);

        let mut annealer =
            Annealer::new(&mut graph, &mut fleet, 3, AnnealConfig::new(50, 0.05));
        annealer.optimize(&company, Direction::ToCompany, &mut rng);
        assert_eq!(company.total_demand(), demand_before);
        assert_eq!(company.stops().len(), 2);
    }
}
