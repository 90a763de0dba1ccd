//! Planning facade over the road graph, fleet, and company registry.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, VertexId};
use crate::models::{Company, Direction, Fleet};
use crate::optimize::{AnnealConfig, Annealer, INFEASIBLE};

/// Outcome of planning one company's round trip.
///
/// Either distance is [`INFEASIBLE`] when that leg could not be served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Company name.
    pub company: String,
    /// Garage → stops → company distance.
    pub outbound_distance: f64,
    /// Company → stops → garage distance.
    pub inbound_distance: f64,
}

/// Owns the problem state and drives optimization over it.
///
/// The planner holds the road graph, the garage location, the fleet, and the
/// company registry, and hands them to the optimizer one trip at a time. A
/// failed trip for one company never prevents planning the others.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use shuttle_routing::graph::Graph;
/// use shuttle_routing::models::{Company, Direction};
/// use shuttle_routing::planner::Planner;
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
/// let mut planner = Planner::new(graph, 0);
/// planner.fleet_mut().add_bus(10);
/// let mut company = Company::new("BosH", 2);
/// company.set_stop(1, 4);
/// planner.add_company(company);
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let distance = planner.run_optimization(0, Direction::ToCompany, &mut rng);
/// assert!((distance - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    graph: Graph,
    garage: VertexId,
    fleet: Fleet,
    companies: Vec<Company>,
    config: AnnealConfig,
}

impl Planner {
    /// Creates a planner over a loaded road graph with the garage at the
    /// given vertex.
    pub fn new(graph: Graph, garage: VertexId) -> Self {
        Self {
            graph,
            garage,
            fleet: Fleet::new(),
            companies: Vec::new(),
            config: AnnealConfig::default(),
        }
    }

    /// Sets the annealing schedule.
    pub fn with_config(mut self, config: AnnealConfig) -> Self {
        self.config = config;
        self
    }

    /// The road graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Mutable access to the road graph.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Garage vertex.
    pub fn garage(&self) -> VertexId {
        self.garage
    }

    /// Moves the garage to another vertex.
    pub fn set_garage(&mut self, garage: VertexId) {
        self.garage = garage;
    }

    /// The fleet registry.
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Mutable access to the fleet registry.
    pub fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    /// Registered companies.
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Mutable access to the registered companies.
    pub fn companies_mut(&mut self) -> &mut [Company] {
        &mut self.companies
    }

    /// Registers a company.
    pub fn add_company(&mut self, company: Company) {
        self.companies.push(company);
    }

    /// Removes the company at `index`.
    ///
    /// Returns `false` if the index is out of range.
    pub fn remove_company(&mut self, index: usize) -> bool {
        if index < self.companies.len() {
            self.companies.remove(index);
            true
        } else {
            false
        }
    }

    /// Optimizes one trip for the company at `index` and writes the routes
    /// into the fleet.
    ///
    /// Returns the total distance, or [`INFEASIBLE`] when the index is
    /// unknown, the demand cannot be covered, or a required road is
    /// unreachable.
    pub fn run_optimization<R: Rng>(
        &mut self,
        index: usize,
        direction: Direction,
        rng: &mut R,
    ) -> f64 {
        let Some(company) = self.companies.get(index).cloned() else {
            warn!("no company at index {index}");
            return INFEASIBLE;
        };
        debug!("planning {:?} trip for {}", direction, company.name());
        let mut annealer =
            Annealer::new(&mut self.graph, &mut self.fleet, self.garage, self.config);
        annealer.optimize(&company, direction, rng)
    }

    /// Plans round trips for every company in registration order.
    ///
    /// Sorts the fleet ascending by capacity and clears all routes first;
    /// buses committed to one company stay committed while the remaining
    /// companies are planned.
    pub fn plan_all<R: Rng>(&mut self, rng: &mut R) -> Vec<TripPlan> {
        self.fleet.sort_by_capacity();
        self.fleet.clear_routes();
        (0..self.companies.len())
            .map(|i| TripPlan {
                company: self.companies[i].name().to_owned(),
                outbound_distance: self.run_optimization(i, Direction::ToCompany, rng),
                inbound_distance: self.run_optimization(i, Direction::ToGarage, rng),
            })
            .collect()
    }

    /// Clears every bus route before a fresh optimization pass.
    pub fn reset_routes(&mut self) {
        self.fleet.clear_routes();
    }

    /// Sorts the fleet ascending by capacity.
    pub fn sort_fleet_by_capacity(&mut self) {
        self.fleet.sort_by_capacity();
    }

    /// Returns `true` if every map vertex is reachable from the garage.
    pub fn garage_reaches_all(&mut self) -> bool {
        self.graph.is_connected(self.garage)
    }
}
