//! Company with its bus stops.

use serde::{Deserialize, Serialize};

use crate::graph::VertexId;

use super::Stop;

/// An employer whose workers are collected from a set of stops and driven to
/// a single workplace vertex.
///
/// The stop list here is canonical: the optimizer works on copies and never
/// mutates it, so repeated optimization runs see identical demand.
///
/// # Examples
///
/// ```
/// use shuttle_routing::models::Company;
///
/// let mut company = Company::new("BosH", 12);
/// company.set_stop(3, 5);
/// company.set_stop(4, 2);
/// company.set_stop(3, 8); // update
/// company.set_stop(4, 0); // remove
/// assert_eq!(company.stops().len(), 1);
/// assert_eq!(company.total_demand(), 8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    name: String,
    vertex_id: VertexId,
    stops: Vec<Stop>,
}

impl Company {
    /// Creates a company located at the given vertex, with no stops.
    pub fn new(name: impl Into<String>, vertex_id: VertexId) -> Self {
        Self {
            name: name.into(),
            vertex_id,
            stops: Vec::new(),
        }
    }

    /// Company name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Workplace vertex.
    pub fn vertex_id(&self) -> VertexId {
        self.vertex_id
    }

    /// Moves the workplace to another vertex.
    pub fn set_vertex_id(&mut self, vertex_id: VertexId) {
        self.vertex_id = vertex_id;
    }

    /// The company's stops, in registration order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Adds, updates, or removes the stop at `vertex_id`.
    ///
    /// A known stop is updated to `workers`, or removed when `workers` is
    /// zero. An unknown stop is added when `workers` is positive; setting an
    /// unknown stop to zero changes nothing.
    pub fn set_stop(&mut self, vertex_id: VertexId, workers: u32) {
        match self.stops.iter().position(|s| s.vertex_id == vertex_id) {
            Some(i) if workers == 0 => {
                self.stops.remove(i);
            }
            Some(i) => self.stops[i].workers = workers,
            None if workers > 0 => self.stops.push(Stop::new(vertex_id, workers)),
            None => {}
        }
    }

    /// Total workers across all stops.
    pub fn total_demand(&self) -> u32 {
        self.stops.iter().map(|s| s.workers).sum()
    }

    /// Returns `true` if the company has no stops.
    pub fn has_no_stops(&self) -> bool {
        self.stops.is_empty()
    }
}
