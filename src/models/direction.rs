//! Trip direction.

use serde::{Deserialize, Serialize};

use crate::graph::VertexId;

/// Which way a trip runs: workers to the company in the morning, or back to
/// the garage at the end of the shift.
///
/// The direction decides which hub endpoints wrap a bus route:
/// garage → stops → company when heading to work, company → stops → garage
/// on the way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Garage → stops → company.
    ToCompany,
    /// Company → stops → garage.
    ToGarage,
}

impl Direction {
    /// Hub endpoints `(first, last)` that wrap a route in this direction.
    pub fn hub_endpoints(self, garage: VertexId, company: VertexId) -> (VertexId, VertexId) {
        match self {
            Self::ToCompany => (garage, company),
            Self::ToGarage => (company, garage),
        }
    }
}
