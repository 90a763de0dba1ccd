//! Worker pickup stop.

use serde::{Deserialize, Serialize};

use crate::graph::VertexId;

/// A pickup point: a map vertex and the number of workers waiting there.
///
/// Stops with zero workers are pruned from working lists; route construction
/// may shrink `workers` on its own copy when a stop is split across buses,
/// but the company-owned records are never touched by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    /// Map vertex this stop sits on.
    pub vertex_id: VertexId,
    /// Workers waiting at this stop.
    pub workers: u32,
}

impl Stop {
    /// Creates a stop.
    pub fn new(vertex_id: VertexId, workers: u32) -> Self {
        Self { vertex_id, workers }
    }
}
