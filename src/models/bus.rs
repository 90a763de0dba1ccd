//! Bus and fleet registry.

use serde::{Deserialize, Serialize};

use crate::graph::VertexId;

/// A bus with a fixed seat capacity and its currently assigned route.
///
/// The route is an ordered vertex sequence including the hub endpoints,
/// written by the optimizer as its durable output. A bus with a non-empty
/// route is committed to a trip and no longer idle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bus {
    id: u32,
    capacity: u32,
    route: Vec<VertexId>,
}

impl Bus {
    pub(crate) fn new(id: u32, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            route: Vec::new(),
        }
    }

    /// Fleet-assigned bus id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Seat capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Assigned route (empty when idle).
    pub fn route(&self) -> &[VertexId] {
        &self.route
    }

    /// Returns `true` if no route is assigned.
    pub fn is_idle(&self) -> bool {
        self.route.is_empty()
    }

    /// Drops the assigned route, making the bus idle again.
    pub fn clear_route(&mut self) {
        self.route.clear();
    }

    pub(crate) fn set_route(&mut self, route: Vec<VertexId>) {
        self.route = route;
    }
}

/// The bus registry.
///
/// Owns the buses and the id counter that numbers them; ids are never
/// reused, even after a removal.
///
/// # Examples
///
/// ```
/// use shuttle_routing::models::Fleet;
///
/// let mut fleet = Fleet::new();
/// let a = fleet.add_bus(50).unwrap();
/// let b = fleet.add_bus(20).unwrap();
/// assert_ne!(a, b);
/// assert!(fleet.add_bus(0).is_none()); // capacity must be positive
///
/// fleet.sort_by_capacity();
/// assert_eq!(fleet.buses()[0].capacity(), 20);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fleet {
    buses: Vec<Bus>,
    next_id: u32,
}

impl Fleet {
    /// Creates an empty fleet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bus and returns its assigned id.
    ///
    /// Returns `None` if `capacity` is zero.
    pub fn add_bus(&mut self, capacity: u32) -> Option<u32> {
        if capacity == 0 {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.buses.push(Bus::new(id, capacity));
        Some(id)
    }

    /// Removes the bus with the given id.
    ///
    /// Returns `false` if no such bus exists.
    pub fn remove_bus(&mut self, id: u32) -> bool {
        match self.buses.iter().position(|b| b.id() == id) {
            Some(i) => {
                self.buses.remove(i);
                true
            }
            None => false,
        }
    }

    /// The registered buses.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Number of registered buses.
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    /// Returns `true` if no buses are registered.
    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    /// Sorts buses ascending by capacity (stable, so ids break ties).
    pub fn sort_by_capacity(&mut self) {
        self.buses.sort_by_key(Bus::capacity);
    }

    /// Clears every bus route, making the whole fleet idle.
    pub fn clear_routes(&mut self) {
        for bus in &mut self.buses {
            bus.clear_route();
        }
    }

    /// Combined capacity of idle buses.
    pub fn idle_capacity(&self) -> u64 {
        self.buses
            .iter()
            .filter(|b| b.is_idle())
            .map(|b| u64::from(b.capacity()))
            .sum()
    }

    /// Combined capacity of the whole fleet.
    pub fn total_capacity(&self) -> u64 {
        self.buses.iter().map(|b| u64::from(b.capacity())).sum()
    }

    pub(crate) fn assign_route(&mut self, index: usize, route: Vec<VertexId>) {
        self.buses[index].set_route(route);
    }
}
