//! Fleet selection and route optimization.
//!
//! - [`select_to_company`] / [`select_to_garage`] — direction-dependent bus
//!   selection
//! - [`fill_routes`] — greedy partition of a stop ordering across buses
//! - [`plan_cost`] / [`attach_hubs`] — trip cost over the distance cache
//! - [`Annealer`] — simulated-annealing search over stop orderings

mod annealing;
mod construction;
mod cost;
mod selection;

pub use annealing::{AnnealConfig, Annealer};
pub use construction::fill_routes;
pub use cost::{attach_hubs, plan_cost};
pub use selection::{select_to_company, select_to_garage};

/// Sentinel total distance meaning "this trip cannot be served".
pub const INFEASIBLE: f64 = -1.0;
