//! Shortest-path distance cache.
//!
//! Provides a sparse pairwise distance map built from repeated single-source
//! shortest-path runs over the road graph.

mod cache;

pub use cache::DistanceCache;
