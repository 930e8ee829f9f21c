//! Rank engine module
//!
//! Computes a steady-state importance score per document of a [`LinkGraph`]
//! by power iteration of a random walk with teleportation.
//!
//! [`LinkGraph`]: crate::graph::LinkGraph

mod engine;

pub use engine::{compute_ranks, compute_ranks_with, Propagation, RankConfig, RankVector};
