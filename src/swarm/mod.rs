//! Swarm-based placement search.
//!
//! [`ParticleSwarm`] drives a bounded particle swarm optimization run over
//! flattened sensor configurations: evaluate every particle through the
//! scoring engine, update personal and global bests under strict
//! improvement, move with velocity clamping, and hard-clamp positions to the
//! geographic domain. The run always executes its full iteration budget,
//! with no convergence-based early exit, and returns a [`PlacementResult`]
//! carrying the per-iteration global-best history.

mod pso;

pub use pso::{ParticleSwarm, PlacementResult};
