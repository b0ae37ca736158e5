//! # shears-sim
//!
//! Orchestration of a cloth simulation.
//!
//! ## Key Types
//!
//! - [`Cloth`]: mesh, solver, pointer and tensioners advanced together.
//! - [`Simulation`]: stepping with rollback, settled reset snapshot,
//!   grasps, scoring, observation and render views, bincode persistence.
//! - [`SimulationConfig`]: the aggregate typed configuration.
//! - [`ScoreMetric`]: goal metrics, higher is better.

pub mod cloth;
pub mod config;
pub mod observation;
pub mod persist;
pub mod score;
pub mod simulation;
pub mod trajectory;

pub use cloth::Cloth;
pub use config::SimulationConfig;
pub use observation::{Observation, ParticleObservation, TensionerObservation};
pub use score::ScoreMetric;
pub use simulation::Simulation;
