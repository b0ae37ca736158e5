//! # shears-solver
//!
//! Position-based Verlet integration and iterative constraint relaxation.
//!
//! ## Key Types
//!
//! - [`SolverConfig`]: gravity, elasticity, damping, timestep, floor,
//!   relaxation passes ("physics accuracy").
//! - [`VerletSolver`]: advances a [`ClothMesh`](shears_mesh::ClothMesh)
//!   by one step.
//! - [`StepReport`]: per-step diagnostics; the summed correction doubles
//!   as a settledness signal.

pub mod config;
pub mod report;
pub mod verlet;

pub use config::SolverConfig;
pub use report::StepReport;
pub use verlet::VerletSolver;
