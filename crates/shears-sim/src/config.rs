//! Aggregate simulation configuration.
//!
//! One typed value describes a whole simulation. Loading it from a file is
//! the caller's job; it is validated once, when the simulation is built.

use serde::{Deserialize, Serialize};
use shears_interact::MouseConfig;
use shears_mesh::MeshConfig;
use shears_solver::SolverConfig;
use shears_types::constants::DEFAULT_SETTLE_ITERATIONS;
use shears_types::{ShearsError, ShearsResult};

use crate::score::ScoreMetric;
use crate::trajectory;

/// Configuration for a [`Simulation`](crate::Simulation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum `[x, y, z]` extent used by `out_of_bounds`.
    pub bounds: [f32; 3],
    /// Updates run by the first `reset` before the snapshot is taken.
    pub settle_iterations: u32,
    /// Updates run by `step`.
    pub update_iterations: u32,
    /// Planar radius of a grasp. Zero grabs the single nearest particle.
    pub grasp_radius: f32,
    /// Goal metric reported by `score`.
    pub score: ScoreMetric,
    /// Cutting trajectory handed to external consumers.
    pub trajectory: Vec<[f32; 2]>,
    pub mesh: MeshConfig,
    pub solver: SolverConfig,
    pub mouse: MouseConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bounds: [600.0, 600.0, 800.0],
            settle_iterations: DEFAULT_SETTLE_ITERATIONS,
            update_iterations: 1,
            grasp_radius: 0.0,
            score: ScoreMetric::default(),
            trajectory: trajectory::default_trajectory(),
            mesh: MeshConfig::default(),
            solver: SolverConfig::default(),
            mouse: MouseConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// The circle-cut task: circle outline, cutting enabled, cut accuracy
    /// as the goal.
    pub fn circle_cut() -> Self {
        Self {
            score: ScoreMetric::CutAccuracy,
            mesh: MeshConfig::circle(),
            mouse: MouseConfig {
                cutting: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Replaces the trajectory with the concatenation of `parts`.
    pub fn with_multi_part_trajectory<I, P>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = [f32; 2]>,
    {
        self.trajectory = trajectory::flatten(parts);
        self
    }

    /// Validates every section.
    pub fn validate(&self) -> ShearsResult<()> {
        if self.bounds.iter().any(|b| !(*b > 0.0 && b.is_finite())) {
            return Err(ShearsError::InvalidConfig(format!(
                "bounds must be positive, got {:?}",
                self.bounds
            )));
        }
        if self.update_iterations == 0 {
            return Err(ShearsError::InvalidConfig(
                "update iterations must be >= 1".into(),
            ));
        }
        if !(self.grasp_radius >= 0.0 && self.grasp_radius.is_finite()) {
            return Err(ShearsError::InvalidConfig(format!(
                "grasp radius must be non-negative, got {}",
                self.grasp_radius
            )));
        }
        if self.trajectory.iter().flatten().any(|c| !c.is_finite()) {
            return Err(ShearsError::InvalidConfig(
                "trajectory points must be finite".into(),
            ));
        }
        self.mesh.validate()?;
        self.solver.validate()?;
        self.mouse.validate()
    }
}
