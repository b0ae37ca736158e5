//! Solver configuration.
//!
//! Parameters that control integration and relaxation: gravity, damping,
//! constraint elasticity, timestep, floor height and pass count.

use serde::{Deserialize, Serialize};
use shears_types::constants::{
    DEFAULT_DAMPING, DEFAULT_DT, DEFAULT_FLOOR_Z, DEFAULT_GRAVITY, DEFAULT_PHYSICS_ACCURACY,
};
use shears_types::{ShearsError, ShearsResult};

/// Configuration for the Verlet solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Gravitational acceleration along Z.
    pub gravity: f32,

    /// Fraction of each constraint's error corrected per pass, in (0, 1].
    pub elasticity: f32,

    /// Multiplier on the implicit velocity, in [0, 1].
    pub damping: f32,

    /// Timestep in seconds.
    pub dt: f32,

    /// Relaxation passes per step.
    pub physics_accuracy: u32,

    /// Minimum Z. Unpinned particles never go below it.
    pub floor_z: f32,

    /// Optional box clamp `[max_x, max_y, max_z]`: x and y are kept in
    /// `[0, max]`, z below `max_z`.
    pub bounds: Option<[f32; 3]>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            elasticity: 1.0,
            damping: DEFAULT_DAMPING,
            dt: DEFAULT_DT,
            physics_accuracy: DEFAULT_PHYSICS_ACCURACY,
            floor_z: DEFAULT_FLOOR_Z,
            bounds: None,
        }
    }
}

impl SolverConfig {
    /// Creates a config for debugging (single relaxation pass).
    pub fn debug() -> Self {
        Self {
            physics_accuracy: 1,
            ..Default::default()
        }
    }

    /// Creates a stiffer config (more passes, smaller timestep).
    pub fn high_quality() -> Self {
        Self {
            physics_accuracy: 15,
            dt: DEFAULT_DT / 2.0,
            ..Default::default()
        }
    }

    /// Validates the numeric ranges.
    pub fn validate(&self) -> ShearsResult<()> {
        if !self.gravity.is_finite() {
            return Err(ShearsError::InvalidConfig("gravity must be finite".into()));
        }
        if !(self.elasticity > 0.0 && self.elasticity <= 1.0) {
            return Err(ShearsError::InvalidConfig(format!(
                "elasticity must be in (0, 1], got {}",
                self.elasticity
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ShearsError::InvalidConfig(format!(
                "damping must be in [0, 1], got {}",
                self.damping
            )));
        }
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ShearsError::InvalidConfig(format!(
                "timestep dt must be positive, got {}",
                self.dt
            )));
        }
        if self.physics_accuracy == 0 {
            return Err(ShearsError::InvalidConfig(
                "physics accuracy must be >= 1".into(),
            ));
        }
        if !self.floor_z.is_finite() {
            return Err(ShearsError::InvalidConfig("floor z must be finite".into()));
        }
        if let Some(bounds) = self.bounds {
            if bounds.iter().any(|b| !(*b > 0.0 && b.is_finite())) {
                return Err(ShearsError::InvalidConfig(format!(
                    "bounds must be positive, got {:?}",
                    bounds
                )));
            }
        }
        Ok(())
    }
}
