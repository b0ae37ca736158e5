//! Mesh configuration.
//!
//! Describes the grid (dimensions, spacing, origin), its outline, which
//! particles start pinned, and optional seeded positional noise.

use serde::{Deserialize, Serialize};
use shears_types::{ShearsError, ShearsResult};

use crate::shape::ShapeSpec;

/// Which particles are pinned when the mesh is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinCondition {
    /// Nothing pinned.
    #[default]
    None,
    /// The last row (largest Y).
    TopRow,
    /// The four grid corners.
    Corners,
}

/// Configuration for building a grid cloth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Particles per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Spacing along X.
    pub dx: f32,
    /// Spacing along Y.
    pub dy: f32,
    /// Position of grid point (0, 0).
    pub origin: [f32; 3],
    /// Cloth outline.
    pub shape: ShapeSpec,
    /// Particles pinned at build time.
    pub pin: PinCondition,
    /// Half-width of the uniform positional noise (0 disables it).
    pub noise: f32,
    /// Seed for the noise generator.
    pub seed: u64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            dx: 10.0,
            dy: 10.0,
            origin: [50.0, 50.0, 0.0],
            shape: ShapeSpec::Rectangle,
            pin: PinCondition::None,
            noise: 0.0,
            seed: 0,
        }
    }
}

impl MeshConfig {
    /// A flat rectangular grid with equal spacing at the origin.
    pub fn grid(width: usize, height: usize, spacing: f32) -> Self {
        Self {
            width,
            height,
            dx: spacing,
            dy: spacing,
            origin: [0.0, 0.0, 0.0],
            ..Default::default()
        }
    }

    /// The circle-cut cloth: a circle of radius 150 around (300, 300)
    /// on the default 50×50 grid.
    pub fn circle() -> Self {
        Self {
            shape: ShapeSpec::Circle {
                center: [300.0, 300.0],
                radius: 150.0,
                band: 5.0,
            },
            ..Default::default()
        }
    }

    /// Validates dimensions, spacing, noise and the outline.
    pub fn validate(&self) -> ShearsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShearsError::InvalidConfig(format!(
                "grid dimensions must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).map_or(true, |n| n > u32::MAX as usize) {
            return Err(ShearsError::InvalidConfig(format!(
                "grid {}x{} is too large",
                self.width, self.height
            )));
        }
        if !(self.dx > 0.0 && self.dx.is_finite()) || !(self.dy > 0.0 && self.dy.is_finite()) {
            return Err(ShearsError::InvalidConfig(format!(
                "spacing must be positive, got dx={} dy={}",
                self.dx, self.dy
            )));
        }
        if self.origin.iter().any(|c| !c.is_finite()) {
            return Err(ShearsError::InvalidConfig("origin must be finite".into()));
        }
        if !(self.noise >= 0.0 && self.noise.is_finite()) {
            return Err(ShearsError::InvalidConfig(format!(
                "noise must be non-negative, got {}",
                self.noise
            )));
        }
        self.shape.validate()
    }
}
