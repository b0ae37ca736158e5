//! Point masses.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where a particle sits relative to the cloth outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Inside the cloth.
    Interior,
    /// On the outline; the "shape" particles a cut should follow.
    Boundary,
    /// Outside the cloth. Still part of the arena, never constrained.
    Exterior,
}

/// A point mass integrated with position-based Verlet.
///
/// Velocity is implicit: `position - previous`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec3,
    pub previous: Vec3,
    pub pinned: bool,
    pub region: Region,
    /// Relative inverse mass used to split constraint corrections.
    /// Generated meshes use 1.0 throughout; zero makes the particle
    /// immovable by constraints while still integrating.
    pub inv_mass: f32,
}

impl Particle {
    /// Creates a particle at rest.
    pub fn new(position: Vec3, region: Region) -> Self {
        Self {
            position,
            previous: position,
            pinned: false,
            region,
            inv_mass: 1.0,
        }
    }

    /// True for outline particles.
    #[inline]
    pub fn is_shape(&self) -> bool {
        self.region == Region::Boundary
    }

    /// True for particles that belong to the cloth (interior or outline).
    #[inline]
    pub fn is_member(&self) -> bool {
        self.region != Region::Exterior
    }

    /// Correction weight: zero while pinned.
    #[inline]
    pub fn weight(&self) -> f32 {
        if self.pinned {
            0.0
        } else {
            self.inv_mass
        }
    }

    /// Implicit per-step displacement.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.position - self.previous
    }

    /// Moves the particle without introducing velocity.
    #[inline]
    pub fn offset(&mut self, delta: Vec3) {
        self.position += delta;
        self.previous += delta;
    }

    /// Places the particle at rest at `p`.
    pub fn reset_position(&mut self, p: Vec3) {
        self.position = p;
        self.previous = p;
    }

    /// Planar (XY) distance to a point.
    #[inline]
    pub fn planar_distance(&self, x: f32, y: f32) -> f32 {
        let dx = self.position.x - x;
        let dy = self.position.y - y;
        (dx * dx + dy * dy).sqrt()
    }
}
