//! Distance constraints between particles.

use serde::{Deserialize, Serialize};
use shears_types::ParticleId;

/// Which grid edge a constraint was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Horizontal or vertical neighbour.
    Structural,
    /// Diagonal neighbour.
    Shear,
}

/// A rest-length relationship between two particles.
///
/// The rest length is captured once at build time. Cutting deactivates
/// the constraint; it is never reactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub a: ParticleId,
    pub b: ParticleId,
    pub kind: ConstraintKind,
    rest_length: f32,
    active: bool,
}

impl Constraint {
    pub fn new(a: ParticleId, b: ParticleId, rest_length: f32, kind: ConstraintKind) -> Self {
        Self {
            a,
            b,
            kind,
            rest_length,
            active: true,
        }
    }

    #[inline]
    pub fn rest_length(&self) -> f32 {
        self.rest_length
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the endpoint pair.
    #[inline]
    pub fn endpoints(&self) -> [ParticleId; 2] {
        [self.a, self.b]
    }

    /// Deactivates the constraint. Returns false if it was already cut.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}
