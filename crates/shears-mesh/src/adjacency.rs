//! Particle → constraint incidence.
//!
//! Built once from the constraint list. Constraints are never added after
//! construction, so the lists stay valid; cut constraints remain listed
//! and are filtered by activity at query time.

use serde::{Deserialize, Serialize};
use shears_types::{ConstraintId, ParticleId};

use crate::constraint::Constraint;

/// For each particle, the constraints that reference it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjacency {
    incident: Vec<Vec<ConstraintId>>,
}

impl Adjacency {
    /// Build incidence lists for `particle_count` particles.
    pub fn build(particle_count: usize, constraints: &[Constraint]) -> Self {
        let mut incident: Vec<Vec<ConstraintId>> = vec![Vec::new(); particle_count];
        for (c, constraint) in constraints.iter().enumerate() {
            let id = ConstraintId(c as u32);
            incident[constraint.a.index()].push(id);
            incident[constraint.b.index()].push(id);
        }
        Self { incident }
    }

    /// All constraints ever attached to `p`, cut or not.
    pub fn incident(&self, p: ParticleId) -> &[ConstraintId] {
        self.incident
            .get(p.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of particles covered.
    pub fn len(&self) -> usize {
        self.incident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incident.is_empty()
    }
}
