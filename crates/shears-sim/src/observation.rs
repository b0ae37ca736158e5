//! Observation and render views of a cloth.

use serde::{Deserialize, Serialize};
use shears_types::TensionerId;

/// State of one particle as seen by an external consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleObservation {
    pub position: [f32; 3],
    /// Active constraints incident to the particle.
    pub constraints: usize,
    /// True for outline particles.
    pub shape: bool,
}

/// State of one active grasp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionerObservation {
    pub id: TensionerId,
    /// Pin origin plus total planar displacement.
    pub position: [f32; 2],
    /// Total displacement since the grasp started.
    pub displacement: [f32; 3],
}

/// Everything an agent gets to see, in particle index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub particles: Vec<ParticleObservation>,
    pub tensioners: Vec<TensionerObservation>,
}

impl Observation {
    /// Flattens to `[x, y, z, constraints, shape]` per particle followed by
    /// `[x, y, dx, dy, dz]` per grasp.
    pub fn to_vec(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.particles.len() * 5 + self.tensioners.len() * 5);
        for p in &self.particles {
            out.extend_from_slice(&p.position);
            out.push(p.constraints as f32);
            out.push(if p.shape { 1.0 } else { 0.0 });
        }
        for t in &self.tensioners {
            out.extend_from_slice(&t.position);
            out.extend_from_slice(&t.displacement);
        }
        out
    }
}
