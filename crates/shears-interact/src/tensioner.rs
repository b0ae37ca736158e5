//! Grasp-and-pull tensioners.
//!
//! State machine: `Unpinned → Pinned → (tension)* → Unpinned`.
//!
//! A tensioner pins a set of particles and queues positional increments
//! for them. The cloth applies the queued increment once per step, after
//! constraint relaxation, by offsetting position and previous position
//! together so a held particle carries no velocity.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shears_mesh::ClothMesh;
use shears_types::{ParticleId, ShearsError, ShearsResult};

/// Whether a tensioner currently holds particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TensionState {
    Unpinned,
    Pinned,
}

/// A grasp on a set of particles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensioner {
    grabbed: Vec<ParticleId>,
    pending: Vec3,
    displacement: Vec3,
    origin: [f32; 2],
    max_displacement: Option<f32>,
}

impl Tensioner {
    /// Creates an unpinned tensioner.
    ///
    /// `max_displacement` bounds the magnitude of the running total.
    pub fn new(max_displacement: Option<f32>) -> Self {
        Self {
            grabbed: Vec::new(),
            pending: Vec3::ZERO,
            displacement: Vec3::ZERO,
            origin: [0.0, 0.0],
            max_displacement,
        }
    }

    pub fn state(&self) -> TensionState {
        if self.grabbed.is_empty() {
            TensionState::Unpinned
        } else {
            TensionState::Pinned
        }
    }

    #[inline]
    pub fn is_pinned(&self) -> bool {
        !self.grabbed.is_empty()
    }

    /// Particles currently held.
    pub fn grabbed(&self) -> &[ParticleId] {
        &self.grabbed
    }

    /// Total displacement applied since the grasp started.
    pub fn displacement(&self) -> Vec3 {
        self.displacement
    }

    /// Displacement queued for the next step.
    pub fn pending(&self) -> Vec3 {
        self.pending
    }

    pub fn origin(&self) -> [f32; 2] {
        self.origin
    }

    pub fn max_displacement(&self) -> Option<f32> {
        self.max_displacement
    }

    /// Planar position of the grasp: origin plus total displacement.
    pub fn position(&self) -> [f32; 2] {
        [
            self.origin[0] + self.displacement.x,
            self.origin[1] + self.displacement.y,
        ]
    }

    /// True if any of `points` is held by this tensioner.
    pub fn overlaps(&self, points: &[ParticleId]) -> bool {
        points.iter().any(|p| self.grabbed.contains(p))
    }

    /// Grasps `points`, using their planar centroid as the origin.
    pub fn pin_points(&mut self, mesh: &mut ClothMesh, points: &[ParticleId]) -> ShearsResult<()> {
        let mut centroid = [0.0f32; 2];
        for &p in points {
            mesh.check_particle(p)?;
            let pos = mesh.particles()[p.index()].position;
            centroid[0] += pos.x;
            centroid[1] += pos.y;
        }
        if !points.is_empty() {
            let n = points.len() as f32;
            centroid = [centroid[0] / n, centroid[1] / n];
        }
        self.pin_points_at(mesh, points, centroid)
    }

    /// Grasps `points` with an explicit origin.
    ///
    /// Fails if already pinned, if `points` is empty, or if any index is
    /// out of range. On failure nothing is pinned.
    pub fn pin_points_at(
        &mut self,
        mesh: &mut ClothMesh,
        points: &[ParticleId],
        origin: [f32; 2],
    ) -> ShearsResult<()> {
        if self.is_pinned() {
            return Err(ShearsError::InvariantViolation(
                "tensioner is already pinned; unpin before grasping again".into(),
            ));
        }
        if points.is_empty() {
            return Err(ShearsError::InvariantViolation(
                "cannot pin an empty particle set".into(),
            ));
        }
        for &p in points {
            mesh.check_particle(p)?;
        }

        let mut grabbed = points.to_vec();
        grabbed.sort_unstable();
        grabbed.dedup();
        for &p in &grabbed {
            mesh.particles_mut()[p.index()].pinned = true;
        }

        self.grabbed = grabbed;
        self.origin = origin;
        self.pending = Vec3::ZERO;
        self.displacement = Vec3::ZERO;
        Ok(())
    }

    /// Queues a positional increment for the held particles.
    ///
    /// With a maximum displacement configured, the running total is clamped
    /// to that magnitude. Returns the increment actually queued.
    pub fn tension(&mut self, delta: Vec3) -> ShearsResult<Vec3> {
        if !self.is_pinned() {
            return Err(ShearsError::InvariantViolation(
                "tension requires a pinned tensioner".into(),
            ));
        }
        if !delta.is_finite() {
            return Err(ShearsError::InvariantViolation(format!(
                "tension delta must be finite, got {delta}"
            )));
        }
        let mut total = self.displacement + delta;
        if let Some(max) = self.max_displacement {
            total = total.clamp_length_max(max);
        }
        let applied = total - self.displacement;
        self.displacement = total;
        self.pending += applied;
        Ok(applied)
    }

    /// Moves the held particles by the queued increment.
    pub fn apply_pending(&mut self, mesh: &mut ClothMesh) {
        if self.pending == Vec3::ZERO {
            return;
        }
        let delta = std::mem::replace(&mut self.pending, Vec3::ZERO);
        let particles = mesh.particles_mut();
        for &p in &self.grabbed {
            particles[p.index()].offset(delta);
        }
    }

    /// Releases the grasp: flushes any queued increment, then unpins every
    /// held particle at once. Returns false if nothing was held.
    pub fn unpin_position(&mut self, mesh: &mut ClothMesh) -> bool {
        if !self.is_pinned() {
            return false;
        }
        self.apply_pending(mesh);
        let particles = mesh.particles_mut();
        for p in self.grabbed.drain(..) {
            particles[p.index()].pinned = false;
        }
        self.displacement = Vec3::ZERO;
        true
    }
}
