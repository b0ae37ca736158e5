//! The cloth mesh: a flat particle arena plus index-pair constraints.
//!
//! Constraints reference particles by [`ParticleId`], never by pointer, so
//! the whole mesh is plain data. Cloning it yields a fully independent
//! copy, which is what snapshot-based reset relies on.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shears_types::{ConstraintId, ParticleId, ShearsError, ShearsResult};

use crate::adjacency::Adjacency;
use crate::constraint::Constraint;
use crate::particle::Particle;

/// A grid cloth mesh.
///
/// Particles are stored row-major: `index = row * width + col`.
/// The particle count and the constraint list are fixed after
/// construction; only particle state and constraint activity change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothMesh {
    /// Particles per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Grid spacing along X.
    pub dx: f32,
    /// Grid spacing along Y.
    pub dy: f32,
    /// Position of particle (0, 0) before noise.
    pub origin: Vec3,

    particles: Vec<Particle>,
    constraints: Vec<Constraint>,
    adjacency: Adjacency,
}

impl ClothMesh {
    /// Assembles a mesh from already-built parts and validates it.
    pub fn from_parts(
        width: usize,
        height: usize,
        dx: f32,
        dy: f32,
        origin: Vec3,
        particles: Vec<Particle>,
        constraints: Vec<Constraint>,
    ) -> ShearsResult<Self> {
        let mut mesh = Self {
            width,
            height,
            dx,
            dy,
            origin,
            particles,
            constraints,
            adjacency: Adjacency::default(),
        };
        mesh.validate()?;
        mesh.adjacency = Adjacency::build(mesh.particles.len(), &mesh.constraints);
        Ok(mesh)
    }

    /// Returns the number of particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Returns the number of constraints, active or cut.
    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the number of constraints still active.
    pub fn active_constraint_count(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_active()).count()
    }

    /// Returns the number of constraints removed by cutting.
    pub fn cut_count(&self) -> usize {
        self.constraint_count() - self.active_constraint_count()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the particle arena. The slice cannot grow or shrink.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Particles (mutable) and constraints (read-only) at once, for relaxation.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [Particle], &[Constraint]) {
        (&mut self.particles, &self.constraints)
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.get_mut(id.index())
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id.index())
    }

    #[inline]
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Checks that `id` addresses a particle of this mesh.
    pub fn check_particle(&self, id: ParticleId) -> ShearsResult<()> {
        if id.index() < self.particles.len() {
            Ok(())
        } else {
            Err(ShearsError::InvariantViolation(format!(
                "particle {} is out of range (particle count: {})",
                id.0,
                self.particles.len()
            )))
        }
    }

    /// Deactivates one constraint. Returns true if it was active.
    pub fn cut(&mut self, id: ConstraintId) -> bool {
        self.constraints
            .get_mut(id.index())
            .map(Constraint::deactivate)
            .unwrap_or(false)
    }

    /// Number of active constraints incident to `p`.
    pub fn active_degree(&self, p: ParticleId) -> usize {
        self.adjacency
            .incident(p)
            .iter()
            .filter_map(|&id| self.constraint(id))
            .filter(|c| c.is_active())
            .count()
    }

    /// Grid index of (col, row).
    #[inline]
    pub fn index_of(&self, col: usize, row: usize) -> ParticleId {
        ParticleId((row * self.width + col) as u32)
    }

    /// (col, row) of a particle.
    #[inline]
    pub fn grid_coords(&self, id: ParticleId) -> (usize, usize) {
        let i = id.index();
        (i % self.width, i / self.width)
    }

    /// Member particle closest to (x, y) in the XY plane.
    pub fn nearest_member(&self, x: f32, y: f32) -> Option<ParticleId> {
        self.particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_member())
            .map(|(i, p)| (i, p.planar_distance(x, y)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| ParticleId(i as u32))
    }

    /// Member particles within `radius` of (x, y) in the XY plane, in index order.
    pub fn members_within(&self, x: f32, y: f32, radius: f32) -> Vec<ParticleId> {
        self.particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_member() && p.planar_distance(x, y) <= radius)
            .map(|(i, _)| ParticleId(i as u32))
            .collect()
    }

    /// XY bounding box `[min, max]` of member particles.
    pub fn footprint(&self) -> Option<([f32; 2], [f32; 2])> {
        let mut members = self.particles.iter().filter(|p| p.is_member());
        let first = members.next()?;
        let mut min = [first.position.x, first.position.y];
        let mut max = min;
        for p in members {
            min[0] = min[0].min(p.position.x);
            min[1] = min[1].min(p.position.y);
            max[0] = max[0].max(p.position.x);
            max[1] = max[1].max(p.position.y);
        }
        Some((min, max))
    }

    /// Index of the first particle with a non-finite coordinate.
    pub fn first_non_finite(&self) -> Option<ParticleId> {
        self.particles
            .iter()
            .position(|p| !p.position.is_finite() || !p.previous.is_finite())
            .map(|i| ParticleId(i as u32))
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Particle count equals `width * height`
    /// - Constraint endpoints are within bounds and distinct
    /// - Rest lengths are finite and non-negative
    /// - Inverse masses are finite and non-negative
    pub fn validate(&self) -> ShearsResult<()> {
        let n = self.particles.len();
        if n != self.width * self.height {
            return Err(ShearsError::InvalidConfig(format!(
                "particle count ({}) != width * height ({} * {})",
                n, self.width, self.height
            )));
        }

        if let Some(i) = self
            .particles
            .iter()
            .position(|p| !p.inv_mass.is_finite() || p.inv_mass < 0.0)
        {
            return Err(ShearsError::InvalidConfig(format!(
                "particle {} has invalid inverse mass {}",
                i, self.particles[i].inv_mass
            )));
        }

        for (i, c) in self.constraints.iter().enumerate() {
            if c.a.index() >= n || c.b.index() >= n {
                return Err(ShearsError::InvalidConfig(format!(
                    "constraint {} references particle out of range (particle count: {})",
                    i, n
                )));
            }
            if c.a == c.b {
                return Err(ShearsError::InvalidConfig(format!(
                    "constraint {} joins particle {} to itself",
                    i, c.a.0
                )));
            }
            if !c.rest_length().is_finite() || c.rest_length() < 0.0 {
                return Err(ShearsError::InvalidConfig(format!(
                    "constraint {} has invalid rest length {}",
                    i,
                    c.rest_length()
                )));
            }
        }

        Ok(())
    }
}
