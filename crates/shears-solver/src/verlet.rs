//! Verlet integration with iterative distance-constraint relaxation.
//!
//! One step:
//! 1. integrate every unpinned particle,
//!    `new = pos + (pos - prev) * damping + g * dt²`;
//! 2. clamp to the floor (and optional bounds);
//! 3. relax active constraints in insertion order, `physics_accuracy`
//!    times, re-clamping after every pass;
//! 4. verify every position is finite.
//!
//! Relaxation is Gauss-Seidel: later constraints see earlier corrections.
//! The result is an approximation; ordering effects are accepted.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shears_mesh::{ClothMesh, Particle};
use shears_types::{ShearsError, ShearsResult};

use crate::config::SolverConfig;
use crate::report::StepReport;

/// Position-based Verlet solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerletSolver {
    config: SolverConfig,
}

impl VerletSolver {
    /// Creates a solver after validating `config`.
    pub fn new(config: SolverConfig) -> ShearsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Advances `mesh` by one step. `step` is only used for error reports.
    pub fn step(&self, mesh: &mut ClothMesh, step: u64) -> ShearsResult<StepReport> {
        self.integrate(mesh);
        let mut clamped = self.clamp(mesh.particles_mut());

        let mut correction = 0.0f64;
        for _ in 0..self.config.physics_accuracy {
            correction += self.relax(mesh, step)?;
            clamped += self.clamp(mesh.particles_mut());
        }

        check_finite(mesh, step)?;

        tracing::trace!(step, correction, clamped, "verlet step");

        Ok(StepReport {
            steps: 1,
            passes: self.config.physics_accuracy,
            correction,
            cut: 0,
            clamped,
        })
    }

    /// Verlet update of every unpinned particle.
    pub fn integrate(&self, mesh: &mut ClothMesh) {
        let dt2 = self.config.dt * self.config.dt;
        let accel = Vec3::new(0.0, 0.0, self.config.gravity) * dt2;
        let damping = self.config.damping;
        for p in mesh.particles_mut() {
            if p.pinned {
                continue;
            }
            let current = p.position;
            p.position = current + (current - p.previous) * damping + accel;
            p.previous = current;
        }
    }

    /// Clamps unpinned particles to the floor and bounds, zeroing the
    /// implied velocity along each clamped axis. Returns the clamp count.
    pub fn clamp(&self, particles: &mut [Particle]) -> u32 {
        let floor = self.config.floor_z;
        let mut clamped = 0;
        for p in particles.iter_mut() {
            if p.pinned {
                continue;
            }
            let mut hit = false;
            if p.position.z < floor {
                p.position.z = floor;
                p.previous.z = floor;
                hit = true;
            }
            if let Some([max_x, max_y, max_z]) = self.config.bounds {
                hit |= clamp_axis(&mut p.position.x, &mut p.previous.x, 0.0, max_x);
                hit |= clamp_axis(&mut p.position.y, &mut p.previous.y, 0.0, max_y);
                hit |= clamp_axis(&mut p.position.z, &mut p.previous.z, floor, max_z);
            }
            if hit {
                clamped += 1;
            }
        }
        clamped
    }

    /// One relaxation pass over the active constraints.
    ///
    /// Each endpoint moves toward the rest length by
    /// `elasticity * error * w_i / (w_a + w_b)`; pinned endpoints have
    /// zero weight. Returns the summed correction magnitude. Only a
    /// non-finite constraint length is an error.
    pub fn relax(&self, mesh: &mut ClothMesh, step: u64) -> ShearsResult<f64> {
        let elasticity = self.config.elasticity;
        let (particles, constraints) = mesh.split_mut();
        let mut total = 0.0f64;

        for c in constraints.iter().filter(|c| c.is_active()) {
            let (ia, ib) = (c.a.index(), c.b.index());
            let wa = particles[ia].weight();
            let wb = particles[ib].weight();
            let w = wa + wb;
            if w == 0.0 {
                continue;
            }

            let delta = particles[ia].position - particles[ib].position;
            let d = delta.length();
            if !d.is_finite() {
                tracing::warn!(step, particle = c.a.0, "non-finite constraint length");
                return Err(ShearsError::NumericDegeneracy {
                    step,
                    particle: c.a.0,
                    detail: format!("constraint length to particle {} is {}", c.b.0, d),
                });
            }
            // Coincident endpoints (two particles clamped onto the same
            // wall point) are pushed apart along a fallback direction.
            let (dir, d) = if d > 0.0 {
                (delta / d, d)
            } else {
                (separation_axis(&particles[ia], &particles[ib]), 0.0)
            };

            let error = d - c.rest_length();
            if error == 0.0 {
                continue;
            }
            let correction = dir * (elasticity * error / w);
            particles[ia].position -= correction * wa;
            particles[ib].position += correction * wb;
            total += f64::from((elasticity * error).abs());
        }

        Ok(total)
    }
}

/// Unit direction from `b` to `a` for coincident endpoints: taken from the
/// previous positions when those differ, otherwise `-X` (generated grids
/// place the lower-index endpoint at lower x).
fn separation_axis(a: &Particle, b: &Particle) -> Vec3 {
    (a.previous - b.previous)
        .try_normalize()
        .unwrap_or(Vec3::NEG_X)
}

fn clamp_axis(pos: &mut f32, prev: &mut f32, min: f32, max: f32) -> bool {
    if *pos < min {
        *pos = min;
        *prev = min;
        true
    } else if *pos > max {
        *pos = max;
        *prev = max;
        true
    } else {
        false
    }
}

/// Fails on the first particle with a non-finite position.
pub fn check_finite(mesh: &ClothMesh, step: u64) -> ShearsResult<()> {
    match mesh.first_non_finite() {
        Some(p) => {
            tracing::warn!(step, particle = p.0, "non-finite particle position");
            Err(ShearsError::NumericDegeneracy {
                step,
                particle: p.0,
                detail: "position is not finite".into(),
            })
        }
        None => Ok(()),
    }
}
