//! Grid mesh builder.
//!
//! Produces deterministic meshes: the same configuration (including the
//! noise seed) and classifier always yield the same particles and the
//! same constraints in the same order.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shears_types::{ParticleId, ShearsError, ShearsResult};

use crate::config::{MeshConfig, PinCondition};
use crate::constraint::{Constraint, ConstraintKind};
use crate::mesh::ClothMesh;
use crate::particle::{Particle, Region};
use crate::shape::ShapeClassifier;

/// Builds the mesh described by `config`, using its own outline.
pub fn build_mesh(config: &MeshConfig) -> ShearsResult<ClothMesh> {
    build_mesh_with(config, &config.shape)
}

/// Builds a flat rectangular `width × height` grid at the origin.
///
/// # Example
/// ```
/// use shears_mesh::generators::flat_grid;
/// let mesh = flat_grid(3, 3, 10.0).unwrap();
/// assert_eq!(mesh.particle_count(), 9);
/// // 6 horizontal + 6 vertical + 2 * 4 diagonal
/// assert_eq!(mesh.constraint_count(), 20);
/// ```
pub fn flat_grid(width: usize, height: usize, spacing: f32) -> ShearsResult<ClothMesh> {
    build_mesh(&MeshConfig::grid(width, height, spacing))
}

/// Builds the grid of `config` with an arbitrary outline classifier.
///
/// Constraints are inserted per particle in row-major order: right
/// neighbour, neighbour below, down-right diagonal, down-left diagonal.
/// Edges touching an exterior particle are skipped.
pub fn build_mesh_with(
    config: &MeshConfig,
    classifier: &dyn ShapeClassifier,
) -> ShearsResult<ClothMesh> {
    config.validate()?;

    let (w, h) = (config.width, config.height);
    let origin = Vec3::from_array(config.origin);
    let mut particles = Vec::with_capacity(w * h);

    for row in 0..h {
        for col in 0..w {
            let x = origin.x + col as f32 * config.dx;
            let y = origin.y + row as f32 * config.dy;
            let region = classifier.classify(col, row, x, y);
            particles.push(Particle::new(Vec3::new(x, y, origin.z), region));
        }
    }

    if !particles.iter().any(Particle::is_member) {
        return Err(ShearsError::InvalidConfig(
            "shape classifier yields zero cloth particles".into(),
        ));
    }

    if config.noise > 0.0 {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let n = config.noise;
        for p in &mut particles {
            let jitter = Vec3::new(
                rng.gen_range(-n..=n),
                rng.gen_range(-n..=n),
                rng.gen_range(-n..=n),
            );
            p.reset_position(p.position + jitter);
        }
    }

    apply_pin_condition(&mut particles, w, h, config.pin);

    let constraints = wire_constraints(&particles, w, h);

    ClothMesh::from_parts(w, h, config.dx, config.dy, origin, particles, constraints)
}

fn wire_constraints(particles: &[Particle], w: usize, h: usize) -> Vec<Constraint> {
    let mut constraints = Vec::with_capacity(w * h * 4);
    let member = |col: usize, row: usize| particles[row * w + col].is_member();

    let mut link = |from: usize, to: usize, kind: ConstraintKind| {
        let rest = particles[from].position.distance(particles[to].position);
        constraints.push(Constraint::new(
            ParticleId(from as u32),
            ParticleId(to as u32),
            rest,
            kind,
        ));
    };

    for row in 0..h {
        for col in 0..w {
            if !member(col, row) {
                continue;
            }
            let i = row * w + col;
            let has_right = col + 1 < w;
            let has_below = row + 1 < h;

            if has_right && member(col + 1, row) {
                link(i, i + 1, ConstraintKind::Structural);
            }
            if has_below && member(col, row + 1) {
                link(i, i + w, ConstraintKind::Structural);
            }
            if has_right && has_below && member(col + 1, row + 1) {
                link(i, i + w + 1, ConstraintKind::Shear);
            }
            if col > 0 && has_below && member(col - 1, row + 1) {
                link(i, i + w - 1, ConstraintKind::Shear);
            }
        }
    }

    constraints
}

fn apply_pin_condition(particles: &mut [Particle], w: usize, h: usize, pin: PinCondition) {
    let targets: Vec<usize> = match pin {
        PinCondition::None => Vec::new(),
        PinCondition::TopRow => ((h - 1) * w..h * w).collect(),
        PinCondition::Corners => {
            let mut corners = vec![0, w - 1, (h - 1) * w, h * w - 1];
            corners.sort_unstable();
            corners.dedup();
            corners
        }
    };
    for i in targets {
        let p = &mut particles[i];
        if p.is_member() {
            p.pinned = true;
        }
    }
}
