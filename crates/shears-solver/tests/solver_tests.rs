//! Integration tests for shears-solver.

use shears_mesh::generators::{build_mesh, flat_grid};
use shears_mesh::{
    ClothMesh, Constraint, ConstraintKind, MeshConfig, Particle, PinCondition, Region, Vec3,
};
use shears_solver::verlet::check_finite;
use shears_solver::{SolverConfig, StepReport, VerletSolver};
use shears_types::{ParticleId, ShearsError};

fn solver(config: SolverConfig) -> VerletSolver {
    VerletSolver::new(config).unwrap()
}

fn weightless() -> SolverConfig {
    SolverConfig {
        gravity: 0.0,
        ..Default::default()
    }
}

// ─── Integration Tests ────────────────────────────────────────

#[test]
fn verlet_update_formula() {
    let mut mesh = flat_grid(1, 1, 1.0).unwrap();
    let s = solver(SolverConfig {
        gravity: -10.0,
        dt: 0.1,
        damping: 1.0,
        floor_z: -100.0,
        ..Default::default()
    });

    s.integrate(&mut mesh);
    let z1 = mesh.particles()[0].position.z;
    assert!((z1 + 0.1).abs() < 1e-6);
    assert_eq!(mesh.particles()[0].previous.z, 0.0);

    s.integrate(&mut mesh);
    let z2 = mesh.particles()[0].position.z;
    assert!((z2 + 0.3).abs() < 1e-6);
}

#[test]
fn damping_scales_implicit_velocity() {
    let mut mesh = flat_grid(1, 1, 1.0).unwrap();
    mesh.particles_mut()[0].previous = Vec3::new(-1.0, 0.0, 0.0);
    let s = solver(SolverConfig {
        damping: 0.5,
        ..weightless()
    });
    s.integrate(&mut mesh);
    assert!((mesh.particles()[0].position.x - 0.5).abs() < 1e-6);
}

#[test]
fn floor_clamp_zeroes_vertical_velocity() {
    let mut mesh = flat_grid(1, 1, 1.0).unwrap();
    {
        let p = &mut mesh.particles_mut()[0];
        p.position.z = -5.0;
        p.previous.z = -3.0;
    }
    let s = solver(SolverConfig {
        floor_z: 0.0,
        ..weightless()
    });
    let clamped = s.clamp(mesh.particles_mut());
    assert_eq!(clamped, 1);
    let p = &mesh.particles()[0];
    assert_eq!(p.position.z, 0.0);
    assert_eq!(p.velocity().z, 0.0);
}

#[test]
fn bounds_clamp() {
    let mut mesh = flat_grid(1, 1, 1.0).unwrap();
    mesh.particles_mut()[0].reset_position(Vec3::new(-4.0, 120.0, 3.0));
    let s = solver(SolverConfig {
        bounds: Some([100.0, 100.0, 100.0]),
        floor_z: 0.0,
        ..weightless()
    });
    s.clamp(mesh.particles_mut());
    assert_eq!(mesh.particles()[0].position, Vec3::new(0.0, 100.0, 3.0));
}

// ─── Relaxation Tests ─────────────────────────────────────────

#[test]
fn flat_grid_needs_no_correction() {
    let mut mesh = flat_grid(5, 5, 10.0).unwrap();
    let s = solver(SolverConfig {
        physics_accuracy: 1,
        ..weightless()
    });
    let before = mesh.clone();
    assert_eq!(s.relax(&mut mesh, 0).unwrap(), 0.0);
    assert_eq!(mesh, before);

    let report = s.step(&mut mesh, 0).unwrap();
    assert_eq!(report.correction, 0.0);
    assert_eq!(report.passes, 1);
}

#[test]
fn stretched_constraint_is_restored() {
    let mut mesh = flat_grid(2, 1, 10.0).unwrap();
    mesh.particles_mut()[1].reset_position(Vec3::new(20.0, 0.0, 0.0));
    let s = solver(weightless());
    let correction = s.relax(&mut mesh, 0).unwrap();
    assert!((correction - 10.0).abs() < 1e-6);
    assert!((mesh.particles()[0].position.x - 5.0).abs() < 1e-6);
    assert!((mesh.particles()[1].position.x - 15.0).abs() < 1e-6);
}

#[test]
fn elasticity_scales_correction() {
    let mut mesh = flat_grid(2, 1, 10.0).unwrap();
    mesh.particles_mut()[1].reset_position(Vec3::new(20.0, 0.0, 0.0));
    let s = solver(SolverConfig {
        elasticity: 0.5,
        ..weightless()
    });
    s.relax(&mut mesh, 0).unwrap();
    let d = mesh.particles()[0].position.distance(mesh.particles()[1].position);
    assert!((d - 15.0).abs() < 1e-5);
}

#[test]
fn pinned_endpoint_takes_no_correction() {
    let mut mesh = flat_grid(2, 1, 10.0).unwrap();
    mesh.particles_mut()[0].pinned = true;
    mesh.particles_mut()[1].reset_position(Vec3::new(20.0, 0.0, 0.0));
    let s = solver(weightless());
    s.relax(&mut mesh, 0).unwrap();
    assert_eq!(mesh.particles()[0].position, Vec3::ZERO);
    assert!((mesh.particles()[1].position.x - 10.0).abs() < 1e-6);
}

#[test]
fn inverse_mass_splits_correction() {
    let mut heavy_side = Particle::new(Vec3::ZERO, Region::Interior);
    heavy_side.inv_mass = 1.0;
    let mut light_side = Particle::new(Vec3::new(20.0, 0.0, 0.0), Region::Interior);
    light_side.inv_mass = 3.0;
    let constraints = vec![Constraint::new(
        ParticleId(0),
        ParticleId(1),
        10.0,
        ConstraintKind::Structural,
    )];
    let mut mesh = ClothMesh::from_parts(
        2,
        1,
        10.0,
        10.0,
        Vec3::ZERO,
        vec![heavy_side, light_side],
        constraints,
    )
    .unwrap();

    solver(weightless()).relax(&mut mesh, 0).unwrap();
    assert!((mesh.particles()[0].position.x - 2.5).abs() < 1e-5);
    assert!((mesh.particles()[1].position.x - 12.5).abs() < 1e-5);
}

#[test]
fn cut_constraints_are_skipped() {
    let mut mesh = flat_grid(2, 1, 10.0).unwrap();
    mesh.cut(shears_types::ConstraintId(0));
    mesh.particles_mut()[1].reset_position(Vec3::new(20.0, 0.0, 0.0));
    let s = solver(weightless());
    assert_eq!(s.relax(&mut mesh, 0).unwrap(), 0.0);
    assert_eq!(mesh.particles()[1].position.x, 20.0);
}

// ─── Whole-Step Properties ────────────────────────────────────

#[test]
fn heavy_gravity_respects_floor() {
    let mut mesh = flat_grid(5, 5, 10.0).unwrap();
    let s = solver(SolverConfig {
        gravity: -1000.0,
        floor_z: 0.0,
        ..Default::default()
    });
    for step in 0..200 {
        s.step(&mut mesh, step).unwrap();
    }
    for p in mesh.particles() {
        assert!(!p.position.z.is_nan());
        assert!(p.position.z >= 0.0, "z = {}", p.position.z);
    }
    assert_eq!(mesh.particle_count(), 25);
}

#[test]
fn pinned_particles_never_move() {
    for (gravity, elasticity) in [(-1000.0, 1.0), (-50.0, 0.3), (400.0, 0.8)] {
        let mut mesh = build_mesh(&MeshConfig {
            pin: PinCondition::TopRow,
            ..MeshConfig::grid(6, 6, 10.0)
        })
        .unwrap();
        let pinned: Vec<(usize, Vec3)> = mesh
            .particles()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.pinned)
            .map(|(i, p)| (i, p.position))
            .collect();
        assert_eq!(pinned.len(), 6);

        let s = solver(SolverConfig {
            gravity,
            elasticity,
            ..Default::default()
        });
        for step in 0..60 {
            s.step(&mut mesh, step).unwrap();
        }
        for (i, pos) in pinned {
            assert_eq!(mesh.particles()[i].position, pos);
        }
    }
}

#[test]
fn hanging_cloth_settles() {
    let mut mesh = build_mesh(&MeshConfig {
        pin: PinCondition::TopRow,
        ..MeshConfig::grid(5, 5, 10.0)
    })
    .unwrap();
    let s = solver(SolverConfig {
        damping: 0.9,
        floor_z: -1000.0,
        ..Default::default()
    });
    let first = s.step(&mut mesh, 0).unwrap();
    assert!(first.correction > 0.0);
    for step in 1..100 {
        s.step(&mut mesh, step).unwrap();
    }
    // row 0 is furthest from the pinned row
    assert!(mesh.particles()[0].position.z < 0.0);
}

// ─── Degenerate Geometry ──────────────────────────────────────

fn coincident_pair() -> ClothMesh {
    let particles = vec![
        Particle::new(Vec3::ZERO, Region::Interior),
        Particle::new(Vec3::ZERO, Region::Interior),
    ];
    let constraints = vec![Constraint::new(
        ParticleId(0),
        ParticleId(1),
        1.0,
        ConstraintKind::Structural,
    )];
    ClothMesh::from_parts(2, 1, 1.0, 1.0, Vec3::ZERO, particles, constraints).unwrap()
}

#[test]
fn coincident_endpoints_are_separated() {
    let mut mesh = coincident_pair();
    let correction = solver(weightless()).relax(&mut mesh, 9).unwrap();
    assert!((correction - 1.0).abs() < 1e-6);
    let a = mesh.particles()[0].position;
    let b = mesh.particles()[1].position;
    assert!(a.x < b.x);
    assert!((a.distance(b) - 1.0).abs() < 1e-6);
}

#[test]
fn coincident_endpoints_follow_previous_positions() {
    let mut mesh = coincident_pair();
    mesh.particles_mut()[0].previous = Vec3::new(0.0, 2.0, 0.0);
    solver(weightless()).relax(&mut mesh, 0).unwrap();
    let a = mesh.particles()[0].position;
    let b = mesh.particles()[1].position;
    assert!((a.y - 0.5).abs() < 1e-6);
    assert!((b.y + 0.5).abs() < 1e-6);
    assert_eq!(a.x, b.x);
}

#[test]
fn pair_clamped_onto_one_wall_point_recovers() {
    let mut mesh = flat_grid(2, 1, 10.0).unwrap();
    mesh.particles_mut()[0].previous = Vec3::new(5.0, 0.0, 0.0);
    mesh.particles_mut()[1].previous = Vec3::new(25.0, 0.0, 0.0);
    let s = solver(SolverConfig {
        bounds: Some([100.0, 100.0, 100.0]),
        ..weightless()
    });

    let report = s.step(&mut mesh, 0).unwrap();
    assert!(report.correction > 0.0);
    let a = mesh.particles()[0].position;
    let b = mesh.particles()[1].position;
    assert_eq!(a.x, 0.0);
    assert!(b.x > 9.0 && b.x < 10.0, "b.x = {}", b.x);
}

#[test]
fn row_driven_into_wall_keeps_stepping() {
    let mut mesh = flat_grid(5, 1, 10.0).unwrap();
    for p in mesh.particles_mut() {
        p.previous = p.position + Vec3::new(30.0, 0.0, 0.0);
    }
    let s = solver(SolverConfig {
        bounds: Some([100.0, 100.0, 100.0]),
        ..weightless()
    });
    for step in 0..20 {
        s.step(&mut mesh, step).unwrap();
    }
    for p in mesh.particles() {
        assert!(p.position.is_finite());
        assert!(p.position.x >= 0.0 && p.position.x <= 100.0);
    }
}

#[test]
fn nan_position_is_reported() {
    let mut mesh = flat_grid(3, 3, 1.0).unwrap();
    mesh.particles_mut()[4].position.x = f32::NAN;
    assert!(check_finite(&mesh, 0).is_err());
    let err = solver(weightless()).step(&mut mesh, 3).unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, ShearsError::NumericDegeneracy { step: 3, .. }));
}

// ─── Config & Report ──────────────────────────────────────────

#[test]
fn config_default() {
    let config = SolverConfig::default();
    assert_eq!(config.physics_accuracy, 5);
    assert_eq!(config.gravity, -1000.0);
    assert!((config.dt - 0.016).abs() < 1e-9);
    assert!(config.validate().is_ok());
}

#[test]
fn config_presets() {
    assert_eq!(SolverConfig::debug().physics_accuracy, 1);
    assert_eq!(SolverConfig::high_quality().physics_accuracy, 15);
}

#[test]
fn config_validation() {
    let bad = [
        SolverConfig {
            elasticity: 0.0,
            ..Default::default()
        },
        SolverConfig {
            elasticity: 1.5,
            ..Default::default()
        },
        SolverConfig {
            damping: -0.1,
            ..Default::default()
        },
        SolverConfig {
            dt: 0.0,
            ..Default::default()
        },
        SolverConfig {
            physics_accuracy: 0,
            ..Default::default()
        },
        SolverConfig {
            gravity: f32::NAN,
            ..Default::default()
        },
        SolverConfig {
            bounds: Some([0.0, 1.0, 1.0]),
            ..Default::default()
        },
    ];
    for config in bad {
        assert!(VerletSolver::new(config).is_err());
    }
}

#[test]
fn config_toml_round_trip() {
    let config = SolverConfig {
        bounds: Some([600.0, 600.0, 800.0]),
        ..Default::default()
    };
    let text = toml::to_string(&config).unwrap();
    let back: SolverConfig = toml::from_str(&text).unwrap();
    assert_eq!(config, back);

    let partial: SolverConfig = toml::from_str("gravity = 0.0\nphysics_accuracy = 2").unwrap();
    assert_eq!(partial.gravity, 0.0);
    assert_eq!(partial.physics_accuracy, 2);
    assert_eq!(partial.damping, 0.99);
}

#[test]
fn report_accumulates() {
    let mut total = StepReport::default();
    let one = StepReport {
        steps: 1,
        passes: 5,
        correction: 0.5,
        cut: 2,
        clamped: 1,
    };
    total.accumulate(&one);
    total.accumulate(&one);
    assert_eq!(total.steps, 2);
    assert_eq!(total.passes, 10);
    assert_eq!(total.cut, 4);
    assert!((total.correction - 1.0).abs() < 1e-12);
}
