//! Integration tests for shears-interact.

use shears_interact::{Mouse, MouseButton, MouseConfig, TensionState, Tensioner};
use shears_mesh::generators::flat_grid;
use shears_mesh::Vec3;
use shears_types::{ParticleId, ShearsError};

fn cutting_mouse(x: f32, y: f32, influence: f32) -> Mouse {
    let mut mouse = Mouse::from_config(&MouseConfig {
        influence,
        cutting: true,
        ..Default::default()
    });
    mouse.move_to(x, y);
    mouse.press(MouseButton::Secondary);
    mouse
}

// ─── Mouse Tests ──────────────────────────────────────────────

#[test]
fn mouse_state_transitions() {
    let mut mouse = Mouse::default();
    assert!(!mouse.down);
    mouse.move_to(5.0, 6.0);
    assert_eq!(mouse.position, Vec3::new(5.0, 6.0, 0.0));
    mouse.move_to(7.0, 6.0);
    assert_eq!(mouse.previous.x, 5.0);

    mouse.press(MouseButton::Primary);
    assert!(mouse.is_dragging());
    assert!(!mouse.is_cutting());
    mouse.release();
    assert!(!mouse.is_dragging());
}

#[test]
fn cut_requires_press() {
    let mut mesh = flat_grid(5, 5, 10.0).unwrap();
    let mut mouse = cutting_mouse(20.0, 20.0, 1.0);
    mouse.release();
    assert_eq!(mouse.cut(&mut mesh), 0);
    assert_eq!(mesh.cut_count(), 0);
}

#[test]
fn cut_removes_constraints_touching_influence() {
    let mut mesh = flat_grid(5, 5, 10.0).unwrap();
    let centre = mesh.index_of(2, 2);
    let degree = mesh.active_degree(centre);

    let mouse = cutting_mouse(20.0, 20.0, 1.0);
    let removed = mouse.cut(&mut mesh);

    assert_eq!(removed, degree);
    assert_eq!(mesh.active_degree(centre), 0);
    // the particle itself stays in the arena
    assert_eq!(mesh.particle_count(), 25);
}

#[test]
fn cut_is_idempotent() {
    let mut once = flat_grid(6, 6, 10.0).unwrap();
    let mut twice = once.clone();
    let mouse = cutting_mouse(25.0, 25.0, 12.0);

    mouse.cut(&mut once);
    mouse.cut(&mut twice);
    assert_eq!(mouse.cut(&mut twice), 0);

    let active = |m: &shears_mesh::ClothMesh| -> Vec<bool> {
        m.constraints().iter().map(|c| c.is_active()).collect()
    };
    assert_eq!(active(&once), active(&twice));
}

#[test]
fn cut_respects_height_limit() {
    let mut mesh = flat_grid(5, 5, 10.0).unwrap();
    let mut mouse = cutting_mouse(20.0, 20.0, 1.0);
    mouse.height_limit = Some(1.0);
    mouse.set_height(50.0);
    assert_eq!(mouse.cut(&mut mesh), 0);

    mouse.set_height(0.5);
    assert!(mouse.cut(&mut mesh) > 0);
}

#[test]
fn drag_follows_pointer_motion() {
    let mut mesh = flat_grid(5, 5, 10.0).unwrap();
    let mut mouse = Mouse::default();
    mouse.move_to(20.0, 20.0);
    mouse.move_to(22.0, 20.0);
    mouse.press(MouseButton::Primary);

    let dragged = mouse.drag(&mut mesh);
    assert!(dragged >= 1);
    let p = mesh.particle(mesh.index_of(2, 2)).unwrap();
    assert!((p.velocity().x - 2.0 * 1.8).abs() < 1e-5);

    // motion is consumed
    assert_eq!(mouse.previous, mouse.position);
}

#[test]
fn mouse_config_validation() {
    assert!(MouseConfig::default().validate().is_ok());
    let bad = MouseConfig {
        influence: -1.0,
        ..Default::default()
    };
    assert!(bad.validate().is_err());
}

// ─── Tensioner Tests ──────────────────────────────────────────

#[test]
fn tensioner_state_machine() {
    let mut mesh = flat_grid(4, 4, 10.0).unwrap();
    let mut t = Tensioner::new(None);
    assert_eq!(t.state(), TensionState::Unpinned);

    t.pin_points(&mut mesh, &[ParticleId(0), ParticleId(1)]).unwrap();
    assert_eq!(t.state(), TensionState::Pinned);
    assert!(mesh.particles()[0].pinned);
    assert!(mesh.particles()[1].pinned);
    assert_eq!(t.origin(), [5.0, 0.0]);

    assert!(t.unpin_position(&mut mesh));
    assert_eq!(t.state(), TensionState::Unpinned);
    assert!(!mesh.particles()[0].pinned);
    assert!(!mesh.particles()[1].pinned);
    assert!(t.grabbed().is_empty());

    // releasing twice is a no-op
    assert!(!t.unpin_position(&mut mesh));
}

#[test]
fn tension_while_unpinned_is_an_error() {
    let mut t = Tensioner::new(None);
    let err = t.tension(Vec3::X).unwrap_err();
    assert!(matches!(err, ShearsError::InvariantViolation(_)));
}

#[test]
fn double_pin_is_an_error() {
    let mut mesh = flat_grid(3, 3, 1.0).unwrap();
    let mut t = Tensioner::new(None);
    t.pin_points(&mut mesh, &[ParticleId(0)]).unwrap();
    assert!(t.pin_points(&mut mesh, &[ParticleId(1)]).is_err());
    assert!(!mesh.particles()[1].pinned);
}

#[test]
fn pin_out_of_range_pins_nothing() {
    let mut mesh = flat_grid(3, 3, 1.0).unwrap();
    let mut t = Tensioner::new(None);
    assert!(t
        .pin_points(&mut mesh, &[ParticleId(0), ParticleId(99)])
        .is_err());
    assert!(!mesh.particles()[0].pinned);
    assert!(!t.is_pinned());
    assert!(t.pin_points(&mut mesh, &[]).is_err());
}

#[test]
fn tension_is_queued_then_applied() {
    let mut mesh = flat_grid(3, 3, 10.0).unwrap();
    let mut t = Tensioner::new(None);
    t.pin_points(&mut mesh, &[ParticleId(4)]).unwrap();

    t.tension(Vec3::new(1.0, 0.0, 0.0)).unwrap();
    t.tension(Vec3::new(0.0, 2.0, 0.0)).unwrap();
    assert_eq!(mesh.particles()[4].position, Vec3::new(10.0, 10.0, 0.0));
    assert_eq!(t.pending(), Vec3::new(1.0, 2.0, 0.0));

    t.apply_pending(&mut mesh);
    let p = &mesh.particles()[4];
    assert_eq!(p.position, Vec3::new(11.0, 12.0, 0.0));
    assert_eq!(p.velocity(), Vec3::ZERO);
    assert_eq!(t.pending(), Vec3::ZERO);
    assert_eq!(t.displacement(), Vec3::new(1.0, 2.0, 0.0));
    assert_eq!(t.position(), [11.0, 12.0]);
}

#[test]
fn unpin_flushes_pending() {
    let mut mesh = flat_grid(3, 3, 10.0).unwrap();
    let mut t = Tensioner::new(None);
    t.pin_points(&mut mesh, &[ParticleId(0)]).unwrap();
    t.tension(Vec3::new(0.0, 0.0, 3.0)).unwrap();
    t.unpin_position(&mut mesh);
    assert_eq!(mesh.particles()[0].position.z, 3.0);
}

#[test]
fn max_displacement_clamps_total() {
    let mut mesh = flat_grid(3, 3, 10.0).unwrap();
    let mut t = Tensioner::new(Some(5.0));
    assert_eq!(t.max_displacement(), Some(5.0));
    assert_eq!(Tensioner::new(None).max_displacement(), None);
    t.pin_points(&mut mesh, &[ParticleId(0)]).unwrap();

    let applied = t.tension(Vec3::new(3.0, 0.0, 0.0)).unwrap();
    assert_eq!(applied, Vec3::new(3.0, 0.0, 0.0));
    let applied = t.tension(Vec3::new(4.0, 0.0, 0.0)).unwrap();
    assert!((applied.x - 2.0).abs() < 1e-6);
    assert!((t.displacement().length() - 5.0).abs() < 1e-6);
}

#[test]
fn overlap_detection() {
    let mut mesh = flat_grid(3, 3, 1.0).unwrap();
    let mut t = Tensioner::new(None);
    t.pin_points(&mut mesh, &[ParticleId(2), ParticleId(5)]).unwrap();
    assert!(t.overlaps(&[ParticleId(5)]));
    assert!(!t.overlaps(&[ParticleId(0), ParticleId(1)]));
}
