//! Simulation defaults.
//!
//! Units are scene units (grid spacing is 10 by default), not meters.

/// Gravitational acceleration along Z (scene units / s²).
pub const DEFAULT_GRAVITY: f32 = -1000.0;

/// Default integration timestep (seconds).
pub const DEFAULT_DT: f32 = 0.016;

/// Default Verlet damping factor applied to the implicit velocity.
pub const DEFAULT_DAMPING: f32 = 0.99;

/// Default number of relaxation passes per step ("physics accuracy").
pub const DEFAULT_PHYSICS_ACCURACY: u32 = 5;

/// Default floor height (minimum Z).
pub const DEFAULT_FLOOR_Z: f32 = -20.0;

/// Default number of warm-up steps run before the reset snapshot is taken.
pub const DEFAULT_SETTLE_ITERATIONS: u32 = 200;

/// Factor applied to pointer motion when dragging particles.
pub const DRAG_FACTOR: f32 = 1.8;
