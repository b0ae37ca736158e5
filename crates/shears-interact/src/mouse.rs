//! Pointer state, cutting and dragging.
//!
//! The input collaborator feeds position and press/release transitions;
//! the cloth asks the mouse to cut or drag once per step.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shears_mesh::{ClothMesh, Particle};
use shears_types::constants::DRAG_FACTOR;
use shears_types::{ConstraintId, ShearsError, ShearsResult};

/// Which pointer button is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    /// Drags particles when cutting is disabled.
    #[default]
    Primary,
    Secondary,
}

/// Initial pointer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Starting position.
    pub position: [f32; 3],
    /// Radius (XY plane) within which particles are cut or dragged.
    pub influence: f32,
    /// Whether a press cuts instead of drags.
    pub cutting: bool,
    /// Optional maximum vertical distance between a particle and the
    /// pointer for a cut to reach it.
    pub height_limit: Option<f32>,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            influence: 20.0,
            cutting: false,
            height_limit: None,
        }
    }
}

impl MouseConfig {
    pub fn validate(&self) -> ShearsResult<()> {
        if self.position.iter().any(|c| !c.is_finite()) {
            return Err(ShearsError::InvalidConfig(
                "mouse position must be finite".into(),
            ));
        }
        if !(self.influence >= 0.0 && self.influence.is_finite()) {
            return Err(ShearsError::InvalidConfig(format!(
                "mouse influence must be non-negative, got {}",
                self.influence
            )));
        }
        if let Some(limit) = self.height_limit {
            if !(limit >= 0.0) {
                return Err(ShearsError::InvalidConfig(format!(
                    "mouse height limit must be non-negative, got {}",
                    limit
                )));
            }
        }
        Ok(())
    }
}

/// Pointer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mouse {
    pub position: Vec3,
    pub previous: Vec3,
    pub down: bool,
    pub button: MouseButton,
    pub cutting: bool,
    pub influence: f32,
    pub height_limit: Option<f32>,
}

impl Default for Mouse {
    fn default() -> Self {
        Self::from_config(&MouseConfig::default())
    }
}

impl Mouse {
    pub fn from_config(config: &MouseConfig) -> Self {
        let position = Vec3::from_array(config.position);
        Self {
            position,
            previous: position,
            down: false,
            button: MouseButton::Primary,
            cutting: config.cutting,
            influence: config.influence,
            height_limit: config.height_limit,
        }
    }

    /// Moves the pointer in the XY plane, remembering the old position.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.previous = self.position;
        self.position.x = x;
        self.position.y = y;
    }

    /// Sets the pointer height used by the cut height limit.
    pub fn set_height(&mut self, z: f32) {
        self.position.z = z;
        self.previous.z = z;
    }

    pub fn press(&mut self, button: MouseButton) {
        self.down = true;
        self.button = button;
    }

    pub fn release(&mut self) {
        self.down = false;
    }

    /// True when a press would remove constraints.
    #[inline]
    pub fn is_cutting(&self) -> bool {
        self.cutting && self.down
    }

    /// True when a press would drag particles.
    #[inline]
    pub fn is_dragging(&self) -> bool {
        !self.cutting && self.down && self.button == MouseButton::Primary
    }

    /// Whether `p` lies inside the pointer's influence.
    pub fn reaches(&self, p: &Particle) -> bool {
        if p.planar_distance(self.position.x, self.position.y) > self.influence {
            return false;
        }
        match self.height_limit {
            Some(limit) => (p.position.z - self.position.z).abs() <= limit,
            None => true,
        }
    }

    /// Deactivates every active constraint with an endpoint inside the
    /// influence radius. Returns the number of constraints removed.
    ///
    /// Does nothing unless cutting is enabled and the pointer is down.
    pub fn cut(&self, mesh: &mut ClothMesh) -> usize {
        if !self.is_cutting() {
            return 0;
        }
        let particles = mesh.particles();
        let hits: Vec<ConstraintId> = mesh
            .constraints()
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.is_active()
                    && c
                        .endpoints()
                        .iter()
                        .any(|p| self.reaches(&particles[p.index()]))
            })
            .map(|(i, _)| ConstraintId(i as u32))
            .collect();

        let removed = hits.into_iter().filter(|&id| mesh.cut(id)).count();
        if removed > 0 {
            tracing::debug!(
                x = self.position.x,
                y = self.position.y,
                removed,
                "mouse cut"
            );
        }
        removed
    }

    /// Pulls unpinned particles inside the influence radius along with the
    /// pointer motion, then consumes that motion. Returns the number of
    /// particles dragged.
    pub fn drag(&mut self, mesh: &mut ClothMesh) -> usize {
        if !self.is_dragging() {
            return 0;
        }
        let mut motion = self.position - self.previous;
        motion.z = 0.0;
        let mut dragged = 0;
        for p in mesh.particles_mut() {
            if p.pinned || !p.is_member() || !self.reaches(p) {
                continue;
            }
            p.previous = p.position - motion * DRAG_FACTOR;
            dragged += 1;
        }
        self.previous = self.position;
        dragged
    }
}
