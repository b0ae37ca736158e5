//! The cloth: mesh, solver, pointer and tensioners updated together.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shears_interact::{Mouse, Tensioner};
use shears_mesh::generators::build_mesh;
use shears_mesh::ClothMesh;
use shears_solver::verlet::check_finite;
use shears_solver::{StepReport, VerletSolver};
use shears_types::{ParticleId, ShearsError, ShearsResult, TensionerId};

use crate::config::SimulationConfig;
use crate::observation::{Observation, ParticleObservation, TensionerObservation};
use crate::score::ScoreMetric;

/// A cloth and everything that acts on it.
///
/// Plain data: `clone()` is a complete, independent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cloth {
    mesh: ClothMesh,
    solver: VerletSolver,
    mouse: Mouse,
    tensioners: Vec<Tensioner>,
    metric: ScoreMetric,
    grasp_radius: f32,
}

impl Cloth {
    /// Builds the mesh, solver and pointer described by `config`.
    pub fn from_config(config: &SimulationConfig) -> ShearsResult<Self> {
        let mesh = build_mesh(&config.mesh)?;
        config.mouse.validate()?;
        let cloth = Self::from_mesh(
            mesh,
            VerletSolver::new(config.solver.clone())?,
            Mouse::from_config(&config.mouse),
        )
        .with_metric(config.score)
        .with_grasp_radius(config.grasp_radius);
        Ok(cloth)
    }

    /// Wraps an already-built mesh. No tensioners, flatness metric,
    /// single-particle grasps.
    pub fn from_mesh(mesh: ClothMesh, solver: VerletSolver, mouse: Mouse) -> Self {
        Self {
            mesh,
            solver,
            mouse,
            tensioners: Vec::new(),
            metric: ScoreMetric::default(),
            grasp_radius: 0.0,
        }
    }

    pub fn with_metric(mut self, metric: ScoreMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_grasp_radius(mut self, radius: f32) -> Self {
        self.grasp_radius = radius.max(0.0);
        self
    }

    #[inline]
    pub fn mesh(&self) -> &ClothMesh {
        &self.mesh
    }

    #[inline]
    pub fn solver(&self) -> &VerletSolver {
        &self.solver
    }

    #[inline]
    pub fn mouse(&self) -> &Mouse {
        &self.mouse
    }

    #[inline]
    pub fn mouse_mut(&mut self) -> &mut Mouse {
        &mut self.mouse
    }

    pub fn metric(&self) -> ScoreMetric {
        self.metric
    }

    pub fn tensioners(&self) -> &[Tensioner] {
        &self.tensioners
    }

    /// Looks up a tensioner by id.
    pub fn tensioner(&self, id: TensionerId) -> ShearsResult<&Tensioner> {
        self.tensioners.get(id.index()).ok_or_else(|| unknown_tensioner(id))
    }

    /// One update: drag, integrate and relax, move grasped particles,
    /// then cut. `step` labels numeric errors.
    ///
    /// On error the cloth may be partially updated; callers that need
    /// atomicity keep a copy.
    pub fn update(&mut self, step: u64) -> ShearsResult<StepReport> {
        self.mouse.drag(&mut self.mesh);
        let mut report = self.solver.step(&mut self.mesh, step)?;
        for t in &mut self.tensioners {
            t.apply_pending(&mut self.mesh);
        }
        report.cut = self.mouse.cut(&mut self.mesh) as u32;
        check_finite(&self.mesh, step)?;
        Ok(report)
    }

    /// Grasps the particles near (x, y) with a new tensioner.
    ///
    /// Takes every cloth particle within the grasp radius, or the nearest
    /// one when the radius holds none. Fails when (x, y) lies outside the
    /// cloth footprint (grown by one grid spacing) or when the grasp
    /// would overlap an existing one.
    pub fn pin_position(
        &mut self,
        x: f32,
        y: f32,
        max_displacement: Option<f32>,
    ) -> ShearsResult<TensionerId> {
        if let Some(max) = max_displacement {
            if !(max >= 0.0) {
                return Err(ShearsError::InvariantViolation(format!(
                    "max displacement must be non-negative, got {max}"
                )));
            }
        }
        let ([min_x, min_y], [max_x, max_y]) = self.mesh.footprint().ok_or_else(|| {
            ShearsError::InvariantViolation("cloth has no particles to grasp".into())
        })?;
        let margin = self.mesh.dx.max(self.mesh.dy);
        let inside = x >= min_x - margin
            && x <= max_x + margin
            && y >= min_y - margin
            && y <= max_y + margin;
        if !inside {
            return Err(ShearsError::InvariantViolation(format!(
                "pin point ({x}, {y}) lies outside the cloth"
            )));
        }

        let mut points = self.mesh.members_within(x, y, self.grasp_radius);
        if points.is_empty() {
            points.extend(self.mesh.nearest_member(x, y));
        }
        self.check_grasp(&points)?;

        let mut tensioner = Tensioner::new(max_displacement);
        tensioner.pin_points_at(&mut self.mesh, &points, [x, y])?;
        self.tensioners.push(tensioner);
        let id = TensionerId((self.tensioners.len() - 1) as u32);
        tracing::info!(tensioner = id.0, x, y, particles = points.len(), "pinned");
        Ok(id)
    }

    /// Grasps an explicit particle set with an existing, released tensioner.
    pub fn pin_points(&mut self, id: TensionerId, points: &[ParticleId]) -> ShearsResult<()> {
        self.tensioner(id)?;
        for &p in points {
            self.mesh.check_particle(p)?;
        }
        self.check_grasp(points)?;
        let tensioner = &mut self.tensioners[id.index()];
        tensioner.pin_points(&mut self.mesh, points)
    }

    /// Queues a displacement for a grasp. Returns the displacement
    /// actually queued.
    pub fn tension(&mut self, id: TensionerId, delta: Vec3) -> ShearsResult<Vec3> {
        let tensioner = self
            .tensioners
            .get_mut(id.index())
            .ok_or_else(|| unknown_tensioner(id))?;
        tensioner.tension(delta)
    }

    /// Releases a grasp. Returns false if it held nothing.
    pub fn unpin_position(&mut self, id: TensionerId) -> ShearsResult<bool> {
        let tensioner = self
            .tensioners
            .get_mut(id.index())
            .ok_or_else(|| unknown_tensioner(id))?;
        let released = tensioner.unpin_position(&mut self.mesh);
        if released {
            tracing::info!(tensioner = id.0, "released");
        }
        Ok(released)
    }

    /// Goal metric value. Higher is better.
    pub fn evaluate(&self) -> f64 {
        self.metric
            .evaluate(&self.mesh, self.solver.config().floor_z)
    }

    /// Per-particle state plus every active grasp.
    pub fn observation(&self) -> Observation {
        let particles = self
            .mesh
            .particles()
            .iter()
            .enumerate()
            .map(|(i, p)| ParticleObservation {
                position: p.position.to_array(),
                constraints: self.mesh.active_degree(ParticleId(i as u32)),
                shape: p.is_shape(),
            })
            .collect();
        let tensioners = self
            .tensioners
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_pinned())
            .map(|(i, t)| TensionerObservation {
                id: TensionerId(i as u32),
                position: t.position(),
                displacement: t.displacement().to_array(),
            })
            .collect();
        Observation {
            particles,
            tensioners,
        }
    }

    /// Fails if `points` is held by another grasp or statically pinned.
    fn check_grasp(&self, points: &[ParticleId]) -> ShearsResult<()> {
        if let Some(i) = self.tensioners.iter().position(|t| t.overlaps(points)) {
            return Err(ShearsError::InvariantViolation(format!(
                "grasp overlaps particles held by tensioner {i}"
            )));
        }
        if let Some(p) = points.iter().find(|p| self.mesh.particles()[p.index()].pinned) {
            return Err(ShearsError::InvariantViolation(format!(
                "particle {} is already pinned",
                p.0
            )));
        }
        Ok(())
    }
}

fn unknown_tensioner(id: TensionerId) -> ShearsError {
    ShearsError::InvariantViolation(format!("unknown tensioner {}", id.0))
}
