//! Simulation lifecycle: stepping, settled reset, grasps, scoring.
//!
//! A [`Simulation`] owns exactly one live [`Cloth`], the pristine cloth it
//! was built with and, after the first reset, the settled snapshot. Every
//! copy is an independent value; nothing is shared between them.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shears_interact::MouseButton;
use shears_solver::StepReport;
use shears_telemetry::{EventBus, EventKind};
use shears_types::{ParticleId, ShearsError, ShearsResult, TensionerId};

use crate::cloth::Cloth;
use crate::config::SimulationConfig;
use crate::observation::Observation;

/// A cloth simulation.
#[derive(Debug, Serialize, Deserialize)]
pub struct Simulation {
    cloth: Cloth,
    pristine: Cloth,
    bounds: [f32; 3],
    settle_iterations: u32,
    update_iterations: u32,
    trajectory: Vec<[f32; 2]>,
    snapshot: Option<Cloth>,
    steps: u64,
    #[serde(skip)]
    bus: Option<EventBus>,
}

impl Simulation {
    /// Validates `config` and builds the cloth. The cloth is not settled
    /// until the first [`reset`](Self::reset).
    pub fn new(config: &SimulationConfig) -> ShearsResult<Self> {
        config.validate()?;
        let cloth = Cloth::from_config(config)?;
        tracing::debug!(
            particles = cloth.mesh().particle_count(),
            constraints = cloth.mesh().constraint_count(),
            "simulation built"
        );
        Ok(Self::from_cloth(cloth, config))
    }

    /// Wraps an already-built cloth, taking the remaining settings from
    /// `config`.
    pub fn from_cloth(cloth: Cloth, config: &SimulationConfig) -> Self {
        Self {
            pristine: cloth.clone(),
            cloth,
            bounds: config.bounds,
            settle_iterations: config.settle_iterations,
            update_iterations: config.update_iterations.max(1),
            trajectory: config.trajectory.clone(),
            snapshot: None,
            steps: 0,
            bus: None,
        }
    }

    /// Attaches a telemetry bus. Events are flushed after every mutating call.
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Detaches and returns the telemetry bus.
    pub fn take_event_bus(&mut self) -> Option<EventBus> {
        self.bus.take()
    }

    #[inline]
    pub fn cloth(&self) -> &Cloth {
        &self.cloth
    }

    /// The settled cloth stored by the first reset.
    pub fn snapshot(&self) -> Option<&Cloth> {
        self.snapshot.as_ref()
    }

    /// Cloth updates run since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn bounds(&self) -> [f32; 3] {
        self.bounds
    }

    pub fn settle_iterations(&self) -> u32 {
        self.settle_iterations
    }

    pub fn update_iterations(&self) -> u32 {
        self.update_iterations
    }

    pub fn trajectory(&self) -> &[[f32; 2]] {
        &self.trajectory
    }

    /// Runs `iterations` cloth updates.
    ///
    /// All or nothing: if any update hits a numeric degeneracy the cloth
    /// is put back to its state before the call and the error returned.
    pub fn update(&mut self, iterations: u32) -> ShearsResult<StepReport> {
        let backup = self.cloth.clone();
        let start = self.steps;
        let mut total = StepReport::default();

        for _ in 0..iterations {
            match self.cloth.update(self.steps) {
                Ok(report) => {
                    total.accumulate(&report);
                    self.steps += 1;
                }
                Err(e) => {
                    self.cloth = backup;
                    self.steps = start;
                    if let ShearsError::NumericDegeneracy {
                        particle, detail, ..
                    } = &e
                    {
                        tracing::warn!(step = start, particle, "update rolled back");
                        self.emit(EventKind::NumericFault {
                            particle: *particle,
                            detail: detail.clone(),
                        });
                    }
                    self.flush();
                    return Err(e);
                }
            }
        }

        tracing::debug!(
            step = self.steps,
            iterations,
            correction = total.correction,
            cut = total.cut,
            "update"
        );
        self.emit(EventKind::StepCompleted {
            iterations,
            correction: total.correction,
        });
        if total.cut > 0 {
            self.emit(EventKind::ConstraintsCut {
                count: total.cut,
                total: self.cloth.mesh().cut_count() as u32,
            });
        }
        self.flush();
        Ok(total)
    }

    /// Runs the configured number of updates.
    pub fn step(&mut self) -> ShearsResult<StepReport> {
        self.update(self.update_iterations)
    }

    /// Puts the cloth into its settled starting state.
    ///
    /// The first call restores the pristine cloth, settles it and keeps a
    /// copy; later calls restore that copy. Tensioner ids issued before
    /// a reset are invalid afterwards.
    pub fn reset(&mut self) -> ShearsResult<()> {
        if let Some(snapshot) = &self.snapshot {
            self.cloth = snapshot.clone();
            tracing::info!(step = self.steps, "restored settled snapshot");
            self.emit(EventKind::Restored);
            self.flush();
            return Ok(());
        }

        let mut cloth = self.pristine.clone();
        let mut residual = 0.0;
        for i in 0..self.settle_iterations {
            residual = cloth.update(u64::from(i))?.correction;
        }
        self.snapshot = Some(cloth.clone());
        self.cloth = cloth;
        tracing::info!(
            iterations = self.settle_iterations,
            residual,
            "settled"
        );
        self.emit(EventKind::Settled {
            iterations: self.settle_iterations,
            residual,
        });
        self.flush();
        Ok(())
    }

    /// Grasps the cloth near (x, y). See [`Cloth::pin_position`].
    pub fn pin_position(
        &mut self,
        x: f32,
        y: f32,
        max_displacement: Option<f32>,
    ) -> ShearsResult<TensionerId> {
        let id = self.cloth.pin_position(x, y, max_displacement)?;
        let particles = self.cloth.tensioner(id)?.grabbed().len() as u32;
        self.emit(EventKind::TensionerPinned {
            tensioner: id.0,
            particles,
            x,
            y,
        });
        self.flush();
        Ok(id)
    }

    /// Re-grasps an explicit particle set with a released tensioner.
    pub fn pin_points(&mut self, id: TensionerId, points: &[ParticleId]) -> ShearsResult<()> {
        self.cloth.pin_points(id, points)?;
        let [x, y] = self.cloth.tensioner(id)?.origin();
        self.emit(EventKind::TensionerPinned {
            tensioner: id.0,
            particles: points.len() as u32,
            x,
            y,
        });
        self.flush();
        Ok(())
    }

    /// Queues a pull on a grasp, applied during the next update.
    pub fn tension(&mut self, id: TensionerId, dx: f32, dy: f32, dz: f32) -> ShearsResult<Vec3> {
        let applied = self.cloth.tension(id, Vec3::new(dx, dy, dz))?;
        self.emit(EventKind::TensionApplied {
            tensioner: id.0,
            delta: applied.to_array(),
        });
        self.flush();
        Ok(applied)
    }

    /// Releases a grasp. Returns false if it held nothing.
    pub fn unpin_position(&mut self, id: TensionerId) -> ShearsResult<bool> {
        let released = self.cloth.unpin_position(id)?;
        if released {
            self.emit(EventKind::TensionerReleased { tensioner: id.0 });
            self.flush();
        }
        Ok(released)
    }

    pub fn move_mouse(&mut self, x: f32, y: f32) {
        self.cloth.mouse_mut().move_to(x, y);
    }

    pub fn set_mouse_height(&mut self, z: f32) {
        self.cloth.mouse_mut().set_height(z);
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        self.cloth.mouse_mut().press(button);
    }

    pub fn release_mouse(&mut self) {
        self.cloth.mouse_mut().release();
    }

    /// Goal metric of the live cloth. Higher is better.
    pub fn score(&self) -> f64 {
        self.cloth.evaluate()
    }

    pub fn observation(&self) -> Observation {
        self.cloth.observation()
    }

    /// Interior particle positions.
    pub fn normal_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.cloth
            .mesh()
            .particles()
            .iter()
            .filter(|p| p.is_member() && !p.is_shape())
            .map(|p| p.position)
    }

    /// Outline particle positions.
    pub fn shape_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.cloth
            .mesh()
            .particles()
            .iter()
            .filter(|p| p.is_shape())
            .map(|p| p.position)
    }

    /// Endpoint positions of every active constraint.
    pub fn active_edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let mesh = self.cloth.mesh();
        let particles = mesh.particles();
        mesh.constraints()
            .iter()
            .filter(|c| c.is_active())
            .map(move |c| (particles[c.a.index()].position, particles[c.b.index()].position))
    }

    /// True if any cloth particle left `[0, x] × [0, y] × [-z, z]`.
    pub fn out_of_bounds(&self) -> bool {
        let [max_x, max_y, max_z] = self.bounds;
        self.cloth
            .mesh()
            .particles()
            .iter()
            .filter(|p| p.is_member())
            .any(|p| {
                let q = p.position;
                !(0.0..=max_x).contains(&q.x)
                    || !(0.0..=max_y).contains(&q.y)
                    || !(-max_z..=max_z).contains(&q.z)
            })
    }

    fn emit(&mut self, kind: EventKind) {
        if let Some(bus) = &mut self.bus {
            bus.emit(self.steps, kind);
        }
    }

    fn flush(&mut self) {
        if let Some(bus) = &mut self.bus {
            bus.flush();
        }
    }
}
