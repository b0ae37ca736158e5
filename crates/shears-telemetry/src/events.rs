//! Simulation event types.
//!
//! Events are small value types tagged with the simulation step at which
//! they were emitted.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Simulation step counter when the event was emitted.
    pub step: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// An `update` call finished.
    StepCompleted {
        /// Cloth updates run by the call.
        iterations: u32,
        /// Summed constraint correction (settledness signal).
        correction: f64,
    },

    /// Constraints were removed by the cutter.
    ConstraintsCut {
        /// Newly removed this call.
        count: u32,
        /// Removed since construction.
        total: u32,
    },

    /// The first reset settled the cloth and stored the snapshot.
    Settled {
        iterations: u32,
        /// Correction of the final settle iteration.
        residual: f64,
    },

    /// A later reset restored the settled snapshot.
    Restored,

    /// A tensioner grasped particles.
    TensionerPinned {
        tensioner: u32,
        particles: u32,
        x: f32,
        y: f32,
    },

    /// A tension increment was queued.
    TensionApplied {
        tensioner: u32,
        /// Increment actually queued, after the displacement limit.
        delta: [f32; 3],
    },

    /// A tensioner released its particles.
    TensionerReleased { tensioner: u32 },

    /// An update was rolled back after a numeric degeneracy.
    NumericFault { particle: u32, detail: String },
}

impl SimulationEvent {
    /// Creates a new event for the given step.
    pub fn new(step: u64, kind: EventKind) -> Self {
        Self { step, kind }
    }

    /// Short stable name of the event kind.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl EventKind {
    /// Short stable name, used by sinks and for muting.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::StepCompleted { .. } => "step_completed",
            EventKind::ConstraintsCut { .. } => "constraints_cut",
            EventKind::Settled { .. } => "settled",
            EventKind::Restored => "restored",
            EventKind::TensionerPinned { .. } => "tensioner_pinned",
            EventKind::TensionApplied { .. } => "tension_applied",
            EventKind::TensionerReleased { .. } => "tensioner_released",
            EventKind::NumericFault { .. } => "numeric_fault",
        }
    }
}
