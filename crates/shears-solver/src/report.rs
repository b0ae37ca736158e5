//! Per-step diagnostics.

use serde::{Deserialize, Serialize};

/// Result of one or more solver steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// Steps aggregated into this report.
    pub steps: u32,
    /// Relaxation passes performed.
    pub passes: u32,
    /// Summed magnitude of constraint corrections. Zero once settled.
    pub correction: f64,
    /// Constraints removed by cutting.
    pub cut: u32,
    /// Particle clamps against the floor or bounds.
    pub clamped: u32,
}

impl StepReport {
    /// Folds `other` into `self`.
    pub fn accumulate(&mut self, other: &StepReport) {
        self.steps += other.steps;
        self.passes += other.passes;
        self.correction += other.correction;
        self.cut += other.cut;
        self.clamped += other.clamped;
    }
}
