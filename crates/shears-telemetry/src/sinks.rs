//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::{EventKind, SimulationEvent};

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the run ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// Clones share the same buffer, so keep one handle and hand a clone to
/// the bus to inspect what was delivered.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of events received so far.
    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of received events with the given [`SimulationEvent::name`].
    pub fn count(&self, name: &str) -> usize {
        self.events().iter().filter(|e| e.name() == name).count()
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`. Faults are logged at `warn`, per-step
/// events at `debug`, lifecycle events at `info`.
#[derive(Debug, Default)]
pub struct TracingSink {
    handled: u64,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        self.handled += 1;
        match &event.kind {
            EventKind::NumericFault { particle, detail } => {
                tracing::warn!(step = event.step, particle, detail = %detail, "numeric_fault");
            }
            EventKind::StepCompleted { .. }
            | EventKind::ConstraintsCut { .. }
            | EventKind::TensionApplied { .. } => {
                tracing::debug!(step = event.step, event = ?event.kind, "simulation_event");
            }
            _ => {
                tracing::info!(step = event.step, event = ?event.kind, "simulation_event");
            }
        }
    }

    fn finalize(&mut self) {
        tracing::debug!(events = self.handled, "tracing sink finished");
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
