//! Event bus: step-stamped events queued on a channel, delivered to sinks
//! in batches.
//!
//! The simulation stamps each event with its step counter on `emit`.
//! Nothing reaches a sink until `flush`, which the simulation calls once
//! per mutating call, so one `update` produces one batch. Event kinds can
//! be muted by name, and the bus keeps delivery counters.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Delivery counters of an [`EventBus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusStats {
    /// Events queued by `emit`.
    pub queued: u64,
    /// Events refused because the bus was disabled or the kind muted.
    pub dropped: u64,
    /// Events handed to the sinks.
    pub delivered: u64,
    /// Non-empty flushes.
    pub batches: u64,
}

impl BusStats {
    /// Queued but not yet delivered.
    pub fn pending(&self) -> u64 {
        self.queued - self.delivered
    }
}

/// Telemetry bus owned by a simulation.
pub struct EventBus {
    tx: Sender<SimulationEvent>,
    rx: Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    muted: Vec<&'static str>,
    enabled: bool,
    stats: BusStats,
}

impl EventBus {
    /// An enabled bus with no sinks and nothing muted.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            sinks: Vec::new(),
            muted: Vec::new(),
            enabled: true,
            stats: BusStats::default(),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.add_sink(sink);
        self
    }

    /// Drops every event whose [`EventKind::name`] is `name`.
    pub fn muting(mut self, name: &'static str) -> Self {
        if !self.muted.contains(&name) {
            self.muted.push(name);
        }
        self
    }

    /// Sinks receive batches in registration order.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// A disabled bus refuses new events; already queued ones still flush.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_muted(&self, name: &str) -> bool {
        self.muted.iter().any(|m| *m == name)
    }

    /// Queues `kind` stamped with `step`. Returns whether it was accepted.
    pub fn emit(&mut self, step: u64, kind: EventKind) -> bool {
        if !self.enabled || self.is_muted(kind.name()) {
            self.stats.dropped += 1;
            return false;
        }
        if self.tx.send(SimulationEvent::new(step, kind)).is_err() {
            // unreachable while the bus owns `rx`
            self.stats.dropped += 1;
            return false;
        }
        self.stats.queued += 1;
        true
    }

    /// Delivers the queued batch to every sink. Returns the batch size.
    pub fn flush(&mut self) -> usize {
        let batch: Vec<SimulationEvent> = self.rx.try_iter().collect();
        if batch.is_empty() {
            return 0;
        }
        for sink in &mut self.sinks {
            for event in &batch {
                sink.handle(event);
            }
        }
        self.stats.delivered += batch.len() as u64;
        self.stats.batches += 1;
        batch.len()
    }

    /// Flushes, lets every sink finalize, and returns the final counters.
    pub fn finish(&mut self) -> BusStats {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
        self.stats
    }

    pub fn stats(&self) -> BusStats {
        self.stats
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sinks.iter().map(|s| s.name()).collect();
        f.debug_struct("EventBus")
            .field("sinks", &names)
            .field("muted", &self.muted)
            .field("enabled", &self.enabled)
            .field("stats", &self.stats)
            .finish()
    }
}
