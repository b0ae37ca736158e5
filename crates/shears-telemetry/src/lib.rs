//! # shears-telemetry
//!
//! Event bus for simulation telemetry. The simulation emits structured
//! events (steps, cuts, settling, grasps, numeric faults) that pluggable
//! sinks consume: an in-memory [`VecSink`] for inspection and a
//! [`TracingSink`] that forwards to `tracing`.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::{BusStats, EventBus};
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
