//! Integration tests for shears-telemetry.

use shears_telemetry::bus::{BusStats, EventBus};
use shears_telemetry::events::{EventKind, SimulationEvent};
use shears_telemetry::sinks::{TracingSink, VecSink};

fn step_kind() -> EventKind {
    EventKind::StepCompleted {
        iterations: 1,
        correction: 0.5,
    }
}

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn emit_and_flush() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(Box::new(sink.clone()));

    assert!(bus.emit(0, step_kind()));
    assert!(bus.emit(1, EventKind::Restored));
    assert!(sink.is_empty(), "nothing is delivered before flush");
    assert_eq!(bus.stats().pending(), 2);

    assert_eq!(bus.flush(), 2);
    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], SimulationEvent::new(0, step_kind()));
    assert_eq!(events[1].step, 1);
    assert_eq!(events[1].kind, EventKind::Restored);
    assert_eq!(bus.flush(), 0);
}

#[test]
fn disabled_bus_drops_events() {
    let sink = VecSink::new();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(sink.clone()));
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    assert!(!bus.emit(0, step_kind()));
    assert_eq!(bus.flush(), 0);
    assert!(sink.is_empty());
    assert_eq!(bus.stats().dropped, 1);
}

#[test]
fn multiple_sinks_see_every_event() {
    let a = VecSink::new();
    let b = VecSink::new();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(a.clone()));
    bus.add_sink(Box::new(b.clone()));
    bus.add_sink(Box::new(TracingSink::new()));
    assert_eq!(bus.sink_count(), 3);

    for step in 0..4 {
        bus.emit(step, step_kind());
    }
    let stats = bus.finish();
    assert_eq!(a.len(), 4);
    assert_eq!(b.events(), a.events());
    assert_eq!(
        stats,
        BusStats {
            queued: 4,
            dropped: 0,
            delivered: 4,
            batches: 1,
        }
    );
}

#[test]
fn count_by_name() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(Box::new(sink.clone()));
    bus.emit(0, step_kind());
    bus.emit(1, step_kind());
    bus.emit(1, EventKind::TensionerReleased { tensioner: 0 });
    bus.flush();

    assert_eq!(sink.count("step_completed"), 2);
    assert_eq!(sink.count("tensioner_released"), 1);
    assert_eq!(sink.count("settled"), 0);
}

#[test]
fn events_queued_before_disable_still_flush() {
    let sink = VecSink::new();
    let mut bus = EventBus::new().with_sink(Box::new(sink.clone()));
    bus.emit(3, EventKind::Restored);
    bus.set_enabled(false);
    bus.emit(4, EventKind::Restored);
    assert_eq!(bus.flush(), 1);
    assert_eq!(sink.events()[0].step, 3);
}

#[test]
fn muted_kinds_are_dropped() {
    let sink = VecSink::new();
    let mut bus = EventBus::new()
        .with_sink(Box::new(sink.clone()))
        .muting("step_completed")
        .muting("step_completed");
    assert!(bus.is_muted("step_completed"));
    assert!(!bus.is_muted("settled"));

    assert!(!bus.emit(0, step_kind()));
    assert!(bus.emit(0, EventKind::Restored));
    bus.flush();
    assert_eq!(sink.count("step_completed"), 0);
    assert_eq!(sink.count("restored"), 1);
    assert_eq!(bus.stats().dropped, 1);
    assert!(format!("{bus:?}").contains("step_completed"));
}

#[test]
fn batches_count_non_empty_flushes() {
    let mut bus = EventBus::new().with_sink(Box::new(VecSink::new()));
    bus.emit(0, EventKind::Restored);
    bus.flush();
    bus.flush();
    bus.emit(1, EventKind::Restored);
    bus.emit(1, step_kind());
    bus.flush();
    let stats = bus.stats();
    assert_eq!(stats.batches, 2);
    assert_eq!(stats.delivered, 3);
    assert_eq!(stats.pending(), 0);
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn kind_names_match_event_names() {
    let event = SimulationEvent::new(2, EventKind::TensionerReleased { tensioner: 1 });
    assert_eq!(event.name(), event.kind.name());
    assert_eq!(event.name(), "tensioner_released");
}

#[test]
fn event_serialization() {
    let event = SimulationEvent::new(
        5,
        EventKind::TensionApplied {
            tensioner: 2,
            delta: [1.0, 0.0, -0.5],
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
    assert!(json.contains("TensionApplied"));
}

#[test]
fn debug_lists_sink_names() {
    let bus = EventBus::new().with_sink(Box::new(VecSink::new()));
    let text = format!("{bus:?}");
    assert!(text.contains("vec_sink"));
}
