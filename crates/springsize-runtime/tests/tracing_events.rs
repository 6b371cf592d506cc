//! Structured log events emitted by the engine.

use std::sync::{Arc, Mutex};

use springsize_harness::{FrameClock, drive_frames, engine_with};
use springsize_runtime::{Direction, FrameToken, ResizeConfig};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

#[derive(Default)]
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

struct Capture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            fields: visitor.0,
        });
    }
}

fn capture<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, f);
    let out = events.lock().unwrap().clone();
    out
}

fn field<'a>(event: &'a CapturedEvent, name: &str) -> Option<&'a str> {
    event
        .fields
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn stale_frame_token_logs_warning() {
    let events = capture(|| {
        let (mut engine, _probe) = engine_with(ResizeConfig::default());
        assert!(engine.on_frame(FrameToken(4242), 0.0).is_none());
    });
    let warn = events
        .iter()
        .find(|e| e.level == Level::WARN)
        .expect("warn event");
    assert!(warn.message.contains("stale token"), "{warn:?}");
    assert_eq!(field(warn, "token"), Some("4242"));
}

#[test]
fn swallowed_capture_error_logs_debug() {
    let events = capture(|| {
        let (mut engine, probe) = engine_with(ResizeConfig::default());
        probe.reject_capture(true);
        engine.pointer_down(Direction::S, 3, 0.0, 0.0);
    });
    let debug = events
        .iter()
        .find(|e| e.message.contains("pointer capture failed"))
        .expect("capture failure event");
    assert_eq!(debug.level, Level::DEBUG);
    assert!(field(debug, "error").is_some_and(|e| e.contains("refuses pointer 3")));
}

#[test]
fn scheduler_start_and_stop_are_logged() {
    let events = capture(|| {
        let (mut engine, probe) = engine_with(ResizeConfig::default());
        drive_frames(&mut engine, &probe, &mut FrameClock::default(), 5);
    });
    let messages: Vec<_> = events.iter().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&"resize engine created"), "{messages:?}");
    assert!(messages.contains(&"animation scheduler started"), "{messages:?}");
    assert!(
        messages.contains(&"springs at rest; scheduler stopped"),
        "{messages:?}"
    );
}

#[test]
fn teardown_is_logged() {
    let events = capture(|| {
        let (engine, _probe) = engine_with(ResizeConfig::default());
        engine.shutdown();
    });
    assert!(
        events
            .iter()
            .any(|e| e.message == "resize engine released host resources")
    );
}
