#![forbid(unsafe_code)]

//! Deterministic pointer storms for stress-testing the engine.
//!
//! A storm is a seeded sequence of pointer and frame events. Replaying the
//! same seed against the same configuration must produce the same
//! transcript, which makes any divergence a determinism bug.
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"storm_start","pattern":"corner_drag","event_count":400,"seed":7}
//! {"event":"storm_step","idx":0,"kind":"down","width":320.0,"height":200.0,"dragging":true}
//! {"event":"storm_complete","frames":118,"transitions":43,"width":331.0,"height":207.5}
//! ```

use serde::Serialize;
use springsize_core::Direction;
use springsize_runtime::{Host, PointerId, ResizeEngine};

use crate::host::HostProbe;

/// Frame spacing used by storms, in milliseconds.
pub const STORM_FRAME_MS: f64 = 16.0;

/// Shape of the generated pointer traffic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StormPattern {
    /// One long drag on a single corner with a random walk.
    CornerDrag { moves: usize },
    /// Repeated short drags on random handles, frames in between.
    HandleHopping { drags: usize },
    /// Pointer-downs on new handles while a drag is already active.
    OverlappingDowns { downs: usize },
}

impl StormPattern {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CornerDrag { .. } => "corner_drag",
            Self::HandleHopping { .. } => "handle_hopping",
            Self::OverlappingDowns { .. } => "overlapping_downs",
        }
    }
}

/// One generated input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StormEvent {
    Down {
        direction: Direction,
        pointer_id: PointerId,
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        pointer_id: PointerId,
    },
    /// Deliver every outstanding frame once.
    Frame,
}

impl StormEvent {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Move { .. } => "move",
            Self::Up { .. } => "up",
            Self::Frame => "frame",
        }
    }
}

/// A generated storm.
#[derive(Debug, Clone)]
pub struct DragStorm {
    pub pattern: StormPattern,
    pub seed: u64,
    pub events: Vec<StormEvent>,
}

/// xorshift64, enough for reproducible walks.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform step in `-span..=span`.
    fn step(&mut self, span: u64) -> f64 {
        (self.next() % (2 * span + 1)) as f64 - span as f64
    }

    fn direction(&mut self) -> Direction {
        Direction::ALL[(self.next() % Direction::ALL.len() as u64) as usize]
    }
}

/// Generate a storm from a pattern and seed.
#[must_use]
pub fn generate_storm(pattern: StormPattern, seed: u64) -> DragStorm {
    let mut rng = Rng::new(seed);
    let events = match pattern {
        StormPattern::CornerDrag { moves } => corner_drag(moves, &mut rng),
        StormPattern::HandleHopping { drags } => handle_hopping(drags, &mut rng),
        StormPattern::OverlappingDowns { downs } => overlapping_downs(downs, &mut rng),
    };
    DragStorm {
        pattern,
        seed,
        events,
    }
}

fn corner_drag(moves: usize, rng: &mut Rng) -> Vec<StormEvent> {
    let mut events = Vec::with_capacity(moves * 2 + 2);
    let (mut x, mut y) = (0.0, 0.0);
    events.push(StormEvent::Down {
        direction: Direction::Se,
        pointer_id: 1,
        x,
        y,
    });
    for i in 0..moves {
        x += rng.step(6);
        y += rng.step(6);
        events.push(StormEvent::Move { x, y });
        if i % 3 == 0 {
            events.push(StormEvent::Frame);
        }
    }
    events.push(StormEvent::Up { pointer_id: 1 });
    events
}

fn handle_hopping(drags: usize, rng: &mut Rng) -> Vec<StormEvent> {
    let mut events = Vec::with_capacity(drags * 8);
    for n in 0..drags {
        let pointer_id = (n % 4) as PointerId + 1;
        let direction = rng.direction();
        let (mut x, mut y) = (rng.step(200), rng.step(200));
        events.push(StormEvent::Down {
            direction,
            pointer_id,
            x,
            y,
        });
        for _ in 0..4 {
            x += rng.step(20);
            y += rng.step(20);
            events.push(StormEvent::Move { x, y });
        }
        events.push(StormEvent::Up { pointer_id });
        events.push(StormEvent::Frame);
        events.push(StormEvent::Frame);
    }
    events
}

fn overlapping_downs(downs: usize, rng: &mut Rng) -> Vec<StormEvent> {
    let mut events = Vec::with_capacity(downs * 3 + 1);
    for n in 0..downs {
        let (x, y) = (rng.step(100), rng.step(100));
        events.push(StormEvent::Down {
            direction: rng.direction(),
            pointer_id: n as PointerId + 1,
            x,
            y,
        });
        events.push(StormEvent::Move {
            x: x + rng.step(15),
            y: y + rng.step(15),
        });
        events.push(StormEvent::Frame);
    }
    events.push(StormEvent::Up {
        pointer_id: downs as PointerId,
    });
    events
}

/// One JSONL transcript line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StormLogEntry {
    StormStart {
        pattern: &'static str,
        event_count: usize,
        seed: u64,
    },
    StormStep {
        idx: usize,
        kind: &'static str,
        width: f64,
        height: f64,
        dragging: bool,
    },
    StormComplete {
        frames: usize,
        transitions: usize,
        width: f64,
        height: f64,
    },
}

impl StormLogEntry {
    /// # Panics
    ///
    /// If the entry cannot be serialized, which only happens for a broken
    /// `Serialize` impl.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).expect("storm log entry serializes to JSON")
    }
}

/// Result of replaying a storm.
#[derive(Debug, Clone, Default)]
pub struct StormReport {
    /// Frames actually delivered to the engine.
    pub frames: usize,
    /// Non-noop drag transitions.
    pub transitions: usize,
    /// Largest `target` seen on either axis.
    pub peak_target: f64,
    pub log_lines: Vec<String>,
}

/// Replay `storm` against `engine`, delivering frames from `probe`.
pub fn run_storm<H: Host>(
    engine: &mut ResizeEngine<H>,
    probe: &HostProbe,
    storm: &DragStorm,
) -> StormReport {
    let mut report = StormReport::default();
    let mut clock = 0.0;
    report.log_lines.push(
        StormLogEntry::StormStart {
            pattern: storm.pattern.name(),
            event_count: storm.events.len(),
            seed: storm.seed,
        }
        .to_jsonl(),
    );

    for (idx, event) in storm.events.iter().enumerate() {
        let transition = match *event {
            StormEvent::Down {
                direction,
                pointer_id,
                x,
                y,
            } => Some(engine.pointer_down(direction, pointer_id, x, y)),
            StormEvent::Move { x, y } => Some(engine.pointer_move(x, y)),
            StormEvent::Up { pointer_id } => Some(engine.pointer_up(pointer_id)),
            StormEvent::Frame => {
                if let Some(token) = probe.take_pending_frame() {
                    clock += STORM_FRAME_MS;
                    if engine.on_frame(token, clock).is_some() {
                        report.frames += 1;
                    }
                }
                None
            }
        };
        if transition.is_some_and(|t| !t.is_noop()) {
            report.transitions += 1;
        }

        let (tw, th) = engine.state().targets();
        report.peak_target = report.peak_target.max(tw).max(th);
        let dims = engine.dimensions();
        report.log_lines.push(
            StormLogEntry::StormStep {
                idx,
                kind: event.kind(),
                width: dims.width,
                height: dims.height,
                dragging: dims.is_dragging,
            }
            .to_jsonl(),
        );
    }

    let dims = engine.dimensions();
    report.log_lines.push(
        StormLogEntry::StormComplete {
            frames: report.frames,
            transitions: report.transitions,
            width: dims.width,
            height: dims.height,
        }
        .to_jsonl(),
    );
    tracing::debug!(
        pattern = storm.pattern.name(),
        seed = storm.seed,
        frames = report.frames,
        transitions = report.transitions,
        "storm replayed"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let a = generate_storm(StormPattern::HandleHopping { drags: 20 }, 42);
        let b = generate_storm(StormPattern::HandleHopping { drags: 20 }, 42);
        assert_eq!(a.events, b.events);
        let c = generate_storm(StormPattern::HandleHopping { drags: 20 }, 43);
        assert_ne!(a.events, c.events);
    }

    #[test]
    fn corner_drag_is_bracketed_by_down_and_up() {
        let storm = generate_storm(StormPattern::CornerDrag { moves: 30 }, 1);
        assert!(matches!(storm.events.first(), Some(StormEvent::Down { .. })));
        assert!(matches!(storm.events.last(), Some(StormEvent::Up { .. })));
        let moves = storm
            .events
            .iter()
            .filter(|e| matches!(e, StormEvent::Move { .. }))
            .count();
        assert_eq!(moves, 30);
    }

    #[test]
    fn zero_seed_still_produces_motion() {
        let storm = generate_storm(StormPattern::CornerDrag { moves: 10 }, 0);
        assert!(
            storm
                .events
                .iter()
                .any(|e| matches!(e, StormEvent::Move { x, y } if *x != 0.0 || *y != 0.0))
        );
    }

    #[test]
    fn log_entries_are_tagged_json() {
        let line = StormLogEntry::StormStart {
            pattern: "corner_drag",
            event_count: 3,
            seed: 9,
        }
        .to_jsonl();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], "storm_start");
        assert_eq!(value["seed"], 9);
    }

    #[test]
    fn pattern_names() {
        assert_eq!(StormPattern::CornerDrag { moves: 1 }.name(), "corner_drag");
        assert_eq!(
            StormPattern::OverlappingDowns { downs: 1 }.name(),
            "overlapping_downs"
        );
    }
}
