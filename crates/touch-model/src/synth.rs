//! Scripted touch traces.
//!
//! [`TraceBuilder`] produces single-finger touch sequences step by step;
//! [`SyntheticGesture`] bundles the canonical traces used by tests and by
//! `tactile synth`.

use serde::{Deserialize, Serialize};

use crate::touch::{PointState, TimestampMs, TouchEvent, TouchPoint};
use crate::vector::Vector2;

/// Builds a touch trace for one primary finger.
#[derive(Debug, Clone)]
pub struct TraceBuilder {
    time_ms: TimestampMs,
    position: Vector2,
    events: Vec<TouchEvent>,
}

impl TraceBuilder {
    /// Start a trace at `start_ms`.
    pub fn new(start_ms: TimestampMs) -> Self {
        Self {
            time_ms: start_ms,
            position: Vector2::ZERO,
            events: Vec::new(),
        }
    }

    /// Advance the clock without emitting an event.
    pub fn wait(mut self, ms: TimestampMs) -> Self {
        self.time_ms += ms;
        self
    }

    pub fn down(mut self, x: f32, y: f32) -> Self {
        self.position = Vector2::new(x, y);
        self.push(PointState::Down)
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.position = Vector2::new(x, y);
        self.push(PointState::Motion)
    }

    /// Move in `steps` equal increments, `interval_ms` apart, ending at `(x, y)`.
    pub fn move_linear(mut self, x: f32, y: f32, steps: u32, interval_ms: TimestampMs) -> Self {
        let start = self.position;
        let target = Vector2::new(x, y);
        let steps = steps.max(1);
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let point = start + (target - start) * t;
            self = self.wait(interval_ms).move_to(point.x, point.y);
        }
        self
    }

    pub fn up(self) -> Self {
        self.push(PointState::Up)
    }

    pub fn interrupt(self) -> Self {
        self.push(PointState::Interrupted)
    }

    /// Append an event with extra non-primary points at the current time.
    ///
    /// The primary point keeps its current position with `primary` state.
    pub fn with_extra_points(mut self, primary: PointState, extra: &[TouchPoint]) -> Self {
        let mut points = Vec::with_capacity(extra.len() + 1);
        points.push(TouchPoint {
            state: primary,
            position: self.position,
        });
        points.extend_from_slice(extra);
        // Non-empty by construction.
        if let Ok(event) = TouchEvent::new(self.time_ms, points) {
            self.events.push(event);
        }
        self
    }

    pub fn build(self) -> Vec<TouchEvent> {
        self.events
    }

    fn push(mut self, state: PointState) -> Self {
        self.events.push(TouchEvent::single(
            self.time_ms,
            state,
            self.position.x,
            self.position.y,
        ));
        self
    }
}

/// Canonical scripted gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticGesture {
    /// Down and up without meaningful movement.
    Tap,
    /// Down, a single motion event, then a far lift.
    Flick,
    /// A drag that starts well after the down event (smoothing engages).
    SlowPan,
    /// A drag that starts right after the down event (no smoothing).
    FastPan,
    /// A drag cut short by the platform.
    Interrupted,
    /// A second finger joins before the pan starts.
    MultiTouch,
}

impl SyntheticGesture {
    /// Build the touch trace for this gesture, starting at `origin`.
    pub fn trace(self, origin: Vector2) -> Vec<TouchEvent> {
        let (x, y) = (origin.x, origin.y);
        let start = TraceBuilder::new(0).down(x, y);
        let builder = match self {
            SyntheticGesture::Tap => start.wait(80).move_to(x + 2.0, y + 1.0).wait(40).up(),
            SyntheticGesture::Flick => start.wait(60).move_to(x, y + 40.0).up(),
            SyntheticGesture::SlowPan => start
                .wait(150)
                .move_to(x, y + 4.0)
                .move_linear(x, y + 120.0, 15, 16)
                .wait(16)
                .up(),
            SyntheticGesture::FastPan => start
                .move_linear(x + 90.0, y, 9, 10)
                .wait(10)
                .up(),
            SyntheticGesture::Interrupted => start
                .move_linear(x, y + 60.0, 4, 16)
                .wait(16)
                .interrupt(),
            SyntheticGesture::MultiTouch => start
                .wait(30)
                .with_extra_points(
                    PointState::Stationary,
                    &[TouchPoint::new(PointState::Down, x + 50.0, y)],
                )
                .wait(30)
                .with_extra_points(
                    PointState::Motion,
                    &[TouchPoint::new(PointState::Motion, x + 50.0, y + 10.0)],
                )
                .wait(30)
                .up(),
        };
        builder.build()
    }
}
