//! Touch event types delivered by the platform input loop.
//!
//! A [`TouchEvent`] is a snapshot of every active touch point at one
//! timestamp. Point order is significant: point 0 is the *primary* point
//! and governs recognizer state transitions.

use serde::{Deserialize, Serialize};
use tactile_common::error::{TactileError, TactileResult};

use crate::vector::Vector2;

/// Monotonic timestamp in milliseconds.
pub type TimestampMs = u64;

/// Lifecycle state of a single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointState {
    /// The point touched down in this event.
    Down,
    /// The point is still in contact and has not moved.
    Stationary,
    /// The point moved since the previous event.
    Motion,
    /// The point was lifted in this event.
    Up,
    /// The platform aborted the touch sequence (e.g. a system overlay grabbed input).
    Interrupted,
}

/// A positional sample for one touch point. Points carry no identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub state: PointState,

    /// Screen position.
    #[serde(flatten)]
    pub position: Vector2,
}

impl TouchPoint {
    pub fn new(state: PointState, x: f32, y: f32) -> Self {
        Self {
            state,
            position: Vector2::new(x, y),
        }
    }
}

/// A multi-point touch snapshot. Always holds at least one point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTouchEvent")]
pub struct TouchEvent {
    /// Monotonic milliseconds.
    #[serde(rename = "t")]
    time_ms: TimestampMs,

    points: Vec<TouchPoint>,
}

/// Unchecked wire form of [`TouchEvent`].
#[derive(Deserialize)]
struct RawTouchEvent {
    t: TimestampMs,
    points: Vec<TouchPoint>,
}

impl TryFrom<RawTouchEvent> for TouchEvent {
    type Error = TactileError;

    fn try_from(raw: RawTouchEvent) -> Result<Self, Self::Error> {
        TouchEvent::new(raw.t, raw.points)
    }
}

impl TouchEvent {
    /// Create a touch event. Fails if `points` is empty.
    pub fn new(time_ms: TimestampMs, points: Vec<TouchPoint>) -> TactileResult<Self> {
        if points.is_empty() {
            return Err(TactileError::invalid_touch_event(format!(
                "event at t={time_ms}ms has no touch points"
            )));
        }
        Ok(Self { time_ms, points })
    }

    /// Create a single-point touch event.
    pub fn single(time_ms: TimestampMs, state: PointState, x: f32, y: f32) -> Self {
        Self {
            time_ms,
            points: vec![TouchPoint::new(state, x, y)],
        }
    }

    pub fn time_ms(&self) -> TimestampMs {
        self.time_ms
    }

    pub fn points(&self) -> &[TouchPoint] {
        &self.points
    }

    /// The primary (first) touch point.
    pub fn primary(&self) -> &TouchPoint {
        &self.points[0]
    }

    /// Touch points other than the primary one.
    pub fn secondary(&self) -> &[TouchPoint] {
        &self.points[1..]
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }
}
