//! Synthesized pan gesture notifications.

use serde::{Deserialize, Serialize};

use crate::touch::TimestampMs;
use crate::vector::Vector2;

/// Phase of an emitted pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Enough touches are down that a pan may follow.
    Possible,
    /// The primary point moved far enough; the pan began.
    Started,
    /// The pan moved.
    Continuing,
    /// The pan ended normally.
    Finished,
    /// The attempt was abandoned or interrupted.
    Cancelled,
}

impl GesturePhase {
    /// Whether this phase closes a gesture sequence.
    pub fn is_terminal(self) -> bool {
        matches!(self, GesturePhase::Finished | GesturePhase::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GesturePhase::Possible => "possible",
            GesturePhase::Started => "started",
            GesturePhase::Continuing => "continuing",
            GesturePhase::Finished => "finished",
            GesturePhase::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for GesturePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pan gesture notification handed to the accessibility consumer.
///
/// Positions are the smoothed, threshold-adjusted trajectory, not raw
/// touch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanGestureEvent {
    pub phase: GesturePhase,

    /// Reported position of the primary point.
    pub current_position: Vector2,

    /// Position reported by the previous emission (or the down position for `Started`).
    pub previous_position: Vector2,

    /// Milliseconds between the previous sample and this one.
    pub time_delta_ms: TimestampMs,

    /// Timestamp of the touch event that produced this gesture.
    #[serde(rename = "t")]
    pub time_ms: TimestampMs,

    pub number_of_touches: u32,
}

impl PanGestureEvent {
    /// Displacement reported by this emission.
    pub fn displacement(&self) -> Vector2 {
        self.current_position - self.previous_position
    }
}
