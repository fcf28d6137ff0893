//! Pure transition planning for the pan state machine.
//!
//! [`plan`] maps the current state and an incoming touch event to the next
//! state plus an ordered list of [`Step`]s. It reads but never mutates;
//! the recognizer executes the steps against its history and trajectory.
//! Step order matters: an emission sees exactly the samples recorded
//! before it.

use tactile_common::config::PanConfig;
use tactile_touch_model::gesture::GesturePhase;
use tactile_touch_model::touch::{PointState, TouchEvent};
use tactile_touch_model::vector::Vector2;

use crate::state::RecognitionState;

use GesturePhase::{Cancelled, Continuing, Finished, Possible, Started};
use RecognitionState as S;
use Step::{BeginGesture, ClearHistory, CountMotion, Emit, Record};

/// One side effect of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Remember the primary point's position and time as the gesture origin.
    BeginGesture,
    /// Append the event to the history.
    Record,
    /// Count one primary-point motion event.
    CountMotion,
    /// Synthesize and deliver a gesture in this phase.
    Emit(GesturePhase),
    /// Drop all retained history.
    ClearHistory,
}

/// Next state and the steps that get there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub next: RecognitionState,
    pub steps: &'static [Step],
}

impl Plan {
    const fn new(next: RecognitionState, steps: &'static [Step]) -> Self {
        Self { next, steps }
    }

    /// Phases emitted by this plan, in order.
    pub fn emissions(&self) -> impl Iterator<Item = GesturePhase> + '_ {
        self.steps.iter().filter_map(|step| match step {
            Step::Emit(phase) => Some(*phase),
            _ => None,
        })
    }
}

/// Per-gesture counters the planner reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tracking {
    pub down_position: Vector2,
    pub motion_events: u32,
}

const IGNORE: &[Step] = &[];

/// Decide how `event` moves the recognizer out of `state`.
pub fn plan(
    state: RecognitionState,
    event: &TouchEvent,
    tracking: &Tracking,
    config: &PanConfig,
) -> Plan {
    let primary = event.primary();
    let point_count = event.point_count();

    if primary.state == PointState::Interrupted {
        return if state.is_active() {
            Plan::new(S::Clear, &[Record, Emit(Cancelled), ClearHistory])
        } else {
            Plan::new(S::Clear, &[ClearHistory])
        };
    }

    // Only a lone primary lift fully resets a rejected or overflowing sequence.
    let lone_lift = point_count == 1 && primary.state == PointState::Up;
    let displaced_enough = || {
        primary.position.distance_squared(tracking.down_position)
            >= config.minimum_distance_squared()
    };

    match state {
        S::Clear => match primary.state {
            PointState::Down | PointState::Stationary => {
                if point_count == config.minimum_touches {
                    Plan::new(S::Possible, &[BeginGesture, Record, Emit(Possible)])
                } else {
                    Plan::new(S::Clear, &[BeginGesture])
                }
            }
            _ => Plan::new(S::Clear, IGNORE),
        },

        S::Possible if !config.accepts_touch_count(point_count) => {
            if lone_lift {
                Plan::new(S::Clear, &[Emit(Cancelled), ClearHistory])
            } else {
                Plan::new(S::Failed, &[Emit(Cancelled)])
            }
        }
        S::Possible => match primary.state {
            PointState::Motion => {
                let motion_events = tracking.motion_events.saturating_add(1);
                if motion_events >= config.minimum_motion_events && displaced_enough() {
                    Plan::new(S::Started, &[Record, CountMotion, Emit(Started)])
                } else {
                    Plan::new(S::Possible, &[Record, CountMotion])
                }
            }
            PointState::Up => {
                if displaced_enough() {
                    // Flick: lifted before enough motion events arrived.
                    Plan::new(
                        S::Clear,
                        &[Emit(Started), Record, Emit(Finished), ClearHistory],
                    )
                } else {
                    Plan::new(S::Clear, &[Emit(Cancelled), ClearHistory])
                }
            }
            _ => Plan::new(S::Possible, IGNORE),
        },

        S::Started if !config.accepts_touch_count(point_count) => {
            if lone_lift {
                Plan::new(S::Clear, &[Record, Emit(Finished), ClearHistory])
            } else {
                Plan::new(S::Finished, &[Record, Emit(Finished)])
            }
        }
        S::Started => match primary.state {
            PointState::Motion => Plan::new(S::Started, &[Record, Emit(Continuing)]),
            PointState::Up => Plan::new(S::Clear, &[Record, Emit(Finished), ClearHistory]),
            PointState::Stationary
                if point_count == config.minimum_touches
                    && event.secondary().iter().any(|p| p.state == PointState::Up) =>
            {
                // Lifting a secondary point drops below the minimum.
                Plan::new(S::Finished, &[Record, Emit(Finished)])
            }
            _ => Plan::new(S::Started, &[Record]),
        },

        S::Finished | S::Failed => {
            if primary.state == PointState::Up {
                Plan::new(S::Clear, &[ClearHistory])
            } else {
                Plan::new(state, IGNORE)
            }
        }
    }
}
