//! The pan gesture recognizer.
//!
//! Feed touch events in order with [`PanGestureRecognizer::process_event`];
//! gestures are delivered synchronously to the registered handler before
//! the call returns.
//!
//! ```
//! use tactile_gesture_core::{GestureLog, PanGestureRecognizer};
//! use tactile_touch_model::gesture::GesturePhase;
//! use tactile_touch_model::touch::{PointState, TouchEvent};
//!
//! let log = GestureLog::new();
//! let mut recognizer = PanGestureRecognizer::with_defaults();
//! recognizer.set_handler(log.clone());
//!
//! recognizer.process_event(&TouchEvent::single(0, PointState::Down, 0.0, 0.0));
//! recognizer.process_event(&TouchEvent::single(40, PointState::Up, 2.0, 1.0));
//!
//! assert_eq!(log.phases(), vec![GesturePhase::Possible, GesturePhase::Cancelled]);
//! ```

use tactile_common::config::{DeliveryPolicy, PanConfig};
use tactile_common::error::TactileResult;
use tactile_touch_model::gesture::{GesturePhase, PanGestureEvent};
use tactile_touch_model::touch::{TimestampMs, TouchEvent};
use tactile_touch_model::vector::Vector2;

use crate::handler::PanGestureHandler;
use crate::history::{Sample, TouchHistory};
use crate::state::RecognitionState;
use crate::threshold::ThresholdSmoother;
use crate::transition::{self, Step, Tracking};

/// Recognizes single- and multi-point pans from a touch event stream.
pub struct PanGestureRecognizer {
    config: PanConfig,
    state: RecognitionState,
    handler: Option<Box<dyn PanGestureHandler>>,
    history: TouchHistory,
    smoother: ThresholdSmoother,

    down_position: Vector2,
    down_time_ms: TimestampMs,
    motion_events: u32,

    /// Position reported by the last emission.
    previous_position: Vector2,

    /// Between a `Started` emission and its terminating emission.
    panning: bool,
}

impl PanGestureRecognizer {
    /// Create a recognizer with validated thresholds.
    pub fn new(config: PanConfig) -> TactileResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    /// Create a recognizer with the default single-finger thresholds.
    pub fn with_defaults() -> Self {
        Self::from_validated(PanConfig::default())
    }

    fn from_validated(config: PanConfig) -> Self {
        Self {
            config,
            state: RecognitionState::Clear,
            handler: None,
            history: TouchHistory::new(),
            smoother: ThresholdSmoother::default(),
            down_position: Vector2::ZERO,
            down_time_ms: 0,
            motion_events: 0,
            previous_position: Vector2::ZERO,
            panning: false,
        }
    }

    /// Register the gesture consumer, replacing any previous one.
    pub fn set_handler<H>(&mut self, handler: H)
    where
        H: PanGestureHandler + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    /// Remove the gesture consumer. Gestures are still computed, then dropped.
    pub fn clear_handler(&mut self) {
        self.handler = None;
    }

    /// Swap the gesture consumer, returning the one that was registered.
    pub fn replace_handler(
        &mut self,
        handler: Option<Box<dyn PanGestureHandler>>,
    ) -> Option<Box<dyn PanGestureHandler>> {
        std::mem::replace(&mut self.handler, handler)
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    pub fn config(&self) -> &PanConfig {
        &self.config
    }

    pub fn state(&self) -> RecognitionState {
        self.state
    }

    /// Samples retained for the current gesture.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whether a started pan has not yet been finished or cancelled.
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Threshold adjustments still to be applied to upcoming emissions.
    pub fn smoothing_steps_remaining(&self) -> u32 {
        self.smoother.remaining()
    }

    /// Process one touch event, delivering any resulting gestures.
    ///
    /// Events must arrive in non-decreasing time order. Out-of-order events
    /// are processed anyway; their time deltas saturate at zero.
    pub fn process_event(&mut self, event: &TouchEvent) {
        if let Some(latest) = self.history.latest() {
            if event.time_ms() < latest.time_ms {
                tracing::debug!(
                    time_ms = event.time_ms(),
                    latest_ms = latest.time_ms,
                    "Touch event arrived out of order"
                );
            }
        }

        let tracking = Tracking {
            down_position: self.down_position,
            motion_events: self.motion_events,
        };
        let plan = transition::plan(self.state, event, &tracking, &self.config);

        for step in plan.steps {
            match *step {
                Step::BeginGesture => self.begin_gesture(event),
                Step::Record => self.history.push(Sample::from(event)),
                Step::CountMotion => self.motion_events = self.motion_events.saturating_add(1),
                Step::Emit(phase) => self.emit(phase, event),
                Step::ClearHistory => self.history.clear(),
            }
        }

        if plan.next != self.state {
            tracing::debug!(
                from = %self.state,
                to = %plan.next,
                time_ms = event.time_ms(),
                points = event.point_count(),
                "Pan recognizer transition"
            );
            self.state = plan.next;
        }
    }

    fn begin_gesture(&mut self, event: &TouchEvent) {
        self.down_position = event.primary().position;
        self.down_time_ms = event.time_ms();
        self.motion_events = 0;
        self.previous_position = self.down_position;
        self.smoother.disarm();
    }

    fn emit(&mut self, phase: GesturePhase, event: &TouchEvent) {
        let gesture = self.synthesize(phase, event);

        if phase == GesturePhase::Started {
            self.panning = true;
        }
        let deliver = match self.config.delivery {
            DeliveryPolicy::All => true,
            DeliveryPolicy::PanningOnly => self.panning,
        };
        if phase.is_terminal() {
            self.panning = false;
        }

        tracing::trace!(
            phase = %phase,
            x = gesture.current_position.x,
            y = gesture.current_position.y,
            time_delta_ms = gesture.time_delta_ms,
            delivered = deliver && self.handler.is_some(),
            "Pan gesture"
        );

        if deliver {
            if let Some(handler) = self.handler.as_mut() {
                handler.handle_pan_gesture(&gesture);
            }
        }
    }

    /// Build the reported gesture for `phase`, advancing the smoothing schedule.
    fn synthesize(&mut self, phase: GesturePhase, event: &TouchEvent) -> PanGestureEvent {
        let raw = event.primary().position;
        let mut gesture = PanGestureEvent {
            phase,
            current_position: raw,
            previous_position: raw,
            time_delta_ms: 0,
            time_ms: event.time_ms(),
            number_of_touches: event.point_count(),
        };

        let Some(previous) = self.history.previous().copied() else {
            // First sample of the gesture: nothing to measure against.
            self.previous_position = raw;
            return gesture;
        };

        let (previous_position, previous_time_ms) = if phase == GesturePhase::Started {
            // Report the whole onset, not just the last raw step.
            let elapsed = event.time_ms().saturating_sub(self.down_time_ms);
            if elapsed > self.config.minimum_smoothing_delay_ms {
                self.smoother
                    .arm(self.config.smoothing_steps(), raw - self.down_position);
            } else {
                self.smoother.disarm();
            }
            (self.down_position, self.down_time_ms)
        } else {
            (self.previous_position, previous.time_ms)
        };

        gesture.previous_position = previous_position;
        gesture.time_delta_ms = event.time_ms().saturating_sub(previous_time_ms);
        gesture.current_position = self.smoother.apply(raw);
        self.previous_position = gesture.current_position;

        gesture
    }
}

impl Default for PanGestureRecognizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for PanGestureRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanGestureRecognizer")
            .field("state", &self.state)
            .field("history_len", &self.history.len())
            .field("panning", &self.panning)
            .field("has_handler", &self.handler.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::GestureLog;
    use tactile_touch_model::touch::PointState;

    fn recognizer_with_log(config: PanConfig) -> (PanGestureRecognizer, GestureLog) {
        let log = GestureLog::new();
        let mut recognizer = PanGestureRecognizer::new(config).unwrap();
        recognizer.set_handler(log.clone());
        (recognizer, log)
    }

    fn feed(recognizer: &mut PanGestureRecognizer, events: &[(TimestampMs, PointState, f32, f32)]) {
        for &(t, state, x, y) in events {
            recognizer.process_event(&TouchEvent::single(t, state, x, y));
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PanConfig {
            minimum_touches: 2,
            maximum_touches: 1,
            ..Default::default()
        };
        assert!(PanGestureRecognizer::new(config).is_err());
    }

    #[test]
    fn test_started_reports_from_down_position() {
        let (mut recognizer, log) = recognizer_with_log(PanConfig::default());
        feed(
            &mut recognizer,
            &[
                (0, PointState::Down, 0.0, 0.0),
                (50, PointState::Motion, 0.0, 20.0),
                (60, PointState::Motion, 0.0, 20.0),
            ],
        );

        let events = log.events();
        assert_eq!(events.len(), 2);
        let started = events[1];
        assert_eq!(started.phase, GesturePhase::Started);
        assert_eq!(started.previous_position, Vector2::ZERO);
        assert_eq!(started.current_position, Vector2::new(0.0, 20.0));
        assert_eq!(started.time_delta_ms, 60);
        assert_eq!(started.time_ms, 60);
        assert_eq!(recognizer.smoothing_steps_remaining(), 0);
    }

    #[test]
    fn test_continuing_uses_last_reported_position() {
        let (mut recognizer, log) = recognizer_with_log(PanConfig::default());
        feed(
            &mut recognizer,
            &[
                (0, PointState::Down, 0.0, 0.0),
                (10, PointState::Motion, 0.0, 10.0),
                (20, PointState::Motion, 0.0, 20.0),
                (36, PointState::Motion, 0.0, 28.0),
            ],
        );

        let continuing = *log.events().last().unwrap();
        assert_eq!(continuing.phase, GesturePhase::Continuing);
        assert_eq!(continuing.previous_position, Vector2::new(0.0, 20.0));
        assert_eq!(continuing.current_position, Vector2::new(0.0, 28.0));
        assert_eq!(continuing.time_delta_ms, 16);
    }

    #[test]
    fn test_slow_start_arms_smoothing() {
        let (mut recognizer, log) = recognizer_with_log(PanConfig::default());
        feed(
            &mut recognizer,
            &[
                (0, PointState::Down, 0.0, 0.0),
                (150, PointState::Motion, 0.0, 10.0),
                (200, PointState::Motion, 0.0, 20.0),
            ],
        );

        // Ten steps of 2.0 each; the first emission pays back one of them.
        let started = *log.events().last().unwrap();
        assert_eq!(started.phase, GesturePhase::Started);
        assert_eq!(started.current_position, Vector2::new(0.0, 2.0));
        assert_eq!(recognizer.smoothing_steps_remaining(), 9);

        recognizer.process_event(&TouchEvent::single(216, PointState::Motion, 0.0, 20.0));
        let next = *log.events().last().unwrap();
        assert_eq!(next.previous_position, Vector2::new(0.0, 2.0));
        assert_eq!(next.current_position, Vector2::new(0.0, 4.0));
    }

    #[test]
    fn test_handler_replacement_takes_effect_immediately() {
        let (mut recognizer, first) = recognizer_with_log(PanConfig::default());
        recognizer.process_event(&TouchEvent::single(0, PointState::Down, 0.0, 0.0));

        let second = GestureLog::new();
        recognizer.set_handler(second.clone());
        recognizer.process_event(&TouchEvent::single(30, PointState::Up, 0.0, 0.0));

        assert_eq!(first.phases(), vec![GesturePhase::Possible]);
        assert_eq!(second.phases(), vec![GesturePhase::Cancelled]);
    }

    #[test]
    fn test_replace_handler_returns_previous() {
        let (mut recognizer, first) = recognizer_with_log(PanConfig::default());
        let second = GestureLog::new();

        let previous = recognizer.replace_handler(Some(Box::new(second.clone())));
        assert!(previous.is_some());
        feed(&mut recognizer, &[(0, PointState::Down, 0.0, 0.0)]);
        assert!(first.is_empty());
        assert_eq!(second.len(), 1);

        recognizer.replace_handler(previous);
        feed(&mut recognizer, &[(30, PointState::Up, 0.0, 0.0)]);
        assert_eq!(first.phases(), vec![GesturePhase::Cancelled]);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_cleared_handler_receives_nothing() {
        let (mut recognizer, log) = recognizer_with_log(PanConfig::default());
        recognizer.process_event(&TouchEvent::single(0, PointState::Down, 0.0, 0.0));
        recognizer.clear_handler();
        recognizer.process_event(&TouchEvent::single(30, PointState::Up, 0.0, 0.0));

        assert_eq!(log.phases(), vec![GesturePhase::Possible]);
        assert_eq!(recognizer.state(), RecognitionState::Clear);
    }

    #[test]
    fn test_no_handler_still_tracks_state() {
        let mut recognizer = PanGestureRecognizer::with_defaults();
        assert!(!recognizer.has_handler());
        feed(
            &mut recognizer,
            &[
                (0, PointState::Down, 0.0, 0.0),
                (10, PointState::Motion, 0.0, 10.0),
                (20, PointState::Motion, 0.0, 20.0),
            ],
        );
        assert_eq!(recognizer.state(), RecognitionState::Started);
        assert!(recognizer.is_panning());
    }

    #[test]
    fn test_closure_handler() {
        let mut recognizer = PanGestureRecognizer::with_defaults();
        let seen = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = seen.clone();
        recognizer.set_handler(move |_: &PanGestureEvent| counter.set(counter.get() + 1));

        recognizer.process_event(&TouchEvent::single(0, PointState::Down, 0.0, 0.0));
        assert_eq!(seen.get(), 1);
    }

    #[test]
    fn test_panning_only_suppresses_unstarted_emissions() {
        let config = PanConfig {
            delivery: DeliveryPolicy::PanningOnly,
            ..Default::default()
        };
        let (mut recognizer, log) = recognizer_with_log(config);

        // A tap never starts, so nothing is delivered.
        feed(
            &mut recognizer,
            &[(0, PointState::Down, 0.0, 0.0), (40, PointState::Up, 1.0, 1.0)],
        );
        assert!(log.is_empty());

        // A pan delivers from Started through Finished.
        feed(
            &mut recognizer,
            &[
                (100, PointState::Down, 0.0, 0.0),
                (110, PointState::Motion, 0.0, 10.0),
                (120, PointState::Motion, 0.0, 20.0),
                (130, PointState::Motion, 0.0, 30.0),
                (140, PointState::Up, 0.0, 30.0),
            ],
        );
        assert_eq!(
            log.phases(),
            vec![
                GesturePhase::Started,
                GesturePhase::Continuing,
                GesturePhase::Finished
            ]
        );
        assert!(!recognizer.is_panning());
    }

    #[test]
    fn test_out_of_order_time_saturates() {
        let (mut recognizer, log) = recognizer_with_log(PanConfig::default());
        feed(
            &mut recognizer,
            &[
                (100, PointState::Down, 0.0, 0.0),
                (110, PointState::Motion, 0.0, 10.0),
                (90, PointState::Motion, 0.0, 20.0),
            ],
        );
        let started = *log.events().last().unwrap();
        assert_eq!(started.phase, GesturePhase::Started);
        assert_eq!(started.time_delta_ms, 0);
    }
}
