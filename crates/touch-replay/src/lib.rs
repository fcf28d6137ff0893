//! Tactile Replay
//!
//! Drives a pan recognizer from a recorded or scripted touch stream.
//! Uses a pluggable source architecture:
//!
//! - **Stub:** Pre-loaded events (tests, synthetic traces)
//! - **JSONL:** Touch streams recorded one event per line
//!
//! Emitted gestures can be written in append-only JSONL format.

pub mod sources;
pub mod writer;

use serde::Serialize;

use tactile_common::error::{TactileError, TactileResult};
use tactile_gesture_core::{GestureLog, PanGestureRecognizer, RecognitionState};
use tactile_touch_model::gesture::{GesturePhase, PanGestureEvent};
use tactile_touch_model::touch::TouchEvent;

/// Trait for touch event sources.
pub trait TouchSource {
    /// Fetch the next touch event. Returns `None` once the source is exhausted.
    fn poll(&mut self) -> TactileResult<Option<TouchEvent>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// What a replay produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    pub events_processed: u64,
    /// Malformed entries the source reported and the driver skipped.
    pub events_skipped: u64,
    pub possible: u64,
    pub started: u64,
    pub continuing: u64,
    pub finished: u64,
    pub cancelled: u64,
    pub final_state: RecognitionState,
}

impl ReplaySummary {
    fn record(&mut self, phase: GesturePhase) {
        let counter = match phase {
            GesturePhase::Possible => &mut self.possible,
            GesturePhase::Started => &mut self.started,
            GesturePhase::Continuing => &mut self.continuing,
            GesturePhase::Finished => &mut self.finished,
            GesturePhase::Cancelled => &mut self.cancelled,
        };
        *counter += 1;
    }

    /// Total gestures delivered.
    pub fn gestures(&self) -> u64 {
        self.possible + self.started + self.continuing + self.finished + self.cancelled
    }
}

/// Pumps a touch source through a recognizer.
pub struct ReplayDriver {
    source: Box<dyn TouchSource>,
    recognizer: PanGestureRecognizer,
}

impl ReplayDriver {
    pub fn new(source: Box<dyn TouchSource>, recognizer: PanGestureRecognizer) -> Self {
        Self { source, recognizer }
    }

    /// Replay the whole source, handing each delivered gesture to `on_gesture`.
    ///
    /// The driver owns the recognizer's handler while the replay runs; any
    /// handler registered beforehand receives nothing during the replay and is
    /// restored when `run` returns. Malformed entries are logged and skipped;
    /// I/O failures and errors returned by `on_gesture` abort the replay.
    pub fn run<F>(&mut self, mut on_gesture: F) -> TactileResult<ReplaySummary>
    where
        F: FnMut(&PanGestureEvent) -> TactileResult<()>,
    {
        tracing::info!(source = %self.source.name(), "Replay started");

        let log = GestureLog::new();
        let previous = self.recognizer.replace_handler(Some(Box::new(log.clone())));
        let result = self.pump(&log, &mut on_gesture);
        self.recognizer.replace_handler(previous);

        let summary = result?;
        tracing::info!(
            events = summary.events_processed,
            skipped = summary.events_skipped,
            gestures = summary.gestures(),
            "Replay finished"
        );
        Ok(summary)
    }

    fn pump<F>(&mut self, log: &GestureLog, on_gesture: &mut F) -> TactileResult<ReplaySummary>
    where
        F: FnMut(&PanGestureEvent) -> TactileResult<()>,
    {
        let mut summary = ReplaySummary::default();
        loop {
            match self.source.poll() {
                Ok(Some(event)) => {
                    self.recognizer.process_event(&event);
                    summary.events_processed += 1;
                    for gesture in log.take() {
                        summary.record(gesture.phase);
                        on_gesture(&gesture)?;
                    }
                }
                Ok(None) => break,
                Err(e @ (TactileError::InvalidTouchEvent { .. } | TactileError::Json(_))) => {
                    tracing::warn!(error = %e, "Skipping malformed touch event");
                    summary.events_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        summary.final_state = self.recognizer.state();
        Ok(summary)
    }

    pub fn recognizer(&self) -> &PanGestureRecognizer {
        &self.recognizer
    }

    /// Give the recognizer back, e.g. to continue with another source.
    pub fn into_recognizer(self) -> PanGestureRecognizer {
        self.recognizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{JsonlSource, StubSource};
    use tactile_touch_model::synth::SyntheticGesture;
    use tactile_touch_model::touch::PointState;
    use tactile_touch_model::vector::Vector2;

    #[test]
    fn test_replay_counts_phases() {
        let mut events = SyntheticGesture::Tap.trace(Vector2::ZERO);
        events.extend(
            SyntheticGesture::FastPan
                .trace(Vector2::ZERO)
                .into_iter()
                .map(|e| TouchEvent::new(e.time_ms() + 1_000, e.points().to_vec()).unwrap()),
        );
        let total = events.len() as u64;

        let mut driver = ReplayDriver::new(
            Box::new(StubSource::new(events)),
            PanGestureRecognizer::with_defaults(),
        );
        let mut phases = Vec::new();
        let summary = driver
            .run(|g| {
                phases.push(g.phase);
                Ok(())
            })
            .unwrap();

        assert_eq!(summary.events_processed, total);
        assert_eq!(summary.possible, 2);
        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.started, 1);
        assert_eq!(summary.finished, 1);
        assert_eq!(summary.gestures(), phases.len() as u64);
        assert_eq!(summary.final_state, RecognitionState::Clear);
        assert_eq!(driver.recognizer().history_len(), 0);
    }

    #[test]
    fn test_recognizer_state_carries_across_sources() {
        let events = SyntheticGesture::FastPan.trace(Vector2::ZERO);
        let (first, rest) = events.split_at(3);

        let mut driver = ReplayDriver::new(
            Box::new(StubSource::new(first.to_vec())),
            PanGestureRecognizer::with_defaults(),
        );
        let summary = driver.run(|_| Ok(())).unwrap();
        assert_eq!(summary.final_state, RecognitionState::Started);

        let mut driver =
            ReplayDriver::new(Box::new(StubSource::new(rest.to_vec())), driver.into_recognizer());
        let summary = driver.run(|_| Ok(())).unwrap();
        assert_eq!(summary.started, 0);
        assert_eq!(summary.finished, 1);
        assert_eq!(summary.final_state, RecognitionState::Clear);
    }

    #[test]
    fn test_replay_skips_malformed_lines() {
        let jsonl = concat!(
            "# recorded touch stream\n",
            r#"{"t":0,"points":[{"state":"down","x":0.0,"y":0.0}]}"#,
            "\n",
            r#"{"t":5,"points":[]}"#,
            "\n",
            "not json\n",
            r#"{"t":20,"points":[{"state":"up","x":1.0,"y":0.0}]}"#,
            "\n",
        );
        let source = JsonlSource::new(std::io::Cursor::new(jsonl.as_bytes().to_vec()));
        let mut driver =
            ReplayDriver::new(Box::new(source), PanGestureRecognizer::with_defaults());

        let summary = driver.run(|_| Ok(())).unwrap();
        assert_eq!(summary.events_processed, 2);
        assert_eq!(summary.events_skipped, 2);
        assert_eq!(summary.possible, 1);
        assert_eq!(summary.cancelled, 1);
    }

    #[test]
    fn test_replay_skips_invalid_utf8_lines() {
        let mut jsonl = br#"{"t":0,"points":[{"state":"down","x":0.0,"y":0.0}]}"#.to_vec();
        jsonl.extend_from_slice(b"\n\xff\xfe garbage\n");
        jsonl.extend_from_slice(br#"{"t":20,"points":[{"state":"up","x":1.0,"y":0.0}]}"#);
        jsonl.push(b'\n');
        let source = JsonlSource::new(std::io::Cursor::new(jsonl));
        let mut driver =
            ReplayDriver::new(Box::new(source), PanGestureRecognizer::with_defaults());

        let summary = driver.run(|_| Ok(())).unwrap();
        assert_eq!(summary.events_processed, 2);
        assert_eq!(summary.events_skipped, 1);
        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.final_state, RecognitionState::Clear);
    }

    #[test]
    fn test_replay_restores_caller_handler() {
        let caller = GestureLog::new();
        let mut recognizer = PanGestureRecognizer::with_defaults();
        recognizer.set_handler(caller.clone());

        let mut driver = ReplayDriver::new(
            Box::new(StubSource::new(SyntheticGesture::Tap.trace(Vector2::ZERO))),
            recognizer,
        );
        let summary = driver.run(|_| Ok(())).unwrap();
        assert_eq!(summary.gestures(), 2);
        assert!(caller.is_empty());

        let mut recognizer = driver.into_recognizer();
        assert!(recognizer.has_handler());
        recognizer.process_event(&TouchEvent::single(5_000, PointState::Down, 0.0, 0.0));
        assert_eq!(caller.phases(), vec![GesturePhase::Possible]);
    }

    #[test]
    fn test_run_without_prior_handler_leaves_none() {
        let mut driver = ReplayDriver::new(
            Box::new(StubSource::new(SyntheticGesture::Tap.trace(Vector2::ZERO))),
            PanGestureRecognizer::with_defaults(),
        );
        driver.run(|_| Err(TactileError::replay("sink closed"))).unwrap_err();
        assert!(!driver.recognizer().has_handler());
    }

    #[test]
    fn test_sink_error_aborts_replay() {
        let events = SyntheticGesture::Tap.trace(Vector2::ZERO);
        let mut driver = ReplayDriver::new(
            Box::new(StubSource::new(events)),
            PanGestureRecognizer::with_defaults(),
        );
        let result = driver.run(|_| Err(TactileError::replay("sink closed")));
        assert!(matches!(result, Err(TactileError::Replay { .. })));
    }
}
