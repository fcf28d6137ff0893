//! Tactile Gesture Core: the pan recognizer
//!
//! Converts a stream of multi-point touch snapshots into pan gesture
//! notifications for assistive-technology consumers:
//! - **State:** The recognition state machine and its pure transition plan
//! - **History:** Bounded record of the samples since the primary touch went down
//! - **Threshold:** Phased removal of the skipped pan threshold from reported positions
//! - **Recognizer:** Executes transition plans and delivers gestures to a handler
//!
//! This crate is pure computation: no I/O, no clock reads. All timing
//! comes from touch event timestamps.

pub mod handler;
pub mod history;
pub mod recognizer;
pub mod state;
pub mod threshold;
pub mod transition;

pub use handler::{GestureLog, PanGestureHandler};
pub use recognizer::PanGestureRecognizer;
pub use state::RecognitionState;
