//! Recognition state.

use serde::{Deserialize, Serialize};

/// Where the recognizer is in a gesture attempt.
///
/// The sole discriminator for how the next touch event is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionState {
    /// No touch sequence in progress.
    #[default]
    Clear,
    /// The required touches are down; waiting for enough motion.
    Possible,
    /// A pan is in progress.
    Started,
    /// The pan ended but the primary point is still down.
    Finished,
    /// The attempt was rejected; waiting for the primary point to lift.
    Failed,
}

impl RecognitionState {
    /// Whether a `Cancelled` emission is owed if the sequence is interrupted.
    pub fn is_active(self) -> bool {
        matches!(self, RecognitionState::Possible | RecognitionState::Started)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecognitionState::Clear => "clear",
            RecognitionState::Possible => "possible",
            RecognitionState::Started => "started",
            RecognitionState::Finished => "finished",
            RecognitionState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RecognitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
