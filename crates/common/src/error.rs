//! Error types shared across Tactile crates.

use std::path::PathBuf;

/// Top-level error type for Tactile operations.
#[derive(Debug, thiserror::Error)]
pub enum TactileError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid touch event: {message}")]
    InvalidTouchEvent { message: String },

    #[error("Replay error: {message}")]
    Replay { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using TactileError.
pub type TactileResult<T> = Result<T, TactileError>;

impl TactileError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_touch_event(msg: impl Into<String>) -> Self {
        Self::InvalidTouchEvent {
            message: msg.into(),
        }
    }

    pub fn replay(msg: impl Into<String>) -> Self {
        Self::Replay {
            message: msg.into(),
        }
    }
}
